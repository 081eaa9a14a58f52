//! Sealed-trait marker used to keep a handful of scheduler-facing contracts
//! implementable only by this crate's own types.
//!
//! # 设计背景（Why）
//! - `Cancellable` and `Schedulable` are capability markers handed to external
//!   `Context`/`Engine` collaborators; they must not be re-implemented by
//!   arbitrary downstream types pretending to be a task, or the single-run /
//!   single-transition invariants this crate enforces internally could be
//!   bypassed.
//!
//! # 契约说明（What）
//! - `Sealed` has no methods; it exists purely to appear as a supertrait bound
//!   that downstream crates cannot satisfy, since they cannot name or
//!   implement a private module's trait.

pub trait Sealed {}
