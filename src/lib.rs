//! ParSeq: an asynchronous task-composition engine — a DAG of deferred
//! computations, priority-scheduled by an external `Context`/`Engine`, with a
//! small set of functional combinators (`map`, `flat_map`, `and_then`,
//! `with_side_effect`, `recover`, `with_try`, `with_timeout`, `par2..par9`)
//! and a structured execution-trace model.
//!
//! # 设计背景（Why）
//! - `no_std + alloc` by default, with `std`-gated glue for the pieces that
//!   only make sense with an allocator and an OS clock/thread (real
//!   `Instant`s, the `arc-swap`-backed configuration handle, panic-to-Failure
//!   conversion). Trait-based collaborator contracts
//!   ([`context::Context`], [`context::PendingRunner`],
//!   [`wrapper::ContextRunWrapper`]) keep the scheduling loop, thread pool,
//!   and timer wheel entirely outside this crate — ParSeq builds and
//!   describes a task graph; something else runs it.
//!
//! # 模块概览（How）
//! - [`promise`]: single-assignment result cells.
//! - [`task`]: the base `Task<T>` type and its scheduler-facing
//!   [`task::Schedulable`] surface.
//! - [`combinators`]: `map`/`flat_map`/`and_then`/`with_side_effect`/
//!   `recover`/`with_try`/`with_timeout`/`par2..par9`, as inherent methods on
//!   [`task::Task`].
//! - [`factories`]: leaf-task constructors (`value`, `failure`, `callable`,
//!   `action`, `blocking`).
//! - [`trace`]: the structured execution-trace model.
//! - [`context`] / [`wrapper`]: the external scheduling contracts this crate
//!   consumes.
//! - [`error`]: [`error::Failure`] (the currency that flows through promises)
//!   and [`error::ArgumentError`] (synchronous misuse errors).
//! - [`priority`]: the validated [`priority::Priority`] newtype.
//! - [`observability`]: logging/metrics facades a host wires to a real
//!   backend.
//! - [`configuration`]: engine-wide defaults and their hot-reload handle.
//!
//! # 风险与权衡（Trade-offs）
//! - `Task<T>`/`Promise<T>` require `T: Clone + Debug + Send + 'static`. This
//!   is the one deliberate departure from a direct value-semantics
//!   translation: a task may fan out to several combinators, each needing its
//!   own copy of the eventual value, and the trace model needs something to
//!   render for a terminal value/error summary. See `DESIGN.md` for the full
//!   rationale.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod arc_swap;
pub mod combinators;
pub mod configuration;
pub mod context;
pub mod error;
pub mod factories;
pub mod observability;
pub mod priority;
pub mod promise;
mod sealed;
pub mod task;
pub mod time;
pub mod trace;
pub mod wrapper;

pub use combinators::Attempt;
pub use context::{Context, PendingRunner};
pub use error::{ArgumentError, Failure};
pub use priority::{Priority, DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};
pub use promise::{Outcome, Promise, SettablePromise};
pub use task::{AnyTask, Cancellable, Schedulable, Task, TaskState};
pub use trace::{RelationshipKind, ShallowTrace, Trace, TraceNode};
pub use wrapper::ContextRunWrapper;

pub use factories::{action, blocking, callable, failure, value};
