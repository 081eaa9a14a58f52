//! Functional combinators over [`crate::Task`], each an inherent method
//! returning a freshly-constructed derived task rather than mutating `self`
//! (the one exception is [`crate::Task::with_timeout`], which the spec calls
//! out as wrapping its receiver in place).
//!
//! # 设计背景（Why）
//! - Every combinator shares the same shape: build a new `Task<R>` whose body
//!   schedules its upstream(s) via the supplied `Context`, registers a
//!   listener on the upstream's promise (which fires synchronously if the
//!   upstream has already settled, so a chain of combinators costs one
//!   listener hop each rather than a fresh scheduler round-trip: composing
//!   `.map(f).map(g)` costs no more than a single transform once the inner
//!   `Promise` listener machinery is accounted for), and finally commits the
//!   derived task's own `SettablePromise`. [`join::JoinBarrier`] factors the
//!   countdown/first-failure-wins bookkeeping `par2..par9` all share.

mod join;
mod map;
mod flat_map;
mod and_then;
mod side_effect;
mod recover;
mod with_try;
mod timeout;
pub mod par;

pub use with_try::Attempt;
pub use par::{par2, par3, par4, par5, par6, par7, par8, par9};
