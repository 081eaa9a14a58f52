//! The scheduling contract the core *consumes* but never implements.
//!
//! # 设计背景（Why）
//! - `Context`/`Engine` are external collaborators by design — the
//!   priority-scheduling loop, the thread pool, the timer wheel all live
//!   outside this crate. [`Context`] and
//!   [`PendingRunner`] are therefore pure contracts: a host (a production
//!   engine, or the in-memory mock under `tests/contracts/support`) supplies
//!   the implementation.
//! - Bodies that suspend (e.g. `flat_map`'s body returns before its inner
//!   task has run) must be able to call back into the `Context` later, on
//!   whatever thread completes the predecessor — so the body receives an
//!   owned, cheaply-cloneable `Arc<dyn Context>` rather than a borrowed
//!   `&dyn Context` tied to the initial call's stack frame.

use crate::AnyTask;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::time::Duration;

/// External scheduling collaborator.
///
/// # 契约说明（What）
/// - `run`: schedule `task` for execution (`created` → `scheduled`); the
///   `Context` implementation picks the thread and respects task priority.
/// - `after`: returns a [`PendingRunner`] that defers running a task until
///   every predecessor has terminated.
/// - `create_timer`: schedule `task` to run no sooner than `duration` from
///   now, at the highest practical priority (used by `with_timeout`).
pub trait Context: Send + Sync {
    fn run(&self, task: AnyTask);
    fn after(&self, predecessors: Vec<AnyTask>) -> Box<dyn PendingRunner>;
    fn create_timer(&self, duration: Duration, task: AnyTask);
}

/// Returned by [`Context::after`]; schedules a task once its predecessors
/// have all terminated.
///
/// # 契约说明（What）
/// - `run`: schedule regardless of how the predecessors terminated.
/// - `run_side_effect`: schedule only if every predecessor succeeded; if any
///   predecessor failed or was cancelled, the task is cancelled instead of
///   run (see `Task::with_side_effect`).
pub trait PendingRunner {
    fn run(self: Box<Self>, task: AnyTask);
    fn run_side_effect(self: Box<Self>, task: AnyTask);
}
