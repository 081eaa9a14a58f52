//! `Task::with_timeout`: race this task's body against a timer, wrapping the
//! task in place rather than deriving a new one.

use crate::context::Context;
use crate::error::{ArgumentError, Failure};
use crate::promise::{Promise, SettablePromise};
use crate::task::{AnyTask, Task};
use crate::trace::TraceNode;
use crate::wrapper::ContextRunWrapper;
use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use spin::Mutex;

/// State shared between the timer task's completion and the body's
/// completion — whichever commits first wins.
struct TimeoutState<T> {
    settable: SettablePromise<T>,
    committed: Arc<AtomicBool>,
}

/// A [`ContextRunWrapper`] that starts a timer alongside the body and commits
/// the owner's result to whichever of {body, timer} settles first.
///
/// # 设计背景（Why）
/// - A CAS-guarded single-commit pattern generalized from a boolean flag to
///   an arbitrary wrapped promise: both the timer task and the body's own
///   promise race to call `compare_exchange` on the same `AtomicBool`, and
///   only the winner's outcome reaches `settable`.
pub(crate) struct TimeoutWrapper<T> {
    duration: Duration,
    state: Mutex<Option<TimeoutState<T>>>,
}

impl<T: Clone + fmt::Debug + Send + 'static> TimeoutWrapper<T> {
    fn new(duration: Duration) -> Self {
        TimeoutWrapper {
            duration,
            state: Mutex::new(None),
        }
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> ContextRunWrapper<T> for TimeoutWrapper<T> {
    fn before(&self, ctx: &Arc<dyn Context>, owner: &AnyTask) {
        let settable = SettablePromise::new();
        let committed = Arc::new(AtomicBool::new(false));
        *self.state.lock() = Some(TimeoutState {
            settable: settable.clone(),
            committed: committed.clone(),
        });

        let duration = self.duration;
        let timer_task: Task<()> = Task::async_task(
            alloc::format!("{}.timeout_timer", owner.task_id()),
            crate::priority::Priority::MAX,
            true,
            move |_ctx| Promise::settled(Ok(())),
        );
        let committed_for_timer = committed.clone();
        timer_task.promise_handle().on_complete(move |_outcome| {
            if committed_for_timer
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                settable.fail(Failure::timeout(duration));
            }
        });
        ctx.create_timer(duration, timer_task.erased());
    }

    fn after(&self, _ctx: &Arc<dyn Context>, _owner: &AnyTask, body: Promise<T>) -> Promise<T> {
        let TimeoutState { settable, committed } = self
            .state
            .lock()
            .take()
            .expect("before() always runs exactly once ahead of after()");

        let result = settable.promise();
        body.on_complete(move |outcome| {
            if committed
                .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
                .is_ok()
            {
                match outcome {
                    Ok(value) => {
                        settable.done(value);
                    }
                    Err(error) => {
                        settable.fail(error);
                    }
                }
            }
        });
        result
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// Wrap this task's execution with a timeout: if `duration` elapses
    /// before the body settles, this task fails with
    /// [`Failure::timeout`](crate::error::Failure::timeout) instead —
    /// exactly one of {body outcome, timeout} ever commits. Returns `self`
    /// (attached in place), matching the wrapper's "wraps `U` in place"
    /// contract; only legal before `context_run` has started.
    pub fn with_timeout(&self, duration: Duration) -> Result<Task<T>, ArgumentError> {
        self.wrap_context_run(Arc::new(TimeoutWrapper::new(duration)))?;
        Ok(self.clone())
    }
}
