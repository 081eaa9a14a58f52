//! A minimal in-memory `Context`/`PendingRunner` pair for driving contract
//! tests without a real scheduler.
//!
//! Every `run` executes the task's body synchronously on the calling thread
//! (mirroring the `InlineContext` test double in `src/factories.rs`, just
//! shared across the whole contract suite and extended with working
//! `after`/`create_timer` support). `create_timer` does *not* fire
//! immediately — timers queue up and only run when a test explicitly calls
//! `fire_pending_timers()`, so a test can assert "the body wins the race"
//! simply by never firing the timer.
//!
//! `run` also tracks which task is currently dispatching, so a task spawned
//! reentrantly from inside another task's own `context_run` (e.g. the
//! follow-up task `flat_map` discovers once its upstream settles) is run
//! with that outer task recorded as its `parent`.

use parseq::task::{AnyTask, Cancellable, Schedulable, TaskState};
use parseq::{Context, PendingRunner};
use std::borrow::Cow;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct MockContext {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    pending_timers: Mutex<Vec<AnyTask>>,
    running_stack: Mutex<Vec<AnyTask>>,
}

impl MockContext {
    pub fn new() -> Self {
        MockContext::default()
    }

    fn handle(&self) -> Arc<dyn Context> {
        Arc::new(self.clone())
    }

    /// Run every timer task queued by `create_timer` so far, as if their
    /// durations had all elapsed.
    pub fn fire_pending_timers(&self) {
        let timers = core::mem::take(&mut *self.inner.pending_timers.lock().unwrap());
        for timer in timers {
            self.run(timer);
        }
    }

    pub fn pending_timer_count(&self) -> usize {
        self.inner.pending_timers.lock().unwrap().len()
    }
}

impl Context for MockContext {
    fn run(&self, task: AnyTask) {
        task.mark_scheduled();
        let parent = self.inner.running_stack.lock().unwrap().last().cloned();
        self.inner.running_stack.lock().unwrap().push(task.clone());
        task.context_run(self.handle(), None, parent.as_ref(), &[]);
        self.inner.running_stack.lock().unwrap().pop();
    }

    fn after(&self, predecessors: Vec<AnyTask>) -> Box<dyn PendingRunner> {
        Box::new(MockPendingRunner {
            ctx: self.clone(),
            predecessors,
        })
    }

    fn create_timer(&self, _duration: Duration, task: AnyTask) {
        task.mark_scheduled();
        self.inner.pending_timers.lock().unwrap().push(task);
    }
}

struct MockPendingRunner {
    ctx: MockContext,
    predecessors: Vec<AnyTask>,
}

impl PendingRunner for MockPendingRunner {
    fn run(self: Box<Self>, task: AnyTask) {
        self.ctx.run(task);
    }

    fn run_side_effect(self: Box<Self>, task: AnyTask) {
        let all_succeeded = self
            .predecessors
            .iter()
            .all(|predecessor| predecessor.state() == TaskState::Done);
        if all_succeeded {
            self.ctx.run(task);
        } else {
            task.cancel(Cow::Borrowed("predecessor did not succeed"));
        }
    }
}
