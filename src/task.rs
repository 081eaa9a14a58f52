//! The base task type: a promise plus an execution body, scheduled and run
//! by an external [`crate::context::Context`].
//!
//! # 设计背景（Why）
//! - `Task<T>` is a cheap `Arc`-backed handle (mirrors `Promise<T>`'s
//!   handle/state split) so the same task can be held by its original
//!   creator, by a combinator that consumes it as an upstream, and by the
//!   `Context` that schedules it, all without cloning the underlying state.
//! - `T: Clone + Debug + Send + 'static` is the one place this crate departs
//!   from a direct value-semantics translation of the original model: a task
//!   may fan out to multiple combinators, each registering its own listener
//!   on the same upstream promise, so every listener needs its own copy of
//!   the eventual value; and the trace model's value/error summary (spec
//!   §3) needs something to render, hence `Debug`. Both bounds are recorded
//!   as an Open Question resolution in `DESIGN.md`.

use crate::context::Context;
use crate::error::{ArgumentError, Failure};
use crate::observability::logging::{LogRecord, LogSeverity, Logger};
use crate::priority::Priority;
use crate::promise::{Outcome, Promise, SettablePromise};
use crate::sealed::Sealed;
use crate::time::MonotonicInstant;
use crate::trace::{summarize, OutcomeSummary, Relationship, RelationshipKind, ShallowTrace, TaskId, Trace, TraceNode, TraceState};
use crate::wrapper::ContextRunWrapper;
use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicI32, AtomicU8, Ordering};
use spin::Mutex;

/// The task lifecycle. `created → scheduled → running → {done, failed,
/// cancelled}`; the last three are absorbing.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum TaskState {
    Created = 0,
    Scheduled = 1,
    Running = 2,
    Done = 3,
    Failed = 4,
    Cancelled = 5,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed | TaskState::Cancelled)
    }

    fn from_u8(value: u8) -> Self {
        match value {
            0 => TaskState::Created,
            1 => TaskState::Scheduled,
            2 => TaskState::Running,
            3 => TaskState::Done,
            4 => TaskState::Failed,
            _ => TaskState::Cancelled,
        }
    }
}

impl From<TaskState> for TraceState {
    fn from(value: TaskState) -> Self {
        match value {
            TaskState::Created => TraceState::Created,
            TaskState::Scheduled => TraceState::Scheduled,
            TaskState::Running => TraceState::Running,
            TaskState::Done => TraceState::Done,
            TaskState::Failed => TraceState::Failed,
            TaskState::Cancelled => TraceState::Cancelled,
        }
    }
}

/// Type-erased handle to any schedulable task, regardless of its value type.
pub type AnyTask = Arc<dyn Schedulable>;

/// The scheduler-facing surface of a task — reserved for `Context`
/// implementations, not end users.
///
/// # 契约说明（What）
/// - `mark_scheduled`: record the `created → scheduled` transition; called
///   by a `Context` the moment it accepts the task into its queue.
/// - `context_run`: record `scheduled → running`, invoke the body (through
///   any attached wrapper), and hook the resulting promise to this task's
///   own terminal state. Must be called at most once per task.
pub trait Schedulable: TraceNode + Cancellable {
    fn priority(&self) -> Priority;
    fn state(&self) -> TaskState;
    fn mark_scheduled(&self);
    fn context_run(
        &self,
        ctx: Arc<dyn Context>,
        logger: Option<&dyn Logger>,
        parent: Option<&AnyTask>,
        predecessors: &[AnyTask],
    );
    fn add_relationship(&self, kind: RelationshipKind, other: Arc<dyn TraceNode>);
}

/// Cancellation capability, sealed so only this crate's own task type may
/// implement it — an external type cannot masquerade as a cancellable node
/// in someone else's graph.
pub trait Cancellable: Sealed {
    /// Transition to `cancelled` if not already terminal. Returns `true`
    /// only for the call that performs the transition.
    fn cancel(&self, reason: Cow<'static, str>) -> bool;
}

type Body<T> = Box<dyn FnOnce(Arc<dyn Context>) -> Promise<T> + Send>;

struct TaskInner<T: Clone + fmt::Debug + Send + 'static> {
    id: TaskId,
    name: Cow<'static, str>,
    priority: AtomicI32,
    state: AtomicU8,
    system_hidden: bool,
    settable: SettablePromise<T>,
    body: Mutex<Option<Body<T>>>,
    wrapper: Mutex<Option<Arc<dyn ContextRunWrapper<T>>>>,
    relationships: Mutex<Vec<Relationship>>,
    scheduled_at: Mutex<Option<MonotonicInstant>>,
    started_at: Mutex<Option<MonotonicInstant>>,
    ended_at: Mutex<Option<MonotonicInstant>>,
    run_started: AtomicBool,
}

/// A node in the task graph and a handle to its eventual result.
pub struct Task<T: Clone + fmt::Debug + Send + 'static> {
    inner: Arc<TaskInner<T>>,
}

impl<T: Clone + fmt::Debug + Send + 'static> Clone for Task<T> {
    fn clone(&self) -> Self {
        Task {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// The base factory: a name, priority, visibility flag, and a body that,
    /// given a `Context`, produces the promise that will drive this task's
    /// own result. Every other factory and combinator is built on top of
    /// this one.
    pub fn async_task(
        name: impl Into<Cow<'static, str>>,
        priority: Priority,
        system_hidden: bool,
        body: impl FnOnce(Arc<dyn Context>) -> Promise<T> + Send + 'static,
    ) -> Self {
        Task {
            inner: Arc::new(TaskInner {
                id: TaskId::next(),
                name: name.into(),
                priority: AtomicI32::new(priority.get()),
                state: AtomicU8::new(TaskState::Created as u8),
                system_hidden,
                settable: SettablePromise::new(),
                body: Mutex::new(Some(Box::new(body))),
                wrapper: Mutex::new(None),
                relationships: Mutex::new(Vec::new()),
                scheduled_at: Mutex::new(None),
                started_at: Mutex::new(None),
                ended_at: Mutex::new(None),
                run_started: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> Cow<'static, str> {
        self.inner.name.clone()
    }

    pub fn priority(&self) -> Priority {
        Priority::new(self.inner.priority.load(Ordering::Acquire))
            .expect("priority was validated at construction/set_priority time")
    }

    /// Change this task's priority. Only legal in the `created` state —
    /// priority is mutable only before scheduling.
    pub fn set_priority(&self, priority: Priority) -> Result<(), ArgumentError> {
        if self.state() != TaskState::Created {
            // Setting priority after scheduling would race the scheduler's
            // read of it; silently ignoring would hide the bug, so this is
            // surfaced synchronously instead.
            return Err(ArgumentError::PriorityNotMutableAfterScheduling);
        }
        self.inner.priority.store(priority.get(), Ordering::Release);
        Ok(())
    }

    /// A read-only handle to this task's result promise.
    pub fn promise_handle(&self) -> Promise<T> {
        self.inner.settable.promise()
    }

    /// Attach a wrapper, composed outside any wrapper already present (its
    /// `before` runs first, its `after` runs last). Only legal before
    /// `context_run` has started.
    pub fn wrap_context_run(&self, wrapper: Arc<dyn ContextRunWrapper<T>>) -> Result<(), ArgumentError> {
        if self.inner.run_started.load(Ordering::Acquire) {
            return Err(ArgumentError::WrapperAttachedAfterRunStarted);
        }
        let mut guard = self.inner.wrapper.lock();
        let combined = crate::wrapper::compose(guard.take(), wrapper);
        *guard = Some(combined);
        Ok(())
    }

    /// Record a relationship this task holds toward `other`. Combinators use
    /// this for `Predecessor`/`Timer`/… edges they derive themselves;
    /// `Parent` edges are instead recorded by `context_run` from whatever the
    /// dispatching `Context` passes in, since only the `Context` knows which
    /// task's execution spawned this one.
    pub fn add_relationship(&self, kind: RelationshipKind, other: Arc<dyn TraceNode>) {
        self.inner.relationships.lock().push(Relationship { kind, other });
    }

    pub fn relationships(&self) -> Vec<Relationship> {
        self.inner.relationships.lock().clone()
    }

    pub fn shallow_trace(&self) -> ShallowTrace {
        let state: TaskState = TaskState::from_u8(self.inner.state.load(Ordering::Acquire));
        let outcome = self.inner.settable.promise().peek().map(|outcome| match outcome {
            Ok(value) => OutcomeSummary::Value(summarize(&value)),
            Err(error) => OutcomeSummary::Error(summarize(&error)),
        });
        ShallowTrace {
            id: self.inner.id,
            name: self.inner.name.clone(),
            state: state.into(),
            scheduled_at: *self.inner.scheduled_at.lock(),
            started_at: *self.inner.started_at.lock(),
            ended_at: *self.inner.ended_at.lock(),
            outcome,
            system_hidden: self.inner.system_hidden,
        }
    }

    pub fn trace(&self) -> Trace {
        Trace::of(self)
    }

    /// Erase this task's value type for use as a `Context`-facing handle or
    /// as the `other` side of a [`Relationship`].
    pub fn erased(&self) -> AnyTask {
        Arc::new(self.clone())
    }

    fn transition(&self, to: TaskState) -> bool {
        let mut current = self.inner.state.load(Ordering::Acquire);
        loop {
            if TaskState::from_u8(current).is_terminal() {
                return false;
            }
            match self.inner.state.compare_exchange_weak(
                current,
                to as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(observed) => current = observed,
            }
        }
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Sealed for Task<T> {}

impl<T: Clone + fmt::Debug + Send + 'static> Cancellable for Task<T> {
    fn cancel(&self, reason: Cow<'static, str>) -> bool {
        if !self.transition(TaskState::Cancelled) {
            return false;
        }
        *self.inner.ended_at.lock() = Some(MonotonicInstant::now());
        self.inner.settable.fail(Failure::cancelled(reason));
        true
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> TraceNode for Task<T> {
    fn task_id(&self) -> TaskId {
        self.inner.id
    }

    fn shallow_trace(&self) -> ShallowTrace {
        Task::shallow_trace(self)
    }

    fn relationships(&self) -> Vec<Relationship> {
        Task::relationships(self)
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Schedulable for Task<T> {
    fn priority(&self) -> Priority {
        Task::priority(self)
    }

    fn state(&self) -> TaskState {
        TaskState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    fn mark_scheduled(&self) {
        if self.transition(TaskState::Scheduled) {
            *self.inner.scheduled_at.lock() = Some(MonotonicInstant::now());
        }
    }

    fn context_run(
        &self,
        ctx: Arc<dyn Context>,
        logger: Option<&dyn Logger>,
        parent: Option<&AnyTask>,
        predecessors: &[AnyTask],
    ) {
        if self.inner.run_started.swap(true, Ordering::AcqRel) {
            return;
        }
        if !self.transition(TaskState::Running) {
            return;
        }
        *self.inner.started_at.lock() = Some(MonotonicInstant::now());

        for predecessor in predecessors {
            self.add_relationship(RelationshipKind::Predecessor, predecessor.clone());
        }

        if let Some(parent) = parent {
            self.add_relationship(RelationshipKind::Parent, parent.clone());
        }

        if let Some(logger) = logger {
            logger.log(&LogRecord::new(
                alloc::format!(
                    "task '{}' running (parent={})",
                    self.inner.name,
                    parent.map(|p| alloc::format!("{}", p.task_id())).unwrap_or_else(|| "none".into())
                ),
                LogSeverity::Debug,
                Some("parseq.task"),
            ));
        }

        let body = self.inner.body.lock().take();
        let Some(body) = body else {
            return;
        };

        let wrapper = self.inner.wrapper.lock().clone();
        let self_handle: AnyTask = self.erased();

        if let Some(wrapper) = wrapper {
            wrapper.before(&ctx, &self_handle);
            let body_promise = body(ctx.clone());
            let result_promise = wrapper.after(&ctx, &self_handle, body_promise);
            self.hook_result(result_promise, logger);
        } else {
            let body_promise = body(ctx);
            self.hook_result(body_promise, logger);
        }
    }

    fn add_relationship(&self, kind: RelationshipKind, other: Arc<dyn TraceNode>) {
        Task::add_relationship(self, kind, other)
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    fn hook_result(&self, result_promise: Promise<T>, _logger: Option<&dyn Logger>) {
        let inner = self.inner.clone();
        result_promise.on_complete(move |outcome: Outcome<T>| {
            let terminal = match &outcome {
                Ok(_) => TaskState::Done,
                Err(e) if e.is_cancelled() => TaskState::Cancelled,
                Err(_) => TaskState::Failed,
            };
            let mut current = inner.state.load(Ordering::Acquire);
            loop {
                if TaskState::from_u8(current).is_terminal() {
                    break;
                }
                match inner.state.compare_exchange_weak(
                    current,
                    terminal as u8,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => break,
                    Err(observed) => current = observed,
                }
            }
            *inner.ended_at.lock() = Some(MonotonicInstant::now());
            match outcome {
                Ok(v) => {
                    inner.settable.done(v);
                }
                Err(e) => {
                    inner.settable.fail(e);
                }
            }
        });
    }
}
