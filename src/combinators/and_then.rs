//! `Task::and_then` / `Task::and_then_task`: run a consumer, or a whole
//! follow-up task, after this task terminates.

use crate::context::Context;
use crate::error::{guard, Failure};
use crate::promise::SettablePromise;
use crate::task::{Schedulable, Task};
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// Run `f` against this task's value once it resolves, same as
    /// [`Task::map`] except the derived task's value is this task's own
    /// value, unchanged — `f`'s return is discarded and only its potential
    /// failure matters. This task's own failure still propagates unchanged,
    /// without running `f`.
    pub fn and_then(&self, f: impl FnOnce(&T) -> Result<(), Failure> + Send + 'static) -> Task<T> {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.and_then", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => match guard(|| f(&value)) {
                        Ok(Ok(())) => {
                            settable.done(value);
                        }
                        Ok(Err(error)) => {
                            settable.fail(error);
                        }
                        Err(panic) => {
                            settable.fail(panic);
                        }
                    },
                    Err(error) => {
                        settable.fail(error);
                    }
                });
                // Fused: run the upstream body inline rather than handing it
                // back to `ctx.run`, so `and_then` never becomes a second,
                // independently-scheduled dispatch in the engine's queue.
                upstream.mark_scheduled();
                upstream.context_run(ctx, None, None, &[]);
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived
    }

    /// Run `next` once this task terminates — whether it succeeded, failed,
    /// or was cancelled — discarding this task's own outcome and adopting
    /// `next`'s result verbatim.
    pub fn and_then_task<R>(&self, next: Task<R>) -> Task<R>
    where
        R: Clone + fmt::Debug + Send + 'static,
    {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.and_then_task", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                let ctx_for_next = ctx.clone();
                let next_for_listener = next.clone();
                upstream.promise_handle().on_complete(move |_outcome| {
                    next_for_listener.promise_handle().on_complete(move |next_outcome| {
                        match next_outcome {
                            Ok(value) => {
                                settable.done(value);
                            }
                            Err(error) => {
                                settable.fail(error);
                            }
                        }
                    });
                    ctx_for_next.run(next_for_listener.erased());
                });
                upstream.mark_scheduled();
                upstream.context_run(ctx, None, None, &[]);
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(next.clone()));
        derived
    }
}
