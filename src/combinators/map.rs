//! `Task::map`: transform a task's value without ever observing a failure.

use crate::context::Context;
use crate::error::guard;
use crate::promise::{Promise, SettablePromise};
use crate::task::{Schedulable, Task};
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// Apply `f` to this task's value once it resolves. If this task fails
    /// or is cancelled, the derived task fails with the same [`Failure`],
    /// unchanged — `f` never runs.
    ///
    /// [`Failure`]: crate::error::Failure
    pub fn map<R>(&self, f: impl FnOnce(T) -> R + Send + 'static) -> Task<R>
    where
        R: Clone + fmt::Debug + Send + 'static,
    {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.map", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => match guard(|| f(value)) {
                        Ok(transformed) => {
                            settable.done(transformed);
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
                // back to `ctx.run`, so `map` never becomes a second,
                // independently-scheduled dispatch in the engine's queue.
                upstream.mark_scheduled();
                upstream.context_run(ctx, None, None, &[]);
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived
    }
}
