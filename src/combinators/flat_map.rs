//! `Task::flat_map`: chain into a task produced from this task's value.

use crate::context::Context;
use crate::error::guard;
use crate::promise::SettablePromise;
use crate::task::{Schedulable, Task};
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;
use spin::Mutex;

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// Apply `f` to this task's value to obtain a follow-up task, then adopt
    /// that task's eventual outcome as this combinator's own. `f` itself may
    /// panic (converted to a [`crate::error::Failure::panicked`]); the
    /// follow-up task's own failure propagates unchanged.
    ///
    /// A suspension point: `f`'s result isn't known until this task settles,
    /// so the follow-up task is only discovered (and scheduled) from inside
    /// the derived task's body — which is why it receives an owned
    /// `Arc<dyn Context>` rather than a borrowed one.
    pub fn flat_map<R>(&self, f: impl FnOnce(T) -> Task<R> + Send + 'static) -> Task<R>
    where
        R: Clone + fmt::Debug + Send + 'static,
    {
        let upstream = self.clone();
        let handle: Arc<Mutex<Option<Task<R>>>> = Arc::new(Mutex::new(None));
        let handle_for_body = handle.clone();

        let derived = Task::async_task(
            alloc::format!("{}.flat_map", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                let ctx_for_inner = ctx.clone();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => match guard(|| f(value)) {
                        Ok(inner) => {
                            if let Some(derived_handle) = handle_for_body.lock().clone() {
                                derived_handle
                                    .add_relationship(RelationshipKind::Predecessor, Arc::new(inner.clone()));
                            }
                            let inner_for_listener = inner.clone();
                            inner.promise_handle().on_complete(move |inner_outcome| match inner_outcome {
                                Ok(value) => {
                                    settable.done(value);
                                }
                                Err(error) => {
                                    settable.fail(error);
                                }
                            });
                            ctx_for_inner.run(inner_for_listener.erased());
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
                // back to `ctx.run`, so `flat_map` never becomes a second,
                // independently-scheduled dispatch in the engine's queue. The
                // follow-up task `f` produces is a genuinely new node and
                // still goes through `ctx_for_inner.run` above.
                upstream.mark_scheduled();
                upstream.context_run(ctx, None, None, &[]);
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        *handle.lock() = Some(derived.clone());
        derived
    }
}
