//! `Task::recover` / `recover_with` / `fall_back_to`: turn a failure back
//! into a value, or substitute a different task.

use crate::context::Context;
use crate::error::{guard, Failure};
use crate::promise::SettablePromise;
use crate::task::Task;
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// If this task fails (including cancellation), substitute `f(error)` as
    /// the derived task's value instead. A successful upstream value passes
    /// through untouched; `f` never runs in that case.
    pub fn recover(&self, f: impl FnOnce(Failure) -> T + Send + 'static) -> Task<T> {
        self.recover_with(move |error| Ok(f(error)))
    }

    /// Like [`Task::recover`], but `f` may itself fail — in which case the
    /// derived task fails with `f`'s error rather than the original one.
    pub fn recover_with(
        &self,
        f: impl FnOnce(Failure) -> Result<T, Failure> + Send + 'static,
    ) -> Task<T> {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.recover_with", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => {
                        settable.done(value);
                    }
                    Err(error) => match guard(|| f(error)) {
                        Ok(Ok(value)) => {
                            settable.done(value);
                        }
                        Ok(Err(error)) => {
                            settable.fail(error);
                        }
                        Err(panic) => {
                            settable.fail(panic);
                        }
                    },
                });
                ctx.run(upstream.erased());
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived
    }

    /// If this task fails, adopt `fallback`'s outcome instead. If `fallback`
    /// itself fails, the derived task fails with this task's *original*
    /// error, not the fallback's — the original failure is never discarded
    /// in favor of a secondary one.
    pub fn fall_back_to(&self, fallback: Task<T>) -> Task<T> {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.fall_back_to", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                let ctx_for_fallback = ctx.clone();
                let fallback_for_listener = fallback.clone();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => {
                        settable.done(value);
                    }
                    Err(original_error) => {
                        fallback_for_listener.promise_handle().on_complete(move |fallback_outcome| {
                            match fallback_outcome {
                                Ok(value) => {
                                    settable.done(value);
                                }
                                Err(_fallback_error) => {
                                    settable.fail(original_error);
                                }
                            }
                        });
                        ctx_for_fallback.run(fallback_for_listener.erased());
                    }
                });
                ctx.run(upstream.erased());
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived
    }
}
