//! `Task::with_side_effect`: run a fire-and-forget task alongside this one
//! without letting its outcome affect the value this task produces.

use crate::context::Context;
use crate::promise::SettablePromise;
use crate::task::Task;
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;
use spin::Mutex;

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// Derive `effect(&value)` once this task succeeds and hand it to the
    /// `Context` as a side effect: it only runs if this task actually
    /// succeeded (a failed/cancelled predecessor cancels the effect task
    /// instead of running it, via [`crate::context::PendingRunner::run_side_effect`]).
    /// Either way, the derived task's own value is this task's value,
    /// unchanged — the side effect can't fail the chain.
    pub fn with_side_effect(&self, effect: impl FnOnce(&T) -> Task<()> + Send + 'static) -> Task<T> {
        let upstream = self.clone();
        let handle: Arc<Mutex<Option<Task<T>>>> = Arc::new(Mutex::new(None));
        let handle_for_body = handle.clone();

        let derived = Task::async_task(
            alloc::format!("{}.with_side_effect", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                upstream.promise_handle().on_complete(move |outcome| match outcome {
                    Ok(value) => {
                        let effect_task = effect(&value);
                        if let Some(derived_handle) = handle_for_body.lock().clone() {
                            derived_handle.add_relationship(
                                RelationshipKind::SideEffectParent,
                                Arc::new(effect_task.clone()),
                            );
                        }
                        let pending = ctx.after(alloc::vec![upstream.erased()]);
                        pending.run_side_effect(effect_task.erased());
                        settable.done(value);
                    }
                    Err(error) => {
                        settable.fail(error);
                    }
                });
                ctx.run(upstream.erased());
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        *handle.lock() = Some(derived.clone());
        derived
    }
}
