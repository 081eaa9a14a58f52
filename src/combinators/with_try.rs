//! `Task::with_try`: observe this task's outcome without ever failing
//! yourself.

use crate::context::Context;
use crate::error::Failure;
use crate::promise::SettablePromise;
use crate::task::Task;
use crate::trace::RelationshipKind;
use alloc::sync::Arc;
use core::fmt;

/// The result of [`Task::with_try`] — a reified outcome rather than a
/// `Result`, so it never collides with this crate's own [`Failure`]-carrying
/// `Result<T, Failure>` alias and can flow through `map`/`and_then` like any
/// other plain value.
#[derive(Clone, Debug)]
pub enum Attempt<T> {
    Success(T),
    Failed(Failure),
}

impl<T> Attempt<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Attempt::Success(_))
    }

    pub fn into_result(self) -> Result<T, Failure> {
        match self {
            Attempt::Success(value) => Ok(value),
            Attempt::Failed(error) => Err(error),
        }
    }
}

impl<T: Clone + fmt::Debug + Send + 'static> Task<T> {
    /// A task over [`Attempt<T>`] that itself never fails: this task's
    /// success becomes `Attempt::Success`, its failure (including
    /// cancellation) becomes `Attempt::Failed` carrying the original
    /// [`Failure`] unchanged.
    pub fn with_try(&self) -> Task<Attempt<T>> {
        let upstream = self.clone();
        let derived = Task::async_task(
            alloc::format!("{}.with_try", self.name()),
            self.priority(),
            true,
            move |ctx: Arc<dyn Context>| {
                let settable = SettablePromise::new();
                let promise = settable.promise();
                upstream.promise_handle().on_complete(move |outcome| {
                    let attempt = match outcome {
                        Ok(value) => Attempt::Success(value),
                        Err(error) => Attempt::Failed(error),
                    };
                    settable.done(attempt);
                });
                ctx.run(upstream.erased());
                promise
            },
        );
        derived.add_relationship(RelationshipKind::Predecessor, Arc::new(self.clone()));
        derived
    }
}
