//! Cross-cutting hooks around a task's body execution.
//!
//! # 设计背景（Why）
//! - `with_timeout` is the motivating use: it needs to start a race (the
//!   timer) before the body runs and decide the winner after the body's
//!   promise settles, without the body itself knowing a timeout is in play.
//!   [`ContextRunWrapper`] is that seam: a CAS-guarded commit style
//!   generalized from a single flag to an arbitrary wrapped promise.

use crate::promise::Promise;
use crate::AnyTask;
use alloc::sync::Arc;

/// A hook composed around a task's body execution.
///
/// # 契约说明（What）
/// - `before` runs once, before the body executes — it may schedule
///   auxiliary tasks (e.g. a timer) via `ctx`.
/// - `after` runs once the body's promise is available (which may still be
///   pending); it returns the promise that actually becomes the task's own
///   result, which need not be the same promise the body returned.
pub trait ContextRunWrapper<T>: Send + Sync {
    fn before(&self, ctx: &Arc<dyn crate::context::Context>, owner: &AnyTask);
    fn after(
        &self,
        ctx: &Arc<dyn crate::context::Context>,
        owner: &AnyTask,
        body: Promise<T>,
    ) -> Promise<T>;
}

/// Composes two wrappers so the outer one's `before` runs first and its
/// `after` runs last — i.e. `outer` wraps `inner` from the outside.
///
/// # 契约说明（What）
/// - `Task::wrap_context_run` builds one of these each time a second wrapper
///   is attached, with the newly-supplied wrapper as `outer` and whatever was
///   already attached as `inner`.
pub struct Composed<T> {
    pub outer: Arc<dyn ContextRunWrapper<T>>,
    pub inner: Arc<dyn ContextRunWrapper<T>>,
}

impl<T> ContextRunWrapper<T> for Composed<T> {
    fn before(&self, ctx: &Arc<dyn crate::context::Context>, owner: &AnyTask) {
        self.outer.before(ctx, owner);
        self.inner.before(ctx, owner);
    }

    fn after(
        &self,
        ctx: &Arc<dyn crate::context::Context>,
        owner: &AnyTask,
        body: Promise<T>,
    ) -> Promise<T> {
        let inner_result = self.inner.after(ctx, owner, body);
        self.outer.after(ctx, owner, inner_result)
    }
}

/// Attach `outer` on top of whatever wrapper (if any) is already present.
pub(crate) fn compose<T>(
    existing: Option<Arc<dyn ContextRunWrapper<T>>>,
    outer: Arc<dyn ContextRunWrapper<T>>,
) -> Arc<dyn ContextRunWrapper<T>>
where
    T: 'static,
{
    match existing {
        Some(inner) => Arc::new(Composed { outer, inner }),
        None => outer,
    }
}
