//! Free functions that construct leaf [`Task`]s directly, without an
//! upstream — the base cases every combinator chain starts from.
//!
//! # 设计背景（Why）
//! - Plain free functions returning a constructed type, rather than a builder
//!   struct, for the cases where there's nothing to configure beyond a name
//!   and a priority. Every factory below is `Task::async_task` plus
//!   [`crate::error::guard`] so a panicking closure becomes a
//!   [`Failure::panicked`] instead of unwinding across the `Context`'s call
//!   into `context_run`.

use crate::error::{guard, Failure};
use crate::priority::Priority;
use crate::promise::Promise;
use crate::task::Task;
use alloc::boxed::Box;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

/// A task that is already resolved with `value` the moment it runs.
pub fn value<T>(name: impl Into<alloc::borrow::Cow<'static, str>>, value: T) -> Task<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    Task::async_task(name, Priority::DEFAULT, false, move |_ctx| {
        Promise::settled(Ok(value))
    })
}

/// A task that is already failed with `error` the moment it runs.
pub fn failure<T>(name: impl Into<alloc::borrow::Cow<'static, str>>, error: Failure) -> Task<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    Task::async_task(name, Priority::DEFAULT, false, move |_ctx| {
        Promise::settled(Err(error))
    })
}

/// A task whose result is computed synchronously by `f` when the task runs.
/// A panic inside `f` becomes a [`Failure::panicked`] rather than unwinding
/// into the caller (`std` builds only; under `no_std` the panic propagates).
pub fn callable<T>(
    name: impl Into<alloc::borrow::Cow<'static, str>>,
    f: impl FnOnce() -> Result<T, Failure> + Send + 'static,
) -> Task<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    Task::async_task(name, Priority::DEFAULT, false, move |_ctx| {
        match guard(f) {
            Ok(Ok(value)) => Promise::settled(Ok(value)),
            Ok(Err(error)) => Promise::settled(Err(error)),
            Err(panic) => Promise::settled(Err(panic)),
        }
    })
}

/// A fire-and-forget side-effecting task producing `()`, with an explicit
/// priority and visibility flag since actions are commonly scheduled
/// directly (not derived from a combinator) and so need those set at
/// construction time.
pub fn action(
    name: impl Into<alloc::borrow::Cow<'static, str>>,
    priority: Priority,
    system_hidden: bool,
    runnable: impl FnOnce() + Send + 'static,
) -> Task<()> {
    Task::async_task(name, priority, system_hidden, move |_ctx| {
        match guard(runnable) {
            Ok(()) => Promise::settled(Ok(())),
            Err(panic) => Promise::settled(Err(panic)),
        }
    })
}

/// A blocking computation handed off to `executor` (e.g. a thread pool run
/// function) rather than run inline, so a slow `callable` body doesn't stall
/// whatever thread `context_run` happened to land on.
///
/// # 契约说明（What）
/// - `executor` receives a thunk and is responsible for running it off the
///   calling thread and eventually invoking the thunk; this crate does not
///   assume any particular pool implementation.
pub fn blocking<T>(
    name: impl Into<alloc::borrow::Cow<'static, str>>,
    f: impl FnOnce() -> Result<T, Failure> + Send + 'static,
    executor: Arc<dyn Fn(Box<dyn FnOnce() + Send>) + Send + Sync>,
) -> Task<T>
where
    T: Clone + fmt::Debug + Send + 'static,
{
    Task::async_task(name, Priority::DEFAULT, false, move |_ctx| {
        let settable = crate::promise::SettablePromise::new();
        let promise = settable.promise();
        executor(Box::new(move || match guard(f) {
            Ok(Ok(value)) => {
                settable.done(value);
            }
            Ok(Err(error)) => {
                settable.fail(error);
            }
            Err(panic) => {
                settable.fail(panic);
            }
        }));
        promise
    })
}
