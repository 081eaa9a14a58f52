//! Single-assignment result cells.
//!
//! # 设计背景（Why）
//! - Every combinator ultimately bottoms out in a promise: a value that
//!   starts pending and transitions exactly once to resolved or failed. The
//!   commit discipline (`AtomicBool::compare_exchange`, first winner only)
//!   is the same one `spark-core`'s `Cancellation::cancel` uses, generalized
//!   here from a boolean flag to an arbitrary terminal `Outcome<T>`.
//! - Fan-out (the same task feeding two different combinators) means a
//!   promise may gain more than one listener, and the listener may be
//!   registered after the promise has already settled — both must work
//!   uniformly. `T: Clone` is the price paid for letting multiple listeners
//!   each receive their own copy of the resolved value without the crate
//!   reaching for unsafe aliasing.

use crate::error::Failure;
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use spin::Mutex;

/// The terminal result of a [`Promise`].
pub type Outcome<T> = Result<T, Failure>;

type Listener<T> = Box<dyn FnOnce(Outcome<T>) + Send>;

enum State<T> {
    Pending(Vec<Listener<T>>),
    Settled(Outcome<T>),
}

struct Inner<T> {
    state: Mutex<State<T>>,
}

/// A read-only handle to a single-assignment result.
///
/// # 契约说明（What）
/// - Cloning a `Promise` clones the handle, not the state: all clones
///   observe the same eventual settlement.
pub struct Promise<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Promise {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> Promise<T> {
    fn new_pending() -> Self {
        Promise {
            inner: Arc::new(Inner {
                state: Mutex::new(State::Pending(Vec::new())),
            }),
        }
    }

    /// An already-settled promise. Used by the eager factories (`value`,
    /// `failure`) and by any body that computes its result synchronously.
    pub fn settled(outcome: Outcome<T>) -> Self {
        Promise {
            inner: Arc::new(Inner {
                state: Mutex::new(State::Settled(outcome)),
            }),
        }
    }

    /// Register a listener. Fires exactly once: synchronously, inline, if
    /// the promise has already settled; otherwise when [`SettablePromise`]
    /// commits the terminal outcome.
    pub fn on_complete(&self, listener: impl FnOnce(Outcome<T>) + Send + 'static) {
        let mut guard = self.inner.state.lock();
        match &mut *guard {
            State::Settled(outcome) => {
                let outcome = outcome.clone();
                drop(guard);
                listener(outcome);
            }
            State::Pending(listeners) => listeners.push(Box::new(listener)),
        }
    }

    /// The settled outcome, if any, without blocking or registering a
    /// listener.
    pub fn peek(&self) -> Option<Outcome<T>> {
        match &*self.inner.state.lock() {
            State::Settled(outcome) => Some(outcome.clone()),
            State::Pending(_) => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(&*self.inner.state.lock(), State::Settled(_))
    }

    fn complete(&self, outcome: Outcome<T>) -> bool {
        let listeners = {
            let mut guard = self.inner.state.lock();
            match &*guard {
                State::Settled(_) => return false,
                State::Pending(_) => {
                    let State::Pending(listeners) =
                        core::mem::replace(&mut *guard, State::Settled(outcome.clone()))
                    else {
                        unreachable!()
                    };
                    listeners
                }
            }
        };
        for listener in listeners {
            listener(outcome.clone());
        }
        true
    }
}

/// The writable half of a [`Promise`].
///
/// # 契约说明（What）
/// - `done`/`fail` commit the terminal outcome at most once; a second call
///   is a silent no-op returning `false`.
pub struct SettablePromise<T> {
    promise: Promise<T>,
}

impl<T> Clone for SettablePromise<T> {
    fn clone(&self) -> Self {
        SettablePromise {
            promise: self.promise.clone(),
        }
    }
}

impl<T: Clone + Send + 'static> SettablePromise<T> {
    pub fn new() -> Self {
        SettablePromise {
            promise: Promise::new_pending(),
        }
    }

    /// A read-only handle to this promise's eventual result.
    pub fn promise(&self) -> Promise<T> {
        self.promise.clone()
    }

    /// Resolve with a value. Returns `false` if already settled.
    pub fn done(&self, value: T) -> bool {
        self.promise.complete(Ok(value))
    }

    /// Fail with an error. Returns `false` if already settled.
    pub fn fail(&self, error: Failure) -> bool {
        self.promise.complete(Err(error))
    }
}

impl<T: Clone + Send + 'static> Default for SettablePromise<T> {
    fn default() -> Self {
        Self::new()
    }
}
