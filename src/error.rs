//! The failure currency that flows through a task graph.
//!
//! # 设计背景（Why）
//! - Values and errors travel the same edges (`map`, `flat_map`, `recover`, …),
//!   and several combinators are specified in terms of reference identity — a
//!   failure that is merely re-routed must stay the *same* failure, not a
//!   re-wrapped copy. An `Arc<dyn FailureCause>` gives cheap, identity-preserving
//!   cloning across every combinator without requiring the underlying cause to
//!   itself be `Clone`.
//! - The crate is `no_std`-first, so this module does not depend on
//!   `std::error::Error`; a `std`-gated impl is added at the bottom purely as a
//!   convenience for hosts that want `Failure` to participate in the standard
//!   error-chain ecosystem.
//!
//! # 契约说明（What）
//! - [`Failure`] is the single error type that flows through [`crate::Promise`]
//!   and [`crate::Task`]. Distinguished kinds (`Cancelled`, `Timeout`) are
//!   ordinary causes that combinators recognize by downcasting, not a separate
//!   enum — so `Failure::downcast_ref` works uniformly for both crate-internal
//!   sentinels and arbitrary user causes.
//! - [`ArgumentError`] is a *synchronous* error, returned directly from
//!   fallible setters/factories (e.g. [`crate::Task::set_priority`]); it never
//!   flows through a promise.

use alloc::{borrow::Cow, sync::Arc};
use core::any::Any;
use core::fmt;

/// Object-safe cause stored behind [`Failure`].
///
/// # 逻辑解析（How）
/// - Blanket-implemented for any `Debug + Display + Send + Sync + 'static`
///   type, so user error types never need to implement a crate trait to be
///   wrapped by [`Failure::from_cause`].
pub trait FailureCause: fmt::Debug + fmt::Display + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

impl<T> FailureCause for T
where
    T: fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The error type propagated through [`crate::Promise`]/[`crate::Task`].
///
/// # 契约说明（What）
/// - Cloning a `Failure` clones the `Arc`, not the cause: two `Failure`
///   values obtained by cloning the same original compare equal under
///   [`Failure::ptr_eq`], which is how `fall_back_to`/`recover` tests assert
///   that an untouched error was propagated rather than rebuilt.
#[derive(Clone)]
pub struct Failure {
    cause: Arc<dyn FailureCause>,
}

impl Failure {
    /// Wrap an arbitrary cause. Most user code reaches this via `.into()`
    /// from a `Display + Debug` error type.
    pub fn from_cause(cause: impl FailureCause) -> Self {
        Failure {
            cause: Arc::new(cause),
        }
    }

    /// The distinguished cancellation failure. `Task::cancel` always settles
    /// its promise with one of these, regardless of the caller-supplied
    /// reason text — only the message varies, `is_cancelled()` does not.
    pub fn cancelled(reason: impl Into<Cow<'static, str>>) -> Self {
        Failure::from_cause(Cancelled {
            reason: reason.into(),
        })
    }

    /// The distinguished timeout failure raised by `with_timeout`'s losing
    /// race against the body.
    pub fn timeout(after: core::time::Duration) -> Self {
        Failure::from_cause(Timeout { after })
    }

    /// A failure recording that a task body panicked. `std`-only callers use
    /// [`crate::error::panic_message`] to render the payload first.
    pub fn panicked(message: impl Into<Cow<'static, str>>) -> Self {
        Failure::from_cause(Panicked {
            message: message.into(),
        })
    }

    pub fn is_cancelled(&self) -> bool {
        self.downcast_ref::<Cancelled>().is_some()
    }

    pub fn is_timeout(&self) -> bool {
        self.downcast_ref::<Timeout>().is_some()
    }

    pub fn is_panic(&self) -> bool {
        self.downcast_ref::<Panicked>().is_some()
    }

    /// Downcast the underlying cause, e.g. to recover a user error type
    /// stashed via [`Failure::from_cause`].
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.cause.as_any().downcast_ref()
    }

    /// Reference-equality check: true only if both failures were produced by
    /// cloning the same `Failure` (never by independently constructing two
    /// causes with the same content).
    pub fn ptr_eq(&self, other: &Failure) -> bool {
        Arc::ptr_eq(&self.cause, &other.cause)
    }
}

impl fmt::Debug for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Failure").field(&self.cause).finish()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.cause, f)
    }
}

impl<E> From<E> for Failure
where
    E: fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn from(cause: E) -> Self {
        Failure::from_cause(cause)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Failure {}

#[derive(Debug)]
struct Cancelled {
    reason: Cow<'static, str>,
}

impl fmt::Display for Cancelled {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task cancelled: {}", self.reason)
    }
}

#[derive(Debug)]
struct Timeout {
    after: core::time::Duration,
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task timed out after {:?}", self.after)
    }
}

#[derive(Debug)]
struct Panicked {
    message: Cow<'static, str>,
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task panicked: {}", self.message)
    }
}

/// Render a `std::panic` payload into a message, when the `std` feature is
/// enabled. Used to build [`Failure::panicked`] from `catch_unwind`'s `Err`.
#[cfg(feature = "std")]
pub(crate) fn panic_message(payload: alloc::boxed::Box<dyn Any + Send>) -> alloc::string::String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        alloc::string::ToString::to_string(s)
    } else if let Some(s) = payload.downcast_ref::<alloc::string::String>() {
        s.clone()
    } else {
        alloc::string::String::from("non-string panic payload")
    }
}

/// Run a user-supplied closure, converting a panic into a [`Failure`] under
/// `std`; under `no_std` panics are left to propagate as usual since there is
/// no portable unwind-catching primitive to reach for.
pub(crate) fn guard<R>(f: impl FnOnce() -> R) -> Result<R, Failure> {
    #[cfg(feature = "std")]
    {
        match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
            Ok(value) => Ok(value),
            Err(payload) => Err(Failure::panicked(panic_message(payload))),
        }
    }
    #[cfg(not(feature = "std"))]
    {
        Ok(f())
    }
}

/// Synchronous misuse error for fallible setters and factories — raised
/// directly, never through a promise.
///
/// # 契约说明（What）
/// - `#[non_exhaustive]` so new argument-validation cases can be added
///   without a breaking change.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentError {
    /// `Task::set_priority` (or a factory's explicit priority argument) was
    /// given a value outside `[MIN_PRIORITY, MAX_PRIORITY]`.
    PriorityOutOfRange {
        attempted: i32,
        min: i32,
        max: i32,
    },
    /// `Task::set_priority` was called after the task left the `created`
    /// state; priority is mutable only before scheduling.
    PriorityNotMutableAfterScheduling,
    /// `Task::wrap_context_run` was called after `context_run` had already
    /// started — a wrapper can only be composed before execution begins.
    WrapperAttachedAfterRunStarted,
}

impl fmt::Display for ArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgumentError::PriorityOutOfRange { attempted, min, max } => write!(
                f,
                "priority {attempted} out of range [{min}, {max}]"
            ),
            ArgumentError::PriorityNotMutableAfterScheduling => {
                write!(f, "priority is only mutable while a task is in the created state")
            }
            ArgumentError::WrapperAttachedAfterRunStarted => {
                write!(f, "a context-run wrapper must be attached before the task starts running")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ArgumentError {}
