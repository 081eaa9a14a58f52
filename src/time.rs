//! Monotonic instants used to stamp [`crate::trace::ShallowTrace`] timestamps.
//!
//! # 设计背景（Why）
//! - `context_run`'s signature takes a `Context`, a logger and the
//!   predecessor set — no clock. Trace timestamps therefore can't come from a
//!   collaborator threaded through every call; they come from a
//!   crate-local monotonic source, the same shape as `spark-core`'s
//!   `runtime::timer::MonotonicTimePoint` but trimmed to the single
//!   responsibility of "give me `now`", since the scheduling-delay clock
//!   (`TimeDriver::sleep`) belongs to the external `Context`, not the core.
//! - `std` gives a real wall/monotonic clock via `Instant`; `no_std` has none
//!   portable, so a process-wide logical tick counter stands in. Either way
//!   ordering between two `MonotonicInstant`s taken on the same process is
//!   meaningful, which is all `ShallowTrace` needs.

use core::fmt;

#[cfg(feature = "std")]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicInstant(std::time::Instant);

#[cfg(not(feature = "std"))]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonotonicInstant(u64);

impl MonotonicInstant {
    /// The current instant, monotonically later than any previous call on
    /// this process.
    pub fn now() -> Self {
        #[cfg(feature = "std")]
        {
            MonotonicInstant(std::time::Instant::now())
        }
        #[cfg(not(feature = "std"))]
        {
            static TICK: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(0);
            MonotonicInstant(TICK.fetch_add(1, core::sync::atomic::Ordering::Relaxed))
        }
    }

    /// Elapsed duration since `self`, saturating at zero if `self` is in the
    /// future relative to now (clock or tick-counter skew).
    #[cfg(feature = "std")]
    pub fn elapsed(&self) -> core::time::Duration {
        self.0.elapsed()
    }
}

impl fmt::Debug for MonotonicInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(feature = "std")]
        {
            write!(f, "MonotonicInstant({:?})", self.0)
        }
        #[cfg(not(feature = "std"))]
        {
            write!(f, "MonotonicInstant(tick={})", self.0)
        }
    }
}
