//! Shared first-failure-wins countdown used by `par2..par9`.
//!
//! # 设计背景（Why）
//! - Rather than pull in the `paste` crate to generate eight near-identical
//!   functions, each arity is written out by hand (in the spirit of how
//!   `std`/`itertools` handle tuple arities); `JoinBarrier` is the one piece
//!   of bookkeeping worth sharing, built in the same countdown-latch style
//!   as this crate's other CAS-guarded single-commit types (`Promise`,
//!   `TimeoutWrapper`).

use crate::error::Failure;
use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Counts down as members settle; commits the joined task's result exactly
/// once — either because every member succeeded, or because the first
/// failure arrived.
pub(crate) struct JoinBarrier {
    remaining: AtomicUsize,
    committed: AtomicBool,
}

impl JoinBarrier {
    pub(crate) fn new(count: usize) -> Arc<Self> {
        Arc::new(JoinBarrier {
            remaining: AtomicUsize::new(count),
            committed: AtomicBool::new(false),
        })
    }

    /// Call when a member fails. Returns `true` for the caller that should
    /// actually commit the joined failure (the first one to arrive).
    pub(crate) fn fail_once(&self) -> bool {
        self.committed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Call when a member succeeds. Returns `true` for the caller that
    /// observes the last member completing successfully (i.e. should commit
    /// the joined success).
    pub(crate) fn succeed_one(&self) -> bool {
        self.remaining.fetch_sub(1, Ordering::AcqRel) == 1
    }

    pub(crate) fn is_committed(&self) -> bool {
        self.committed.load(Ordering::Acquire)
    }
}

/// Shared by every `parN`: a failing member commits the barrier and fails
/// `settable` with that member's own `Failure` (preserving reference
/// identity), guarded so only the first failure across all members wins.
pub(crate) fn on_member_failure<T: Clone + core::fmt::Debug + Send + 'static>(
    barrier: &JoinBarrier,
    settable: &crate::promise::SettablePromise<T>,
    error: Failure,
) {
    if barrier.fail_once() {
        settable.fail(error);
    }
}
