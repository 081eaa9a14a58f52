//! Engine-facing defaults: priority bounds and the policy for wrapping a task
//! whose body has already started running.
//!
//! # 设计背景（Why）
//! - A layered `ConfigurationSource → Builder → snapshot` pipeline, trimmed
//!   to the handful of values a task-composition core actually needs
//!   resolved before it can hand out `Priority::DEFAULT` or decide what
//!   `wrap_context_run` should do about a race with `context_run`. Published
//!   through an `ArcSwap`-backed hot-reload handle so a host can call
//!   [`EngineConfig::reload`] without pausing in-flight scheduling.

use crate::arc_swap::ArcSwap;
use crate::priority::{DEFAULT_PRIORITY, MAX_PRIORITY, MIN_PRIORITY};
use alloc::sync::Arc;

/// Whether `Task::wrap_context_run` should reject or silently tolerate an
/// attachment raced against `context_run`'s first call.
///
/// # 契约说明（What）
/// - `RejectAfterRunStarted` (the default): `wrap_context_run` returns
///   [`crate::error::ArgumentError::WrapperAttachedAfterRunStarted`] once
///   `context_run` has started — this is the behavior `Task::wrap_context_run`
///   implements unconditionally today; the policy exists so a host can record
///   its intent even though only one enforcement strategy is currently wired
///   up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LateWrapPolicy {
    RejectAfterRunStarted,
}

impl Default for LateWrapPolicy {
    fn default() -> Self {
        LateWrapPolicy::RejectAfterRunStarted
    }
}

/// Resolved engine-wide defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EngineDefaults {
    pub min_priority: i32,
    pub max_priority: i32,
    pub default_priority: i32,
    pub late_wrap_policy: LateWrapPolicy,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        EngineDefaults {
            min_priority: MIN_PRIORITY,
            max_priority: MAX_PRIORITY,
            default_priority: DEFAULT_PRIORITY,
            late_wrap_policy: LateWrapPolicy::default(),
        }
    }
}

/// One layer contributing to a resolved [`EngineDefaults`].
///
/// # 契约说明（What）
/// - `apply` receives the defaults accumulated so far and returns the
///   adjusted value; later sources in a [`ConfigurationBuilder`] run after
///   earlier ones, so they take precedence.
pub trait ConfigSource {
    fn apply(&self, defaults: EngineDefaults) -> EngineDefaults;
}

/// The crate's built-in baseline — `EngineDefaults::default()` unconditionally.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticDefaults;

impl ConfigSource for StaticDefaults {
    fn apply(&self, _defaults: EngineDefaults) -> EngineDefaults {
        EngineDefaults::default()
    }
}

/// Overrides read from `PARSEQ_*` environment variables. `std`-only since
/// there is no portable environment under `no_std`.
#[cfg(feature = "std")]
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvOverride;

#[cfg(feature = "std")]
impl ConfigSource for EnvOverride {
    fn apply(&self, mut defaults: EngineDefaults) -> EngineDefaults {
        if let Ok(v) = std::env::var("PARSEQ_MIN_PRIORITY") {
            if let Ok(parsed) = v.parse() {
                defaults.min_priority = parsed;
            }
        }
        if let Ok(v) = std::env::var("PARSEQ_MAX_PRIORITY") {
            if let Ok(parsed) = v.parse() {
                defaults.max_priority = parsed;
            }
        }
        if let Ok(v) = std::env::var("PARSEQ_DEFAULT_PRIORITY") {
            if let Ok(parsed) = v.parse() {
                defaults.default_priority = parsed;
            }
        }
        defaults
    }
}

/// Accumulates [`ConfigSource`]s and resolves them into one [`EngineDefaults`].
#[derive(Default)]
pub struct ConfigurationBuilder {
    sources: alloc::vec::Vec<alloc::boxed::Box<dyn ConfigSource>>,
}

impl ConfigurationBuilder {
    pub fn new() -> Self {
        Self {
            sources: alloc::vec::Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl ConfigSource + 'static) -> Self {
        self.sources.push(alloc::boxed::Box::new(source));
        self
    }

    /// Fold every registered source over `EngineDefaults::default()`, in
    /// registration order, then validate the result.
    pub fn build(self) -> EngineDefaults {
        let resolved = self
            .sources
            .into_iter()
            .fold(EngineDefaults::default(), |acc, source| source.apply(acc));
        validate(resolved)
    }
}

fn validate(mut defaults: EngineDefaults) -> EngineDefaults {
    if defaults.min_priority > defaults.max_priority {
        core::mem::swap(&mut defaults.min_priority, &mut defaults.max_priority);
    }
    defaults.default_priority = defaults
        .default_priority
        .clamp(defaults.min_priority, defaults.max_priority);
    defaults
}

/// A hot-reloadable handle to the currently-active [`EngineDefaults`].
pub struct EngineConfig {
    current: ArcSwap<EngineDefaults>,
}

impl EngineConfig {
    pub fn new(defaults: EngineDefaults) -> Self {
        Self {
            current: ArcSwap::new(Arc::new(defaults)),
        }
    }

    pub fn current(&self) -> Arc<EngineDefaults> {
        self.current.load_full()
    }

    /// Replace the active defaults, visible to every reader on its next call.
    pub fn reload(&self, defaults: EngineDefaults) {
        self.current.store(Arc::new(defaults));
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(EngineDefaults::default())
    }
}
