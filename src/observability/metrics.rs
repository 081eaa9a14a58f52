//! Counter/gauge/histogram instrument contracts, plus the [`TaskMetrics`]
//! facade task lifecycle transitions record through.
//!
//! # 设计背景（Why）
//! - No attribute-set type travels with these calls — the instruments this
//!   crate emits (spawn/completion counts, priority-at-dispatch) carry no
//!   per-call dimensions worth a label set, so the traits below take no
//!   attributes parameter at all, unlike a general-purpose metrics SDK.

use alloc::sync::Arc;

/// Metadata describing one instrument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InstrumentDescriptor<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub unit: Option<&'a str>,
}

impl<'a> InstrumentDescriptor<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            description: None,
            unit: None,
        }
    }

    pub const fn with_description(mut self, description: &'a str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn with_unit(mut self, unit: &'a str) -> Self {
        self.unit = Some(unit);
        self
    }
}

/// A monotonically-increasing counter.
pub trait Counter: Send + Sync {
    fn add(&self, value: u64);

    fn increment(&self) {
        self.add(1);
    }
}

/// A value that can move up or down, e.g. an in-flight task count.
pub trait Gauge: Send + Sync {
    fn set(&self, value: f64);
    fn increment(&self, delta: f64);
    fn decrement(&self, delta: f64);
}

/// A distribution of sampled values, e.g. priority-at-dispatch.
pub trait Histogram: Send + Sync {
    fn record(&self, value: f64);
}

/// Creates or looks up instruments by descriptor.
///
/// # 契约说明（What）
/// - Implementations are expected to cache instruments keyed by name so
///   repeated calls with the same descriptor are cheap.
pub trait MetricsProvider: Send + Sync + 'static {
    fn counter(&self, descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Counter>;
    fn gauge(&self, descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Gauge>;
    fn histogram(&self, descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Histogram>;
}

/// A [`MetricsProvider`] whose instruments discard every sample — the
/// default when a host hasn't wired in a real backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

struct NoopInstrument;
impl Counter for NoopInstrument {
    fn add(&self, _value: u64) {}
}
impl Gauge for NoopInstrument {
    fn set(&self, _value: f64) {}
    fn increment(&self, _delta: f64) {}
    fn decrement(&self, _delta: f64) {}
}
impl Histogram for NoopInstrument {
    fn record(&self, _value: f64) {}
}

impl MetricsProvider for NoopMetrics {
    fn counter(&self, _descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Counter> {
        Arc::new(NoopInstrument)
    }

    fn gauge(&self, _descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Gauge> {
        Arc::new(NoopInstrument)
    }

    fn histogram(&self, _descriptor: &InstrumentDescriptor<'_>) -> Arc<dyn Histogram> {
        Arc::new(NoopInstrument)
    }
}

/// The fixed set of instruments task lifecycle transitions record through.
///
/// # 设计背景（Why）
/// - Rather than thread an `InstrumentDescriptor` through every call site in
///   `task.rs`, this facade resolves the handful of instruments the crate
///   actually needs once, at construction, against whatever
///   [`MetricsProvider`] the host supplies.
pub struct TaskMetrics {
    pub spawned: Arc<dyn Counter>,
    pub completed: Arc<dyn Counter>,
    pub failed: Arc<dyn Counter>,
    pub cancelled: Arc<dyn Counter>,
    pub dispatch_priority: Arc<dyn Histogram>,
}

impl TaskMetrics {
    pub fn new(provider: &dyn MetricsProvider) -> Self {
        Self {
            spawned: provider.counter(
                &InstrumentDescriptor::new("parseq.task.spawned")
                    .with_description("tasks created"),
            ),
            completed: provider.counter(
                &InstrumentDescriptor::new("parseq.task.completed")
                    .with_description("tasks that reached the done state"),
            ),
            failed: provider.counter(
                &InstrumentDescriptor::new("parseq.task.failed")
                    .with_description("tasks that reached the failed state"),
            ),
            cancelled: provider.counter(
                &InstrumentDescriptor::new("parseq.task.cancelled")
                    .with_description("tasks that reached the cancelled state"),
            ),
            dispatch_priority: provider.histogram(
                &InstrumentDescriptor::new("parseq.task.dispatch_priority")
                    .with_description("priority value at the moment a task was scheduled"),
            ),
        }
    }
}

impl Default for TaskMetrics {
    fn default() -> Self {
        Self::new(&NoopMetrics)
    }
}
