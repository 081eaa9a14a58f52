//! Observability contracts: structured logging and metrics, kept as thin,
//! object-safe traits so a host can plug in whatever backend it already runs.
//!
//! # 设计背景（Why）
//! - Only the two ambient concerns this crate actually emits events for
//!   survive here — task lifecycle logging and task-count/priority metrics.
//!   There is no crate-owned tracing/health/event-bus surface: the structured
//!   execution trace a caller wants is [`crate::trace::Trace`], not a logging
//!   concept.
//!
//! # 模块概览（How）
//! - [`logging`]: a minimal structured log record plus a `Logger` trait.
//! - [`metrics`]: counter/gauge/histogram instrument traits, plus the
//!   `TaskMetrics` facade this crate's scheduling primitives record through.

pub mod logging;
pub mod metrics;

pub use logging::{LogRecord, LogSeverity, Logger, NoopLogger};
pub use metrics::{
    Counter, Gauge, Histogram, InstrumentDescriptor, MetricsProvider, NoopMetrics, TaskMetrics,
};
