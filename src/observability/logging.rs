//! Structured log records emitted by task lifecycle transitions.
//!
//! # 设计背景（Why）
//! - The crate does not define its own trace-context or attribute-set types —
//!   callers who want structured correlation reach for [`crate::trace::Trace`]
//!   directly. What's left is a small, `no_std`-friendly log record carrying
//!   just what `Task::context_run` actually has on hand: a message, a
//!   severity, and the module that produced it.

use alloc::borrow::Cow;
use alloc::sync::Arc;

/// Log severity, following the common `tracing`/OpenTelemetry ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LogSeverity {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

/// A single structured log record.
///
/// # 契约说明（What）
/// - `message` is pre-formatted by the caller; this type does no formatting
///   of its own.
/// - `target` names the emitting module (e.g. `"parseq.task"`), matching the
///   `tracing` convention of grouping records by origin.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub message: Cow<'a, str>,
    pub severity: LogSeverity,
    pub target: Option<&'static str>,
}

impl<'a> LogRecord<'a> {
    pub fn new(
        message: impl Into<Cow<'a, str>>,
        severity: LogSeverity,
        target: Option<&'static str>,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            target,
        }
    }
}

/// A sink for [`LogRecord`]s.
///
/// # 设计背景（Why）
/// - `log` is the only required method; the severity-named helpers exist so
///   call sites like `Task::context_run` don't have to build a `LogRecord` by
///   hand for the common case.
pub trait Logger: Send + Sync + 'static {
    fn log(&self, record: &LogRecord<'_>);

    fn trace(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Trace, target));
    }

    fn debug(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Debug, target));
    }

    fn info(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Info, target));
    }

    fn warn(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Warn, target));
    }

    fn error(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Error, target));
    }

    fn fatal(&self, message: &str, target: Option<&'static str>) {
        self.log(&LogRecord::new(message, LogSeverity::Fatal, target));
    }
}

/// A logger that discards every record — the default when a host hasn't
/// wired one in.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _record: &LogRecord<'_>) {}
}

impl Logger for Arc<dyn Logger> {
    fn log(&self, record: &LogRecord<'_>) {
        (**self).log(record);
    }
}
