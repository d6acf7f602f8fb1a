//! Transient user-notification collaborator. Business errors and the
//! authorization-failure notice surface here; it is a side-effect sink, never
//! a return value.

use std::time::Duration;

/// Display duration both front-ends use for error toasts.
pub const ERROR_NOTICE_DURATION: Duration = Duration::from_secs(5);
/// Display duration for non-error toasts (the message widget's default).
pub const NOTICE_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub message: String,
    pub severity: Severity,
    pub duration: Duration,
}

impl Notice {
    fn with(message: String, severity: Severity, duration: Duration) -> Self {
        Self { message, severity, duration }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self::with(message.into(), Severity::Error, ERROR_NOTICE_DURATION)
    }

    pub fn warning<S: Into<String>>(message: S) -> Self {
        Self::with(message.into(), Severity::Warning, NOTICE_DURATION)
    }

    pub fn success<S: Into<String>>(message: S) -> Self {
        Self::with(message.into(), Severity::Success, NOTICE_DURATION)
    }

    pub fn info<S: Into<String>>(message: S) -> Self {
        Self::with(message.into(), Severity::Info, NOTICE_DURATION)
    }
}

pub trait MessageSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Discards every notice; for hosts with no message display.
pub struct NullSink;

impl MessageSink for NullSink {
    fn notify(&self, _notice: Notice) {}
}

/// Routes notices to the log stream; used by headless hosts.
pub struct TraceSink;

impl MessageSink for TraceSink {
    fn notify(&self, notice: Notice) {
        match notice.severity {
            Severity::Error => tracing::warn!(target: "notify", "{}", notice.message),
            Severity::Warning => tracing::warn!(target: "notify", "{}", notice.message),
            _ => tracing::info!(target: "notify", "{}", notice.message),
        }
    }
}
