//! User-facing notification sink
//!
//! The handler never talks to a widget toolkit directly; it emits notices
//! through the `Notifier` trait and the embedding UI decides how to render
//! them. `TracingNotifier` is the default sink, `MemoryNotifier` records
//! notices for tests and UI bridges that poll.

use std::sync::Mutex;

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    /// Informational (operation succeeded)
    Info,
    /// Error (operation failed or was rejected)
    Error,
}

/// A single user-facing notice
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Human-readable message
    pub message: String,
}

impl Notice {
    /// Build an info notice.
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    /// Build an error notice.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-facing notices
pub trait Notifier: Send + Sync {
    /// Emit a notice.
    fn notify(&self, notice: Notice);

    /// Emit an info notice.
    fn info(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice::info(message));
    }

    /// Emit an error notice.
    fn error(&self, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.notify(Notice::error(message));
    }
}

impl<T: Notifier + ?Sized> Notifier for std::sync::Arc<T> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice);
    }
}

/// Notifier that forwards notices to the tracing subscriber
#[derive(Debug, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => tracing::info!(target: "kb_client_core::notice", "{}", notice.message),
            NoticeLevel::Error => tracing::error!(target: "kb_client_core::notice", "{}", notice.message),
        }
    }
}

/// Notifier that records notices in memory
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    /// Create an empty recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notice emitted so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Drain and return the recorded notices.
    pub fn take(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Messages of the recorded error notices.
    pub fn errors(&self) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|n| n.level == NoticeLevel::Error)
            .map(|n| n.message)
            .collect()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notice);
    }
}
