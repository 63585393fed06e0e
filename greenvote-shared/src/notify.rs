//! User-facing notifications
//!
//! Views report the outcome of every mutation through a [`Notifier`]. Calls
//! are fire-and-forget: nothing is returned and nothing a notifier does can
//! fail the operation that triggered it.
//!
//! # Notifiers
//!
//! - [`ToastQueue`]: buffers notifications until the UI drains them
//! - [`TracingNotifier`]: writes them to the log

use std::sync::{Mutex, MutexGuard};

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Failure,
}

/// One toast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    /// Creates a success notification
    pub fn success(message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    /// Creates a failure notification
    pub fn failure(message: impl Into<String>) -> Self {
        Notification {
            level: NotificationLevel::Failure,
            message: message.into(),
        }
    }
}

/// The notification subsystem seam
pub trait Notifier: Send + Sync {
    /// Reports a completed operation
    fn success(&self, message: &str);

    /// Reports a failed operation
    fn failure(&self, message: &str);
}

/// Notifier that queues toasts for display
#[derive(Debug, Default)]
pub struct ToastQueue {
    pending: Mutex<Vec<Notification>>,
}

impl ToastQueue {
    /// Creates an empty queue
    pub fn new() -> Self {
        ToastQueue::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notification>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, notification: Notification) {
        self.lock().push(notification);
    }

    /// Takes every queued toast, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Copies the queued toasts without removing them
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock().clone()
    }
}

impl Notifier for ToastQueue {
    fn success(&self, message: &str) {
        self.push(Notification::success(message));
    }

    fn failure(&self, message: &str) {
        self.push(Notification::failure(message));
    }
}

/// Notifier that logs instead of displaying
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notification = "success", "{}", message);
    }

    fn failure(&self, message: &str) {
        tracing::warn!(notification = "failure", "{}", message);
    }
}
