//! Transient user-facing messages.
//!
//! Operations never print or render anything themselves; they push a
//! [`Notification`] to the injected [`NotificationSink`] and the view layer
//! decides how to show it. [`ToastQueue`] is the in-process sink the CLI and
//! tests use.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};

/// Severity of a notification, matching the toast kinds of the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single queued message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Error)
    }
}

/// Destination for user-facing messages.
pub trait NotificationSink: Send + Sync {
    /// Queue one notification.
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::success(message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::error(message));
    }
}

/// FIFO queue of notifications shared between clones.
#[derive(Debug, Clone, Default)]
pub struct ToastQueue {
    queue: Arc<Mutex<VecDeque<Notification>>>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything queued so far, oldest first.
    pub fn drain(&self) -> Vec<Notification> {
        match self.queue.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(poisoned) => poisoned.into_inner().drain(..).collect(),
        }
    }

    /// Copy of the queue without consuming it.
    pub fn snapshot(&self) -> Vec<Notification> {
        match self.queue.lock() {
            Ok(queue) => queue.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl NotificationSink for ToastQueue {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Error | Severity::Warning => {
                tracing::debug!(severity = %notification.severity, "Toast: {}", notification.message)
            }
            _ => tracing::trace!(severity = %notification.severity, "Toast: {}", notification.message),
        }

        match self.queue.lock() {
            Ok(mut queue) => queue.push_back(notification),
            Err(poisoned) => poisoned.into_inner().push_back(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let queue = ToastQueue::new();
        queue.success("first");
        queue.error("second");

        assert_eq!(queue.len(), 2);
        assert_eq!(
            queue.drain(),
            vec![Notification::success("first"), Notification::error("second")]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clones_share_queue() {
        let queue = ToastQueue::new();
        let other = queue.clone();
        other.notify(Notification::new("hi", Severity::Info));

        assert_eq!(queue.snapshot(), vec![Notification::new("hi", Severity::Info)]);
    }

    #[test]
    fn test_severity_labels() {
        assert_eq!(Severity::Success.to_string(), "success");
        assert_eq!(Severity::Error.as_str(), "error");
    }
}
