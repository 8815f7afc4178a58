//! User-facing notifications.
//!
//! The form never talks to a global toast system. It is handed an
//! `Arc<dyn Notifier>` at construction and reports through that:
//!
//! * [`Notifier`]     — the capability the form depends on.
//! * [`Notification`] — title + description + [`Severity`].
//! * [`ToastQueue`]   — the production notifier; keeps transient toasts in
//!   memory for the UI to draw each frame.

pub mod toast;

pub use toast::{Toast, ToastQueue};

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Visual weight of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Neutral / success information.
    Default,
    /// Something the user needs to fix or that went wrong.
    Destructive,
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A short structured message shown transiently to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Warning raised when the text grows past the advisory limit.
    pub fn limit_exceeded(limit: usize) -> Self {
        Self::new(
            "Character limit exceeded",
            format!("Maximum {limit} characters allowed"),
            Severity::Destructive,
        )
    }

    /// Raised when a synthesis request completes successfully.
    pub fn generated() -> Self {
        Self::new(
            "Success!",
            "Your audio has been generated.",
            Severity::Default,
        )
    }

    /// Raised when the synthesis collaborator reports an error.
    pub fn generation_failed(reason: impl std::fmt::Display) -> Self {
        Self::new("Generation failed", reason.to_string(), Severity::Destructive)
    }
}

// ---------------------------------------------------------------------------
// Notifier trait
// ---------------------------------------------------------------------------

/// Something that can display a [`Notification`] to the user.
///
/// Must be `Send + Sync` so a single instance can be shared between the UI
/// thread and anything else holding an `Arc<dyn Notifier>`.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

// ---------------------------------------------------------------------------
// RecordingNotifier (test double)
// ---------------------------------------------------------------------------

/// Keeps every notification it receives so tests can assert on them.
#[cfg(test)]
#[derive(Default)]
pub struct RecordingNotifier {
    seen: std::sync::Mutex<Vec<Notification>>,
}

#[cfg(test)]
impl RecordingNotifier {
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.seen.lock().unwrap())
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().unwrap().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_message_mentions_limit() {
        let n = Notification::limit_exceeded(1024);
        assert_eq!(n.title, "Character limit exceeded");
        assert_eq!(n.description, "Maximum 1024 characters allowed");
        assert_eq!(n.severity, Severity::Destructive);
    }

    #[test]
    fn generated_is_default_severity() {
        let n = Notification::generated();
        assert_eq!(n.title, "Success!");
        assert_eq!(n.severity, Severity::Default);
    }

    #[test]
    fn failure_carries_reason() {
        let n = Notification::generation_failed("provider returned 500");
        assert_eq!(n.description, "provider returned 500");
        assert_eq!(n.severity, Severity::Destructive);
    }
}
