//! In-memory toast queue.
//!
//! [`ToastQueue`] is cheap to clone (`Arc` inside). The form pushes into it
//! through the [`Notifier`] trait; the page shell reads the live toasts each
//! frame with [`ToastQueue::visible`] and draws them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use super::{Notification, Notifier};

/// A notification plus the moment it was raised.
#[derive(Debug, Clone)]
pub struct Toast {
    pub notification: Notification,
    pub raised_at: Instant,
}

/// Bounded, time-limited list of toasts.
#[derive(Debug, Clone)]
pub struct ToastQueue {
    inner: Arc<Mutex<VecDeque<Toast>>>,
    lifetime: Duration,
    capacity: usize,
}

impl ToastQueue {
    /// Create a queue whose toasts live for `lifetime` and of which at most
    /// `capacity` are kept.
    pub fn new(lifetime: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
            lifetime,
            capacity: capacity.max(1),
        }
    }

    /// Push a toast raised at `now`.
    pub fn push_at(&self, notification: Notification, now: Instant) {
        let mut queue = self.lock();
        if queue.len() == self.capacity {
            queue.pop_front();
        }
        queue.push_back(Toast {
            notification,
            raised_at: now,
        });
    }

    /// Drop expired toasts and return the remaining ones, oldest first.
    pub fn visible_at(&self, now: Instant) -> Vec<Toast> {
        let mut queue = self.lock();
        queue.retain(|t| now.saturating_duration_since(t.raised_at) < self.lifetime);
        queue.iter().cloned().collect()
    }

    /// [`visible_at`](Self::visible_at) for the current instant.
    pub fn visible(&self) -> Vec<Toast> {
        self.visible_at(Instant::now())
    }

    /// Remove the toast at `index` in the current visible order.
    pub fn dismiss(&self, index: usize) {
        let mut queue = self.lock();
        if index < queue.len() {
            queue.remove(index);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the deque inconsistent, so
    // a poisoned lock is recovered rather than propagated.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for ToastQueue {
    fn notify(&self, notification: Notification) {
        log::debug!("toast: {}: {}", notification.title, notification.description);
        self.push_at(notification, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    fn note(title: &str) -> Notification {
        Notification::new(title, "", Severity::Default)
    }

    #[test]
    fn toasts_are_returned_oldest_first() {
        let queue = ToastQueue::new(Duration::from_secs(4), 5);
        let t0 = Instant::now();
        queue.push_at(note("a"), t0);
        queue.push_at(note("b"), t0);

        let titles: Vec<_> = queue
            .visible_at(t0)
            .into_iter()
            .map(|t| t.notification.title)
            .collect();
        assert_eq!(titles, ["a", "b"]);
    }

    #[test]
    fn expired_toasts_are_dropped() {
        let queue = ToastQueue::new(Duration::from_secs(4), 5);
        let t0 = Instant::now();
        queue.push_at(note("old"), t0);
        queue.push_at(note("new"), t0 + Duration::from_secs(3));

        let visible = queue.visible_at(t0 + Duration::from_secs(5));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.title, "new");
    }

    #[test]
    fn capacity_evicts_oldest() {
        let queue = ToastQueue::new(Duration::from_secs(4), 2);
        let t0 = Instant::now();
        queue.push_at(note("1"), t0);
        queue.push_at(note("2"), t0);
        queue.push_at(note("3"), t0);

        let titles: Vec<_> = queue
            .visible_at(t0)
            .into_iter()
            .map(|t| t.notification.title)
            .collect();
        assert_eq!(titles, ["2", "3"]);
    }

    #[test]
    fn dismiss_removes_one() {
        let queue = ToastQueue::new(Duration::from_secs(4), 5);
        queue.notify(note("x"));
        queue.notify(note("y"));
        queue.dismiss(0);
        queue.dismiss(10);

        let visible = queue.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].notification.title, "y");
    }

    #[test]
    fn clones_share_storage() {
        let queue = ToastQueue::new(Duration::from_secs(4), 5);
        let handle: Arc<dyn Notifier> = Arc::new(queue.clone());
        handle.notify(note("shared"));
        assert!(!queue.is_empty());
    }
}
