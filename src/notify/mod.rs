//! Transient user notifications
//!
//! Every session transition and failure surfaces here. Notifications are
//! displayed in creation order, can be dismissed early by id, and otherwise
//! expire on their own after a fixed display duration (4 seconds by default,
//! matching the reference front end).

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default display duration before auto-removal
pub const DEFAULT_DISPLAY_TTL: Duration = Duration::from_secs(4);

/// Notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single transient notification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    pub created_at: DateTime<Utc>,
}

struct Inner {
    entries: Mutex<Vec<Notification>>,
    next_id: AtomicU64,
    ttl: Duration,
}

/// Owner of the current notification set.
///
/// Cheap to clone; all clones share the same set. Expiry timers run as
/// detached tokio tasks when a runtime is available, and `active()` sweeps
/// expired entries on read so the TTL contract also holds without one.
#[derive(Clone)]
pub struct NotificationCenter {
    inner: Arc<Inner>,
}

impl NotificationCenter {
    /// Create a center with the default display duration
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_DISPLAY_TTL)
    }

    /// Create a center with a custom display duration
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(1),
                ttl,
            }),
        }
    }

    /// Publish a notification; returns its id for early dismissal.
    pub fn notify(&self, message: impl Into<String>, severity: Severity) -> u64 {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let notification = Notification {
            id,
            message: message.into(),
            severity,
            created_at: Utc::now(),
        };
        debug!("notification #{} [{}]: {}", id, severity, notification.message);
        self.inner.entries.lock().push(notification);

        // Expiry timer; firing after dismissal is a harmless no-op.
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            let center = self.clone();
            let ttl = self.inner.ttl;
            handle.spawn(async move {
                tokio::time::sleep(ttl).await;
                center.dismiss(id);
            });
        }

        id
    }

    /// Remove a notification immediately. Returns false if it was already
    /// gone (dismissed or expired).
    pub fn dismiss(&self, id: u64) -> bool {
        let mut entries = self.inner.entries.lock();
        let before = entries.len();
        entries.retain(|n| n.id != id);
        entries.len() != before
    }

    /// Snapshot of the live notifications in creation order.
    pub fn active(&self) -> Vec<Notification> {
        let now = Utc::now();
        let mut entries = self.inner.entries.lock();
        entries.retain(|n| !self.is_expired(n, now));
        entries.clone()
    }

    /// Number of live notifications
    pub fn len(&self) -> usize {
        self.active().len()
    }

    /// True when no notification is live
    pub fn is_empty(&self) -> bool {
        self.active().is_empty()
    }

    fn is_expired(&self, notification: &Notification, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(notification.created_at).to_std() {
            Ok(age) => age >= self.inner.ttl,
            // Clock moved backwards; keep the entry.
            Err(_) => false,
        }
    }
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_even_for_equal_messages() {
        let center = NotificationCenter::new();
        let a = center.notify("same", Severity::Info);
        let b = center.notify("same", Severity::Info);
        assert_ne!(a, b);
        assert_eq!(center.len(), 2);
    }

    #[test]
    fn test_creation_order_is_preserved() {
        let center = NotificationCenter::new();
        center.notify("first", Severity::Info);
        let middle = center.notify("second", Severity::Success);
        center.notify("third", Severity::Error);

        center.dismiss(middle);

        let messages: Vec<String> = center
            .active()
            .into_iter()
            .map(|n| n.message)
            .collect();
        assert_eq!(messages, vec!["first", "third"]);
    }

    #[test]
    fn test_dismiss_twice_is_noop() {
        let center = NotificationCenter::new();
        let id = center.notify("bye", Severity::Info);
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }

    #[tokio::test]
    async fn test_auto_expiry_removes_entries() {
        let center = NotificationCenter::with_ttl(Duration::from_millis(40));
        center.notify("short-lived", Severity::Info);
        assert_eq!(center.len(), 1);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(center.is_empty());
    }

    #[tokio::test]
    async fn test_expiry_after_dismissal_is_noop() {
        let center = NotificationCenter::with_ttl(Duration::from_millis(40));
        let id = center.notify("gone early", Severity::Error);
        assert!(center.dismiss(id));

        // Let the timer fire against the already-dismissed id.
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(center.is_empty());
    }

    #[test]
    fn test_sweep_without_runtime() {
        let center = NotificationCenter::with_ttl(Duration::from_millis(10));
        center.notify("no runtime here", Severity::Info);
        std::thread::sleep(Duration::from_millis(30));
        assert!(center.is_empty());
    }
}
