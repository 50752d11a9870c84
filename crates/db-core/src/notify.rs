//! Notification log with an acknowledgment watermark
//!
//! Components append here on success and failure; the view layer decides how
//! much of the log to show. Entries are never mutated or removed, only
//! acknowledged by advancing the watermark.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Info,
    Error,
    Success,
}

/// One immutable entry in the notification log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub kind: NotificationKind,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Append-only notification log.
///
/// Append order defines the log's total order. The watermark marks the
/// boundary of acknowledged entries, so `unseen_count` is what a status bar
/// shows next to the latest message.
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: Vec<NotificationEntry>,
    watermark: usize,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry stamped with the current time.
    pub fn append(&mut self, kind: NotificationKind, text: impl Into<String>) {
        self.entries.push(NotificationEntry {
            kind,
            text: text.into(),
            created_at: Utc::now(),
        });
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.append(NotificationKind::Info, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.append(NotificationKind::Error, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.append(NotificationKind::Success, text);
    }

    /// Mark everything appended so far as seen.
    pub fn acknowledge(&mut self) {
        self.watermark = self.entries.len();
    }

    /// Number of entries appended since the last acknowledge.
    pub fn unseen_count(&self) -> usize {
        self.entries.len().saturating_sub(self.watermark)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in append order, for the scrollback view.
    pub fn entries(&self) -> &[NotificationEntry] {
        &self.entries
    }

    /// The most recent entry, for the status-bar view.
    pub fn latest(&self) -> Option<&NotificationEntry> {
        self.entries.last()
    }
}
