//! Append-only activity log.

pub mod entry;

pub use entry::{ActivityEntry, EntryKind, LogResult};

use serde::{Deserialize, Serialize};

/// A chronological record of what happened in a session. Entries can only
/// be appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: Vec<ActivityEntry>,
}

impl ActivityLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: ActivityEntry) {
        tracing::debug!(title = %entry.title, result = %entry.result, "activity");
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[ActivityEntry] {
        &self.entries
    }

    /// Entries appended after the first `from`.
    pub fn since(&self, from: usize) -> &[ActivityEntry] {
        self.entries.get(from..).unwrap_or(&[])
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&ActivityEntry> {
        self.entries.last()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the log as plain text, one line per entry.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Activity Log\n============\n\n");
        for entry in &self.entries {
            out.push_str(&format!(
                "{} [{}] {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.kind,
                entry
            ));
        }
        out
    }
}
