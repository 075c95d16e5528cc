//! Activity log entry types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an entry is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Neutral bookkeeping.
    #[default]
    Info,
    /// A roll made in combat.
    Combat,
    /// A loss or a failed operation.
    Failure,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Combat => write!(f, "combat"),
            Self::Failure => write!(f, "failure"),
        }
    }
}

/// The headline result of an entry: a number or a short label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogResult {
    /// A numeric result such as a roll total.
    Number(i64),
    /// A textual result such as "Activated".
    Label(String),
}

impl fmt::Display for LogResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Label(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for LogResult {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<u64> for LogResult {
    fn from(n: u64) -> Self {
        Self::Number(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<i32> for LogResult {
    fn from(n: i32) -> Self {
        Self::Number(i64::from(n))
    }
}

impl From<&str> for LogResult {
    fn from(s: &str) -> Self {
        Self::Label(s.to_string())
    }
}

impl From<String> for LogResult {
    fn from(s: String) -> Self {
        Self::Label(s)
    }
}

/// A single entry in the activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// What happened, e.g. "Use: Pulse Strike (Skill)".
    pub title: String,
    /// The headline result.
    pub result: LogResult,
    /// Breakdown of the result, e.g. "[2d6]: 3+5".
    pub detail: String,
    /// Presentation category.
    pub kind: EntryKind,
}

impl ActivityEntry {
    /// Create an entry stamped with the current time.
    pub fn new(
        title: impl Into<String>,
        result: impl Into<LogResult>,
        detail: impl Into<String>,
        kind: EntryKind,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            title: title.into(),
            result: result.into(),
            detail: detail.into(),
            kind,
        }
    }
}

impl fmt::Display for ActivityEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.result)?;
        if !self.detail.is_empty() {
            write!(f, " ({})", self.detail)?;
        }
        Ok(())
    }
}
