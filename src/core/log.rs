//! Human-readable game log.
//!
//! Every public game event is appended here and mirrored to `tracing`
//! at info level. The log is an `im::Vector`, so cloning a state (for
//! snapshots or what-if analysis) does not copy the history.

use im::Vector;
use serde::{Deserialize, Serialize};

/// One logged event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Turn number the event happened on.
    pub turn: u32,
    /// Event text.
    pub message: String,
}

/// Append-only event log.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameLog {
    entries: Vector<LogEntry>,
}

impl GameLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an event.
    pub fn record(&mut self, turn: u32, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(turn, "{}", message);
        self.entries.push_back(LogEntry { turn, message });
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Whether any entry contains `needle`.
    #[must_use]
    pub fn contains(&self, needle: &str) -> bool {
        self.entries.iter().any(|e| e.message.contains(needle))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }
}
