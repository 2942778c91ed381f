//! Chronological record of committed transitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single committed transition or session event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JournalEntry {
    /// The player picked a choice.
    Choice {
        /// Room the choice was offered in.
        from: String,
        /// Zero-based index of the choice.
        index: usize,
        /// Choice text.
        text: String,
        /// Room entered next.
        to: String,
        /// When the choice was committed.
        timestamp: DateTime<Utc>,
    },
    /// A dice roll was committed.
    Roll {
        /// Room the dice table belongs to.
        from: String,
        /// The rolled value.
        roll: u32,
        /// Text of the resolved outcome.
        text: String,
        /// Room entered next.
        to: String,
        /// When the roll was committed.
        timestamp: DateTime<Utc>,
    },
    /// The session went back to its start room with empty state.
    Restart {
        /// When the restart happened.
        timestamp: DateTime<Utc>,
    },
}

impl JournalEntry {
    /// The room this entry leads to, if it is a transition.
    pub fn destination(&self) -> Option<&str> {
        match self {
            Self::Choice { to, .. } | Self::Roll { to, .. } => Some(to),
            Self::Restart { .. } => None,
        }
    }
}

/// Append-only list of journal entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// All entries in order.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
