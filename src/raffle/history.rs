//! Completed-draw history, newest first.

use chrono::format::{Item, StrftimeItems};
use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Keep `format` only if chrono can render it; anything else falls back to
/// the default so that formatting can never fail at draw time.
fn checked_format(format: String) -> String {
    if StrftimeItems::new(&format).any(|item| matches!(item, Item::Error)) {
        warn!(format = %format, "invalid timestamp format, using {}", DEFAULT_TIMESTAMP_FORMAT);
        return DEFAULT_TIMESTAMP_FORMAT.to_string();
    }
    format
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    pub number: String,
    pub timestamp: String,
    #[serde(default)]
    pub winner_name: String,
}

#[derive(Debug)]
pub struct History {
    entries: Vec<HistoryEntry>,
    last_id: u64,
    timestamp_format: String,
}

impl History {
    pub fn new(entries: Vec<HistoryEntry>, timestamp_format: impl Into<String>) -> Self {
        let last_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        Self {
            entries,
            last_id,
            timestamp_format: checked_format(timestamp_format.into()),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a result. Ids come from the wall clock in milliseconds but
    /// never repeat or go backwards, even for two draws in the same tick.
    pub fn record(&mut self, number: &str) -> &HistoryEntry {
        let now = Local::now();
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last_id + 1);
        self.last_id = id;

        self.entries.insert(
            0,
            HistoryEntry {
                id,
                number: number.to_string(),
                timestamp: now.format(&self.timestamp_format).to_string(),
                winner_name: String::new(),
            },
        );
        &self.entries[0]
    }

    /// Set the label on one entry. Returns `false` if no entry has `id`.
    pub fn rename(&mut self, id: u64, name: &str) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                entry.winner_name = name.trim().to_string();
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
