//! Daily history of time totals.
//!
//! One [`HistoryEntry`] per calendar day. Stopping the main timer upserts
//! today's entry with the session counters; a second stop on the same day
//! overwrites the first one's values in place.
//!
//! The ledger round-trips through a JSON array stored under
//! [`HISTORY_KEY`]:
//!
//! ```text
//! [{"id":1718000000000,"date":"2024-06-10","totalTime":900,"homeworkTime":300}]
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::ids::IdSource;

/// Storage key for the serialized ledger.
pub const HISTORY_KEY: &str = "kidTimeTrackerHistory";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: i64,
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub total_time: u64,
    pub homework_time: u64,
}

/// Aggregate over every recorded day.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub days: usize,
    pub total_time: u64,
    pub homework_time: u64,
}

#[derive(Debug, Clone, Default)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    ids: IdSource,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from entries, collapsing repeated dates.
    ///
    /// A later entry for a date already seen replaces the earlier one's
    /// values; the earlier position and id are kept.
    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        let max_id = entries.iter().map(|e| e.id).max().unwrap_or(0);
        let mut collapsed: Vec<HistoryEntry> = Vec::with_capacity(entries.len());
        for entry in entries {
            match collapsed.iter_mut().find(|e| e.date == entry.date) {
                Some(existing) => {
                    existing.total_time = entry.total_time;
                    existing.homework_time = entry.homework_time;
                }
                None => collapsed.push(entry),
            }
        }
        Self {
            entries: collapsed,
            ids: IdSource::starting_after(max_id),
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, date: NaiveDate) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record the counters for `today`.
    ///
    /// Replaces the fields of an existing entry for that date, otherwise
    /// appends a new entry. Returns the entry as stored.
    pub fn upsert(&mut self, today: NaiveDate, total_time: u64, homework_time: u64) -> &HistoryEntry {
        let index = match self.entries.iter().position(|e| e.date == today) {
            Some(index) => {
                let entry = &mut self.entries[index];
                entry.total_time = total_time;
                entry.homework_time = homework_time;
                info!(date = %today, total_time, homework_time, "history entry updated");
                index
            }
            None => {
                self.entries.push(HistoryEntry {
                    id: self.ids.next_id(),
                    date: today,
                    total_time,
                    homework_time,
                });
                info!(date = %today, total_time, homework_time, "history entry created");
                self.entries.len() - 1
            }
        };
        &self.entries[index]
    }

    pub fn summary(&self) -> HistorySummary {
        self.entries.iter().fold(
            HistorySummary {
                days: self.entries.len(),
                ..HistorySummary::default()
            },
            |mut acc, e| {
                acc.total_time = acc.total_time.saturating_add(e.total_time);
                acc.homework_time = acc.homework_time.saturating_add(e.homework_time);
                acc
            },
        )
    }

    /// Serialize every entry as a JSON array.
    ///
    /// # Errors
    /// Only if serde_json fails, which it does not for these types.
    pub fn serialize(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    /// Restore a ledger from a stored blob.
    ///
    /// A missing blob is an empty ledger. So is a malformed one: history is
    /// derived data and losing it is preferable to refusing to start.
    pub fn deserialize(blob: Option<&str>) -> Self {
        let Some(blob) = blob else {
            return Self::new();
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(blob) {
            Ok(entries) => Self::from_entries(entries),
            Err(e) => {
                warn!(error = %e, "stored history is malformed, starting empty");
                Self::new()
            }
        }
    }
}
