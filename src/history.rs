//! Download history, newest first, capped at [`MAX_HISTORY`] entries.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::storage::{HISTORY_KEY, Storage};
use crate::store::PersistentList;
use crate::types::{DownloadSelection, HistoryRecord};

pub const MAX_HISTORY: usize = 100;

/// Stored ids further ahead of the clock than this do not seed the id
/// counter; they cannot come from this store.
const MAX_ID_LEAD_MS: u64 = 365 * 24 * 60 * 60 * 1000;

pub struct HistoryStore {
    records: PersistentList<HistoryRecord>,
    last_id: AtomicU64,
}

impl HistoryStore {
    pub fn load(storage: Arc<dyn Storage>) -> Self {
        let records: PersistentList<HistoryRecord> =
            PersistentList::load(storage, HISTORY_KEY, MAX_HISTORY);
        let ceiling = now_millis().saturating_add(MAX_ID_LEAD_MS);
        let last_id = records.with_items(|items| {
            items
                .iter()
                .filter_map(|record| record.id.parse::<u64>().ok())
                .filter(|&id| {
                    let plausible = id <= ceiling;
                    if !plausible {
                        tracing::warn!(id, "ignoring out-of-range history id");
                    }
                    plausible
                })
                .max()
                .unwrap_or(0)
        });

        Self {
            records,
            last_id: AtomicU64::new(last_id),
        }
    }

    /// Record a download. The returned record carries its assigned id.
    pub fn append(&self, selection: DownloadSelection) -> HistoryRecord {
        let record = HistoryRecord::from_selection(self.next_id(), selection);
        self.records.push_front(record.clone());
        tracing::debug!(id = %record.id, title = %record.title, "added to download history");
        record
    }

    pub fn clear(&self) {
        self.records.clear();
        tracing::info!("download history cleared");
    }

    pub fn records(&self) -> Vec<HistoryRecord> {
        self.records.snapshot()
    }

    pub fn with_records<R>(&self, f: impl FnOnce(&[HistoryRecord]) -> R) -> R {
        self.records.with_items(f)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Millisecond timestamp, bumped past the last issued id when the clock
    /// has not moved on.
    fn next_id(&self) -> String {
        let now = now_millis();
        let previous = self
            .last_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(now.max(last.saturating_add(1)))
            })
            .unwrap_or_else(|last| last);
        now.max(previous.saturating_add(1)).to_string()
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|dur| u64::try_from(dur.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}
