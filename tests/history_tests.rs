//! Integration tests for the persisted download history

use std::sync::Arc;

use vidlink::history::{HistoryStore, MAX_HISTORY};
use vidlink::storage::{FileStorage, HISTORY_KEY, MemoryStorage, Storage};
use vidlink::types::{DownloadSelection, HistoryRecord};

fn selection(title: &str) -> DownloadSelection {
    DownloadSelection {
        title: title.to_string(),
        platform: "youtube".to_string(),
        quality: "720p".to_string(),
        format: "mp4".to_string(),
        timestamp: "2024-05-01T10:00:00Z".to_string(),
    }
}

fn titles(records: &[HistoryRecord]) -> Vec<String> {
    records.iter().map(|r| r.title.clone()).collect()
}

mod ordering_tests {
    use super::*;

    #[test]
    fn newest_record_comes_first() {
        let store = HistoryStore::load(Arc::new(MemoryStorage::new()));
        store.append(selection("first"));
        store.append(selection("second"));
        store.append(selection("third"));

        assert_eq!(titles(&store.records()), vec!["third", "second", "first"]);
    }

    #[test]
    fn length_never_exceeds_maximum() {
        let store = HistoryStore::load(Arc::new(MemoryStorage::new()));
        for i in 0..250 {
            store.append(selection(&format!("video {i}")));
            assert!(store.len() <= MAX_HISTORY);
        }

        let records = store.records();
        assert_eq!(records.len(), MAX_HISTORY);
        assert_eq!(records[0].title, "video 249");
        assert_eq!(records[MAX_HISTORY - 1].title, "video 150");
    }

    #[test]
    fn hundred_and_first_append_evicts_only_the_oldest() {
        let store = HistoryStore::load(Arc::new(MemoryStorage::new()));
        for i in 0..MAX_HISTORY {
            store.append(selection(&format!("video {i}")));
        }
        let before = store.records();

        store.append(selection("newcomer"));
        let after = store.records();

        assert_eq!(after.len(), MAX_HISTORY);
        assert_eq!(after[0].title, "newcomer");
        assert_eq!(&after[1..], &before[..MAX_HISTORY - 1]);
        assert!(!after.iter().any(|r| r.title == "video 0"));
    }
}

mod persistence_tests {
    use super::*;

    #[test]
    fn every_append_is_written_through() {
        let storage = Arc::new(MemoryStorage::new());
        let store = HistoryStore::load(storage.clone());

        let record = store.append(selection("saved"));

        let raw = storage.get(HISTORY_KEY).unwrap().expect("history written");
        let stored: Vec<HistoryRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored, vec![record]);
    }

    #[test]
    fn clear_empties_memory_and_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let store = HistoryStore::load(storage.clone());
        store.append(selection("a"));
        store.append(selection("b"));

        store.clear();

        assert!(store.is_empty());
        assert!(store.records().is_empty());
        assert_eq!(storage.get(HISTORY_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn history_survives_reload_from_disk() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let storage: Arc<dyn Storage> = Arc::new(FileStorage::new(temp_dir.path()));

        let first = HistoryStore::load(storage.clone());
        first.append(selection("old"));
        let latest = first.append(selection("new"));
        drop(first);

        let reloaded = HistoryStore::load(storage);
        assert_eq!(titles(&reloaded.records()), vec!["new", "old"]);

        let next = reloaded.append(selection("newer"));
        assert!(next.id.parse::<u64>().unwrap() > latest.id.parse::<u64>().unwrap());
    }

    #[test]
    fn corrupt_history_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(HISTORY_KEY, "{not json").unwrap();

        let store = HistoryStore::load(storage.clone());
        assert!(store.is_empty());

        store.append(selection("fresh"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_storage_directory_is_created_on_write() {
        let temp_dir = tempfile::tempdir().expect("tempdir");
        let root = temp_dir.path().join("nested").join("storage");
        let store = HistoryStore::load(Arc::new(FileStorage::new(&root)));

        store.append(selection("x"));

        assert!(root.join(format!("{HISTORY_KEY}.json")).exists());
    }
}
