//! Bounded, write-through list persisted under a single storage key.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::Storage;

/// Ordered list of records, newest first, mirrored into [`Storage`].
///
/// Every mutation serializes the whole list and writes it before returning.
/// Storage failures are logged and swallowed: the in-memory list stays
/// authoritative for the rest of the session.
pub struct PersistentList<T> {
    storage: Arc<dyn Storage>,
    key: &'static str,
    max_len: usize,
    items: Mutex<Vec<T>>,
}

impl<T> PersistentList<T>
where
    T: Serialize + DeserializeOwned + Clone,
{
    /// Restore the list stored under `key`, or start empty.
    pub fn load(storage: Arc<dyn Storage>, key: &'static str, max_len: usize) -> Self {
        let mut items = match storage.get(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => items,
                Err(err) => {
                    tracing::warn!(key, error = %err, "stored list is corrupt, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                tracing::warn!(key, "no stored list, starting empty");
                Vec::new()
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "failed to read stored list");
                Vec::new()
            }
        };
        items.truncate(max_len);

        Self {
            storage,
            key,
            max_len,
            items: Mutex::new(items),
        }
    }

    /// Insert `item` as the newest entry, evicting from the tail past `max_len`.
    pub fn push_front(&self, item: T) {
        let mut items = self.lock();
        items.insert(0, item);
        items.truncate(self.max_len);
        self.persist(&items);
    }

    pub fn clear(&self) {
        let mut items = self.lock();
        items.clear();
        self.persist(&items);
    }

    pub fn snapshot(&self) -> Vec<T> {
        self.lock().clone()
    }

    /// Borrow the current items without cloning them.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.lock())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    fn lock(&self) -> MutexGuard<'_, Vec<T>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, items: &[T]) {
        let serialized = match serde_json::to_string(items) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(key = self.key, error = %err, "failed to serialize list");
                return;
            }
        };
        if let Err(err) = self.storage.set(self.key, &serialized) {
            tracing::warn!(key = self.key, error = %err, "failed to persist list");
        }
    }
}
