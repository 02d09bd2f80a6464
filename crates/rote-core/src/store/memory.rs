//! In-memory progress store.
//!
//! Backs sessions that do not need durable state, and tests. Contents live
//! only as long as the process.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::progress::ProgressEntry;

use super::{ProgressRepository, Result, StoreError};

/// HashMap-backed store guarded by a mutex.
#[derive(Debug, Default)]
pub struct InMemoryProgressStore {
    entries: Mutex<HashMap<String, ProgressEntry>>,
}

impl InMemoryProgressStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressRepository for InMemoryProgressStore {
    fn get(&self, item_key: &str) -> Result<Option<ProgressEntry>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Init("Entry lock poisoned".into()))?;
        Ok(entries.get(item_key).cloned())
    }

    fn upsert(&self, entry: &ProgressEntry) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Init("Entry lock poisoned".into()))?;
        entries.insert(entry.item_key.clone(), entry.clone());
        Ok(())
    }

    fn all(&self) -> Result<Vec<ProgressEntry>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Init("Entry lock poisoned".into()))?;
        Ok(entries.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_get_missing_returns_none() {
        let store = InMemoryProgressStore::new();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_upsert_then_get() {
        let store = InMemoryProgressStore::new();
        let entry = ProgressEntry::new("verse-1", Utc::now());

        store.upsert(&entry).unwrap();
        let fetched = store.get("verse-1").unwrap().unwrap();
        assert_eq!(fetched, entry);
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let store = InMemoryProgressStore::new();
        let mut entry = ProgressEntry::new("verse-1", Utc::now());
        store.upsert(&entry).unwrap();

        entry.strength = 0.6;
        entry.total_reviews = 3;
        store.upsert(&entry).unwrap();

        let fetched = store.get("verse-1").unwrap().unwrap();
        assert_eq!(fetched.strength, 0.6);
        assert_eq!(fetched.total_reviews, 3);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let store = InMemoryProgressStore::new();

        let first = store.initialize("verse-1").unwrap();
        let second = store.initialize("verse-1").unwrap();

        assert_eq!(first, second);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn test_all_returns_every_entry() {
        let store = InMemoryProgressStore::new();
        let now = Utc::now();
        for key in ["a", "b", "c"] {
            store.upsert(&ProgressEntry::new(key, now)).unwrap();
        }

        let mut keys: Vec<String> = store
            .all()
            .unwrap()
            .into_iter()
            .map(|e| e.item_key)
            .collect();
        keys.sort();
        assert_eq!(keys, ["a", "b", "c"]);
    }
}
