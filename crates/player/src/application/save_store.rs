//! Local save store
//!
//! All save records live under one storage key as a JSON array. Every change
//! reads the whole collection, edits it, and writes it back. The in-memory
//! copy only moves forward after storage accepted the write.

use std::sync::{Arc, PoisonError, RwLock};

use casebook_domain::{GameSnapshot, SaveId, SaveRecord};
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::application::session::ChangeFeed;
use crate::ports::outbound::{storage_keys, StorageError};
use crate::state::Platform;

#[derive(Clone)]
pub struct SaveStore {
    platform: Platform,
    cache: Arc<RwLock<Vec<SaveRecord>>>,
    changes: ChangeFeed,
}

impl SaveStore {
    pub fn new(platform: Platform, changes: ChangeFeed) -> Self {
        let store = Self {
            platform,
            cache: Arc::new(RwLock::new(Vec::new())),
            changes,
        };
        let records = store.read_stored();
        *store.cache.write().unwrap_or_else(PoisonError::into_inner) = records;
        store
    }

    /// Re-read the stored collection.
    ///
    /// An absent or unparseable value yields an empty list; an unparseable
    /// value is also cleared from storage.
    pub fn list(&self) -> Vec<SaveRecord> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *cache = self.read_stored();
        cache.clone()
    }

    /// Last successfully read or written collection
    pub fn cached(&self) -> Vec<SaveRecord> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Save a snapshot as a new record at the end of the collection.
    ///
    /// The id is the current time in millis, bumped past any id already in
    /// the stored collection.
    pub fn create(
        &self,
        name: Option<&str>,
        created_at: DateTime<Utc>,
        snapshot: GameSnapshot,
    ) -> Result<SaveRecord, StorageError> {
        let now = self.platform.now_millis();
        self.append_with(|records| {
            SaveRecord::new(free_id(records, now), name, created_at, snapshot)
        })
    }

    fn append_with(
        &self,
        build: impl FnOnce(&[SaveRecord]) -> SaveRecord,
    ) -> Result<SaveRecord, StorageError> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_stored();
        let record = build(&records);
        records.push(record.clone());

        self.write_stored(&records)?;
        *cache = records;
        drop(cache);

        info!(save_id = %record.id, "Game saved");
        self.changes.notify();
        Ok(record)
    }

    /// Remove a record by id, keeping the others in order.
    ///
    /// Returns `false` when no record had that id.
    pub fn remove(&self, id: &SaveId) -> Result<bool, StorageError> {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        let mut records = self.read_stored();
        let before = records.len();
        records.retain(|r| &r.id != id);
        if records.len() == before {
            *cache = records;
            return Ok(false);
        }

        self.write_stored(&records)?;
        *cache = records;
        drop(cache);

        info!(save_id = %id, "Save deleted");
        self.changes.notify();
        Ok(true)
    }

    fn read_stored(&self) -> Vec<SaveRecord> {
        let Some(raw) = self.platform.storage_load(storage_keys::SAVED_GAMES) else {
            return Vec::new();
        };

        match serde_json::from_str::<Vec<SaveRecord>>(&raw) {
            Ok(records) => {
                debug!(count = records.len(), "Loaded saved games");
                records
            }
            Err(e) => {
                warn!(error = %e, "Saved games are unreadable, clearing them");
                if let Err(e) = self.platform.storage_remove(storage_keys::SAVED_GAMES) {
                    warn!(error = %e, "Failed to clear unreadable saved games");
                }
                Vec::new()
            }
        }
    }

    fn write_stored(&self, records: &[SaveRecord]) -> Result<(), StorageError> {
        let raw =
            serde_json::to_string(records).map_err(|e| StorageError::Encode(e.to_string()))?;
        self.platform
            .storage_save(storage_keys::SAVED_GAMES, &raw)
            .inspect_err(|e| warn!(error = %e, "Failed to write saved games"))
    }
}

fn free_id(records: &[SaveRecord], now_millis: u64) -> SaveId {
    let taken: Vec<u64> = records
        .iter()
        .filter_map(|r| r.id.as_str().parse().ok())
        .collect();

    let mut millis = now_millis;
    while taken.contains(&millis) {
        millis += 1;
    }
    SaveId::new(millis.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::platform::mock::{create_mock_platform, MockPlatformHandles};
    use crate::infrastructure::testing::sample_case;

    fn store() -> (SaveStore, MockPlatformHandles) {
        let (platform, handles) = create_mock_platform();
        (SaveStore::new(platform, ChangeFeed::new()), handles)
    }

    fn record(id: &str, name: &str) -> SaveRecord {
        SaveRecord::new(
            SaveId::new(id),
            Some(name),
            Utc::now(),
            GameSnapshot::new(sample_case()),
        )
    }

    fn append(store: &SaveStore, record: SaveRecord) -> Result<SaveRecord, StorageError> {
        store.append_with(|_| record)
    }

    fn ids(records: &[SaveRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn append_then_list_returns_collection_in_order() {
        let (store, _) = store();
        append(&store, record("1", "first")).unwrap();
        append(&store, record("2", "second")).unwrap();

        assert_eq!(ids(&store.list()), ["1", "2"]);
    }

    #[test]
    fn remove_keeps_relative_order_of_others() {
        let (store, _) = store();
        for id in ["1", "2", "3", "4"] {
            append(&store, record(id, id)).unwrap();
        }

        assert!(store.remove(&SaveId::new("2")).unwrap());
        assert_eq!(ids(&store.list()), ["1", "3", "4"]);
        assert!(!store.remove(&SaveId::new("missing")).unwrap());
    }

    #[test]
    fn corrupt_value_lists_empty_and_is_cleared() {
        let (platform, handles) = create_mock_platform();
        handles.storage.put_raw(storage_keys::SAVED_GAMES, "{not json");

        let store = SaveStore::new(platform.clone(), ChangeFeed::new());
        assert!(store.list().is_empty());
        assert_eq!(platform.storage_load(storage_keys::SAVED_GAMES), None);

        append(&store, record("1", "fresh")).unwrap();
        assert_eq!(ids(&store.list()), ["1"]);
    }

    #[test]
    fn failed_write_leaves_cache_and_storage_untouched() {
        let (store, handles) = store();
        append(&store, record("1", "kept")).unwrap();

        handles.storage.set_fail_writes(true);
        let err = append(&store, record("2", "lost")).unwrap_err();
        assert!(matches!(err, StorageError::Write(_)));
        assert_eq!(ids(&store.cached()), ["1"]);

        assert!(store.remove(&SaveId::new("1")).is_err());
        assert_eq!(ids(&store.cached()), ["1"]);

        handles.storage.set_fail_writes(false);
        assert_eq!(ids(&store.list()), ["1"]);
    }

    #[test]
    fn created_ids_are_unique_within_the_same_millisecond() {
        let (store, handles) = store();
        let snapshot = || GameSnapshot::new(sample_case());
        let first = store.create(Some("a"), Utc::now(), snapshot()).unwrap();
        let second = store.create(Some("b"), Utc::now(), snapshot()).unwrap();
        assert_ne!(first.id, second.id);

        handles.time.advance_millis(10);
        let third = store.create(None, Utc::now(), snapshot()).unwrap();
        assert_eq!(third.id.as_str(), (1_700_000_000_010u64).to_string());
        assert_eq!(
            ids(&store.list()),
            [first.id.as_str(), second.id.as_str(), third.id.as_str()]
        );
    }

    #[test]
    fn created_id_avoids_records_written_by_another_store() {
        let (platform, _) = create_mock_platform();
        let stale = SaveStore::new(platform.clone(), ChangeFeed::new());
        let other = SaveStore::new(platform, ChangeFeed::new());

        let theirs = other
            .create(Some("theirs"), Utc::now(), GameSnapshot::new(sample_case()))
            .unwrap();
        assert!(stale.cached().is_empty());

        let ours = stale
            .create(Some("ours"), Utc::now(), GameSnapshot::new(sample_case()))
            .unwrap();
        assert_ne!(ours.id, theirs.id);
        assert_eq!(ids(&stale.cached()), [theirs.id.as_str(), ours.id.as_str()]);
    }

    #[test]
    fn saves_written_by_one_store_are_seen_by_another() {
        let (platform, _) = create_mock_platform();
        let writer = SaveStore::new(platform.clone(), ChangeFeed::new());
        append(&writer, record("1", "shared")).unwrap();

        let reader = SaveStore::new(platform, ChangeFeed::new());
        assert_eq!(ids(&reader.cached()), ["1"]);
    }
}
