//! Desktop platform implementations
//!
//! Provides platform-specific implementations for desktop using
//! standard library and native crates.

use crate::ports::outbound::platform::{
    RandomProvider, StorageError, StorageProvider, TimeProvider,
};
use crate::state::Platform;
use directories::ProjectDirs;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

/// Desktop time provider using std::time
#[derive(Clone, Default)]
pub struct DesktopTimeProvider;

impl TimeProvider for DesktopTimeProvider {
    fn now_unix_secs(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }

    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// Desktop random provider using rand crate
#[derive(Clone, Default)]
pub struct DesktopRandomProvider;

impl RandomProvider for DesktopRandomProvider {
    fn random_f64(&self) -> f64 {
        use rand::Rng;
        rand::thread_rng().gen()
    }

    fn random_u32(&self) -> u32 {
        use rand::Rng;
        rand::thread_rng().gen()
    }
}

/// Desktop storage provider with file-based persistence
///
/// Stores key-value pairs in a JSON file at:
/// - Linux: ~/.config/casebook/storage.json
/// - macOS: ~/Library/Application Support/io.casebook.player/storage.json
/// - Windows: C:\Users\<User>\AppData\Roaming\casebook\player\config\storage.json
///
/// The in-memory cache only changes after the file write succeeded, so a
/// failed write leaves both in their previous state.
#[derive(Clone)]
pub struct DesktopStorageProvider {
    /// Path to the storage file
    storage_path: PathBuf,
    /// In-memory cache of stored values
    cache: Arc<RwLock<HashMap<String, String>>>,
}

impl DesktopStorageProvider {
    /// Storage file in the platform config directory
    pub fn default_path() -> PathBuf {
        if let Some(dirs) = ProjectDirs::from("io", "casebook", "player") {
            dirs.config_dir().join("storage.json")
        } else {
            // Fallback to current directory if project dirs unavailable
            PathBuf::from("casebook_storage.json")
        }
    }

    /// Create a storage provider backed by the given file
    ///
    /// Loads existing data from the file if it exists. An unreadable file
    /// starts the cache empty; it is overwritten on the next successful write.
    pub fn new(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();

        let cache = if storage_path.exists() {
            match fs::read_to_string(&storage_path) {
                Ok(data) => match serde_json::from_str::<HashMap<String, String>>(&data) {
                    Ok(map) => map,
                    Err(e) => {
                        tracing::warn!("Failed to parse storage file: {}", e);
                        HashMap::new()
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read storage file: {}", e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        tracing::debug!("Desktop storage initialized at: {:?}", storage_path);

        Self {
            storage_path,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Write the full map to disk via a temp file and rename
    fn persist(&self, map: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.storage_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    StorageError::Unavailable(format!("create {}: {}", parent.display(), e))
                })?;
            }
        }

        let data =
            serde_json::to_string_pretty(map).map_err(|e| StorageError::Encode(e.to_string()))?;

        let tmp_path = self.storage_path.with_extension("json.tmp");
        fs::write(&tmp_path, data)
            .map_err(|e| StorageError::Write(format!("{}: {}", tmp_path.display(), e)))?;
        fs::rename(&tmp_path, &self.storage_path)
            .map_err(|e| StorageError::Write(format!("{}: {}", self.storage_path.display(), e)))
    }

    /// Apply `mutate` to a copy of the cache, persist it, then swap it in
    fn write_through(
        &self,
        mutate: impl FnOnce(&mut HashMap<String, String>),
    ) -> Result<(), StorageError> {
        let mut guard = self
            .cache
            .write()
            .map_err(|e| StorageError::Unavailable(format!("storage lock poisoned: {}", e)))?;

        let mut next = guard.clone();
        mutate(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }
}

impl StorageProvider for DesktopStorageProvider {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write_through(|map| {
            map.insert(key.to_string(), value.to_string());
        })
    }

    fn load(&self, key: &str) -> Option<String> {
        match self.cache.read() {
            Ok(guard) => guard.get(key).cloned(),
            Err(e) => {
                tracing::error!("Failed to acquire read lock for storage: {}", e);
                None
            }
        }
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.write_through(|map| {
            map.remove(key);
        })
    }
}

/// Create platform services for desktop
pub fn create_platform(storage_path: Option<PathBuf>) -> Platform {
    let storage_path = storage_path.unwrap_or_else(DesktopStorageProvider::default_path);
    Platform::new(
        DesktopTimeProvider,
        DesktopRandomProvider,
        DesktopStorageProvider::new(storage_path),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let storage = DesktopStorageProvider::new(&path);
        storage.save("k", "v1").unwrap();
        storage.save("k", "v2").unwrap();

        let reloaded = DesktopStorageProvider::new(&path);
        assert_eq!(reloaded.load("k").as_deref(), Some("v2"));

        reloaded.remove("k").unwrap();
        assert!(DesktopStorageProvider::new(&path).load("k").is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();

        let storage = DesktopStorageProvider::new(&path);
        assert!(storage.load("anything").is_none());

        storage.save("k", "v").unwrap();
        assert_eq!(DesktopStorageProvider::new(&path).load("k").as_deref(), Some("v"));
    }

    #[test]
    fn failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every rename fail.
        let path = dir.path().join("storage.json");
        let storage = DesktopStorageProvider::new(&path);
        storage.save("k", "old").unwrap();

        fs::remove_file(&path).unwrap();
        fs::create_dir(&path).unwrap();

        assert!(storage.save("k", "new").is_err());
        assert_eq!(storage.load("k").as_deref(), Some("old"));
    }
}
