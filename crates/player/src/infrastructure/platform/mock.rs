//! In-memory platform for tests
//!
//! Time is fixed unless advanced explicitly, random numbers count upwards, and
//! storage lives in a shared map that can be told to reject writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::ports::outbound::platform::{
    RandomProvider, StorageError, StorageProvider, TimeProvider,
};
use crate::state::Platform;

/// Manually driven clock
#[derive(Clone)]
pub struct MockTimeProvider {
    millis: Arc<AtomicU64>,
}

impl MockTimeProvider {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub fn advance_millis(&self, by: u64) {
        self.millis.fetch_add(by, Ordering::SeqCst);
    }
}

impl TimeProvider for MockTimeProvider {
    fn now_unix_secs(&self) -> u64 {
        self.millis.load(Ordering::SeqCst) / 1000
    }

    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Deterministic "random" source
#[derive(Clone, Default)]
pub struct MockRandomProvider {
    next: Arc<AtomicU32>,
}

impl RandomProvider for MockRandomProvider {
    fn random_f64(&self) -> f64 {
        0.5
    }

    fn random_u32(&self) -> u32 {
        self.next.fetch_add(1, Ordering::SeqCst)
    }
}

/// Shared in-memory key-value store
#[derive(Clone, Default)]
pub struct MemoryStorageProvider {
    values: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryStorageProvider {
    /// Make every subsequent `save`/`remove` fail (or succeed again)
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seed a raw value, bypassing the failure switch
    pub fn put_raw(&self, key: &str, value: &str) {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
    }

    fn check_writable(&self) -> Result<(), StorageError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Write("quota exceeded".to_string()));
        }
        Ok(())
    }
}

impl StorageProvider for MemoryStorageProvider {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check_writable()?;
        let mut values = self
            .values
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        values.remove(key);
        Ok(())
    }
}

/// Handles to the mock providers behind a `Platform`
#[derive(Clone)]
pub struct MockPlatformHandles {
    pub time: MockTimeProvider,
    pub storage: MemoryStorageProvider,
}

/// Create a platform backed by mocks, returning handles to steer them
pub fn create_mock_platform() -> (Platform, MockPlatformHandles) {
    let time = MockTimeProvider::new(1_700_000_000_000);
    let storage = MemoryStorageProvider::default();
    let platform = Platform::new(time.clone(), MockRandomProvider::default(), storage.clone());
    (platform, MockPlatformHandles { time, storage })
}
