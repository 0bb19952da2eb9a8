//! Platform DI Container
//!
//! This module provides the `Platform` struct - a dependency injection container
//! that aggregates platform-specific service implementations behind port traits.
//!
//! Usage:
//! - Created by `create_platform()` in `infrastructure::platform::desktop`
//!   (or `mock::create_mock_platform()` in tests)
//! - Handed to the save store and notification queue by the composition root

use std::sync::Arc;

use crate::ports::outbound::{RandomProvider, StorageError, StorageProvider, TimeProvider};

/// Unified platform services container
#[derive(Clone)]
pub struct Platform {
    time: Arc<dyn TimeProviderDyn>,
    random: Arc<dyn RandomProviderDyn>,
    storage: Arc<dyn StorageProviderDyn>,
}

// =============================================================================
// Dynamic trait versions for Arc storage (need Send + Sync for spawned tasks)
// =============================================================================

trait TimeProviderDyn: Send + Sync {
    fn now_unix_secs(&self) -> u64;
    fn now_millis(&self) -> u64;
}

trait RandomProviderDyn: Send + Sync {
    fn random_f64(&self) -> f64;
    fn random_u32(&self) -> u32;
}

trait StorageProviderDyn: Send + Sync {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn load(&self, key: &str) -> Option<String>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Blanket implementations - convert port traits to dyn-safe wrappers
// =============================================================================

impl<T: TimeProvider + Send + Sync> TimeProviderDyn for T {
    fn now_unix_secs(&self) -> u64 {
        TimeProvider::now_unix_secs(self)
    }
    fn now_millis(&self) -> u64 {
        TimeProvider::now_millis(self)
    }
}

impl<T: RandomProvider + Send + Sync> RandomProviderDyn for T {
    fn random_f64(&self) -> f64 {
        RandomProvider::random_f64(self)
    }
    fn random_u32(&self) -> u32 {
        RandomProvider::random_u32(self)
    }
}

impl<T: StorageProvider + Send + Sync> StorageProviderDyn for T {
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        StorageProvider::save(self, key, value)
    }
    fn load(&self, key: &str) -> Option<String> {
        StorageProvider::load(self, key)
    }
    fn remove(&self, key: &str) -> Result<(), StorageError> {
        StorageProvider::remove(self, key)
    }
}

// =============================================================================
// Platform implementation
// =============================================================================

impl Platform {
    /// Create a new Platform with the given providers
    pub fn new<Tm, R, S>(time: Tm, random: R, storage: S) -> Self
    where
        Tm: TimeProvider + Send + Sync,
        R: RandomProvider + Send + Sync,
        S: StorageProvider + Send + Sync,
    {
        Self {
            time: Arc::new(time),
            random: Arc::new(random),
            storage: Arc::new(storage),
        }
    }

    // -------------------------------------------------------------------------
    // Time operations
    // -------------------------------------------------------------------------

    /// Get current time as Unix timestamp in seconds
    pub fn now_unix_secs(&self) -> u64 {
        self.time.now_unix_secs()
    }

    /// Get current time in milliseconds since epoch
    pub fn now_millis(&self) -> u64 {
        self.time.now_millis()
    }

    // -------------------------------------------------------------------------
    // Random operations
    // -------------------------------------------------------------------------

    /// Generate random f64 in range [0.0, 1.0)
    pub fn random_f64(&self) -> f64 {
        self.random.random_f64()
    }

    /// Generate a random u32
    pub fn random_u32(&self) -> u32 {
        self.random.random_u32()
    }

    /// Time-based id with a random tie-breaker, e.g. `"1714560000000-3141592653"`
    pub fn unique_id(&self) -> String {
        format!("{}-{}", self.now_millis(), self.random_u32())
    }

    // -------------------------------------------------------------------------
    // Storage operations
    // -------------------------------------------------------------------------

    /// Save a string value with the given key
    pub fn storage_save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.save(key, value)
    }

    /// Load a string value by key
    pub fn storage_load(&self, key: &str) -> Option<String> {
        self.storage.load(key)
    }

    /// Remove a value by key
    pub fn storage_remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove(key)
    }
}
