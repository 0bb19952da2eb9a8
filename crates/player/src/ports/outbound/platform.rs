//! Platform abstraction ports
//!
//! These traits abstract platform-specific operations so that:
//! 1. Application code remains platform-agnostic
//! 2. Platform-specific code is isolated in infrastructure
//! 3. Code becomes easily testable with mock implementations
//!
//! The `Platform` struct (DI container) that aggregates these traits lives in
//! `crate::state::platform`.

use thiserror::Error;

/// Time operations abstraction
pub trait TimeProvider: Clone + 'static {
    /// Get current time as Unix timestamp in seconds
    fn now_unix_secs(&self) -> u64;

    /// Get current time in milliseconds since epoch
    fn now_millis(&self) -> u64;
}

/// Random number generation abstraction
pub trait RandomProvider: Clone + 'static {
    /// Generate random f64 in range [0.0, 1.0)
    fn random_f64(&self) -> f64;

    /// Generate a random u32 (used as an id tie-breaker)
    fn random_u32(&self) -> u32;
}

/// Failure of the durable key-value store
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to write storage: {0}")]
    Write(String),

    #[error("Failed to encode stored value: {0}")]
    Encode(String),
}

/// Persistent storage abstraction (file-based on desktop)
///
/// Writes are all-or-nothing: when `save` or `remove` fails, a subsequent
/// `load` still returns the previous value.
pub trait StorageProvider: Clone + 'static {
    /// Save a string value with the given key
    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Load a string value by key, returns None if not found
    fn load(&self, key: &str) -> Option<String>;

    /// Remove a value by key
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage key constants
pub mod storage_keys {
    /// JSON array of save records
    pub const SAVED_GAMES: &str = "casebook_saved_games";
}
