//! Raw API Port - Object-safe HTTP boundary
//!
//! Typed request/response methods are generic and therefore not object-safe.
//! The composition root stores this object-safe boundary behind `Arc<dyn ...>`
//! and the application layer wraps it in the typed `Api`.

use serde_json::Value;

use super::ApiError;

/// Every successful call yields a JSON object; anything else is an `ApiError`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait::async_trait]
pub trait RawApiPort: Send + Sync {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError>;
}
