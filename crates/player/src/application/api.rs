//! Typed API wrapper for application services.
//!
//! `Api` wraps an `Arc<dyn RawApiPort>` and layers serde conversions on top,
//! so services deal in request/response structs while adapters only move JSON.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::ports::outbound::{ApiError, RawApiPort};

#[derive(Clone)]
pub struct Api {
    raw: Arc<dyn RawApiPort>,
}

impl Api {
    pub fn new(raw: Arc<dyn RawApiPort>) -> Self {
        Self { raw }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let value = self.raw.get_json(path).await?;
        decode(value)
    }

    pub async fn post_value<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Value, ApiError> {
        let body_value =
            serde_json::to_value(body).map_err(|e| ApiError::Serialize(e.to_string()))?;
        self.raw.post_json(path, &body_value).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let value = self.post_value(path, body).await?;
        decode(value)
    }
}

/// Decode a JSON object into a typed response
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Percent-encode a value for use in a path segment or query string
pub fn encode_component(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::MockRawApiPort;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Analysis {
        analysis: String,
    }

    #[tokio::test]
    async fn post_decodes_typed_response() {
        let mut raw = MockRawApiPort::new();
        raw.expect_post_json()
            .withf(|path, body| path == "/api/analyze-evidence" && body["theory"] == "butler")
            .returning(|_, _| Ok(json!({"analysis": "Plausible"})));

        let api = Api::new(Arc::new(raw));
        let result: Analysis = api
            .post("/api/analyze-evidence", &json!({"theory": "butler"}))
            .await
            .unwrap();
        assert_eq!(result.analysis, "Plausible");
    }

    #[tokio::test]
    async fn shape_mismatch_is_a_parse_error() {
        let mut raw = MockRawApiPort::new();
        raw.expect_get_json()
            .returning(|_| Ok(json!({"unexpected": true})));

        let api = Api::new(Arc::new(raw));
        let result: Result<Analysis, _> = api.get("/api/anything").await;
        assert!(matches!(result, Err(ApiError::Parse(_))));
    }

    #[test]
    fn components_are_encoded() {
        assert_eq!(encode_component("a b/c"), "a+b%2Fc");
        assert_eq!(encode_component("c1"), "c1");
    }
}
