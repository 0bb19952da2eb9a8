//! reqwest adapter for the case backend
//!
//! Implements `RawApiPort`: every call either yields a JSON object or a single
//! normalized `ApiError`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::Value;
use uuid::Uuid;

use crate::ports::outbound::{ApiError, RawApiPort};

/// HTTP client for the backend REST API
#[derive(Clone)]
pub struct ApiAdapter {
    client: Client,
    base_url: String,
}

impl ApiAdapter {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(
                    error = %e,
                    timeout_secs = timeout.as_secs(),
                    "HTTP client setup failed, falling back to defaults without the request timeout"
                );
                Client::new()
            });

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn into_json(request_id: Uuid, response: Response) -> Result<Value, ApiError> {
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if !status.is_success() {
            let err = ApiError::from_status(status.as_u16(), status.canonical_reason(), &text);
            tracing::warn!(%request_id, status = status.as_u16(), "Backend call failed: {}", err);
            return Err(err);
        }

        parse_object_body(&text)
    }
}

/// Accept only a non-empty body that parses to a JSON object
pub(crate) fn parse_object_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::InvalidBody("empty response body".to_string()));
    }

    let value: Value =
        serde_json::from_str(text).map_err(|e| ApiError::InvalidBody(e.to_string()))?;

    if !value.is_object() {
        return Err(ApiError::InvalidBody(
            "expected a JSON object".to_string(),
        ));
    }

    Ok(value)
}

#[async_trait]
impl RawApiPort for ApiAdapter {
    async fn get_json(&self, path: &str) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "GET {}", path);

        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::into_json(request_id, response).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, "POST {}", path);

        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::into_json(request_id, response).await
    }
}
