//! API error contract shared by every backend call

use thiserror::Error;

/// Normalized failure of an outbound backend call.
///
/// Whatever went wrong underneath, callers get one error channel carrying a
/// human-readable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Non-2xx status; `message` is the server's text or `"HTTP <status>: <reason>"`
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request never produced a response
    #[error("Network error: {0}")]
    Network(String),

    /// A 2xx response whose body is absent or not a JSON object
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// The JSON object did not match the expected shape
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The request body could not be encoded
    #[error("Failed to serialize request: {0}")]
    Serialize(String),
}

impl ApiError {
    /// Build the HTTP error message from a response body and status line.
    ///
    /// FastAPI reports failures as `{"detail": "..."}`; the detail string is
    /// preferred, then any non-blank body, then the status line.
    pub fn from_status(status: u16, reason: Option<&str>, body: &str) -> Self {
        let body = body.trim();
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string));

        let message = match detail {
            Some(detail) if !detail.trim().is_empty() => detail,
            _ if !body.is_empty() => body.to_string(),
            _ => format!("HTTP {}: {}", status, reason.unwrap_or("")),
        };

        ApiError::Http { status, message }
    }
}
