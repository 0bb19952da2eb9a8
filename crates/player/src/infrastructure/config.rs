//! Client configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Default backend endpoint for local development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8001";

/// Client configuration loaded from environment
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (scheme + host + optional prefix, no trailing slash)
    pub backend_url: String,
    /// Per-request timeout; case generation can take a while
    pub request_timeout: Duration,
    /// Override for the save storage file
    pub storage_path: Option<PathBuf>,
    /// Background refresh of slow-to-generate case assets
    pub poll: PollConfig,
}

/// Polling schedule for the case refresher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            timeout: Duration::from_secs(120),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            request_timeout: Duration::from_secs(120),
            storage_path: None,
            poll: PollConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let backend_url = env::var("CASEBOOK_BACKEND_URL")
            .unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Url::parse(&backend_url)
            .with_context(|| format!("CASEBOOK_BACKEND_URL is not a valid URL: {backend_url}"))?;

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(secs_var("CASEBOOK_REQUEST_TIMEOUT_SECS", 120)?),
            storage_path: env::var("CASEBOOK_STORAGE_PATH")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
            poll: PollConfig {
                interval: Duration::from_secs(secs_var("CASEBOOK_POLL_INTERVAL_SECS", 10)?),
                timeout: Duration::from_secs(secs_var("CASEBOOK_POLL_TIMEOUT_SECS", 120)?),
            },
        })
    }
}

fn secs_var(name: &str, default: u64) -> Result<u64> {
    match env::var(name) {
        Ok(raw) => {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{name} must be a whole number of seconds"))?;
            anyhow::ensure!(secs > 0, "{name} must be greater than zero");
            Ok(secs)
        }
        Err(_) => Ok(default),
    }
}

/// Load `.env.local` then `.env` from the working directory, if present.
pub fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        let path = std::path::Path::new(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}
