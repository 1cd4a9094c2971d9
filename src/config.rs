use std::env;
use std::time::Duration;

use crate::error::{Result, StudioError};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_OUTPUT_DIR: &str = "generated";

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub base_url: String,
    pub request_timeout: Option<Duration>,
    pub output_dir: String,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: None,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `STUDIO_BASE_URL`, `STUDIO_REQUEST_TIMEOUT_SECS` and
    /// `STUDIO_OUTPUT_DIR`, falling back to defaults for anything unset.
    pub fn from_env() -> Self {
        let base_url =
            env::var("STUDIO_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let request_timeout = env::var("STUDIO_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|secs| secs.parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs);
        let output_dir =
            env::var("STUDIO_OUTPUT_DIR").unwrap_or_else(|_| DEFAULT_OUTPUT_DIR.to_string());

        StudioConfig {
            base_url,
            request_timeout,
            output_dir,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            StudioError::ConfigError(format!("invalid base URL {}: {}", self.base_url, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(StudioError::ConfigError(format!(
                "unsupported URL scheme: {}",
                other
            ))),
        }
    }

    /// Base URL without a trailing slash, ready for `format!("{}/api/...")`.
    pub fn api_root(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
