use eyre::{Result, eyre};
use std::env;

/// Configuration for a schedule viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    /// Base URL of the StudioSync API, without a trailing slash
    pub api_base_url: String,
}

impl ViewerConfig {
    /// Load configuration from environment variables
    ///
    /// `API_BASE_URL` defaults to `http://localhost:5000`.
    pub fn from_env() -> Self {
        Self::new(
            &env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string()),
        )
    }

    pub fn new(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn schedule_url(&self) -> String {
        format!("{}/api/schedule", self.api_base_url)
    }

    /// WebSocket URL of the live channel, derived from the API scheme.
    pub fn live_url(&self) -> Result<String> {
        let ws_base = if let Some(rest) = self.api_base_url.strip_prefix("https://") {
            format!("wss://{}", rest)
        } else if let Some(rest) = self.api_base_url.strip_prefix("http://") {
            format!("ws://{}", rest)
        } else {
            return Err(eyre!("API_BASE_URL must start with http:// or https://"));
        };
        Ok(format!("{}/api/schedule/live", ws_base))
    }
}
