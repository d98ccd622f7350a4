//! Configuration types for sitegen
//!
//! Defines `Settings` (the `config.toml` schema) and its sections.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Minimum preview poll interval (500 ms) to avoid hammering the backend.
pub const PREVIEW_POLL_MIN_MS: u64 = 500;

/// Application settings (`<config_dir>/sitegen/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub preview: PreviewSettings,

    #[serde(default)]
    pub browser: BrowserSettings,
}

/// Backend connection settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ApiSettings {
    /// Base address of the generation backend
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Preview requests block while the backend installs
    /// dependencies and boots the site, so this is measured in minutes.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl ApiSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// Preview polling settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PreviewSettings {
    /// Interval between status queries, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl PreviewSettings {
    /// Poll interval, clamped to [`PREVIEW_POLL_MIN_MS`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(PREVIEW_POLL_MIN_MS))
    }
}

/// Browser settings
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct BrowserSettings {
    /// Command used to open preview and download links.
    /// Empty means the platform default (`open`, `xdg-open`, `start`).
    #[serde(default)]
    pub command: String,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_poll_interval_ms() -> u64 {
    3000
}
