//! Settings loading for `config.toml`, plus environment and CLI overrides

use std::path::{Path, PathBuf};

use super::types::Settings;
use sitegen_core::prelude::*;

const CONFIG_FILENAME: &str = "config.toml";
const SITEGEN_DIR: &str = "sitegen";

/// Environment variable overriding `[api] base_url`.
pub const API_URL_ENV_VAR: &str = "SITEGEN_API_URL";

/// Default location of the settings file: `<config_dir>/sitegen/config.toml`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SITEGEN_DIR)
        .join(CONFIG_FILENAME)
}

/// Load settings from `config_path`.
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(config_path: &Path) -> Settings {
    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match std::fs::read_to_string(config_path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(settings) => {
                debug!("Loaded settings from {:?}", config_path);
                settings
            }
            Err(e) => {
                warn!("Failed to parse {:?}: {}", config_path, e);
                Settings::default()
            }
        },
        Err(e) => {
            warn!("Failed to read {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Apply overrides from the environment, read through `lookup`.
///
/// Only non-blank values are honored.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(API_URL_ENV_VAR).filter(|v| !v.trim().is_empty()) {
        debug!("{} overrides api.base_url", API_URL_ENV_VAR);
        settings.api.base_url = url.trim().to_string();
    }
}

/// Overrides supplied on the command line. `None` leaves the setting as is.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub api_url: Option<String>,
    pub poll_interval_ms: Option<u64>,
    pub browser: Option<String>,
}

/// Resolve the effective settings: CLI flag > environment > file > default.
pub fn resolve_settings(config_path: &Path, cli: &CliOverrides) -> Settings {
    let mut settings = load_settings(config_path);
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    if let Some(url) = &cli.api_url {
        settings.api.base_url = url.clone();
    }
    if let Some(ms) = cli.poll_interval_ms {
        settings.preview.poll_interval_ms = ms;
    }
    if let Some(browser) = &cli.browser {
        settings.browser.command = browser.clone();
    }

    info!(
        "Using backend {} (poll every {:?})",
        settings.api.base_url,
        settings.preview.poll_interval()
    );
    settings
}

/// Write a commented default config file to `config_path`.
///
/// Fails with [`Error::ConfigExists`] rather than overwriting an existing file.
pub fn init_config_file(config_path: &Path) -> Result<()> {
    if config_path.exists() {
        return Err(Error::ConfigExists {
            path: config_path.to_path_buf(),
        });
    }

    if let Some(dir) = config_path.parent() {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::config(format!("Failed to create {:?}: {}", dir, e)))?;
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .map_err(|e| Error::config(format!("Failed to write {:?}: {}", config_path, e)))?;
    info!("Created default config at {:?}", config_path);
    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# sitegen configuration

[api]
base_url = "http://localhost:8000"   # Overridden by SITEGEN_API_URL and --api-url
request_timeout_secs = 300           # Preview requests block while the site boots

[preview]
poll_interval_ms = 3000              # Minimum 500

[browser]
command = ""                         # Empty = system default opener
"#;
