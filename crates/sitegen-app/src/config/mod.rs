//! Configuration file parsing for sitegen
//!
//! Supports `<config_dir>/sitegen/config.toml`, the `SITEGEN_API_URL`
//! environment variable and command-line overrides.

pub mod settings;
pub mod types;

pub use settings::{
    apply_env_overrides, default_config_path, init_config_file, load_settings, resolve_settings,
    CliOverrides, API_URL_ENV_VAR,
};
pub use types::*;
