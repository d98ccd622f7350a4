//! sitegen - generate a website from a description, preview it, download it
//!
//! This is the binary entry point: argument parsing, logging and config
//! resolution, then either the TUI or the headless NDJSON runner.

mod headless;

use std::path::PathBuf;

use clap::Parser;
use sitegen_app::config::{self, CliOverrides};
use sitegen_core::logging;
use sitegen_core::prelude::*;

/// sitegen - generate, preview and download websites from the terminal
#[derive(Parser, Debug)]
#[command(name = "sitegen", version)]
#[command(about = "Generate a website from a description, preview it, download it", long_about = None)]
struct Args {
    /// Website description (pre-fills the prompt; required with --headless)
    #[arg(value_name = "DESCRIPTION")]
    description: Option<String>,

    /// Backend base URL (overrides SITEGEN_API_URL and the config file)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preview status poll interval in milliseconds
    #[arg(long, value_name = "MS")]
    poll_interval_ms: Option<u64>,

    /// Command used to open URLs (default: system opener)
    #[arg(long, value_name = "CMD")]
    browser: Option<String>,

    /// Run in headless mode (NDJSON output, no TUI)
    #[arg(long)]
    headless: bool,

    /// Write a commented default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize error handling
    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;

    // Initialize logging (to file, since the TUI or NDJSON owns stdout)
    logging::init()?;

    let config_path = args.config.unwrap_or_else(config::default_config_path);

    if args.init_config {
        config::init_config_file(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let overrides = CliOverrides {
        api_url: args.api_url,
        poll_interval_ms: args.poll_interval_ms,
        browser: args.browser,
    };
    let settings = config::resolve_settings(&config_path, &overrides);
    info!("Backend: {}", settings.api.base_url);

    let result = if args.headless {
        match args.description {
            Some(description) => headless::runner::run_headless(settings, &description).await,
            None => Err(Error::config("--headless requires a DESCRIPTION")),
        }
    } else {
        sitegen_tui::run(settings, args.description).await
    };

    if let Err(ref e) = result {
        error!("Application error: {:?}", e);
    }

    info!("sitegen exiting");
    result
}
