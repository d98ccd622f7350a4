//! Headless mode - NDJSON event output for scripting
//!
//! Instead of the TUI, headless mode submits the description given on the
//! command line and writes one JSON object per line to stdout as the session
//! progresses.
//!
//! # Example Output
//!
//! ```json
//! {"event":"generation_started","description":"a blog site","timestamp":1704700001000}
//! {"event":"project_created","project_id":"p1","timestamp":1704700002000}
//! {"event":"preview_polling","project_id":"p1","attempt":1,"timestamp":1704700002001}
//! {"event":"preview_ready","project_id":"p1","preview_url":"http://localhost:4000","download_url":"/z/p1.zip","timestamp":1704700005000}
//! ```

pub mod runner;

use std::io::{self, Write};

use chrono::Utc;
use serde::Serialize;
use tracing::error;

use sitegen_app::EngineEvent;

/// Events emitted in headless mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HeadlessEvent {
    GenerationStarted {
        description: String,
        timestamp: i64,
    },

    GenerationFailed {
        message: String,
        timestamp: i64,
    },

    ProjectCreated {
        project_id: String,
        timestamp: i64,
    },

    /// The previous project's preview is being stopped
    PreviewTearingDown {
        previous: String,
        project_id: String,
        timestamp: i64,
    },

    /// A status query was issued
    PreviewPolling {
        project_id: String,
        attempt: u32,
        timestamp: i64,
    },

    PreviewReady {
        project_id: String,
        preview_url: String,
        download_url: Option<String>,
        timestamp: i64,
    },

    PreviewFailed {
        project_id: String,
        message: String,
        timestamp: i64,
    },

    /// Error occurred
    Error {
        message: String,
        fatal: bool,
        timestamp: i64,
    },

    Shutdown {
        timestamp: i64,
    },
}

impl HeadlessEvent {
    /// Emit this event to stdout as JSON
    pub fn emit(&self) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize headless event: {}", e);
                return;
            }
        };

        // Write to stdout with newline (NDJSON format)
        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{}", json) {
            error!("Failed to write headless event to stdout: {}", e);
            return;
        }

        // Flush to ensure immediate output
        if let Err(e) = stdout.flush() {
            error!("Failed to flush headless stdout: {}", e);
        }
    }

    /// Get current timestamp in milliseconds
    fn now() -> i64 {
        Utc::now().timestamp_millis()
    }

    pub fn error(message: impl Into<String>, fatal: bool) -> Self {
        Self::Error {
            message: message.into(),
            fatal,
            timestamp: Self::now(),
        }
    }
}

impl From<&EngineEvent> for HeadlessEvent {
    fn from(event: &EngineEvent) -> Self {
        let timestamp = Self::now();
        match event {
            EngineEvent::GenerationStarted { description } => Self::GenerationStarted {
                description: description.clone(),
                timestamp,
            },
            EngineEvent::GenerationFailed { message } => Self::GenerationFailed {
                message: message.clone(),
                timestamp,
            },
            EngineEvent::ProjectCreated { project_id } => Self::ProjectCreated {
                project_id: project_id.to_string(),
                timestamp,
            },
            EngineEvent::PreviewTearingDown {
                previous,
                project_id,
            } => Self::PreviewTearingDown {
                previous: previous.to_string(),
                project_id: project_id.to_string(),
                timestamp,
            },
            EngineEvent::PreviewPolling {
                project_id,
                attempt,
            } => Self::PreviewPolling {
                project_id: project_id.to_string(),
                attempt: *attempt,
                timestamp,
            },
            EngineEvent::PreviewReady {
                project_id,
                preview_url,
                download_url,
            } => Self::PreviewReady {
                project_id: project_id.to_string(),
                preview_url: preview_url.clone(),
                download_url: download_url.clone(),
                timestamp,
            },
            EngineEvent::PreviewFailed {
                project_id,
                message,
            } => Self::PreviewFailed {
                project_id: project_id.to_string(),
                message: message.clone(),
                timestamp,
            },
            EngineEvent::ErrorRaised { message } => Self::Error {
                message: message.clone(),
                fatal: false,
                timestamp,
            },
            EngineEvent::Shutdown => Self::Shutdown { timestamp },
        }
    }
}
