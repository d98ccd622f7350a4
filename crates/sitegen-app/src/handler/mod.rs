//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers
//! - `preview`: Project adoption and preview lifecycle handlers

pub(crate) mod keys;
pub(crate) mod preview;
pub(crate) mod update;


use std::time::Duration;

use tokio::sync::watch;

use crate::message::Message;
use sitegen_core::ProjectId;

// Re-export main entry point
pub use update::update;

// Re-export functions used by internal tests
#[cfg(test)]
pub(crate) use keys::handle_key;

/// What a browser navigation is for; used for logging and error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Preview,
    Download,
}

/// Actions that the event loop should perform after update
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Submit a description to the backend
    SubmitGeneration { description: String },

    /// Stop the previous project's preview (if any), then run the poll
    /// timer for `project_id` until `shutdown_rx` flips to `true`
    StartPreview {
        previous: Option<ProjectId>,
        project_id: ProjectId,
        shutdown_rx: watch::Receiver<bool>,
        interval: Duration,
    },

    /// Issue one status query for `project_id`
    QueryStatus { project_id: ProjectId },

    /// Open a link with the configured browser
    OpenUrl {
        url: String,
        browser: String,
        kind: LinkKind,
    },
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }
}
