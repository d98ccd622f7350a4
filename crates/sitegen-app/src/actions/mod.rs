//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every task reports back by sending a [`Message`] on `msg_tx`; none of them
//! touch `AppState` directly.

use tokio::sync::mpsc;

use sitegen_api::GenerationApi;

use crate::handler::UpdateAction;
use crate::message::Message;

pub(super) mod browser;
pub(super) mod generation;
pub(super) mod preview;

pub use preview::{stop_preview_best_effort, PREVIEW_STOP_TIMEOUT};

/// Execute an action by spawning a background task
pub fn handle_action<A>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, api: &A)
where
    A: GenerationApi + Clone + Send + Sync + 'static,
{
    match action {
        UpdateAction::SubmitGeneration { description } => {
            generation::spawn_submit_generation(api.clone(), description, msg_tx);
        }

        UpdateAction::StartPreview {
            previous,
            project_id,
            shutdown_rx,
            interval,
        } => {
            preview::spawn_preview_poller(
                api.clone(),
                previous,
                project_id,
                shutdown_rx,
                interval,
                msg_tx,
            );
        }

        UpdateAction::QueryStatus { project_id } => {
            preview::spawn_status_query(api.clone(), project_id, msg_tx);
        }

        UpdateAction::OpenUrl { url, browser, kind } => {
            browser::spawn_open_url(url, browser, kind, msg_tx);
        }
    }
}
