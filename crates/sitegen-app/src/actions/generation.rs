//! One-shot generation submission.

use tokio::sync::mpsc;

use sitegen_api::GenerationApi;
use sitegen_core::prelude::*;

use crate::message::Message;

/// Submit `description` once and report the outcome. No retries.
pub(super) fn spawn_submit_generation<A>(api: A, description: String, msg_tx: mpsc::Sender<Message>)
where
    A: GenerationApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let msg = match api.submit_generation(&description).await {
            Ok(project_id) => Message::GenerationSucceeded { project_id },
            Err(e) => Message::GenerationFailed {
                message: e.to_string(),
            },
        };
        if msg_tx.send(msg).await.is_err() {
            debug!("Generation finished after the engine shut down");
        }
    });
}
