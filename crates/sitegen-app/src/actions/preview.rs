//! Preview teardown, the periodic poll timer, and status queries.
//!
//! **Timer strategy for `spawn_preview_poller`:**
//! - If a previous project exists, await a best-effort `stop_preview` for it
//!   first, then send `PreviewTornDown`. Nothing for the new project is
//!   queried before this completes.
//! - Tick at `interval` (first tick immediately), sending `PreviewTick`.
//!   The TEA layer decides whether a tick turns into a query.
//! - Exits when the shutdown channel receives `true` or `msg_tx` is closed.

use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::time::MissedTickBehavior;

use sitegen_api::GenerationApi;
use sitegen_core::prelude::*;
use sitegen_core::ProjectId;

use crate::message::Message;

/// Upper bound on the stop-preview call made during shutdown.
pub const PREVIEW_STOP_TIMEOUT: Duration = Duration::from_secs(5);

/// Ask the backend to stop a preview. Failures are logged, never surfaced.
pub async fn stop_preview_best_effort<A>(api: &A, project_id: &ProjectId)
where
    A: GenerationApi,
{
    match api.stop_preview(project_id).await {
        Ok(ack) => info!("Stopped preview for {}: {}", project_id, ack),
        Err(e) => warn!("Failed to stop preview for {} (ignored): {}", project_id, e),
    }
}

pub(super) fn spawn_preview_poller<A>(
    api: A,
    previous: Option<ProjectId>,
    project_id: ProjectId,
    mut shutdown_rx: watch::Receiver<bool>,
    interval: Duration,
    msg_tx: mpsc::Sender<Message>,
) where
    A: GenerationApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        if let Some(previous) = previous {
            stop_preview_best_effort(&api, &previous).await;

            if *shutdown_rx.borrow() {
                debug!("Poller for {} superseded during teardown", project_id);
                return;
            }
            if msg_tx
                .send(Message::PreviewTornDown {
                    project_id: project_id.clone(),
                })
                .await
                .is_err()
            {
                return;
            }
        }

        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if *shutdown_rx.borrow() {
                        break;
                    }
                    let tick = Message::PreviewTick {
                        project_id: project_id.clone(),
                    };
                    if msg_tx.send(tick).await.is_err() {
                        // Engine shutting down.
                        break;
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        break;
                    }
                }
            }
        }

        debug!("Poll timer for {} stopped", project_id);
    });
}

/// Issue a single status query, tagging the result with its project.
pub(super) fn spawn_status_query<A>(api: A, project_id: ProjectId, msg_tx: mpsc::Sender<Message>)
where
    A: GenerationApi + Send + Sync + 'static,
{
    tokio::spawn(async move {
        let result = api.query_status(&project_id).await;
        let msg = match result {
            Ok(snapshot) => Message::PreviewStatusReceived {
                project_id,
                snapshot,
            },
            Err(e) => Message::PreviewStatusFailed {
                project_id,
                message: e.to_string(),
            },
        };
        let _ = msg_tx.send(msg).await;
    });
}
