//! Fire-and-forget browser launches for preview and download links.

use tokio::sync::mpsc;

use sitegen_core::prelude::*;

use crate::handler::LinkKind;
use crate::message::Message;

/// Launch the browser off the event loop. A failure to spawn the opener is
/// reported as `BrowserFailed` so it reaches the top-level error banner.
pub(super) fn spawn_open_url(
    url: String,
    browser: String,
    kind: LinkKind,
    msg_tx: mpsc::Sender<Message>,
) {
    tokio::spawn(async move {
        let result = tokio::task::spawn_blocking(move || match kind {
            LinkKind::Download => sitegen_api::trigger_download(&url, &browser),
            LinkKind::Preview => sitegen_api::open_url(&url, &browser),
        })
        .await;

        let error = match result {
            Ok(Ok(())) => return,
            Ok(Err(e)) => e.to_string(),
            Err(e) => format!("Failed to open browser: {}", e),
        };
        warn!("Opening {:?} link failed: {}", kind, error);
        let _ = msg_tx.send(Message::BrowserFailed { message: error }).await;
    });
}
