//! Headless mode runner - main event loop without TUI
//!
//! Submits the description once, forwards engine events as NDJSON, and once
//! the preview is live reads commands from stdin until quit or EOF.

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use sitegen_app::{config::Settings, message::Message, Engine, EngineEvent};
use sitegen_core::prelude::*;

use super::HeadlessEvent;

/// Run in headless mode - output JSON events instead of TUI
///
/// Returns an error (and a non-zero exit) when generation or the preview
/// fails.
pub async fn run_headless(settings: Settings, description: &str) -> Result<()> {
    info!("sitegen starting in HEADLESS mode");

    let mut engine = Engine::new(settings)?;
    let mut events = engine.subscribe();

    engine.process_message(Message::SetDraft {
        text: description.to_string(),
    });
    engine.process_message(Message::SubmitGeneration);

    let result = if engine.state.input.is_submitting() {
        forward_events(&mut events);
        headless_event_loop(&mut engine, &mut events).await
    } else {
        Err(Error::generation("A website description is required"))
    };

    if let Err(ref e) = result {
        HeadlessEvent::error(e.to_string(), true).emit();
    }

    engine.shutdown().await;
    forward_events(&mut events);

    info!("sitegen headless mode exiting");
    result
}

/// Main headless event loop
async fn headless_event_loop(
    engine: &mut Engine,
    events: &mut broadcast::Receiver<EngineEvent>,
) -> Result<()> {
    let mut stdin_started = false;

    loop {
        if engine.should_quit() {
            info!("Quit requested");
            return Ok(());
        }

        let Some(msg) = engine.msg_rx.recv().await else {
            info!("Message channel closed");
            return Ok(());
        };
        engine.process_message(msg);
        forward_events(events);

        if let Some(message) = engine.state.input.error() {
            return Err(Error::generation(message));
        }
        if let Some(message) = engine.state.preview.error() {
            return Err(Error::status(message));
        }

        if engine.state.preview.is_ready() && !stdin_started {
            stdin_started = true;
            let stdin_tx = engine.msg_sender();
            std::thread::spawn(move || {
                spawn_stdin_reader_blocking(stdin_tx);
            });
        }
    }
}

/// Write every pending engine event to stdout.
fn forward_events(events: &mut broadcast::Receiver<EngineEvent>) {
    loop {
        match events.try_recv() {
            Ok(event) => HeadlessEvent::from(&event).emit(),
            Err(TryRecvError::Lagged(skipped)) => {
                warn!("Headless output lagged, {} events dropped", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

/// Map a stdin line to a message. `None` for blank or unknown input.
fn parse_command(line: &str) -> Option<Message> {
    match line.trim() {
        "o" | "open" => Some(Message::OpenPreview),
        "d" | "download" => Some(Message::TriggerDownload),
        "q" | "quit" => Some(Message::Quit),
        "" => None,
        other => {
            warn!("Unknown stdin command: {}", other);
            None
        }
    }
}

/// Read commands from stdin until quit or EOF (blocking, run on a thread)
fn spawn_stdin_reader_blocking(msg_tx: mpsc::Sender<Message>) {
    use std::io::BufRead;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        match line {
            Ok(line) => {
                let Some(message) = parse_command(&line) else {
                    continue;
                };
                let quit = matches!(message, Message::Quit);
                info!("Stdin: {:?}", message);
                if msg_tx.blocking_send(message).is_err() || quit {
                    return;
                }
            }
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }

    info!("Stdin closed, quitting");
    let _ = msg_tx.blocking_send(Message::Quit);
}
