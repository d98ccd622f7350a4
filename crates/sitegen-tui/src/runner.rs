//! Main TUI runner - entry point and event loop

use ratatui::DefaultTerminal;
use tracing::info;

use sitegen_app::config::Settings;
use sitegen_app::message::Message;
use sitegen_app::Engine;
use sitegen_core::prelude::*;

use crate::{event, render, terminal};

/// Run the TUI until the user quits or a signal arrives.
///
/// `initial_description` pre-fills the prompt; nothing is submitted until
/// the user presses Enter.
pub async fn run(settings: Settings, initial_description: Option<String>) -> Result<()> {
    // Install panic hook for terminal restoration
    terminal::install_panic_hook();

    let mut engine = Engine::new(settings)?;
    if let Some(text) = initial_description {
        engine.process_message(Message::SetDraft { text });
    }

    let mut term = ratatui::init();
    info!("TUI started");

    let result = run_loop(&mut term, &mut engine);

    // Stop polling and release the backend preview before leaving
    engine.shutdown().await;

    ratatui::restore();

    result
}

/// Main event loop
fn run_loop(terminal: &mut DefaultTerminal, engine: &mut Engine) -> Result<()> {
    while !engine.should_quit() {
        // Process background results first so the frame reflects them
        engine.drain_pending_messages();

        terminal.draw(|frame| render::view(frame, &engine.state))?;

        if let Some(message) = event::poll()? {
            engine.process_message(message);
        }
    }

    info!("TUI event loop finished");
    Ok(())
}
