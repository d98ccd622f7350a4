//! Main update function - handles state transitions (TEA pattern)

use crate::message::Message;
use crate::state::{AppPhase, AppState};
use sitegen_core::prelude::*;

use super::{keys::handle_key, preview, LinkKind, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.tick = state.tick.wrapping_add(1);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Prompt Input
        // ─────────────────────────────────────────────────────────
        Message::InputChar(c) => {
            state.input.insert_char(c);
            UpdateResult::none()
        }
        Message::InputBackspace => {
            state.input.backspace();
            UpdateResult::none()
        }
        Message::InputDelete => {
            state.input.delete();
            UpdateResult::none()
        }
        Message::InputCursorLeft => {
            state.input.move_left();
            UpdateResult::none()
        }
        Message::InputCursorRight => {
            state.input.move_right();
            UpdateResult::none()
        }
        Message::InputCursorHome => {
            state.input.move_home();
            UpdateResult::none()
        }
        Message::InputCursorEnd => {
            state.input.move_end();
            UpdateResult::none()
        }
        Message::InputClear => {
            state.input.clear();
            UpdateResult::none()
        }
        Message::SetDraft { text } => {
            state.input.set_draft(text);
            UpdateResult::none()
        }

        Message::SubmitGeneration => match state.input.begin_submit() {
            Some(request) => {
                info!("Submitting generation request");
                UpdateResult::action(UpdateAction::SubmitGeneration {
                    description: request.into_description(),
                })
            }
            None => {
                debug!(
                    "Submit ignored (blank draft or request in flight: {})",
                    state.input.is_submitting()
                );
                UpdateResult::none()
            }
        },

        Message::GenerationSucceeded { project_id } => {
            preview::handle_generation_succeeded(state, project_id)
        }

        Message::GenerationFailed { message } => {
            warn!("Generation failed: {}", message);
            state.input.finish_failure(message);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Preview Lifecycle
        // ─────────────────────────────────────────────────────────
        Message::PreviewTornDown { project_id } => {
            state.preview.on_torn_down(&project_id);
            UpdateResult::none()
        }

        Message::PreviewTick { project_id } => preview::handle_tick(state, project_id),

        Message::PreviewStatusReceived {
            project_id,
            snapshot,
        } => {
            state.preview.on_status(&project_id, snapshot);
            UpdateResult::none()
        }

        Message::PreviewStatusFailed {
            project_id,
            message,
        } => {
            state.preview.on_status_failed(&project_id, message);
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::TriggerDownload => match state.download_target() {
            Some(url) => UpdateResult::action(UpdateAction::OpenUrl {
                url: url.to_string(),
                browser: state.settings.browser.command.clone(),
                kind: LinkKind::Download,
            }),
            None => {
                debug!("Download requested before a project is ready");
                UpdateResult::none()
            }
        },

        Message::OpenPreview => match state.preview_target() {
            Some(url) => UpdateResult::action(UpdateAction::OpenUrl {
                url: url.to_string(),
                browser: state.settings.browser.command.clone(),
                kind: LinkKind::Preview,
            }),
            None => {
                debug!("Open preview requested before a project is ready");
                UpdateResult::none()
            }
        },

        Message::BrowserFailed { message } => {
            state.error = Some(message);
            UpdateResult::none()
        }

        Message::DismissError => {
            state.error = None;
            UpdateResult::none()
        }
    }
}
