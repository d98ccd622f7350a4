//! Project adoption and preview lifecycle handlers

use sitegen_core::ProjectId;

use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Adopt the new project and kick off its preview.
pub(crate) fn handle_generation_succeeded(
    state: &mut AppState,
    project_id: ProjectId,
) -> UpdateResult {
    state.input.finish_success();

    match state.adopt_project(project_id) {
        Some(start) => UpdateResult::action(UpdateAction::StartPreview {
            previous: start.previous,
            project_id: start.project_id,
            shutdown_rx: start.shutdown_rx,
            interval: state.settings.preview.poll_interval(),
        }),
        None => UpdateResult::none(),
    }
}

/// Issue a status query if the preview accepts this tick.
pub(crate) fn handle_tick(state: &mut AppState, project_id: ProjectId) -> UpdateResult {
    if state.preview.on_tick(&project_id) {
        UpdateResult::action(UpdateAction::QueryStatus { project_id })
    } else {
        UpdateResult::none()
    }
}
