//! Application state (Model in TEA pattern)

use sitegen_core::ProjectId;

use crate::config::Settings;
use crate::input::InputState;
use crate::preview::{PreviewStart, PreviewState};

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Complete application state. Owns the identity of the current project;
/// the preview and download views derive from it.
#[derive(Debug, Default)]
pub struct AppState {
    pub phase: AppPhase,

    /// Identifier of the current project session, if any
    pub project_id: Option<ProjectId>,

    /// Top-level error banner, for failures that belong to no component
    pub error: Option<String>,

    pub input: InputState,
    pub preview: PreviewState,

    pub settings: Settings,

    /// Animation frame counter, advanced on every tick
    pub tick: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    /// Adopt the identifier of a freshly generated project.
    ///
    /// Replaces the previous session and clears the top-level error. Returns
    /// the preview work to start, or `None` if nothing changed.
    pub fn adopt_project(&mut self, project_id: ProjectId) -> Option<PreviewStart> {
        self.project_id = Some(project_id.clone());
        self.error = None;
        self.preview.adopt(project_id)
    }

    /// Where the download control navigates to. `None` keeps it disabled.
    pub fn download_target(&self) -> Option<&str> {
        self.preview.download_url()
    }

    /// Where "open preview" navigates to, once the preview is live.
    pub fn preview_target(&self) -> Option<&str> {
        self.preview.preview_url()
    }
}
