//! Domain events emitted by the Engine for external consumers
//!
//! Events are broadcast after each message processing cycle via
//! `Engine::subscribe()`. The headless runner turns them into NDJSON.

use sitegen_core::ProjectId;

/// Domain events emitted by the Engine for external consumers.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    // ─────────────────────────────────────────────────────────
    // Generation
    // ─────────────────────────────────────────────────────────
    /// A generation request was sent
    GenerationStarted { description: String },

    /// The generation request failed; the prompt shows `message`
    GenerationFailed { message: String },

    /// The backend created a project and returned its identifier
    ProjectCreated { project_id: ProjectId },

    // ─────────────────────────────────────────────────────────
    // Preview
    // ─────────────────────────────────────────────────────────
    /// The previous project's preview is being stopped
    PreviewTearingDown {
        previous: ProjectId,
        project_id: ProjectId,
    },

    /// A status query was issued
    PreviewPolling { project_id: ProjectId, attempt: u32 },

    PreviewReady {
        project_id: ProjectId,
        preview_url: String,
        download_url: Option<String>,
    },

    /// Polling stopped on an error
    PreviewFailed {
        project_id: ProjectId,
        message: String,
    },

    // ─────────────────────────────────────────────────────────
    // Engine Lifecycle
    // ─────────────────────────────────────────────────────────
    /// A top-level error was raised
    ErrorRaised { message: String },

    /// Engine is shutting down
    Shutdown,
}

impl EngineEvent {
    /// Returns a short string label for this event type (for logging/debugging).
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GenerationStarted { .. } => "generation_started",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::ProjectCreated { .. } => "project_created",
            Self::PreviewTearingDown { .. } => "preview_tearing_down",
            Self::PreviewPolling { .. } => "preview_polling",
            Self::PreviewReady { .. } => "preview_ready",
            Self::PreviewFailed { .. } => "preview_failed",
            Self::ErrorRaised { .. } => "error_raised",
            Self::Shutdown => "shutdown",
        }
    }

    /// Project the event is about, if any.
    pub fn project_id(&self) -> Option<&ProjectId> {
        match self {
            Self::ProjectCreated { project_id }
            | Self::PreviewTearingDown { project_id, .. }
            | Self::PreviewPolling { project_id, .. }
            | Self::PreviewReady { project_id, .. }
            | Self::PreviewFailed { project_id, .. } => Some(project_id),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_type_labels_are_snake_case() {
        let events = [
            EngineEvent::GenerationStarted {
                description: "a blog site".into(),
            },
            EngineEvent::ProjectCreated {
                project_id: ProjectId::new("p1"),
            },
            EngineEvent::PreviewPolling {
                project_id: ProjectId::new("p1"),
                attempt: 1,
            },
            EngineEvent::Shutdown,
        ];
        let labels: Vec<_> = events.iter().map(EngineEvent::event_type).collect();
        assert_eq!(
            labels,
            [
                "generation_started",
                "project_created",
                "preview_polling",
                "shutdown"
            ]
        );
    }

    #[test]
    fn test_project_id_accessor() {
        let event = EngineEvent::PreviewFailed {
            project_id: ProjectId::new("p1"),
            message: "Failed to fetch preview status".into(),
        };
        assert_eq!(event.project_id().map(ProjectId::as_str), Some("p1"));
        assert_eq!(EngineEvent::Shutdown.project_id(), None);
    }
}
