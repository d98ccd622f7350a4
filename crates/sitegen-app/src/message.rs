//! Message types for the application (TEA pattern)

use crate::input_key::InputKey;
use sitegen_core::{ProjectId, StatusSnapshot};

/// All possible messages/actions in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Tick event for periodic updates (spinner animation)
    Tick,

    /// Request to quit the application
    Quit,

    // ─────────────────────────────────────────────────────────
    // Prompt Input
    // ─────────────────────────────────────────────────────────
    InputChar(char),
    InputBackspace,
    InputDelete,
    InputCursorLeft,
    InputCursorRight,
    InputCursorHome,
    InputCursorEnd,
    InputClear,

    /// Replace the whole draft (CLI pre-fill, headless submission)
    SetDraft { text: String },

    /// Submit the current draft for generation
    SubmitGeneration,

    /// The backend accepted a submission
    GenerationSucceeded { project_id: ProjectId },

    /// The submission failed; `message` is user-facing
    GenerationFailed { message: String },

    // ─────────────────────────────────────────────────────────
    // Preview Lifecycle
    // ─────────────────────────────────────────────────────────
    /// The previous project's preview has been stopped (or the attempt
    /// failed) and polling for `project_id` may begin
    PreviewTornDown { project_id: ProjectId },

    /// The poll timer for `project_id` fired
    PreviewTick { project_id: ProjectId },

    /// A status query for `project_id` completed
    PreviewStatusReceived {
        project_id: ProjectId,
        snapshot: StatusSnapshot,
    },

    /// A status query for `project_id` failed
    PreviewStatusFailed {
        project_id: ProjectId,
        message: String,
    },

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Navigate to the ready project's download reference
    TriggerDownload,

    /// Open the ready project's preview in the browser
    OpenPreview,

    /// Opening a link in the browser failed
    BrowserFailed { message: String },

    /// Clear the top-level error banner
    DismissError,
}
