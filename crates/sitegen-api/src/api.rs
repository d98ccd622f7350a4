//! The backend operations the application depends on.
//!
//! [`GenerationApi`] is the seam between the application layer and the
//! network: [`crate::ApiClient`] talks to the real backend, tests use the
//! scripted fake in `test_utils`.

use sitegen_core::prelude::*;
use sitegen_core::{ProjectId, StatusSnapshot};

/// Backend operations used by the application.
///
/// Implementations attempt each call exactly once and reduce failures to a
/// user-facing message.
#[trait_variant::make(GenerationApi: Send)]
pub trait LocalGenerationApi {
    /// Submit a description; resolves to the new project's identifier.
    async fn submit_generation(&self, description: &str) -> Result<ProjectId>;

    /// Query the preview status of a project.
    async fn query_status(&self, project_id: &ProjectId) -> Result<StatusSnapshot>;

    /// Ask the backend to stop a project's preview server. Resolves to the
    /// backend's acknowledgement message.
    async fn stop_preview(&self, project_id: &ProjectId) -> Result<String>;
}
