//! # Project Domain Types
//!
//! Shared vocabulary between:
//! - `sitegen-api` (decoding backend responses into snapshots)
//! - `sitegen-app` (tracking the current project session)
//! - `sitegen-tui` (rendering preview and download state)

use std::fmt;

use serde::{Deserialize, Serialize};

// ── ProjectId ─────────────────────────────────────────────────────────────────

/// Opaque identifier of a generated project, minted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectId(String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ProjectId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ── GenerationRequest ─────────────────────────────────────────────────────────

/// A free-text site description that is safe to submit.
///
/// The only validation is non-emptiness after trimming surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    description: String,
}

impl GenerationRequest {
    /// Returns `None` for empty or whitespace-only input.
    pub fn new(description: &str) -> Option<Self> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                description: trimmed.to_string(),
            })
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn into_description(self) -> String {
        self.description
    }
}

// ── StatusSnapshot ────────────────────────────────────────────────────────────

/// Latest known status of a project preview. Each poll replaces the previous
/// snapshot wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub ready: bool,
    pub preview_url: Option<String>,
    pub download_url: Option<String>,
}

impl StatusSnapshot {
    /// Snapshot for a project whose preview is still being prepared.
    pub fn pending() -> Self {
        Self::default()
    }

    pub fn ready(preview_url: impl Into<String>, download_url: impl Into<String>) -> Self {
        Self {
            ready: true,
            preview_url: Some(preview_url.into()),
            download_url: Some(download_url.into()),
        }
    }

    /// A snapshot only counts as ready when it also carries a preview reference.
    pub fn is_ready(&self) -> bool {
        self.ready && self.preview_url.is_some()
    }
}
