//! Wire types for the generation backend's JSON API.
//!
//! The backend is a FastAPI service. Failures carry `{"detail": ...}` where
//! `detail` is a plain string for application errors, or a list of
//! `{loc, msg, type}` objects for request validation errors.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest<'a> {
    pub description: &'a str,
}

/// Response of `POST /api/generate`.
///
/// The backend returns its full project record, keyed by `id`; only the
/// identifier is used client-side.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(alias = "id")]
    pub project_id: String,
}

/// Response of `GET /api/preview/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub zip_url: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

/// Readiness classification of a [`PreviewResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStatus {
    Pending,
    Ready,
    Failed,
}

impl PreviewResponse {
    /// Classify the response.
    ///
    /// A preview is ready once it has a `preview_url` and its `status`, if any,
    /// is one of `ready`, `completed` or `running`. `failed` and `error` are
    /// terminal. Anything else is still pending.
    pub fn status_kind(&self) -> PreviewStatus {
        let status = self.status.as_ref().map(|s| s.trim().to_ascii_lowercase());
        match status.as_deref() {
            Some("failed" | "error") => PreviewStatus::Failed,
            None | Some("ready" | "completed" | "running") if self.preview_url.is_some() => {
                PreviewStatus::Ready
            }
            _ => PreviewStatus::Pending,
        }
    }
}

/// Response of `POST /api/stop-preview/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StopPreviewResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorDetail {
    Message(String),
    Validation(Vec<ValidationIssue>),
}

#[derive(Debug, Deserialize)]
struct ValidationIssue {
    #[serde(default)]
    msg: Option<String>,
}

/// Extract the human-readable `detail` from an error body.
///
/// Returns `None` when the body is not JSON, has no `detail`, or the detail
/// is empty, so callers can substitute their per-operation fallback.
pub fn parse_error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    let message = match parsed.detail? {
        ErrorDetail::Message(message) => message,
        ErrorDetail::Validation(issues) => issues
            .into_iter()
            .filter_map(|issue| issue.msg)
            .collect::<Vec<_>>()
            .join("; "),
    };
    let message = message.trim();
    (!message.is_empty()).then(|| message.to_string())
}
