//! HTTP client for the generation backend.
//!
//! Every operation is attempted exactly once. Failures are reduced to a
//! user-facing message: the server's `detail` when it sent one, otherwise the
//! per-operation fallback. Transport-level causes are logged, not surfaced.

use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use sitegen_core::prelude::*;
use sitegen_core::{
    ProjectId, StatusSnapshot, GENERATION_FALLBACK, STATUS_FALLBACK, STOP_PREVIEW_FALLBACK,
};

use crate::api::GenerationApi;
use crate::protocol::{
    parse_error_detail, GenerateRequest, GenerateResponse, PreviewResponse, PreviewStatus,
    StopPreviewResponse,
};

/// HTTP implementation of [`GenerationApi`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Create a client for the backend at `base_url`.
    ///
    /// The address must be an absolute `http` or `https` URL. `timeout` bounds
    /// each request end to end; the preview endpoint installs dependencies
    /// and boots a server before answering, so it should be generous.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        info!("API client targeting {}", base_url);
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The navigation target for downloading a project's archive.
    pub fn download_url(&self, project_id: &ProjectId) -> String {
        self.endpoint(&["api", "download", project_id.as_str()])
            .to_string()
    }

    /// Build `{base}/seg1/seg2/...`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// Resolve a server-provided archive reference, which may be relative
    /// to the backend.
    fn resolve_download(&self, project_id: &ProjectId, zip_url: Option<String>) -> String {
        match zip_url {
            Some(zip) if !zip.trim().is_empty() => match self.base_url.join(&zip) {
                Ok(resolved) => resolved.to_string(),
                Err(e) => {
                    warn!("Ignoring unusable zip_url '{}': {}", zip, e);
                    self.download_url(project_id)
                }
            },
            _ => self.download_url(project_id),
        }
    }
}

impl GenerationApi for ApiClient {
    async fn submit_generation(&self, description: &str) -> Result<ProjectId> {
        let url = self.endpoint(&["api", "generate"]);
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .json(&GenerateRequest { description })
            .send()
            .await
            .map_err(|e| transport_failure("generate", e, GENERATION_FALLBACK))
            .map_err(Error::generation)?;

        let body: GenerateResponse = read_json(response, GENERATION_FALLBACK)
            .await
            .map_err(Error::generation)?;

        info!("Generation accepted, project {}", body.project_id);
        Ok(ProjectId::from(body.project_id))
    }

    async fn query_status(&self, project_id: &ProjectId) -> Result<StatusSnapshot> {
        let url = self.endpoint(&["api", "preview", project_id.as_str()]);
        debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| transport_failure("preview status", e, STATUS_FALLBACK))
            .map_err(Error::status)?;

        let body: PreviewResponse = read_json(response, STATUS_FALLBACK)
            .await
            .map_err(Error::status)?;

        match body.status_kind() {
            PreviewStatus::Pending => {
                debug!("Preview for {} not ready (status: {:?})", project_id, body.status);
                Ok(StatusSnapshot::pending())
            }
            PreviewStatus::Failed => {
                let message = body
                    .detail
                    .filter(|d| !d.trim().is_empty())
                    .unwrap_or_else(|| STATUS_FALLBACK.to_string());
                warn!("Preview for {} failed: {}", project_id, message);
                Err(Error::status(message))
            }
            PreviewStatus::Ready => {
                let download_url = self.resolve_download(project_id, body.zip_url);
                Ok(StatusSnapshot {
                    ready: true,
                    preview_url: body.preview_url,
                    download_url: Some(download_url),
                })
            }
        }
    }

    async fn stop_preview(&self, project_id: &ProjectId) -> Result<String> {
        let url = self.endpoint(&["api", "stop-preview", project_id.as_str()]);
        debug!("POST {}", url);

        let response = self
            .http
            .post(url)
            .send()
            .await
            .map_err(|e| transport_failure("stop-preview", e, STOP_PREVIEW_FALLBACK))
            .map_err(Error::stop_preview)?;

        let body: StopPreviewResponse = read_json(response, STOP_PREVIEW_FALLBACK)
            .await
            .map_err(Error::stop_preview)?;

        Ok(body.message)
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).map_err(|e| Error::invalid_url(raw, e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::invalid_url(raw, "scheme must be http or https"));
    }
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(raw, "not a base address"));
    }
    Ok(url)
}

fn transport_failure(operation: &str, err: reqwest::Error, fallback: &str) -> String {
    if err.is_timeout() {
        warn!("{} request timed out: {}", operation, err);
    } else {
        warn!("{} request failed: {}", operation, err);
    }
    fallback.to_string()
}

/// Decode a successful JSON body, or reduce a failure to its message.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    fallback: &str,
) -> std::result::Result<T, String> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = parse_error_detail(&body).unwrap_or_else(|| fallback.to_string());
        warn!("Backend returned {}: {}", status, message);
        return Err(message);
    }

    response.json::<T>().await.map_err(|e| {
        warn!("Malformed backend response: {}", e);
        fallback.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use tokio_test::{assert_err, assert_ok};

    fn client(server: &Server) -> ApiClient {
        ApiClient::new(&server.url(), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_rejects_unusable_base_urls() {
        assert!(ApiClient::new("localhost:8000", Duration::from_secs(1)).is_err());
        assert!(ApiClient::new("ftp://example.com", Duration::from_secs(1)).is_err());
        assert!(ApiClient::new("not a url", Duration::from_secs(1)).is_err());
        assert_ok!(ApiClient::new("https://gen.example.com/", Duration::from_secs(1)));
    }

    #[test]
    fn test_endpoints_keep_base_path_and_encode_ids() {
        let api = ApiClient::new("http://host:8000/backend/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            api.download_url(&ProjectId::new("p1")),
            "http://host:8000/backend/api/download/p1"
        );
        assert_eq!(
            api.download_url(&ProjectId::new("a b/c")),
            "http://host:8000/backend/api/download/a%20b%2Fc"
        );
    }

    #[tokio::test]
    async fn test_submit_generation_posts_description() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .match_body(Matcher::Json(serde_json::json!({"description": "a blog site"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":"p1","description":"a blog site","file_paths":{}}"#)
            .expect(1)
            .create_async()
            .await;

        let id = client(&server)
            .submit_generation("a blog site")
            .await
            .unwrap();

        assert_eq!(id, ProjectId::new("p1"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_generation_surfaces_server_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(500)
            .with_body(r#"{"detail":"Failed to generate MERN code"}"#)
            .create_async()
            .await;

        let err = client(&server).submit_generation("x").await.unwrap_err();
        assert!(matches!(err, Error::Generation { .. }));
        assert_eq!(err.to_string(), "Failed to generate MERN code");
    }

    #[tokio::test]
    async fn test_submit_generation_falls_back_without_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/generate")
            .with_status(502)
            .with_body("Bad Gateway")
            .create_async()
            .await;

        let err = client(&server).submit_generation("x").await.unwrap_err();
        assert_eq!(err.to_string(), GENERATION_FALLBACK);
    }

    #[tokio::test]
    async fn test_submit_generation_is_not_retried() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/generate")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        assert_err!(client(&server).submit_generation("x").await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_uses_fallback() {
        // Nothing listens on port 9 (discard) on test machines.
        let api = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
        let err = api.query_status(&ProjectId::new("p1")).await.unwrap_err();
        assert_eq!(err.to_string(), STATUS_FALLBACK);
    }

    #[tokio::test]
    async fn test_query_status_pending() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/preview/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"generating"}"#)
            .create_async()
            .await;

        let snapshot = client(&server)
            .query_status(&ProjectId::new("p1"))
            .await
            .unwrap();
        assert!(!snapshot.is_ready());
        assert_eq!(snapshot, StatusSnapshot::pending());
    }

    #[tokio::test]
    async fn test_query_status_ready_with_zip_url() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/preview/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status":"ready","preview_url":"http://localhost:4000","zip_url":"/z/p1.zip"}"#,
            )
            .create_async()
            .await;

        let api = client(&server);
        let snapshot = api.query_status(&ProjectId::new("p1")).await.unwrap();

        assert!(snapshot.is_ready());
        assert_eq!(snapshot.preview_url.as_deref(), Some("http://localhost:4000"));
        assert_eq!(
            snapshot.download_url,
            Some(format!("{}/z/p1.zip", server.url()))
        );
    }

    #[tokio::test]
    async fn test_query_status_ready_without_zip_falls_back_to_download_route() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/preview/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"preview_url":"http://localhost:4000"}"#)
            .create_async()
            .await;

        let snapshot = client(&server)
            .query_status(&ProjectId::new("p1"))
            .await
            .unwrap();
        assert_eq!(
            snapshot.download_url,
            Some(format!("{}/api/download/p1", server.url()))
        );
    }

    #[tokio::test]
    async fn test_query_status_reported_failure() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/preview/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"status":"failed"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .query_status(&ProjectId::new("p1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Status { .. }));
        assert_eq!(err.to_string(), STATUS_FALLBACK);
    }

    #[tokio::test]
    async fn test_query_status_http_error_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/api/preview/missing")
            .with_status(404)
            .with_header("content-type", "application/json")
            .with_body(r#"{"detail":"Project not found"}"#)
            .create_async()
            .await;

        let err = client(&server)
            .query_status(&ProjectId::new("missing"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Project not found");
    }

    #[tokio::test]
    async fn test_stop_preview_returns_ack() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/stop-preview/p1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"Preview stopped for project p1"}"#)
            .expect(1)
            .create_async()
            .await;

        let ack = client(&server)
            .stop_preview(&ProjectId::new("p1"))
            .await
            .unwrap();
        assert_eq!(ack, "Preview stopped for project p1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_stop_preview_failure_uses_fallback() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/stop-preview/p1")
            .with_status(500)
            .create_async()
            .await;

        let err = client(&server)
            .stop_preview(&ProjectId::new("p1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::StopPreview { .. }));
        assert_eq!(err.to_string(), STOP_PREVIEW_FALLBACK);
    }
}
