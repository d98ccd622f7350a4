//! Engine - shared orchestration state for TUI and headless runners
//!
//! The Engine owns the TEA state, the unified message channel, the backend
//! client and the event broadcaster. Both frontends drive it the same way:
//! feed it messages, then read `state` or subscribe to [`EngineEvent`]s.

use tokio::sync::{broadcast, mpsc};

use sitegen_api::{ApiClient, GenerationApi};
use sitegen_core::prelude::*;
use sitegen_core::ProjectId;

use crate::actions::{stop_preview_best_effort, PREVIEW_STOP_TIMEOUT};
use crate::config::Settings;
use crate::engine_event::EngineEvent;
use crate::message::Message;
use crate::preview::PreviewPhase;
use crate::process;
use crate::signals;
use crate::state::AppState;

/// Lightweight snapshot of state for change detection.
///
/// Captured before message processing, compared after to detect
/// what changed and emit appropriate EngineEvents.
#[derive(Debug, Clone)]
struct StateSnapshot {
    submitting: bool,
    input_error: Option<String>,
    project_id: Option<ProjectId>,
    phase: PreviewPhase,
    queries: u32,
    error: Option<String>,
}

impl StateSnapshot {
    fn capture(state: &AppState) -> Self {
        Self {
            submitting: state.input.is_submitting(),
            input_error: state.input.error().map(str::to_string),
            project_id: state.project_id.clone(),
            phase: state.preview.phase().clone(),
            queries: state.preview.queries_issued(),
            error: state.error.clone(),
        }
    }
}

/// Orchestration engine.
///
/// Generic over the backend so tests can drive it with a scripted fake;
/// production code uses the HTTP [`ApiClient`].
pub struct Engine<A = ApiClient> {
    /// TEA application state (the Model)
    pub state: AppState,

    /// Sender half of the unified message channel.
    /// Clone this to give to input sources (signal handler, stdin reader).
    pub msg_tx: mpsc::Sender<Message>,

    /// Receiver half of the unified message channel.
    /// The frontend event loop drains messages from here.
    pub msg_rx: mpsc::Receiver<Message>,

    /// Resolved settings
    pub settings: Settings,

    api: A,

    /// Event broadcaster for external consumers.
    event_tx: broadcast::Sender<EngineEvent>,
}

impl Engine<ApiClient> {
    /// Create an Engine talking to the backend named in `settings`.
    ///
    /// Fails only if the configured base URL is unusable.
    pub fn new(settings: Settings) -> Result<Self> {
        let api = ApiClient::new(&settings.api.base_url, settings.api.request_timeout())?;
        info!("Using generation backend at {}", api.base_url());
        Ok(Self::with_api(settings, api))
    }
}

impl<A> Engine<A>
where
    A: GenerationApi + Clone + Send + Sync + 'static,
{
    /// Create an Engine around an existing backend implementation.
    ///
    /// Creates the message channel (capacity 256), the event broadcaster
    /// (capacity 256) and spawns the signal handler.
    pub fn with_api(settings: Settings, api: A) -> Self {
        let state = AppState::with_settings(settings.clone());
        let (msg_tx, msg_rx) = mpsc::channel::<Message>(256);

        signals::spawn_signal_handler(msg_tx.clone());

        let (event_tx, _) = broadcast::channel(256);

        Self {
            state,
            msg_tx,
            msg_rx,
            settings,
            api,
            event_tx,
        }
    }

    /// Subscribe to engine events.
    ///
    /// If the subscriber falls behind (buffer full), older events are
    /// dropped. Use `broadcast::error::RecvError::Lagged` to detect this.
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.event_tx.subscribe()
    }

    /// Process a single message through the TEA update cycle, then emit
    /// EngineEvents for whatever changed.
    pub fn process_message(&mut self, msg: Message) {
        let pre = StateSnapshot::capture(&self.state);

        process::process_message(&mut self.state, msg, &self.msg_tx, &self.api);

        let post = StateSnapshot::capture(&self.state);
        self.emit_events(&pre, &post);
    }

    /// Drain and process all pending messages from the channel.
    ///
    /// Returns the number of messages processed. Used by the TUI runner
    /// which needs to drain all pending messages before rendering.
    pub fn drain_pending_messages(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.process_message(msg);
            count += 1;
        }
        count
    }

    /// Get a clone of the message sender for spawning input sources.
    pub fn msg_sender(&self) -> mpsc::Sender<Message> {
        self.msg_tx.clone()
    }

    pub fn should_quit(&self) -> bool {
        self.state.should_quit()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Stop the poll timer and ask the backend to stop the current preview.
    ///
    /// The stop-preview call is bounded by [`PREVIEW_STOP_TIMEOUT`] and its
    /// outcome never blocks exit.
    pub async fn shutdown(&mut self) {
        self.emit(EngineEvent::Shutdown);

        let Some(project_id) = self.state.preview.teardown() else {
            return;
        };

        let stop = stop_preview_best_effort(&self.api, &project_id);
        if tokio::time::timeout(PREVIEW_STOP_TIMEOUT, stop).await.is_err() {
            warn!("Stopping preview for {} timed out", project_id);
        }
    }

    /// Compare pre/post snapshots and emit the matching events.
    fn emit_events(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if !pre.submitting && post.submitting {
            self.emit(EngineEvent::GenerationStarted {
                description: self.state.input.draft().trim().to_string(),
            });
        }

        if pre.input_error != post.input_error {
            if let Some(message) = &post.input_error {
                self.emit(EngineEvent::GenerationFailed {
                    message: message.clone(),
                });
            }
        }

        if pre.project_id != post.project_id {
            if let Some(project_id) = &post.project_id {
                self.emit(EngineEvent::ProjectCreated {
                    project_id: project_id.clone(),
                });
            }
        }

        let Some(project_id) = post.project_id.clone() else {
            return self.emit_error(pre, post);
        };

        if pre.phase != post.phase {
            match &post.phase {
                PreviewPhase::TearingDown { previous } => {
                    self.emit(EngineEvent::PreviewTearingDown {
                        previous: previous.clone(),
                        project_id: project_id.clone(),
                    });
                }
                PreviewPhase::Ready {
                    preview_url,
                    download_url,
                } => {
                    self.emit(EngineEvent::PreviewReady {
                        project_id: project_id.clone(),
                        preview_url: preview_url.clone(),
                        download_url: download_url.clone(),
                    });
                }
                PreviewPhase::Errored { message } => {
                    self.emit(EngineEvent::PreviewFailed {
                        project_id: project_id.clone(),
                        message: message.clone(),
                    });
                }
                PreviewPhase::Idle | PreviewPhase::Polling => {}
            }
        }

        // A new project resets the counter, so only same-project growth counts.
        if pre.project_id == post.project_id && post.queries > pre.queries {
            self.emit(EngineEvent::PreviewPolling {
                project_id,
                attempt: post.queries,
            });
        }

        self.emit_error(pre, post);
    }

    fn emit_error(&self, pre: &StateSnapshot, post: &StateSnapshot) {
        if pre.error != post.error {
            if let Some(message) = &post.error {
                self.emit(EngineEvent::ErrorRaised {
                    message: message.clone(),
                });
            }
        }
    }

    /// send() returns Err only if there are no receivers, which is fine.
    fn emit(&self, event: EngineEvent) {
        trace!("Engine event: {}", event.event_type());
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use sitegen_api::test_utils::{ApiCall, ScriptedApi};
    use sitegen_core::StatusSnapshot;

    fn engine(api: &ScriptedApi) -> Engine<ScriptedApi> {
        Engine::with_api(Settings::default(), api.clone())
    }

    /// Process channel messages until `done` holds for the state.
    async fn run_until(engine: &mut Engine<ScriptedApi>, done: impl Fn(&AppState) -> bool) {
        while !done(&engine.state) {
            let msg = engine.msg_rx.recv().await.expect("channel open");
            engine.process_message(msg);
        }
    }

    /// Let any spawned work run to completion, then process what it sent.
    async fn settle(engine: &mut Engine<ScriptedApi>, period: Duration) {
        tokio::time::sleep(period).await;
        engine.drain_pending_messages();
    }

    fn submit(engine: &mut Engine<ScriptedApi>, description: &str) {
        engine.process_message(Message::SetDraft {
            text: description.to_string(),
        });
        engine.process_message(Message::SubmitGeneration);
    }

    fn ready(url: &str, zip: &str) -> StatusSnapshot {
        StatusSnapshot::ready(url, zip)
    }

    #[tokio::test]
    async fn test_engine_new_rejects_bad_base_url() {
        let mut settings = Settings::default();
        settings.api.base_url = "not a url".into();
        assert!(Engine::new(settings).is_err());
    }

    #[tokio::test]
    async fn test_engine_new_with_defaults() {
        let engine = Engine::new(Settings::default()).unwrap();
        assert!(!engine.should_quit());
        assert_eq!(engine.api().base_url().as_str(), "http://localhost:8000/");
    }

    #[tokio::test]
    async fn test_engine_drain_empty_channel() {
        let api = ScriptedApi::new();
        let mut engine = engine(&api);
        assert_eq!(engine.drain_pending_messages(), 0);
    }

    #[tokio::test]
    async fn test_engine_process_quit_message() {
        let api = ScriptedApi::new();
        let mut engine = engine(&api);
        engine.process_message(Message::Quit);
        assert!(engine.should_quit());
    }

    #[tokio::test]
    async fn test_subscribe_receives_shutdown_event() {
        let api = ScriptedApi::new();
        let mut engine = engine(&api);
        let mut rx = engine.subscribe();

        engine.shutdown().await;

        assert_eq!(rx.recv().await.unwrap(), EngineEvent::Shutdown);
        assert!(api.calls().is_empty(), "nothing to stop without a project");
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_description_never_reaches_backend() {
        let api = ScriptedApi::new();
        let mut engine = engine(&api);

        submit(&mut engine, "   ");
        settle(&mut engine, Duration::from_secs(1)).await;

        assert!(api.calls().is_empty());
        assert!(!engine.state.input.is_submitting());
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_activation_one_submission() {
        let api = ScriptedApi::new().with_submission("p1");
        let mut engine = engine(&api);

        submit(&mut engine, "a blog site");
        engine.process_message(Message::SubmitGeneration);
        run_until(&mut engine, |s| s.project_id.is_some()).await;

        assert_eq!(api.submit_count(), 1);
        assert_eq!(api.calls()[0], ApiCall::Submit("a blog site".into()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_pending_then_ready_queries_exactly_four_times() {
        let api = ScriptedApi::new()
            .with_submission("p1")
            .with_pending("p1", 3)
            .with_status("p1", ready("http://localhost:4000", "/z/p1.zip"));
        let mut engine = engine(&api);

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| s.preview.is_ready()).await;

        // Well past several more intervals: no further queries.
        settle(&mut engine, Duration::from_secs(30)).await;

        assert_eq!(api.status_count("p1"), 4);
        assert_eq!(engine.state.preview.queries_issued(), 4);
        assert!(!engine.state.preview.is_timer_running());
        assert_eq!(engine.state.download_target(), Some("/z/p1.zip"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_on_second_poll_stops_polling() {
        let api = ScriptedApi::new()
            .with_submission("p1")
            .with_pending("p1", 1)
            .with_status_error("p1", "Failed to fetch preview status");
        let mut engine = engine(&api);

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| s.preview.error().is_some()).await;
        settle(&mut engine, Duration::from_secs(30)).await;

        assert_eq!(api.status_count("p1"), 2);
        assert_eq!(
            engine.state.preview.error(),
            Some("Failed to fetch preview status")
        );
        assert_eq!(engine.state.download_target(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_project_stops_first_before_querying() {
        let api = ScriptedApi::new()
            .with_submission("a")
            .with_submission("b")
            .with_stop_delay(Duration::from_secs(2))
            .with_status("a", ready("http://localhost:4000", "/z/a.zip"))
            .with_status("b", ready("http://localhost:4001", "/z/b.zip"));
        let mut engine = engine(&api);

        submit(&mut engine, "first site");
        run_until(&mut engine, |s| s.preview.is_ready()).await;

        submit(&mut engine, "second site");
        run_until(&mut engine, |s| {
            s.preview.is_ready() && s.project_id.as_ref().map(ProjectId::as_str) == Some("b")
        })
        .await;

        let stop_a = api
            .position(|c| matches!(c, ApiCall::StopPreview(id) if id.as_str() == "a"))
            .expect("A stopped");
        let first_query_b = api
            .position(|c| matches!(c, ApiCall::QueryStatus(id) if id.as_str() == "b"))
            .expect("B queried");
        assert!(stop_a < first_query_b);
        assert_eq!(api.stop_count("a"), 1);
        assert_eq!(engine.state.preview_target(), Some("http://localhost:4001"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_generation_failure_keeps_preview_idle() {
        let api = ScriptedApi::new().with_submission_error("Description is required");
        let mut engine = engine(&api);
        let mut rx = engine.subscribe();

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| !s.input.is_submitting()).await;

        assert_eq!(engine.state.input.error(), Some("Description is required"));
        assert_eq!(engine.state.preview.phase(), &PreviewPhase::Idle);

        assert!(matches!(
            rx.recv().await.unwrap(),
            EngineEvent::GenerationStarted { description } if description == "a blog site"
        ));
        assert_eq!(
            rx.recv().await.unwrap(),
            EngineEvent::GenerationFailed {
                message: "Description is required".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_events_for_end_to_end_flow() {
        let api = ScriptedApi::new()
            .with_submission("p1")
            .with_pending("p1", 1)
            .with_status("p1", ready("http://localhost:4000", "/z/p1.zip"));
        let mut engine = engine(&api);
        let mut rx = engine.subscribe();

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| s.preview.is_ready()).await;

        let mut labels = Vec::new();
        while let Ok(event) = rx.try_recv() {
            labels.push(event.event_type());
        }
        assert_eq!(
            labels,
            [
                "generation_started",
                "project_created",
                "preview_polling",
                "preview_polling",
                "preview_ready"
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_stops_current_preview() {
        let api = ScriptedApi::new()
            .with_submission("p1")
            .with_status("p1", ready("http://localhost:4000", "/z/p1.zip"));
        let mut engine = engine(&api);

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| s.preview.is_ready()).await;
        engine.shutdown().await;

        assert_eq!(api.stop_count("p1"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_is_bounded_when_backend_hangs() {
        let api = ScriptedApi::new()
            .with_submission("p1")
            .with_stop_delay(Duration::from_secs(60));
        let mut engine = engine(&api);

        submit(&mut engine, "a blog site");
        run_until(&mut engine, |s| s.preview.queries_issued() > 0).await;

        let start = tokio::time::Instant::now();
        engine.shutdown().await;
        assert!(start.elapsed() >= PREVIEW_STOP_TIMEOUT);
        assert!(start.elapsed() < Duration::from_secs(60));
        assert!(!engine.state.preview.is_timer_running());
    }
}
