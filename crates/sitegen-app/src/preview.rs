//! Preview lifecycle state machine.
//!
//! ```text
//!            adopt(first)                      ready snapshot
//!   Idle ───────────────────► Polling ──────────────────────► Ready
//!     │                        ▲   │
//!     │ adopt(next)            │   │ query failed
//!     ▼                        │   ▼
//!   TearingDown ───────────────┘  Errored
//!              previous stopped
//! ```
//!
//! Adopting a new project from any phase cancels the current timer and goes
//! through `TearingDown` (or straight to `Polling` if nothing was adopted
//! before). Every tick and status result is tagged with the project it was
//! issued for; anything tagged with a superseded project is dropped.
//!
//! The state machine is pure: it never touches the network. Callers turn its
//! return values into actions.

use tokio::sync::watch;

use sitegen_core::prelude::*;
use sitegen_core::{ProjectId, StatusSnapshot};

use crate::poller::PollHandle;

/// Phase of the current project's preview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PreviewPhase {
    /// No project adopted yet
    #[default]
    Idle,
    /// Waiting for the previous project's preview to be stopped
    TearingDown { previous: ProjectId },
    /// Periodically querying status
    Polling,
    /// Preview is live
    Ready {
        preview_url: String,
        download_url: Option<String>,
    },
    /// A status query failed; polling has stopped for good
    Errored { message: String },
}

impl PreviewPhase {
    /// Short label used in logs, events and the status bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::TearingDown { .. } => "tearing_down",
            Self::Polling => "polling",
            Self::Ready { .. } => "ready",
            Self::Errored { .. } => "errored",
        }
    }
}

/// What the caller must start after a project is adopted.
#[derive(Debug, Clone)]
pub struct PreviewStart {
    /// Project whose preview must be stopped before polling begins
    pub previous: Option<ProjectId>,
    pub project_id: ProjectId,
    /// Shutdown receiver for the new poll timer
    pub shutdown_rx: watch::Receiver<bool>,
}

/// Preview component state.
#[derive(Debug, Default)]
pub struct PreviewState {
    project_id: Option<ProjectId>,
    phase: PreviewPhase,
    timer: Option<PollHandle>,
    query_in_flight: bool,
    queries_issued: u32,
}

impl PreviewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &PreviewPhase {
        &self.phase
    }

    pub fn project_id(&self) -> Option<&ProjectId> {
        self.project_id.as_ref()
    }

    /// Status queries issued for the current project.
    pub fn queries_issued(&self) -> u32 {
        self.queries_issued
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.phase, PreviewPhase::Ready { .. })
    }

    /// True while a poll timer exists and has not been stopped.
    pub fn is_timer_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| !t.is_stopped())
    }

    /// Frame source of the embedded preview, once ready.
    pub fn preview_url(&self) -> Option<&str> {
        match &self.phase {
            PreviewPhase::Ready { preview_url, .. } => Some(preview_url),
            _ => None,
        }
    }

    /// Download reference, only while ready.
    pub fn download_url(&self) -> Option<&str> {
        match &self.phase {
            PreviewPhase::Ready { download_url, .. } => download_url.as_deref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            PreviewPhase::Errored { message } => Some(message),
            _ => None,
        }
    }

    /// React to a new project identifier.
    ///
    /// Stops the current timer before anything else and returns what the
    /// caller must start. Re-adopting the current project is a no-op.
    pub fn adopt(&mut self, project_id: ProjectId) -> Option<PreviewStart> {
        if self.project_id.as_ref() == Some(&project_id) {
            debug!("Project {} already adopted", project_id);
            return None;
        }

        self.stop_timer();
        let previous = self.project_id.replace(project_id.clone());

        self.phase = match &previous {
            Some(previous) => PreviewPhase::TearingDown {
                previous: previous.clone(),
            },
            None => PreviewPhase::Polling,
        };
        self.query_in_flight = false;
        self.queries_issued = 0;

        let (timer, shutdown_rx) = PollHandle::new();
        self.timer = Some(timer);

        info!(
            "Preview adopting {} (previous: {:?}, phase: {})",
            project_id,
            previous.as_ref().map(ProjectId::as_str),
            self.phase.label()
        );

        Some(PreviewStart {
            previous,
            project_id,
            shutdown_rx,
        })
    }

    /// The previous preview has been stopped; start polling.
    pub fn on_torn_down(&mut self, project_id: &ProjectId) -> bool {
        if !self.is_current(project_id) {
            debug!("Ignoring teardown completion for superseded {}", project_id);
            return false;
        }
        if !matches!(self.phase, PreviewPhase::TearingDown { .. }) {
            return false;
        }
        self.phase = PreviewPhase::Polling;
        true
    }

    /// The poll timer fired. Returns `true` if a status query should be issued.
    pub fn on_tick(&mut self, project_id: &ProjectId) -> bool {
        if !self.is_current(project_id) {
            debug!("Ignoring tick for superseded {}", project_id);
            return false;
        }
        if self.phase != PreviewPhase::Polling {
            trace!("Tick for {} in phase {}", project_id, self.phase.label());
            return false;
        }
        if self.query_in_flight {
            debug!("Status query for {} still in flight, skipping tick", project_id);
            return false;
        }
        self.query_in_flight = true;
        self.queries_issued += 1;
        true
    }

    /// A status query completed. Returns `true` if the preview became ready.
    pub fn on_status(&mut self, project_id: &ProjectId, snapshot: StatusSnapshot) -> bool {
        if !self.is_current(project_id) {
            debug!("Discarding stale status for {}", project_id);
            return false;
        }
        self.query_in_flight = false;
        if self.phase != PreviewPhase::Polling {
            return false;
        }

        match snapshot.preview_url {
            Some(preview_url) if snapshot.ready => {
                self.stop_timer();
                info!(
                    "Preview for {} ready at {} after {} queries",
                    project_id, preview_url, self.queries_issued
                );
                self.phase = PreviewPhase::Ready {
                    preview_url,
                    download_url: snapshot.download_url,
                };
                true
            }
            _ => false,
        }
    }

    /// A status query failed. Polling stops until a new project is adopted.
    pub fn on_status_failed(&mut self, project_id: &ProjectId, message: String) -> bool {
        if !self.is_current(project_id) {
            debug!("Discarding stale status failure for {}", project_id);
            return false;
        }
        self.query_in_flight = false;
        if self.phase != PreviewPhase::Polling {
            return false;
        }
        self.stop_timer();
        warn!("Preview for {} failed: {}", project_id, message);
        self.phase = PreviewPhase::Errored { message };
        true
    }

    /// Stop polling on shutdown. Returns the project whose preview should be
    /// stopped on the backend.
    pub fn teardown(&mut self) -> Option<ProjectId> {
        self.stop_timer();
        self.project_id.clone()
    }

    fn is_current(&self, project_id: &ProjectId) -> bool {
        self.project_id.as_ref() == Some(project_id)
    }

    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.stop();
        }
    }
}
