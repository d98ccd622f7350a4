//! Test utilities for code that depends on [`GenerationApi`].
//!
//! [`ScriptedApi`] replays queued responses and records every call it
//! receives, in order, so tests can assert on call counts and sequencing.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use sitegen_core::{
    Error, ProjectId, Result, StatusSnapshot, GENERATION_FALLBACK, STOP_PREVIEW_FALLBACK,
};

use crate::api::GenerationApi;

/// A single recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Submit(String),
    QueryStatus(ProjectId),
    StopPreview(ProjectId),
}

#[derive(Debug, Default)]
struct Script {
    submissions: VecDeque<std::result::Result<ProjectId, String>>,
    statuses: HashMap<ProjectId, VecDeque<std::result::Result<StatusSnapshot, String>>>,
    fail_stop_preview: bool,
    stop_delay: Option<Duration>,
    calls: Vec<ApiCall>,
}

/// Scripted, call-recording fake backend. Clones share the same script.
///
/// When a queue runs dry, submissions fail with the generation fallback and
/// status queries report "not ready".
#[derive(Debug, Clone, Default)]
pub struct ScriptedApi {
    script: Arc<Mutex<Script>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a successful submission returning `project_id`.
    pub fn with_submission(self, project_id: &str) -> Self {
        self.lock()
            .submissions
            .push_back(Ok(ProjectId::new(project_id)));
        self
    }

    /// Queue a failed submission with the given user-facing message.
    pub fn with_submission_error(self, message: &str) -> Self {
        self.lock().submissions.push_back(Err(message.to_string()));
        self
    }

    /// Queue a status snapshot for `project_id`.
    pub fn with_status(self, project_id: &str, snapshot: StatusSnapshot) -> Self {
        self.lock()
            .statuses
            .entry(ProjectId::new(project_id))
            .or_default()
            .push_back(Ok(snapshot));
        self
    }

    /// Queue `count` "not ready" snapshots for `project_id`.
    pub fn with_pending(mut self, project_id: &str, count: usize) -> Self {
        for _ in 0..count {
            self = self.with_status(project_id, StatusSnapshot::pending());
        }
        self
    }

    /// Queue a failed status query for `project_id`.
    pub fn with_status_error(self, project_id: &str, message: &str) -> Self {
        self.lock()
            .statuses
            .entry(ProjectId::new(project_id))
            .or_default()
            .push_back(Err(message.to_string()));
        self
    }

    /// Make every stop-preview call fail.
    pub fn with_failing_stop_preview(self) -> Self {
        self.lock().fail_stop_preview = true;
        self
    }

    /// Delay every stop-preview response.
    pub fn with_stop_delay(self, delay: Duration) -> Self {
        self.lock().stop_delay = Some(delay);
        self
    }

    /// All calls received so far, in order.
    pub fn calls(&self) -> Vec<ApiCall> {
        self.lock().calls.clone()
    }

    pub fn submit_count(&self) -> usize {
        self.count(|call| matches!(call, ApiCall::Submit(_)))
    }

    pub fn status_count(&self, project_id: &str) -> usize {
        self.count(|call| matches!(call, ApiCall::QueryStatus(id) if id.as_str() == project_id))
    }

    pub fn stop_count(&self, project_id: &str) -> usize {
        self.count(|call| matches!(call, ApiCall::StopPreview(id) if id.as_str() == project_id))
    }

    /// Position of the first call matching `predicate`.
    pub fn position(&self, predicate: impl Fn(&ApiCall) -> bool) -> Option<usize> {
        self.lock().calls.iter().position(predicate)
    }

    fn count(&self, predicate: impl Fn(&ApiCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| predicate(c)).count()
    }
}

impl GenerationApi for ScriptedApi {
    async fn submit_generation(&self, description: &str) -> Result<ProjectId> {
        let mut script = self.lock();
        script.calls.push(ApiCall::Submit(description.to_string()));
        match script.submissions.pop_front() {
            Some(Ok(id)) => Ok(id),
            Some(Err(message)) => Err(Error::generation(message)),
            None => Err(Error::generation(GENERATION_FALLBACK)),
        }
    }

    async fn query_status(&self, project_id: &ProjectId) -> Result<StatusSnapshot> {
        let mut script = self.lock();
        script.calls.push(ApiCall::QueryStatus(project_id.clone()));
        let next = script
            .statuses
            .get_mut(project_id)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(message)) => Err(Error::status(message)),
            None => Ok(StatusSnapshot::pending()),
        }
    }

    async fn stop_preview(&self, project_id: &ProjectId) -> Result<String> {
        let (fail, delay) = {
            let mut script = self.lock();
            script.calls.push(ApiCall::StopPreview(project_id.clone()));
            (script.fail_stop_preview, script.stop_delay)
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            Err(Error::stop_preview(STOP_PREVIEW_FALLBACK))
        } else {
            Ok(format!("Preview stopped for project {project_id}"))
        }
    }
}
