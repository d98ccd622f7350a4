//! Prompt input state: the description draft, its cursor, and the
//! submission lifecycle.

use sitegen_core::GenerationRequest;

/// State of the description prompt.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    draft: String,
    /// Cursor position in characters (not bytes)
    cursor: usize,
    submitting: bool,
    error: Option<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The submit control is enabled only with a non-blank draft and no
    /// request in flight.
    pub fn can_submit(&self) -> bool {
        !self.submitting && GenerationRequest::new(&self.draft).is_some()
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
        self.cursor = self.draft.chars().count();
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index();
        self.draft.insert(idx, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index();
        self.draft.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.draft.chars().count() {
            let idx = self.byte_index();
            self.draft.remove(idx);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.draft.chars().count());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.draft.chars().count();
    }

    pub fn clear(&mut self) {
        self.draft.clear();
        self.cursor = 0;
    }

    /// Begin a submission.
    ///
    /// Returns `None`, leaving state untouched, when the draft is blank or a
    /// submission is already in flight. The draft itself is kept so the user
    /// can tweak and resubmit.
    pub fn begin_submit(&mut self) -> Option<GenerationRequest> {
        if self.submitting {
            return None;
        }
        let request = GenerationRequest::new(&self.draft)?;
        self.submitting = true;
        self.error = None;
        Some(request)
    }

    pub fn finish_success(&mut self) {
        self.submitting = false;
    }

    pub fn finish_failure(&mut self, message: impl Into<String>) {
        self.submitting = false;
        self.error = Some(message.into());
    }

    fn byte_index(&self) -> usize {
        self.draft
            .char_indices()
            .nth(self.cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.draft.len())
    }
}
