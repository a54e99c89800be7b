use std::fmt;

use crate::view_model::{self, AppViewModel};

/// Message shown for every failed analysis. Raw causes never reach the session.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to analyze resume. Is the backend running?";

/// Identifies one session. A new token is minted on every file selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct SessionToken(u64);

impl SessionToken {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-chosen document, held in memory until it is submitted.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// Document bodies are large and binary; keep them out of debug output.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JobMatch {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    /// In [0, 1], higher is a better fit.
    pub similarity_score: f64,
}

/// Well-formed success payload from the Analysis Service.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub matched_jobs: Vec<JobMatch>,
    pub cover_letter: String,
}

/// Coarse failure class, kept for diagnostics. Both render the same message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Service unreachable, timed out, or the response could not be read.
    Transport,
    /// Service answered with a failure status or an incomplete payload.
    Service,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
enum Stage {
    #[default]
    Idle,
    FileSelected {
        file: SelectedFile,
    },
    Submitting {
        file: SelectedFile,
    },
    Succeeded {
        file: SelectedFile,
        report: AnalysisReport,
    },
    Failed {
        file: SelectedFile,
        failure: FailureClass,
    },
}

/// Client-local state of one analysis attempt.
///
/// Results and the error message live inside the phase they belong to, so a
/// session can never show results from one phase alongside another.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    token: SessionToken,
    stage: Stage,
}

impl Session {
    pub fn token(&self) -> SessionToken {
        self.token
    }

    pub fn phase(&self) -> Phase {
        match self.stage {
            Stage::Idle => Phase::Idle,
            Stage::FileSelected { .. } => Phase::FileSelected,
            Stage::Submitting { .. } => Phase::Submitting,
            Stage::Succeeded { .. } => Phase::Succeeded,
            Stage::Failed { .. } => Phase::Failed,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.stage {
            Stage::Idle => None,
            Stage::FileSelected { file }
            | Stage::Submitting { file }
            | Stage::Succeeded { file, .. }
            | Stage::Failed { file, .. } => Some(file),
        }
    }

    /// Empty unless the session succeeded. Order is the service's order.
    pub fn matched_jobs(&self) -> &[JobMatch] {
        match &self.stage {
            Stage::Succeeded { report, .. } => &report.matched_jobs,
            _ => &[],
        }
    }

    pub fn cover_letter_text(&self) -> &str {
        match &self.stage {
            Stage::Succeeded { report, .. } => &report.cover_letter,
            _ => "",
        }
    }

    pub fn error_message(&self) -> &str {
        match self.stage {
            Stage::Failed { .. } => GENERIC_FAILURE_MESSAGE,
            _ => "",
        }
    }

    /// Internal diagnostics only; never rendered.
    pub fn failure_class(&self) -> Option<FailureClass> {
        match self.stage {
            Stage::Failed { failure, .. } => Some(failure),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct ClipboardFlag {
    copied: bool,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    session: Session,
    last_token: u64,
    clipboard: ClipboardFlag,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn clipboard_copied(&self) -> bool {
        self.clipboard.copied
    }

    pub fn view(&self) -> AppViewModel {
        view_model::project(self)
    }

    /// Returns whether anything changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Starts a fresh session around `file`. Returns the superseded token when
    /// the previous session still had a request in flight.
    pub(crate) fn select_file(&mut self, file: SelectedFile) -> Option<SessionToken> {
        let abandoned = match self.session.stage {
            Stage::Submitting { .. } => Some(self.session.token),
            _ => None,
        };
        self.last_token += 1;
        self.session = Session {
            token: SessionToken(self.last_token),
            stage: Stage::FileSelected { file },
        };
        self.mark_dirty();
        abandoned
    }

    /// Moves `FileSelected` to `Submitting` and returns what to send.
    pub(crate) fn begin_submission(&mut self) -> Option<(SessionToken, SelectedFile)> {
        let file = match &self.session.stage {
            Stage::FileSelected { file } => file.clone(),
            _ => return None,
        };
        self.session.stage = Stage::Submitting { file: file.clone() };
        self.mark_dirty();
        Some((self.session.token, file))
    }

    /// Applies a response. Responses for another token, or arriving outside
    /// `Submitting`, are dropped and `false` is returned.
    pub(crate) fn finish_submission(
        &mut self,
        token: SessionToken,
        result: Result<AnalysisReport, FailureClass>,
    ) -> bool {
        if token != self.session.token {
            return false;
        }
        let file = match std::mem::take(&mut self.session.stage) {
            Stage::Submitting { file } => file,
            other => {
                self.session.stage = other;
                return false;
            }
        };
        self.session.stage = match result {
            Ok(report) => Stage::Succeeded { file, report },
            Err(failure) => Stage::Failed { file, failure },
        };
        self.mark_dirty();
        true
    }

    /// Raises the copied flag and returns the text and the new timer generation.
    pub(crate) fn begin_copy(&mut self) -> Option<(String, u64)> {
        let text = match &self.session.stage {
            Stage::Succeeded { report, .. } => report.cover_letter.clone(),
            _ => return None,
        };
        self.clipboard.generation += 1;
        if !self.clipboard.copied {
            self.clipboard.copied = true;
            self.mark_dirty();
        }
        Some((text, self.clipboard.generation))
    }

    /// Lowers the copied flag if `generation` is the latest timer.
    pub(crate) fn expire_clipboard(&mut self, generation: u64) -> bool {
        if generation != self.clipboard.generation || !self.clipboard.copied {
            return false;
        }
        self.clipboard.copied = false;
        self.mark_dirty();
        true
    }
}
