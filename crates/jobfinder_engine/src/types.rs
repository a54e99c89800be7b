use std::fmt;

/// Opaque tag attached to a submission; echoed back on completion.
pub type RequestTag = u64;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchedJob {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnalysisReport {
    pub matched_jobs: Vec<MatchedJob>,
    pub cover_letter: String,
}

/// A document ready to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct DocumentUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for DocumentUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentUpload")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted {
        tag: RequestTag,
        result: Result<AnalysisReport, AnalysisError>,
    },
    ClipboardResetElapsed {
        generation: u64,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct AnalysisError {
    pub kind: FailureKind,
    pub message: String,
}

impl AnalysisError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Which side of the boundary a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureOrigin {
    Transport,
    Service,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Body was not JSON at all.
    Unparseable,
    HttpStatus(u16),
    /// JSON, but required fields are missing or have the wrong type.
    MalformedPayload,
}

impl FailureKind {
    pub fn origin(&self) -> FailureOrigin {
        match self {
            FailureKind::InvalidEndpoint
            | FailureKind::Network
            | FailureKind::Timeout
            | FailureKind::TooLarge { .. }
            | FailureKind::Unparseable => FailureOrigin::Transport,
            FailureKind::HttpStatus(_) | FailureKind::MalformedPayload => FailureOrigin::Service,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Unparseable => write!(f, "unparseable response"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedPayload => write!(f, "malformed payload"),
        }
    }
}
