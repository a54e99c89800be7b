//! JobFinder engine: Analysis Service client and effect execution.
mod client;
mod clipboard;
mod document;
mod engine;
mod types;
mod wire;

pub use client::{AnalysisClient, AnalysisSettings, ReqwestAnalysisClient, DEFAULT_ENDPOINT};
pub use clipboard::{ClipboardError, ClipboardWriter, SystemClipboard};
pub use document::{read_document, DocumentError};
pub use engine::{ChannelEventSink, EngineError, EngineHandle, EventSink};
pub use types::{
    AnalysisError, AnalysisReport, DocumentUpload, EngineEvent, FailureKind, FailureOrigin,
    MatchedJob, RequestTag,
};
