use std::sync::{mpsc, Arc};

use jobfinder_core::{AnalysisReport, Effect, FailureClass, JobMatch, Msg, SessionToken};
use jobfinder_engine::{
    AnalysisError, AnalysisSettings, ClipboardWriter, DocumentUpload, EngineError, EngineEvent,
    EngineHandle, EventSink, FailureOrigin,
};
use jobfinder_logging::{jf_debug, jf_info, jf_warn};

use crate::app::AppEvent;

/// Executes core effects against the engine and the clipboard.
pub struct EffectRunner {
    engine: EngineHandle,
    clipboard: Box<dyn ClipboardWriter>,
}

impl EffectRunner {
    pub fn new(
        settings: AnalysisSettings,
        clipboard: Box<dyn ClipboardWriter>,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink::new(events));
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine, clipboard })
    }

    #[cfg(test)]
    pub(crate) fn from_parts(engine: EngineHandle, clipboard: Box<dyn ClipboardWriter>) -> Self {
        Self { engine, clipboard }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis { token, file } => {
                    jf_info!(
                        "SubmitAnalysis session={} file={} size={}",
                        token,
                        file.name,
                        file.size()
                    );
                    self.engine.submit(
                        token.get(),
                        DocumentUpload {
                            file_name: file.name,
                            bytes: file.bytes,
                        },
                    );
                }
                Effect::AbandonAnalysis { token } => {
                    jf_info!("AbandonAnalysis session={}", token);
                    self.engine.abandon(token.get());
                }
                Effect::CopyToClipboard { text } => {
                    if let Err(err) = self.clipboard.write_text(&text) {
                        jf_warn!("Cover letter not copied: {}", err);
                    }
                }
                Effect::ScheduleClipboardReset { generation, delay } => {
                    self.engine.schedule_clipboard_reset(generation, delay);
                }
            }
        }
    }
}

pub(crate) struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl MsgSink {
    pub(crate) fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Core(to_msg(event)));
    }
}

pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::AnalysisCompleted { tag, result } => Msg::AnalysisFinished {
            token: SessionToken::new(tag),
            result: result.map(to_report).map_err(|err| classify(&err)),
        },
        EngineEvent::ClipboardResetElapsed { generation } => {
            Msg::ClipboardResetElapsed { generation }
        }
    }
}

fn to_report(report: jobfinder_engine::AnalysisReport) -> AnalysisReport {
    AnalysisReport {
        matched_jobs: report
            .matched_jobs
            .into_iter()
            .map(|job| JobMatch {
                id: job.id,
                title: job.title,
                company: job.company,
                location: job.location,
                description: job.description,
                similarity_score: job.similarity,
            })
            .collect(),
        cover_letter: report.cover_letter,
    }
}

fn classify(err: &AnalysisError) -> FailureClass {
    let class = match err.kind.origin() {
        FailureOrigin::Transport => FailureClass::Transport,
        FailureOrigin::Service => FailureClass::Service,
    };
    jf_debug!("Analysis failure classified as {:?}: {}", class, err.kind);
    class
}
