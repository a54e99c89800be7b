use std::collections::HashMap;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use jobfinder_logging::{jf_debug, jf_info, jf_warn};
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use crate::client::{AnalysisClient, AnalysisSettings, ReqwestAnalysisClient};
use crate::{AnalysisError, DocumentUpload, EngineEvent, RequestTag};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("analysis client: {0}")]
    Client(#[from] AnalysisError),
    #[error("runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Receives engine events on the runtime's threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Submit {
        tag: RequestTag,
        upload: DocumentUpload,
    },
    Abandon {
        tag: RequestTag,
    },
    ScheduleClipboardReset {
        generation: u64,
        delay: Duration,
    },
}

/// Runs submissions and timers on a background runtime.
///
/// Dropping the handle stops the runtime; pending requests and the clipboard
/// timer are cancelled and emit nothing.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(settings: AnalysisSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let client = ReqwestAnalysisClient::new(settings)?;
        Self::with_client(Arc::new(client), sink)
    }

    pub fn with_client(
        client: Arc<dyn AnalysisClient>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("jobfinder-engine-worker")
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::Builder::new()
            .name("jobfinder-engine".to_string())
            .spawn(move || run(runtime, client, sink, cmd_rx))?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, tag: RequestTag, upload: DocumentUpload) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { tag, upload });
    }

    /// Cancels the request for `tag` if it is still running.
    pub fn abandon(&self, tag: RequestTag) {
        let _ = self.cmd_tx.send(EngineCommand::Abandon { tag });
    }

    /// Starts the clipboard reset timer, cancelling any timer already pending.
    pub fn schedule_clipboard_reset(&self, generation: u64, delay: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::ScheduleClipboardReset { generation, delay });
    }
}

fn run(
    runtime: Runtime,
    client: Arc<dyn AnalysisClient>,
    sink: Arc<dyn EventSink>,
    cmd_rx: mpsc::Receiver<EngineCommand>,
) {
    let mut in_flight: HashMap<RequestTag, JoinHandle<()>> = HashMap::new();
    let mut clipboard_timer: Option<JoinHandle<()>> = None;

    while let Ok(command) = cmd_rx.recv() {
        in_flight.retain(|_, task| !task.is_finished());
        match command {
            EngineCommand::Submit { tag, upload } => {
                let client = client.clone();
                let sink = sink.clone();
                let task = runtime.spawn(async move {
                    let result = client.analyze(&upload).await;
                    if let Err(err) = &result {
                        jf_warn!(
                            "Analysis {} failed ({:?}): {}",
                            tag,
                            err.kind.origin(),
                            err
                        );
                    }
                    sink.emit(EngineEvent::AnalysisCompleted { tag, result });
                });
                if let Some(previous) = in_flight.insert(tag, task) {
                    previous.abort();
                }
            }
            EngineCommand::Abandon { tag } => {
                if let Some(task) = in_flight.remove(&tag) {
                    task.abort();
                    jf_info!("Abandoned in-flight analysis {}", tag);
                }
            }
            EngineCommand::ScheduleClipboardReset { generation, delay } => {
                if let Some(previous) = clipboard_timer.take() {
                    previous.abort();
                }
                let sink = sink.clone();
                clipboard_timer = Some(runtime.spawn(async move {
                    tokio::time::sleep(delay).await;
                    sink.emit(EngineEvent::ClipboardResetElapsed { generation });
                }));
            }
        }
    }

    jf_debug!(
        "Engine stopping with {} request(s) in flight",
        in_flight.len()
    );
    runtime.shutdown_background();
}
