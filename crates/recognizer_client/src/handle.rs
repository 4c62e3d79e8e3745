use std::sync::{mpsc, Arc};
use std::thread;

use app_logging::{app_debug, app_trace, app_warn};
use recognizer_core::{FeedbackSubmission, FeedbackTarget, UploadFile};

use crate::api::{RecognizerApi, ReqwestRecognizer};
use crate::{ApiError, ClientEvent, ClientSettings, FailureKind};

/// Receives completion events from the background runtime.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<ClientEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

enum ClientCommand {
    Recognize { files: Vec<UploadFile> },
    ListHistory,
    FetchDetail { video_id: String },
    SubmitFeedback {
        target: FeedbackTarget,
        submission: FeedbackSubmission,
    },
}

impl ClientCommand {
    fn name(&self) -> &'static str {
        match self {
            ClientCommand::Recognize { .. } => "recognize",
            ClientCommand::ListHistory => "history",
            ClientCommand::FetchDetail { .. } => "detail",
            ClientCommand::SubmitFeedback { .. } => "feedback",
        }
    }
}

/// Fire-and-forget front of the API client.
///
/// Every command runs as its own task; events are emitted in completion order.
#[derive(Clone)]
pub struct ClientHandle {
    cmd_tx: mpsc::Sender<ClientCommand>,
}

impl ClientHandle {
    pub fn new(settings: ClientSettings, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let api = Arc::new(ReqwestRecognizer::new(settings)?);
        Self::with_api(api, sink)
    }

    pub fn with_api(api: Arc<dyn RecognizerApi>, sink: Arc<dyn EventSink>) -> Result<Self, ApiError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("recognizer-io")
            .build()
            .map_err(|err| ApiError::new(FailureKind::Io, format!("tokio runtime: {err}")))?;
        let (cmd_tx, cmd_rx) = mpsc::channel::<ClientCommand>();

        thread::Builder::new()
            .name("recognizer-client".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let api = api.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        let event = handle_command(api.as_ref(), command).await;
                        sink.emit(event);
                    });
                }
                app_debug!("client command channel closed");
            })
            .map_err(|err| ApiError::new(FailureKind::Io, format!("client thread: {err}")))?;

        Ok(Self { cmd_tx })
    }

    pub fn recognize(&self, files: Vec<UploadFile>) {
        self.send(ClientCommand::Recognize { files });
    }

    pub fn list_history(&self) {
        self.send(ClientCommand::ListHistory);
    }

    pub fn fetch_detail(&self, video_id: impl Into<String>) {
        self.send(ClientCommand::FetchDetail {
            video_id: video_id.into(),
        });
    }

    pub fn submit_feedback(&self, target: FeedbackTarget, submission: FeedbackSubmission) {
        self.send(ClientCommand::SubmitFeedback { target, submission });
    }

    fn send(&self, command: ClientCommand) {
        app_trace!("queueing {} command", command.name());
        if self.cmd_tx.send(command).is_err() {
            app_warn!("client worker is gone; dropping command");
        }
    }
}

async fn handle_command(api: &dyn RecognizerApi, command: ClientCommand) -> ClientEvent {
    match command {
        ClientCommand::Recognize { files } => {
            ClientEvent::Recognized(api.recognize_batch(&files).await)
        }
        ClientCommand::ListHistory => ClientEvent::HistoryListed(api.list_history().await),
        ClientCommand::FetchDetail { video_id } => {
            let result = api.fetch_detail(&video_id).await;
            ClientEvent::DetailFetched { video_id, result }
        }
        ClientCommand::SubmitFeedback { target, submission } => ClientEvent::FeedbackSent {
            target,
            result: api.submit_feedback(&submission).await,
        },
    }
}
