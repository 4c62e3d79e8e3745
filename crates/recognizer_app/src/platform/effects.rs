use std::sync::{mpsc, Arc};

use app_logging::{app_debug, app_error, app_info, app_warn};
use recognizer_client::{ApiError, ClientEvent, ClientHandle, ClientSettings, EventSink};
use recognizer_core::{Effect, Msg};

use super::app::AppEvent;

/// Executes reducer effects through the client and feeds completions back as messages.
pub struct EffectRunner {
    client: ClientHandle,
    launch_player: bool,
}

impl EffectRunner {
    pub fn new(
        settings: ClientSettings,
        launch_player: bool,
        events: mpsc::Sender<AppEvent>,
    ) -> Result<Self, ApiError> {
        app_info!("Recognizer service at {}", settings.base_url);
        let client = ClientHandle::new(settings, Arc::new(MsgSink { events }))?;
        Ok(Self {
            client,
            launch_player,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::RecognizeBatch { files } => {
                    app_info!("Uploading {} file(s)", files.len());
                    self.client.recognize(files);
                }
                Effect::FetchHistory => self.client.list_history(),
                Effect::FetchDetail { video_id } => {
                    app_debug!("Fetching details for {}", video_id);
                    self.client.fetch_detail(video_id);
                }
                Effect::SubmitFeedback { target, submission } => {
                    app_info!(
                        "Submitting feedback video_id={} action={}",
                        submission.video_id,
                        submission.correct_action
                    );
                    self.client.submit_feedback(target, submission);
                }
                // file:// urls; nothing outside the cache holds them.
                Effect::RevokePreviewUrls(urls) => {
                    app_debug!("Released {} preview url(s)", urls.len());
                }
                Effect::PlayPreview { url } => self.play(url.as_str()),
            }
        }
    }

    fn play(&self, url: &str) {
        if !self.launch_player {
            app_debug!("Preview at {} (player launch disabled)", url);
            return;
        }
        if let Err(err) = open::that_detached(url) {
            app_warn!("Could not open player for {}: {}", url, err);
        }
    }
}

struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.events.send(AppEvent::Msg(client_event_to_msg(event)));
    }
}

pub(crate) fn client_event_to_msg(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::Recognized(result) => {
            if let Err(err) = &result {
                app_error!("Upload failed ({}): {}", err.kind, err.message);
            }
            Msg::UploadFinished(result.map_err(Into::into))
        }
        ClientEvent::HistoryListed(Ok(records)) => Msg::HistoryLoaded(records),
        ClientEvent::HistoryListed(Err(err)) => {
            app_warn!("History fetch failed ({}): {}", err.kind, err.message);
            Msg::HistoryLoadFailed(err.message)
        }
        ClientEvent::DetailFetched {
            result: Ok(record), ..
        } => Msg::DetailLoaded(record),
        ClientEvent::DetailFetched {
            video_id,
            result: Err(err),
        } => {
            app_warn!("Detail fetch for {} failed ({}): {}", video_id, err.kind, err.message);
            Msg::DetailLoadFailed {
                video_id,
                reason: err.message,
            }
        }
        ClientEvent::FeedbackSent { target, result } => Msg::FeedbackFinished {
            target,
            result: result.map_err(Into::into),
        },
    }
}
