use recognizer_core::{FeedbackSubmission, HistoryRecord, RecognitionResult, UploadFile};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::{ApiError, ClientSettings, FailureKind};

const UPLOAD_FAILED: &str = "Failed to upload videos";
const FEEDBACK_FAILED: &str = "Failed to submit feedback";
const HISTORY_FAILED: &str = "Failed to fetch history";
const DETAIL_FAILED: &str = "Failed to fetch video details";
const FALLBACK_MIME: &str = "application/octet-stream";

/// The four calls the client makes against the recognizer service.
#[async_trait::async_trait]
pub trait RecognizerApi: Send + Sync {
    /// `POST /recogonize-batch` with one `files` part per upload, in order.
    async fn recognize_batch(
        &self,
        files: &[UploadFile],
    ) -> Result<Vec<RecognitionResult>, ApiError>;

    /// `GET /videos`.
    async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError>;

    /// `GET /videos/{id}`.
    async fn fetch_detail(&self, video_id: &str) -> Result<HistoryRecord, ApiError>;

    /// `POST /feedback`.
    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestRecognizer {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestRecognizer {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        context: &str,
    ) -> Result<T, ApiError> {
        let url = self.settings.endpoint(segments);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, context))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                format!("{context}: {status}"),
            ));
        }
        let body = read_body(response, context).await?;
        decode(&body, context)
    }
}

#[async_trait::async_trait]
impl RecognizerApi for ReqwestRecognizer {
    async fn recognize_batch(
        &self,
        files: &[UploadFile],
    ) -> Result<Vec<RecognitionResult>, ApiError> {
        let mut form = Form::new();
        for file in files {
            form = form.part("files", file_part(file).await?);
        }

        let response = self
            .client
            .post(self.settings.endpoint(&["recogonize-batch"]))
            .multipart(form)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, UPLOAD_FAILED))?;

        let status = response.status();
        let body = read_body(response, UPLOAD_FAILED).await?;
        if !status.is_success() {
            return Err(ApiError::new(
                FailureKind::HttpStatus(status.as_u16()),
                upload_failure_message(status, &body),
            ));
        }
        decode(&body, UPLOAD_FAILED)
    }

    async fn list_history(&self) -> Result<Vec<HistoryRecord>, ApiError> {
        self.get_json(&["videos"], HISTORY_FAILED).await
    }

    async fn fetch_detail(&self, video_id: &str) -> Result<HistoryRecord, ApiError> {
        self.get_json(&["videos", video_id], DETAIL_FAILED).await
    }

    async fn submit_feedback(&self, submission: &FeedbackSubmission) -> Result<(), ApiError> {
        let response = self
            .client
            .post(self.settings.endpoint(&["feedback"]))
            .json(submission)
            .send()
            .await
            .map_err(|err| map_reqwest_error(err, FEEDBACK_FAILED))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = read_body(response, FEEDBACK_FAILED).await?;
        Err(ApiError::new(
            FailureKind::HttpStatus(status.as_u16()),
            feedback_failure_message(&body),
        ))
    }
}

/// Streams one file from disk as a multipart part, keeping its name and type.
async fn file_part(file: &UploadFile) -> Result<Part, ApiError> {
    let io_error = |err: std::io::Error| {
        ApiError::new(
            FailureKind::Io,
            format!("{UPLOAD_FAILED}: cannot read {}: {err}", file.path.display()),
        )
    };
    let handle = tokio::fs::File::open(&file.path).await.map_err(io_error)?;
    let length = handle.metadata().await.map_err(io_error)?.len();
    let body = reqwest::Body::wrap_stream(ReaderStream::new(handle));

    let mime = if file.mime_type.trim().is_empty() {
        FALLBACK_MIME
    } else {
        file.mime_type.trim()
    };
    Part::stream_with_length(body, length)
        .file_name(file.name.clone())
        .mime_str(mime)
        .map_err(|err| {
            ApiError::new(
                FailureKind::Io,
                format!("{UPLOAD_FAILED}: invalid type {mime} for {}: {err}", file.name),
            )
        })
}

async fn read_body(response: Response, context: &str) -> Result<Vec<u8>, ApiError> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|err| map_reqwest_error(err, context))
}

fn decode<T: DeserializeOwned>(body: &[u8], context: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|err| ApiError::new(FailureKind::Decode, format!("{context}: {err}")))
}

/// `"{message}: {error}"` from the server's error object, with fallbacks.
fn upload_failure_message(status: StatusCode, body: &[u8]) -> String {
    let parsed: Option<Value> = serde_json::from_slice(body).ok();
    let field = |name: &str| {
        parsed
            .as_ref()
            .and_then(|value| value.get(name))
            .and_then(Value::as_str)
            .map(ToOwned::to_owned)
    };
    match (field("message"), field("error"), field("detail")) {
        (Some(message), error, _) => {
            format!("{message}: {}", error.as_deref().unwrap_or("Unknown error"))
        }
        (None, _, Some(detail)) => detail,
        (None, Some(error), None) => error,
        (None, None, None) => format!("{UPLOAD_FAILED}: {status}"),
    }
}

fn feedback_failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| value.get("detail").and_then(Value::as_str).map(ToOwned::to_owned))
        .unwrap_or_else(|| FEEDBACK_FAILED.to_string())
}

fn map_reqwest_error(err: reqwest::Error, context: &str) -> ApiError {
    let kind = if err.is_timeout() {
        FailureKind::Timeout
    } else if err.is_decode() {
        FailureKind::Decode
    } else {
        FailureKind::Network
    };
    ApiError::new(kind, format!("{context}: {err}"))
}
