use std::fmt;

use recognizer_core::{FeedbackTarget, HistoryRecord, RecognitionResult, RequestFailure};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    Recognized(Result<Vec<RecognitionResult>, ApiError>),
    HistoryListed(Result<Vec<HistoryRecord>, ApiError>),
    DetailFetched {
        video_id: String,
        result: Result<HistoryRecord, ApiError>,
    },
    FeedbackSent {
        target: FeedbackTarget,
        result: Result<(), ApiError>,
    },
}

/// A failed API call. `message` is the text meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl From<ApiError> for RequestFailure {
    fn from(err: ApiError) -> Self {
        RequestFailure::new(err.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    Network,
    /// Response body did not match the expected shape.
    Decode,
    /// Local file could not be read, or the runtime could not start.
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "decode error"),
            FailureKind::Io => write!(f, "io error"),
        }
    }
}
