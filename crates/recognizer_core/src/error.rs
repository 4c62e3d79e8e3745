use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User-input problems caught before any request is issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a video to preview")]
    NothingToPreview,
    #[error("Please select only one video to preview")]
    TooManyToPreview,
    #[error("Please select at least one video to upload!")]
    NothingToUpload,
    #[error("Please provide the correct action")]
    MissingCorrectAction,
    #[error("Please select an action")]
    MissingResultAction,
    #[error("Feedback has already been provided for this video")]
    FeedbackAlreadyProvided,
    #[error("This result has no stored video to attach feedback to")]
    FeedbackUnavailable,
}

/// A failed mutating request, carrying the text to show the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct RequestFailure {
    pub message: String,
}

impl RequestFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
