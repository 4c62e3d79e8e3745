use std::path::PathBuf;

use url::Url;

use crate::feedback::FeedbackTarget;
use crate::model::{FeedbackSubmission, FileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Upload the files, in order, to `POST /recogonize-batch`.
    RecognizeBatch { files: Vec<UploadFile> },
    FetchHistory,
    FetchDetail { video_id: String },
    SubmitFeedback {
        target: FeedbackTarget,
        submission: FeedbackSubmission,
    },
    /// Preview URLs of a replaced batch; the host releases anything tied to them.
    RevokePreviewUrls(Vec<Url>),
    /// The preview overlay opened for this URL.
    PlayPreview { url: Url },
}

/// A selected file as handed to the uploader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_id: FileId,
    pub name: String,
    pub mime_type: String,
    pub path: PathBuf,
}
