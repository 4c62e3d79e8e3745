use crate::error::RequestFailure;
use crate::feedback::FeedbackTarget;
use crate::model::{FileId, HistoryRecord, PickedFile, RecognitionResult, ResultId};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Application finished starting up.
    Started,
    /// User picked a new set of files; replaces the previous batch.
    FilesPicked(Vec<PickedFile>),
    /// User toggled the checkbox of one file.
    FileToggled(FileId),
    /// User clicked Select All.
    SelectAllToggled,
    /// User clicked Preview Selected.
    PreviewClicked,
    /// User closed the preview overlay.
    PreviewClosed,
    /// User clicked Upload Selected.
    UploadClicked,
    /// Batch recognize response.
    UploadFinished(Result<Vec<RecognitionResult>, RequestFailure>),
    /// User clicked View/Hide History.
    HistoryToggled,
    /// User asked for a fresh history list.
    HistoryRefreshClicked,
    /// History list response.
    HistoryLoaded(Vec<HistoryRecord>),
    /// History list request failed; already logged by the host.
    HistoryLoadFailed(String),
    /// User picked a history entry.
    HistoryEntrySelected { video_id: String },
    /// Detail response for a history entry.
    DetailLoaded(HistoryRecord),
    /// Detail request failed; already logged by the host.
    DetailLoadFailed { video_id: String, reason: String },
    /// User closed the details overlay.
    DetailsClosed,
    /// User clicked Provide Feedback in the details overlay.
    FeedbackOpened,
    /// User chose the corrective label in the details feedback form.
    FeedbackLabelChosen(String),
    /// User edited the comment in the details feedback form.
    FeedbackCommentChanged(String),
    /// User cancelled the details feedback form.
    FeedbackCancelled,
    /// User submitted the details feedback form.
    FeedbackSubmitClicked,
    /// User opened the inline feedback form of a result row.
    ResultFeedbackOpened(ResultId),
    ResultFeedbackLabelChosen { result_id: ResultId, label: String },
    ResultFeedbackCommentChanged { result_id: ResultId, comment: String },
    ResultFeedbackCancelled(ResultId),
    ResultFeedbackSubmitClicked(ResultId),
    /// Feedback response for either form.
    FeedbackFinished {
        target: FeedbackTarget,
        result: Result<(), RequestFailure>,
    },
    /// User dismissed the error line.
    ErrorDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
