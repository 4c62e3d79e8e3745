use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::feedback::FeedbackDraft;
use crate::model::{FileId, HistoryRecord};
use crate::selection::SelectionStore;

/// Preview, details and feedback overlays.
///
/// Preview and details are independent. Feedback is only open while details are shown.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModalController {
    preview: Option<FileId>,
    details: Option<HistoryRecord>,
    feedback: Option<FeedbackDraft>,
    feedback_pending: bool,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the preview overlay for the single selected file.
    pub fn open_preview(&mut self, selection: &SelectionStore) -> Result<FileId, ValidationError> {
        let mut selected = selection.selected_files().into_iter();
        let file = match (selected.next(), selected.next()) {
            (None, _) => return Err(ValidationError::NothingToPreview),
            (Some(_), Some(_)) => return Err(ValidationError::TooManyToPreview),
            (Some(file), None) => file.id,
        };
        self.preview = Some(file);
        Ok(file)
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }

    pub fn preview(&self) -> Option<FileId> {
        self.preview
    }

    /// Shows `record`. A different record than the one shown drops any open feedback form.
    pub fn show_details(&mut self, record: HistoryRecord) {
        let same_record = self
            .details
            .as_ref()
            .is_some_and(|current| current.id == record.id);
        if !same_record {
            self.close_feedback();
        }
        self.details = Some(record);
    }

    pub fn close_details(&mut self) {
        self.details = None;
        self.close_feedback();
    }

    pub fn details(&self) -> Option<&HistoryRecord> {
        self.details.as_ref()
    }

    /// Opens the feedback form for the shown record.
    ///
    /// Returns `Ok(false)` when no details are shown.
    pub fn open_feedback(&mut self, submitted_this_session: bool) -> Result<bool, ValidationError> {
        let Some(record) = self.details.as_ref() else {
            return Ok(false);
        };
        if record.has_feedback || submitted_this_session {
            return Err(ValidationError::FeedbackAlreadyProvided);
        }
        if self.feedback.is_none() {
            self.feedback = Some(FeedbackDraft::default());
        }
        Ok(true)
    }

    pub fn close_feedback(&mut self) {
        self.feedback = None;
        self.feedback_pending = false;
    }

    pub fn feedback(&self) -> Option<&FeedbackDraft> {
        self.feedback.as_ref()
    }

    pub fn feedback_mut(&mut self) -> Option<&mut FeedbackDraft> {
        self.feedback.as_mut()
    }

    pub fn feedback_pending(&self) -> bool {
        self.feedback_pending
    }

    pub(crate) fn set_feedback_pending(&mut self, pending: bool) {
        self.feedback_pending = pending;
    }
}
