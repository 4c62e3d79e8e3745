use url::Url;

use crate::feedback::FeedbackDraft;
use crate::model::{FileId, HistoryRecord, Normalization, ResultId};
use crate::AppState;

/// Colour band of a confidence bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceBand {
    /// Above 0.7.
    High,
    /// Above 0.4.
    Medium,
    Low,
}

impl ConfidenceBand {
    pub fn for_score(score: f64) -> Self {
        if score > 0.7 {
            ConfidenceBand::High
        } else if score > 0.4 {
            ConfidenceBand::Medium
        } else {
            ConfidenceBand::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceView {
    pub score: f64,
    /// Percentage with one decimal, as displayed.
    pub percent: f64,
    pub band: ConfidenceBand,
}

impl ConfidenceView {
    pub fn new(score: f64) -> Self {
        let clamped = score.clamp(0.0, 1.0);
        Self {
            score: clamped,
            percent: (clamped * 1000.0).round() / 10.0,
            band: ConfidenceBand::for_score(clamped),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub files: Vec<FileRowView>,
    pub all_selected: bool,
    pub selected_count: usize,
    pub uploading: bool,
    pub results: Vec<ResultRowView>,
    pub history_visible: bool,
    pub history: Vec<HistoryEntryView>,
    pub preview: Option<PreviewView>,
    pub details: Option<DetailsView>,
    pub feedback: Option<FeedbackFormView>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub file_id: FileId,
    pub name: String,
    pub byte_size: u64,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultFeedbackView {
    /// Row can take feedback; form closed.
    Available,
    /// Form open.
    Editing { draft: FeedbackDraft, pending: bool },
    Submitted,
    /// Result has no stored video.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRowView {
    pub result_id: ResultId,
    pub filename: Option<String>,
    pub action: Option<String>,
    pub confidence: Option<ConfidenceView>,
    pub normalization: Option<Normalization>,
    pub error: Option<String>,
    pub feedback: ResultFeedbackView,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntryView {
    pub video_id: String,
    pub filename: String,
    pub status: String,
    pub upload_time: Option<String>,
    pub action: Option<String>,
    pub corrected_action: Option<String>,
    pub submitted_this_session: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewView {
    pub file_id: FileId,
    pub name: String,
    pub mime_type: String,
    pub url: Option<Url>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailsView {
    pub record: HistoryRecord,
    pub confidence: Option<ConfidenceView>,
    /// Whether the "Provide Feedback" action is offered.
    pub can_provide_feedback: bool,
    pub feedback_submitted: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackFormView {
    pub video_id: String,
    pub filename: String,
    pub current_action: Option<String>,
    pub draft: FeedbackDraft,
    pub pending: bool,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        let selection = self.selection();
        let files = selection
            .batch()
            .iter()
            .map(|file| FileRowView {
                file_id: file.id,
                name: file.name.clone(),
                byte_size: file.byte_size,
                selected: selection.is_selected(file.id),
            })
            .collect();

        let results = self
            .results()
            .iter()
            .map(|row| ResultRowView {
                result_id: row.id,
                filename: row.display_name().map(ToOwned::to_owned),
                action: row.result.action.clone(),
                confidence: row.result.confidence.map(ConfidenceView::new),
                normalization: row.result.normalization.clone(),
                error: row.result.error.clone(),
                feedback: if row.submitted {
                    ResultFeedbackView::Submitted
                } else if row.result.video_id.is_none() {
                    ResultFeedbackView::Unavailable
                } else if let Some(draft) = &row.draft {
                    ResultFeedbackView::Editing {
                        draft: draft.clone(),
                        pending: row.pending,
                    }
                } else {
                    ResultFeedbackView::Available
                },
            })
            .collect();

        let history = self
            .history()
            .iter()
            .map(|record| HistoryEntryView {
                video_id: record.id.clone(),
                filename: record.filename.clone(),
                status: record.status.clone(),
                upload_time: record.upload_time.clone(),
                action: record.action.clone(),
                corrected_action: if record.has_feedback {
                    record.feedback_action.clone()
                } else {
                    None
                },
                submitted_this_session: self.feedback_submitted_for(&record.id),
            })
            .collect();

        let preview = self.modals().preview().and_then(|file_id| {
            selection.file(file_id).map(|file| PreviewView {
                file_id,
                name: file.name.clone(),
                mime_type: file.mime_type.clone(),
                url: self.preview_urls().get(file_id).cloned(),
            })
        });

        let details = self.modals().details().map(|record| {
            let submitted = self.feedback_submitted_for(&record.id);
            DetailsView {
                record: record.clone(),
                confidence: record.confidence.map(ConfidenceView::new),
                can_provide_feedback: !record.has_feedback && !submitted,
                feedback_submitted: submitted,
            }
        });

        let feedback = match (self.modals().details(), self.modals().feedback()) {
            (Some(record), Some(draft)) => Some(FeedbackFormView {
                video_id: record.id.clone(),
                filename: record.filename.clone(),
                current_action: record.action.clone(),
                draft: draft.clone(),
                pending: self.modals().feedback_pending(),
            }),
            _ => None,
        };

        AppViewModel {
            files,
            all_selected: selection.all_selected(),
            selected_count: selection.selected_count(),
            uploading: self.uploads_in_flight > 0,
            results,
            history_visible: self.is_history_visible(),
            history,
            preview,
            details,
            feedback,
            error: self.error().map(ToOwned::to_owned),
        }
    }
}
