//! Recognizer core: pure state machine and view-model helpers.
mod effect;
mod error;
mod feedback;
mod modal;
mod model;
mod msg;
mod object_url;
mod selection;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, UploadFile};
pub use error::{RequestFailure, ValidationError};
pub use feedback::{
    action_display_name, resolve_action_choice, FeedbackDraft, FeedbackTarget, ResultRow,
};
pub use modal::ModalController;
pub use model::{
    CandidateFile, FeedbackSubmission, FileId, HistoryRecord, MediaInfo, Normalization,
    PickedFile, RecognitionResult, ResultId, KNOWN_ACTIONS,
};
pub use msg::Msg;
pub use object_url::ObjectUrlCache;
pub use selection::SelectionStore;
pub use state::AppState;
pub use update::update;
pub use view_model::{
    AppViewModel, ConfidenceBand, ConfidenceView, DetailsView, FeedbackFormView, FileRowView,
    HistoryEntryView, PreviewView, ResultFeedbackView, ResultRowView,
};
