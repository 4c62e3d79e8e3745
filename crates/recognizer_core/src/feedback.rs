use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::model::{FeedbackSubmission, RecognitionResult, ResultId, KNOWN_ACTIONS};

/// Ephemeral feedback form contents.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FeedbackDraft {
    pub label: String,
    pub comment: String,
}

impl FeedbackDraft {
    /// Builds the submission, rejecting a blank label with `missing`.
    pub fn submission(
        &self,
        video_id: &str,
        filename: Option<&str>,
        missing: ValidationError,
    ) -> Result<FeedbackSubmission, ValidationError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(missing);
        }
        Ok(FeedbackSubmission {
            video_id: video_id.to_string(),
            filename: filename.map(ToOwned::to_owned),
            correct_action: label.to_string(),
            comment: self.comment.clone(),
        })
    }
}

/// Which form a feedback request was sent from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeedbackTarget {
    /// The feedback overlay on top of the details view.
    Details { video_id: String },
    /// The inline form of one result row.
    Result(ResultId),
}

/// One received recognition result plus its own feedback authoring state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub id: ResultId,
    /// Name of the file uploaded at the same position, used when the server omits it.
    pub uploaded_name: Option<String>,
    pub result: RecognitionResult,
    pub draft: Option<FeedbackDraft>,
    pub pending: bool,
    pub submitted: bool,
}

impl ResultRow {
    pub fn display_name(&self) -> Option<&str> {
        self.result
            .filename
            .as_deref()
            .or(self.uploaded_name.as_deref())
    }

    pub(crate) fn reset_feedback(&mut self) {
        self.draft = None;
        self.pending = false;
        self.submitted = false;
    }
}

/// Resolves a selector choice: a 1-based index into `KNOWN_ACTIONS` or a free label.
pub fn resolve_action_choice(choice: &str) -> String {
    let choice = choice.trim();
    match choice.parse::<usize>() {
        Ok(index) if (1..=KNOWN_ACTIONS.len()).contains(&index) => {
            KNOWN_ACTIONS[index - 1].to_string()
        }
        _ => choice.to_string(),
    }
}

/// Human label for an action name, e.g. `brush_hair` -> `brush hair`.
pub fn action_display_name(action: &str) -> String {
    action.replacen('_', " ", 1)
}

#[cfg(test)]
mod tests {
    use super::{action_display_name, resolve_action_choice, FeedbackDraft};
    use crate::error::ValidationError;

    #[test]
    fn blank_label_is_rejected_with_given_error() {
        let draft = FeedbackDraft {
            label: "   ".to_string(),
            comment: "nope".to_string(),
        };
        assert_eq!(
            draft.submission("v1", None, ValidationError::MissingResultAction),
            Err(ValidationError::MissingResultAction)
        );
    }

    #[test]
    fn submission_trims_label_and_keeps_comment() {
        let draft = FeedbackDraft {
            label: " climb ".to_string(),
            comment: " up the wall".to_string(),
        };
        let submission = draft
            .submission("v1", Some("a.mp4"), ValidationError::MissingCorrectAction)
            .unwrap();
        assert_eq!(submission.correct_action, "climb");
        assert_eq!(submission.comment, " up the wall");
        assert_eq!(submission.filename.as_deref(), Some("a.mp4"));
    }

    #[test]
    fn numeric_choices_map_to_known_actions() {
        assert_eq!(resolve_action_choice("1"), "brush_hair");
        assert_eq!(resolve_action_choice("6"), "climb");
        assert_eq!(resolve_action_choice("7"), "7");
        assert_eq!(resolve_action_choice("wave"), "wave");
    }

    #[test]
    fn display_name_replaces_first_underscore() {
        assert_eq!(action_display_name("brush_hair"), "brush hair");
        assert_eq!(action_display_name("clap"), "clap");
    }
}
