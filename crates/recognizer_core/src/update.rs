use crate::effect::UploadFile;
use crate::error::{RequestFailure, ValidationError};
use crate::feedback::{FeedbackDraft, FeedbackTarget};
use crate::{AppState, Effect, Msg, ResultId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchHistory],
        Msg::FilesPicked(files) => {
            let revoked = state.pick_files(files);
            if revoked.is_empty() {
                Vec::new()
            } else {
                vec![Effect::RevokePreviewUrls(revoked)]
            }
        }
        Msg::FileToggled(file_id) => {
            if state.selection.toggle(file_id) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SelectAllToggled => {
            if !state.selection.batch().is_empty() {
                state.selection.toggle_all();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PreviewClicked => match state.modals.open_preview(&state.selection) {
            Ok(file_id) => {
                state.clear_error();
                state.mark_dirty();
                state
                    .preview_urls
                    .get(file_id)
                    .map(|url| Effect::PlayPreview { url: url.clone() })
                    .into_iter()
                    .collect()
            }
            Err(err) => reject(&mut state, err),
        },
        Msg::PreviewClosed => {
            if state.modals.preview().is_some() {
                state.modals.close_preview();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::UploadClicked => {
            let files: Vec<UploadFile> = state
                .selection
                .selected_files()
                .into_iter()
                .map(|file| UploadFile {
                    file_id: file.id,
                    name: file.name.clone(),
                    mime_type: file.mime_type.clone(),
                    path: file.path.clone(),
                })
                .collect();
            if files.is_empty() {
                return finish(state, ValidationError::NothingToUpload);
            }
            state.begin_upload(files.iter().map(|file| file.name.clone()).collect());
            vec![Effect::RecognizeBatch { files }]
        }
        Msg::UploadFinished(outcome) => {
            state.finish_upload();
            match outcome {
                Ok(results) => {
                    state.replace_results(results);
                    state.clear_error();
                    vec![Effect::FetchHistory]
                }
                Err(failure) => {
                    state.set_error(failure.message);
                    Vec::new()
                }
            }
        }
        Msg::HistoryToggled => {
            state.show_history = !state.show_history;
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryRefreshClicked => vec![Effect::FetchHistory],
        Msg::HistoryLoaded(records) => {
            state.history = records;
            state.mark_dirty();
            Vec::new()
        }
        Msg::HistoryLoadFailed(_) | Msg::DetailLoadFailed { .. } => Vec::new(),
        Msg::HistoryEntrySelected { video_id } => vec![Effect::FetchDetail { video_id }],
        Msg::DetailLoaded(record) => {
            state.modals.show_details(record);
            state.mark_dirty();
            Vec::new()
        }
        Msg::DetailsClosed => {
            if state.modals.details().is_some() {
                state.modals.close_details();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FeedbackOpened => {
            let submitted = state
                .modals
                .details()
                .is_some_and(|record| state.submitted_videos.contains(&record.id));
            match state.modals.open_feedback(submitted) {
                Ok(true) => {
                    state.mark_dirty();
                    Vec::new()
                }
                Ok(false) => Vec::new(),
                Err(err) => reject(&mut state, err),
            }
        }
        Msg::FeedbackLabelChosen(label) => {
            edit_details_draft(&mut state, |draft| draft.label = label);
            Vec::new()
        }
        Msg::FeedbackCommentChanged(comment) => {
            edit_details_draft(&mut state, |draft| draft.comment = comment);
            Vec::new()
        }
        Msg::FeedbackCancelled => {
            if state.modals.feedback().is_some() {
                state.modals.close_feedback();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FeedbackSubmitClicked => submit_details_feedback(&mut state),
        Msg::ResultFeedbackOpened(result_id) => {
            let Some(row) = state.result_row_mut(result_id) else {
                return (state, Vec::new());
            };
            if row.submitted {
                return finish(state, ValidationError::FeedbackAlreadyProvided);
            }
            if row.result.video_id.is_none() {
                return finish(state, ValidationError::FeedbackUnavailable);
            }
            if row.draft.is_none() {
                row.draft = Some(FeedbackDraft::default());
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ResultFeedbackLabelChosen { result_id, label } => {
            edit_result_draft(&mut state, result_id, |draft| draft.label = label);
            Vec::new()
        }
        Msg::ResultFeedbackCommentChanged { result_id, comment } => {
            edit_result_draft(&mut state, result_id, |draft| draft.comment = comment);
            Vec::new()
        }
        Msg::ResultFeedbackCancelled(result_id) => {
            if let Some(row) = state.result_row_mut(result_id) {
                if row.draft.take().is_some() {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::ResultFeedbackSubmitClicked(result_id) => {
            submit_result_feedback(&mut state, result_id)
        }
        Msg::FeedbackFinished { target, result } => {
            apply_feedback_outcome(&mut state, target, result)
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn finish(mut state: AppState, err: ValidationError) -> (AppState, Vec<Effect>) {
    let effects = reject(&mut state, err);
    (state, effects)
}

fn reject(state: &mut AppState, err: ValidationError) -> Vec<Effect> {
    state.set_error(err.to_string());
    Vec::new()
}

fn edit_details_draft(state: &mut AppState, edit: impl FnOnce(&mut FeedbackDraft)) {
    if let Some(draft) = state.modals.feedback_mut() {
        edit(draft);
        state.mark_dirty();
    }
}

fn edit_result_draft(
    state: &mut AppState,
    result_id: ResultId,
    edit: impl FnOnce(&mut FeedbackDraft),
) {
    let edited = match state.result_row_mut(result_id).and_then(|row| row.draft.as_mut()) {
        Some(draft) => {
            edit(draft);
            true
        }
        None => false,
    };
    if edited {
        state.mark_dirty();
    }
}

fn submit_details_feedback(state: &mut AppState) -> Vec<Effect> {
    let (Some(record), Some(draft)) = (state.modals.details(), state.modals.feedback()) else {
        return Vec::new();
    };
    if state.modals.feedback_pending() {
        return Vec::new();
    }
    let video_id = record.id.clone();
    match draft.submission(
        &record.id,
        Some(&record.filename),
        ValidationError::MissingCorrectAction,
    ) {
        Ok(submission) => {
            state.modals.set_feedback_pending(true);
            state.mark_dirty();
            vec![Effect::SubmitFeedback {
                target: FeedbackTarget::Details { video_id },
                submission,
            }]
        }
        Err(err) => reject(state, err),
    }
}

fn submit_result_feedback(state: &mut AppState, result_id: ResultId) -> Vec<Effect> {
    let Some(row) = state.result_row_mut(result_id) else {
        return Vec::new();
    };
    let (Some(draft), Some(video_id)) = (row.draft.as_ref(), row.result.video_id.as_deref()) else {
        return Vec::new();
    };
    if row.pending {
        return Vec::new();
    }
    let filename = row.display_name().map(ToOwned::to_owned);
    match draft.submission(video_id, filename.as_deref(), ValidationError::MissingResultAction) {
        Ok(submission) => {
            row.pending = true;
            state.mark_dirty();
            vec![Effect::SubmitFeedback {
                target: FeedbackTarget::Result(result_id),
                submission,
            }]
        }
        Err(err) => reject(state, err),
    }
}

fn apply_feedback_outcome(
    state: &mut AppState,
    target: FeedbackTarget,
    result: Result<(), RequestFailure>,
) -> Vec<Effect> {
    match target {
        FeedbackTarget::Details { video_id } => {
            let still_shown = state
                .modals
                .details()
                .is_some_and(|record| record.id == video_id);
            match result {
                Ok(()) => {
                    state.submitted_videos.insert(video_id);
                    if still_shown {
                        state.modals.close_feedback();
                        state.clear_error();
                    }
                    state.mark_dirty();
                    vec![Effect::FetchHistory]
                }
                // The form on screen belongs to another record; its pending flag is not ours.
                Err(_) if !still_shown => Vec::new(),
                Err(failure) => {
                    state.modals.set_feedback_pending(false);
                    state.set_error(failure.message);
                    Vec::new()
                }
            }
        }
        FeedbackTarget::Result(result_id) => {
            let Some(row) = state.result_row_mut(result_id) else {
                // Row replaced by a newer upload; the server still took the feedback.
                return match result {
                    Ok(()) => vec![Effect::FetchHistory],
                    Err(_) => Vec::new(),
                };
            };
            row.pending = false;
            match result {
                Ok(()) => {
                    row.submitted = true;
                    row.draft = None;
                    if let Some(video_id) = row.result.video_id.clone() {
                        state.submitted_videos.insert(video_id);
                    }
                    state.clear_error();
                    state.mark_dirty();
                    vec![Effect::FetchHistory]
                }
                Err(failure) => {
                    state.set_error(failure.message);
                    Vec::new()
                }
            }
        }
    }
}
