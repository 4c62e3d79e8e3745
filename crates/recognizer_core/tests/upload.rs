use pretty_assertions::assert_eq;
use recognizer_core::{
    update, AppState, ConfidenceBand, Effect, Msg, PickedFile, RecognitionResult, RequestFailure,
    ResultFeedbackView, UploadFile,
};

fn picked(name: &str) -> PickedFile {
    PickedFile {
        name: name.to_string(),
        byte_size: 512,
        mime_type: "video/mp4".to_string(),
        path: std::env::temp_dir().join(name),
    }
}

fn picked_and_selected(names: &[&str]) -> AppState {
    let (state, _) = update(
        AppState::new(),
        Msg::FilesPicked(names.iter().map(|name| picked(name)).collect()),
    );
    let (state, _) = update(state, Msg::SelectAllToggled);
    state
}

fn clap_result() -> RecognitionResult {
    RecognitionResult {
        filename: Some("a.mp4".to_string()),
        video_id: Some("v1".to_string()),
        action: Some("clap".to_string()),
        confidence: Some(0.82),
        ..RecognitionResult::default()
    }
}

#[test]
fn upload_sends_selected_files_in_batch_order() {
    let (state, _) = update(
        AppState::new(),
        Msg::FilesPicked(vec![picked("a.mp4"), picked("b.mp4"), picked("c.mp4")]),
    );
    let ids: Vec<_> = state.selection().batch().iter().map(|f| f.id).collect();
    let (state, _) = update(state, Msg::FileToggled(ids[2]));
    let (state, _) = update(state, Msg::FileToggled(ids[0]));

    let (state, effects) = update(state, Msg::UploadClicked);
    assert_eq!(
        effects,
        vec![Effect::RecognizeBatch {
            files: vec![
                UploadFile {
                    file_id: ids[0],
                    name: "a.mp4".to_string(),
                    mime_type: "video/mp4".to_string(),
                    path: std::env::temp_dir().join("a.mp4"),
                },
                UploadFile {
                    file_id: ids[2],
                    name: "c.mp4".to_string(),
                    mime_type: "video/mp4".to_string(),
                    path: std::env::temp_dir().join("c.mp4"),
                },
            ],
        }]
    );
    assert!(state.view().uploading);
}

#[test]
fn successful_upload_refetches_history_exactly_once() {
    let state = picked_and_selected(&["a.mp4"]);
    let (state, _) = update(state, Msg::UploadClicked);
    let (mut state, effects) = update(state, Msg::UploadFinished(Ok(vec![clap_result()])));

    let refetches = effects
        .iter()
        .filter(|effect| matches!(effect, Effect::FetchHistory))
        .count();
    assert_eq!(refetches, 1);
    assert_eq!(effects.len(), 1);
    assert!(state.consume_dirty());

    let view = state.view();
    assert!(!view.uploading);
    assert_eq!(view.results.len(), 1);
    let row = &view.results[0];
    assert_eq!(row.filename.as_deref(), Some("a.mp4"));
    assert_eq!(row.action.as_deref(), Some("clap"));
    let confidence = row.confidence.expect("confidence");
    assert_eq!(confidence.percent, 82.0);
    assert_eq!(confidence.band, ConfidenceBand::High);
    assert_eq!(row.feedback, ResultFeedbackView::Available);
}

#[test]
fn failed_upload_surfaces_message_without_refetch() {
    let state = picked_and_selected(&["a.mp4"]);
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, effects) = update(
        state,
        Msg::UploadFinished(Err(RequestFailure::new("failed: decode error"))),
    );

    assert!(effects.is_empty());
    assert_eq!(state.error(), Some("failed: decode error"));
    assert!(state.view().results.is_empty());
    assert!(!state.view().uploading);
}

#[test]
fn successful_upload_clears_previous_error() {
    let state = picked_and_selected(&["a.mp4"]);
    let (state, _) = update(state, Msg::PreviewClicked);
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(
        state,
        Msg::UploadFinished(Err(RequestFailure::new("Failed to upload videos: refused"))),
    );
    assert!(state.error().is_some());

    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(state, Msg::UploadFinished(Ok(vec![clap_result()])));
    assert_eq!(state.error(), None);
}

#[test]
fn result_without_filename_uses_uploaded_name() {
    let state = picked_and_selected(&["first.mp4", "second.mp4"]);
    let (state, _) = update(state, Msg::UploadClicked);
    let failed = RecognitionResult {
        message: Some("Error processing video".to_string()),
        error: Some("Autovideo server error".to_string()),
        ..RecognitionResult::default()
    };
    let (state, _) = update(state, Msg::UploadFinished(Ok(vec![clap_result(), failed])));

    let view = state.view();
    assert_eq!(view.results[1].filename.as_deref(), Some("second.mp4"));
    assert_eq!(view.results[1].error.as_deref(), Some("Autovideo server error"));
    assert_eq!(view.results[1].feedback, ResultFeedbackView::Unavailable);
}

#[test]
fn new_results_get_fresh_row_ids() {
    let state = picked_and_selected(&["a.mp4"]);
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(state, Msg::UploadFinished(Ok(vec![clap_result()])));
    let first = state.view().results[0].result_id;

    let (state, _) = update(state, Msg::UploadClicked);
    let (state, _) = update(state, Msg::UploadFinished(Ok(vec![clap_result()])));
    assert_ne!(state.view().results[0].result_id, first);
}
