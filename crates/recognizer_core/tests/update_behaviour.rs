use std::sync::Once;

use recognizer_core::{update, AppState, Effect, FileId, Msg, PickedFile};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(app_logging::initialize_for_tests);
}

fn picked(name: &str) -> PickedFile {
    PickedFile {
        name: name.to_string(),
        byte_size: 2 * 1024 * 1024,
        mime_type: "video/mp4".to_string(),
        path: std::env::temp_dir().join(name),
    }
}

fn pick(state: AppState, names: &[&str]) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FilesPicked(names.iter().map(|name| picked(name)).collect()),
    )
}

fn file_ids(state: &AppState) -> Vec<FileId> {
    state.selection().batch().iter().map(|file| file.id).collect()
}

#[test]
fn pick_resets_selection_and_revokes_previous_urls() {
    init_logging();
    let (state, effects) = pick(AppState::new(), &["a.mp4", "b.mp4"]);
    assert!(effects.is_empty());
    let issued: Vec<_> = file_ids(&state)
        .into_iter()
        .map(|id| state.preview_urls().get(id).cloned().expect("url issued"))
        .collect();

    let (state, _) = update(state, Msg::SelectAllToggled);
    assert_eq!(state.selection().selected_count(), 2);

    let (state, effects) = pick(state, &["c.mp4"]);
    assert_eq!(state.selection().selected_count(), 0);
    assert_eq!(effects, vec![Effect::RevokePreviewUrls(issued)]);
    assert_eq!(state.preview_urls().live_count(), 1);
    assert_eq!(state.preview_urls().revoked_total(), 2);
    for id in file_ids(&state) {
        assert!(state.preview_urls().get(id).is_some());
    }
}

#[test]
fn toggle_twice_restores_selection() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4", "b.mp4", "c.mp4"]);
    let ids = file_ids(&state);
    let (state, _) = update(state, Msg::FileToggled(ids[0]));
    let before = state.selection().selected_ids().clone();

    let (state, _) = update(state, Msg::FileToggled(ids[2]));
    assert_ne!(state.selection().selected_ids(), &before);
    let (state, _) = update(state, Msg::FileToggled(ids[2]));
    assert_eq!(state.selection().selected_ids(), &before);
}

#[test]
fn toggle_of_stale_id_is_ignored() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4"]);
    let stale = file_ids(&state)[0];
    let (mut state, _) = pick(state, &["a.mp4"]);
    assert!(state.consume_dirty());

    let (mut state, effects) = update(state, Msg::FileToggled(stale));
    assert!(effects.is_empty());
    assert_eq!(state.selection().selected_count(), 0);
    assert!(!state.consume_dirty());
}

#[test]
fn select_all_is_a_true_toggle() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4", "b.mp4"]);
    let ids = file_ids(&state);

    let (state, _) = update(state, Msg::FileToggled(ids[1]));
    let (state, _) = update(state, Msg::SelectAllToggled);
    assert!(state.view().all_selected);
    assert_eq!(state.selection().selected_count(), 2);

    let (state, _) = update(state, Msg::SelectAllToggled);
    assert_eq!(state.selection().selected_count(), 0);
    assert!(!state.view().all_selected);
}

#[test]
fn preview_rejected_without_selection() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4", "b.mp4"]);
    let (state, effects) = update(state, Msg::PreviewClicked);

    assert!(effects.is_empty());
    assert_eq!(state.error(), Some("Please select a video to preview"));
    assert!(state.view().preview.is_none());
}

#[test]
fn preview_rejected_with_several_selected() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4", "b.mp4"]);
    let (state, _) = update(state, Msg::SelectAllToggled);
    let (state, effects) = update(state, Msg::PreviewClicked);

    assert!(effects.is_empty());
    assert_eq!(state.error(), Some("Please select only one video to preview"));
    assert!(state.view().preview.is_none());
}

#[test]
fn preview_accepted_with_single_selection() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4", "b.mp4"]);
    let ids = file_ids(&state);
    let (state, _) = update(state, Msg::PreviewClicked);
    assert!(state.error().is_some());

    let (state, _) = update(state, Msg::FileToggled(ids[1]));
    let (state, effects) = update(state, Msg::PreviewClicked);

    let url = state.preview_urls().get(ids[1]).cloned().unwrap();
    assert_eq!(effects, vec![Effect::PlayPreview { url: url.clone() }]);
    assert_eq!(state.error(), None);
    let preview = state.view().preview.expect("preview shown");
    assert_eq!(preview.name, "b.mp4");
    assert_eq!(preview.url, Some(url));

    let (state, _) = update(state, Msg::PreviewClosed);
    assert!(state.view().preview.is_none());
}

#[test]
fn new_pick_closes_preview() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4"]);
    let (state, _) = update(state, Msg::SelectAllToggled);
    let (state, _) = update(state, Msg::PreviewClicked);
    assert!(state.view().preview.is_some());

    let (state, _) = pick(state, &["b.mp4"]);
    assert!(state.view().preview.is_none());
    assert_eq!(state.modals().preview(), None);
}

#[test]
fn upload_rejected_without_selection() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4"]);
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.error(),
        Some("Please select at least one video to upload!")
    );
    assert!(!state.view().uploading);
}

#[test]
fn state_serializes_for_inspection() {
    init_logging();
    let (state, _) = pick(AppState::new(), &["a.mp4"]);
    let json = serde_json::to_value(&state).expect("serializable state");
    assert!(json.get("selection").is_some());
    assert!(json.get("dirty").is_none());
}
