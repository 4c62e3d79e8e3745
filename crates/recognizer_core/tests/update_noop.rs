use recognizer_core::{update, AppState, Msg};

#[test]
fn update_is_noop() {
    let state = AppState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn failed_background_fetches_leave_state_untouched() {
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::HistoryLoadFailed("offline".into()));
    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());

    let (mut next, effects) = update(
        next,
        Msg::DetailLoadFailed {
            video_id: "v1".into(),
            reason: "decode".into(),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());
    assert!(!next.consume_dirty());
}
