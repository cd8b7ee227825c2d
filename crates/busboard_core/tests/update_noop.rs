use busboard_core::{update, BoardConfig, BoardState, Msg};

#[test]
fn update_is_noop() {
    let state = BoardState::new(BoardConfig::default());
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}
