use peg_solitaire::core::{ActionOutcome, GameEvent, Layout, MoveError, PegGame, Preset};
use peg_solitaire::types::{CellStatus, Coord, Direction, GameAction};

const T: bool = true;
const F: bool = false;

/// 3x3, every cell a peg except the centre.
fn ring() -> PegGame {
    PegGame::from_rows(3, vec![vec![T, T, T], vec![T, F, T], vec![T, T, T]], []).unwrap()
}

/// 3x3, every cell a peg except the middle of the right column.
fn notch() -> PegGame {
    PegGame::from_rows(3, vec![vec![T, T, T], vec![T, T, F], vec![T, T, T]], []).unwrap()
}

fn cells(game: &PegGame) -> Vec<CellStatus> {
    game.board().cells().to_vec()
}

#[test]
fn swipe_right_across_the_middle_row() {
    let mut game = notch();
    assert_eq!(game.peg_count(), 8);

    assert_eq!(
        game.select_or_deselect(Coord::new(1, 0)),
        Some(Coord::new(1, 0))
    );
    let before = cells(&game);
    let jump = game.move_selected(Direction::Right).unwrap();

    assert_eq!(jump.over, Coord::new(1, 1));
    assert_eq!(game.cell(Coord::new(1, 0)), Some(CellStatus::Empty));
    assert_eq!(game.cell(Coord::new(1, 1)), Some(CellStatus::Empty));
    assert_eq!(game.cell(Coord::new(1, 2)), Some(CellStatus::Peg));
    assert_eq!(game.peg_count(), 7);
    assert!(!game.check_win());

    // Nothing outside the three jump cells moved.
    let after = cells(&game);
    let changed: Vec<usize> = (0..9).filter(|&i| before[i] != after[i]).collect();
    assert_eq!(changed, vec![3, 4, 5]);
}

#[test]
fn swipe_over_an_empty_centre_into_a_peg_is_rejected() {
    let mut game = ring();
    game.select_or_deselect(Coord::new(1, 0));
    let before = cells(&game);

    assert_eq!(
        game.move_selected(Direction::Right),
        Err(MoveError::DestinationOccupied(Coord::new(1, 2)))
    );
    assert_eq!(cells(&game), before);
    assert_eq!(game.peg_count(), 8);
    assert_eq!(game.selection(), None);
}

#[test]
fn destination_one_cell_away_is_rejected() {
    let mut game = ring();
    game.select_or_deselect(Coord::new(1, 0));
    let before = cells(&game);

    assert!(matches!(
        game.move_to(Coord::new(1, 1)),
        Err(MoveError::NotAJump { .. })
    ));
    assert_eq!(cells(&game), before);
    assert_eq!(game.moves(), 0);
}

#[test]
fn rejection_reasons_follow_check_order() {
    let mut game = PegGame::from_rows(
        4,
        vec![
            vec![T, T, F, F],
            vec![F, F, F, F],
            vec![T, F, T, F],
            vec![F, F, F, F],
        ],
        [Coord::new(3, 3)],
    )
    .unwrap();

    assert_eq!(game.move_to(Coord::new(0, 2)), Err(MoveError::NoSelection));

    game.select_or_deselect(Coord::new(2, 2));
    assert_eq!(
        game.move_selected(Direction::Down),
        Err(MoveError::OutOfBounds)
    );

    game.select_or_deselect(Coord::new(2, 2));
    assert_eq!(
        game.move_to(Coord::new(3, 3)),
        Err(MoveError::DestinationVoid(Coord::new(3, 3)))
    );

    game.select_or_deselect(Coord::new(2, 2));
    assert_eq!(
        game.move_to(Coord::new(2, 0)),
        Err(MoveError::DestinationOccupied(Coord::new(2, 0)))
    );

    game.select_or_deselect(Coord::new(2, 2));
    assert!(matches!(
        game.move_to(Coord::new(0, 3)),
        Err(MoveError::NotAJump { .. })
    ));

    game.select_or_deselect(Coord::new(2, 2));
    assert_eq!(
        game.move_to(Coord::new(0, 2)),
        Err(MoveError::NothingToJump(Coord::new(1, 2)))
    );

    assert_eq!(game.peg_count(), 4);
}

#[test]
fn last_jump_wins_and_emits_once() {
    let rows = vec![vec![T, T, F], vec![F, F, F], vec![F, F, F]];
    let mut game = PegGame::from_rows(3, rows, []).unwrap();
    assert!(!game.check_win());

    game.select_or_deselect(Coord::new(0, 0));
    game.move_selected(Direction::Right).unwrap();
    assert!(game.check_win());
    assert_eq!(game.peg_count(), 1);

    let events = game.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], GameEvent::Jumped(_)));
    assert_eq!(events[1], GameEvent::Won { pegs_left: 1 });
    assert!(!game.has_pending_events());
}

#[test]
fn void_never_changes_selection() {
    let mut game = PegGame::from_rows(
        3,
        vec![vec![T, T, T], vec![T, F, T], vec![T, T, T]],
        [Coord::new(0, 0), Coord::new(2, 2)],
    )
    .unwrap();

    assert_eq!(game.select_or_deselect(Coord::new(0, 0)), None);

    game.select_or_deselect(Coord::new(1, 2));
    assert_eq!(
        game.select_or_deselect(Coord::new(2, 2)),
        Some(Coord::new(1, 2))
    );
    assert_eq!(
        game.apply_action(GameAction::Tap(Coord::new(0, 0))),
        ActionOutcome::Ignored
    );
    assert_eq!(game.selection(), Some(Coord::new(1, 2)));
}

#[test]
fn selection_toggle_clears_on_shared_row_or_column() {
    let mut game = ring();
    game.select_or_deselect(Coord::new(0, 0));

    // Same row: clears instead of re-selecting.
    assert_eq!(game.select_or_deselect(Coord::new(0, 2)), None);

    game.select_or_deselect(Coord::new(0, 0));
    // Different row and column: moves the selection.
    assert_eq!(
        game.select_or_deselect(Coord::new(2, 1)),
        Some(Coord::new(2, 1))
    );
    // Same cell: clears.
    assert_eq!(game.select_or_deselect(Coord::new(2, 1)), None);
}

#[test]
fn reset_restores_layout_and_voids() {
    let layout = Layout::new(
        3,
        vec![vec![T, T, T], vec![T, T, F], vec![T, T, T]],
        [Coord::new(2, 2)],
    )
    .unwrap();
    let mut game = PegGame::new(layout.clone());
    let initial = cells(&game);
    assert_eq!(game.cell(Coord::new(2, 2)), Some(CellStatus::Void));

    game.select_or_deselect(Coord::new(1, 0));
    game.move_selected(Direction::Right).unwrap();
    assert_ne!(cells(&game), initial);

    game.reset(None);
    assert_eq!(cells(&game), initial);
    assert_eq!(game.selection(), None);
    assert_eq!(game.episode_id(), 1);
    assert_eq!(game.layout(), &layout);
}

#[test]
fn tap_plays_a_full_opening_on_the_english_board() {
    let mut game = PegGame::new(Preset::English.layout());

    assert_eq!(
        game.apply_action(GameAction::Tap(Coord::new(1, 3))),
        ActionOutcome::Selection(Some(Coord::new(1, 3)))
    );
    let outcome = game.apply_action(GameAction::Tap(Coord::new(3, 3)));
    assert!(outcome.moved());
    assert_eq!(game.selection(), None);
    assert_eq!(game.peg_count(), 31);
    assert_eq!(game.cell(Coord::new(2, 3)), Some(CellStatus::Empty));

    // Tapping an empty hole with nothing selected is a rejected move.
    assert_eq!(
        game.apply_action(GameAction::Tap(Coord::new(1, 3))),
        ActionOutcome::Rejected(MoveError::NoSelection)
    );

    let outcome = game.apply_action(GameAction::Restart);
    assert_eq!(outcome, ActionOutcome::Restarted);
    assert_eq!(game.peg_count(), 32);
    assert_eq!(game.moves(), 0);
}

#[test]
fn stuck_when_no_jumps_remain() {
    let rows = vec![vec![T, F, T], vec![F, F, F], vec![T, F, F]];
    let game = PegGame::from_rows(3, rows, []).unwrap();
    assert!(game.legal_jumps().is_empty());
    assert!(game.snapshot().stuck);
    assert!(!game.is_won());
}
