//! Game state module - the board engine
//!
//! `PegGame` owns the board, the current selection and the layout it was seeded
//! from. Every operation runs to completion synchronously; callers feed it
//! taps/swipes and re-render from [`PegGame::snapshot`].
//!
//! The engine never notifies anyone directly. A successful jump queues a
//! [`GameEvent`]; the transition into the winning state queues
//! [`GameEvent::Won`] exactly once per episode. Presenters drain the queue
//! with [`PegGame::take_events`].

use crate::board::{Board, Jump};
use crate::error::{LayoutError, MoveError};
use crate::layout::Layout;
use crate::snapshot::GameSnapshot;
use crate::types::{CellStatus, Coord, Direction, GameAction, MoveForm, WIN_PEG_COUNT};

/// Something observers may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Jumped(Jump),
    /// Peg count dropped to `WIN_PEG_COUNT` or below.
    Won { pegs_left: usize },
}

/// Result of [`PegGame::apply_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Selection after a tap on a peg.
    Selection(Option<Coord>),
    Moved(Jump),
    Rejected(MoveError),
    Restarted,
    /// Tap on a void or off-board cell.
    Ignored,
}

impl ActionOutcome {
    /// True when a jump was applied.
    pub fn moved(&self) -> bool {
        matches!(self, ActionOutcome::Moved(_))
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct PegGame {
    board: Board,
    /// Layout used by the next argument-less reset.
    layout: Layout,
    selection: Option<Coord>,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Successful jumps in the current episode.
    moves: u32,
    /// Latched once the win event has been queued for this episode.
    won: bool,
    events: Vec<GameEvent>,
}

impl PegGame {
    /// Seed a new game from a validated layout
    pub fn new(layout: Layout) -> Self {
        Self {
            board: Board::from_layout(&layout),
            layout,
            selection: None,
            episode_id: 0,
            moves: 0,
            won: false,
            events: Vec::new(),
        }
    }

    /// Build from raw rows (`true` = peg) and void coordinates.
    pub fn from_rows(
        size: u16,
        rows: Vec<Vec<bool>>,
        voids: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, LayoutError> {
        Ok(Self::new(Layout::new(size, rows, voids)?))
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn size(&self) -> u16 {
        self.board.size()
    }

    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn peg_count(&self) -> usize {
        self.board.peg_count()
    }

    pub fn cell(&self, c: Coord) -> Option<CellStatus> {
        self.board.get(c)
    }

    /// Toggle the selection.
    ///
    /// Only pegs can be selected. A peg sharing a row or column with the current
    /// selection clears it (including the selected peg itself); any other peg
    /// becomes the new selection.
    pub fn select_or_deselect(&mut self, coord: Coord) -> Option<Coord> {
        if !self.board.is_peg(coord) {
            return self.selection;
        }
        self.selection = match self.selection {
            Some(current) if current.in_line_with(coord) => None,
            _ => Some(coord),
        };
        self.selection
    }

    /// Jump the selected peg two cells in `dir`. The landed peg stays selected.
    pub fn move_selected(&mut self, dir: Direction) -> Result<Jump, MoveError> {
        let Some(origin) = self.selection else {
            return Err(MoveError::NoSelection);
        };
        match origin.jump(dir) {
            Some(target) => self.attempt_move(target, MoveForm::Direction),
            None => {
                self.selection = None;
                Err(MoveError::OutOfBounds)
            }
        }
    }

    /// Jump the selected peg onto `target`. Clears the selection.
    pub fn move_to(&mut self, target: Coord) -> Result<Jump, MoveError> {
        self.attempt_move(target, MoveForm::Target)
    }

    /// Validate and apply a jump from the selection to `target`.
    ///
    /// Rejections leave every cell untouched and clear the selection.
    pub fn attempt_move(&mut self, target: Coord, form: MoveForm) -> Result<Jump, MoveError> {
        let Some(origin) = self.selection else {
            return Err(MoveError::NoSelection);
        };

        match self.board.try_jump(origin, target) {
            Ok(jump) => {
                self.moves = self.moves.wrapping_add(1);
                self.selection = match form {
                    MoveForm::Direction => Some(jump.to),
                    MoveForm::Target => None,
                };
                self.events.push(GameEvent::Jumped(jump));
                self.latch_win();
                Ok(jump)
            }
            Err(e) => {
                self.selection = None;
                Err(e)
            }
        }
    }

    fn latch_win(&mut self) {
        if self.won || !self.check_win() {
            return;
        }
        self.won = true;
        self.events.push(GameEvent::Won {
            pegs_left: self.board.peg_count(),
        });
    }

    /// Apply a gesture reduced by the presentation layer.
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        match action {
            GameAction::Tap(coord) => match self.board.get(coord) {
                Some(CellStatus::Peg) => ActionOutcome::Selection(self.select_or_deselect(coord)),
                Some(CellStatus::Empty) => match self.move_to(coord) {
                    Ok(jump) => ActionOutcome::Moved(jump),
                    Err(e) => ActionOutcome::Rejected(e),
                },
                Some(CellStatus::Void) | None => ActionOutcome::Ignored,
            },
            GameAction::Swipe(dir) => match self.move_selected(dir) {
                Ok(jump) => ActionOutcome::Moved(jump),
                Err(e) => ActionOutcome::Rejected(e),
            },
            GameAction::Restart => {
                self.reset(None);
                ActionOutcome::Restarted
            }
        }
    }

    /// Pure read: true when at most one peg remains.
    pub fn check_win(&self) -> bool {
        self.board.peg_count() <= WIN_PEG_COUNT
    }

    pub fn is_won(&self) -> bool {
        self.check_win()
    }

    /// True when the game is not won and no jump is possible.
    pub fn is_stuck(&self) -> bool {
        !self.check_win() && !self.board.has_legal_jump()
    }

    pub fn legal_jumps(&self) -> Vec<Jump> {
        self.board.legal_jumps()
    }

    /// Re-seed the board from `layout`, or from the stored layout when `None`.
    ///
    /// A supplied layout replaces the stored one for later resets.
    pub fn reset(&mut self, layout: Option<Layout>) {
        if let Some(layout) = layout {
            self.layout = layout;
        }
        self.board = Board::from_layout(&self.layout);
        self.selection = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.moves = 0;
        self.won = false;
        self.events.clear();
    }

    /// Drain queued events (oldest first).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_pending_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_status_grid(&mut out.cells);
        out.size = self.board.size();
        out.selection = self.selection;
        out.pegs = self.board.peg_count();
        out.won = self.check_win();
        out.stuck = self.is_stuck();
        out.episode_id = self.episode_id;
        out.moves = self.moves;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Preset;

    fn english() -> PegGame {
        PegGame::new(Preset::English.layout())
    }

    #[test]
    fn test_select_ignores_non_pegs() {
        let mut game = english();
        assert_eq!(game.select_or_deselect(Coord::new(3, 3)), None);
        assert_eq!(game.select_or_deselect(Coord::new(0, 0)), None);
        assert_eq!(game.select_or_deselect(Coord::new(40, 2)), None);
    }

    #[test]
    fn test_select_toggle_is_row_column_relative() {
        let mut game = english();
        let a = Coord::new(3, 1);
        let b = Coord::new(2, 3);
        assert_eq!(game.select_or_deselect(a), Some(a));
        // Same row, different peg: clears instead of moving the selection.
        assert_eq!(game.select_or_deselect(Coord::new(3, 5)), None);
        assert_eq!(game.select_or_deselect(a), Some(a));
        // Different row and column: moves the selection.
        assert_eq!(game.select_or_deselect(b), Some(b));
        // Re-tapping the selected peg clears it.
        assert_eq!(game.select_or_deselect(b), None);
    }

    #[test]
    fn test_opening_swipe_keeps_landed_peg_selected() {
        let mut game = english();
        game.select_or_deselect(Coord::new(3, 1));
        let jump = game.move_selected(Direction::Right).unwrap();
        assert_eq!(jump.over, Coord::new(3, 2));
        assert_eq!(game.selection(), Some(Coord::new(3, 3)));
        assert_eq!(game.peg_count(), 31);
        assert_eq!(game.moves(), 1);
    }

    #[test]
    fn test_target_move_clears_selection() {
        let mut game = english();
        game.select_or_deselect(Coord::new(1, 3));
        game.move_to(Coord::new(3, 3)).unwrap();
        assert_eq!(game.selection(), None);
        assert_eq!(game.cell(Coord::new(2, 3)), Some(CellStatus::Empty));
    }

    #[test]
    fn test_rejected_move_clears_selection_only() {
        let mut game = english();
        let before = game.board().clone();
        game.select_or_deselect(Coord::new(2, 3));
        assert_eq!(
            game.move_selected(Direction::Up),
            Err(MoveError::DestinationOccupied(Coord::new(0, 3)))
        );
        assert_eq!(game.selection(), None);
        assert_eq!(game.moves(), 0);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn test_swipe_off_the_board_is_out_of_bounds() {
        let mut game = english();
        game.select_or_deselect(Coord::new(0, 3));
        assert_eq!(
            game.move_selected(Direction::Up),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(game.selection(), None);
    }

    #[test]
    fn test_won_event_fires_once_per_episode() {
        let rows = vec![vec![true, true, false], vec![false; 3], vec![false; 3]];
        let mut game = PegGame::from_rows(3, rows, []).unwrap();
        game.select_or_deselect(Coord::new(0, 0));
        game.move_selected(Direction::Right).unwrap();
        assert!(game.is_won());
        let events = game.take_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], GameEvent::Won { pegs_left: 1 });
        assert!(game.take_events().is_empty());

        game.reset(None);
        assert!(!game.is_won());
        assert_eq!(game.episode_id(), 1);
        game.select_or_deselect(Coord::new(0, 0));
        game.move_selected(Direction::Right).unwrap();
        let events = game.take_events();
        assert!(events.contains(&GameEvent::Won { pegs_left: 1 }));
    }

    #[test]
    fn test_moved_only_for_applied_jumps() {
        let mut game = english();
        let outcome = game.apply_action(GameAction::Tap(Coord::new(3, 1)));
        assert!(!outcome.moved());
        let outcome = game.apply_action(GameAction::Tap(Coord::new(3, 5)));
        assert!(!outcome.moved());

        game.select_or_deselect(Coord::new(3, 1));
        let outcome = game.apply_action(GameAction::Tap(Coord::new(3, 3)));
        assert!(outcome.moved());
        assert!(!ActionOutcome::Restarted.moved());
    }

    #[test]
    fn test_reset_with_new_layout_becomes_default() {
        let mut game = english();
        game.reset(Some(Preset::Mini.layout()));
        assert_eq!(game.size(), 5);
        game.select_or_deselect(Coord::new(0, 2));
        game.move_selected(Direction::Down).unwrap();

        let outcome = game.apply_action(GameAction::Restart);
        assert_eq!(outcome, ActionOutcome::Restarted);
        let mini = Board::from_layout(&Preset::Mini.layout());
        assert_eq!(game.size(), 5);
        assert_eq!(game.peg_count(), 20);
        assert_eq!(game.board().cells(), mini.cells());
        for corner in [(0, 0), (0, 4), (4, 0), (4, 4)] {
            assert_eq!(game.cell(corner.into()), Some(CellStatus::Void));
        }
    }

    #[test]
    fn test_board_mut_cannot_create_voids() {
        let mut game = english();
        assert!(!game.board_mut().set(Coord::new(3, 3), CellStatus::Void));
    }
}
