//! Board cursor: the highlighted cell a keyboard tap lands on.

use crate::map::InputAction;
use crate::types::{Coord, GameAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Coord,
    size: u16,
}

impl Cursor {
    /// Cursor centred on a `size` x `size` board.
    pub fn centered(size: u16) -> Self {
        let mid = size / 2;
        Self {
            pos: Coord::new(mid, mid),
            size,
        }
    }

    pub fn position(&self) -> Coord {
        self.pos
    }

    /// Re-fit to a board of a new size, keeping the position when it still fits.
    pub fn resize(&mut self, size: u16) {
        if !self.pos.in_bounds(size) {
            *self = Self::centered(size);
        } else {
            self.size = size;
        }
    }

    /// Move to `pos` if it lies on the board.
    pub fn set_position(&mut self, pos: Coord) -> bool {
        if !pos.in_bounds(self.size) {
            return false;
        }
        self.pos = pos;
        true
    }

    /// Resolve an input action. Cursor moves are consumed here (clamped to the
    /// board edge); everything else becomes a game action.
    pub fn to_game_action(&mut self, action: InputAction) -> Option<GameAction> {
        match action {
            InputAction::Cursor(dir) => {
                if let Some(next) = self.pos.step(dir) {
                    self.set_position(next);
                }
                None
            }
            InputAction::Swipe(dir) => Some(GameAction::Swipe(dir)),
            InputAction::Tap => Some(GameAction::Tap(self.pos)),
            InputAction::Restart => Some(GameAction::Restart),
        }
    }
}
