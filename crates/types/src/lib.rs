//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (rules engine, terminal rendering, remote protocol).
//!
//! # Coordinates
//!
//! Boards are square. A cell is addressed by a structured [`Coord`] pair
//! `(row, col)` where row 0 is the top and col 0 is the left edge. Coordinates
//! are never encoded as concatenated digit strings, so `(1, 23)` and `(12, 3)`
//! stay distinct on boards wider than ten cells.
//!
//! # Jumps
//!
//! A jump moves a peg exactly [`JUMP_DISTANCE`] cells along one axis:
//!
//! | Direction | Row offset | Col offset |
//! |-----------|------------|------------|
//! | `Up`      | -2         | 0          |
//! | `Down`    | +2         | 0          |
//! | `Left`    | 0          | -2         |
//! | `Right`   | 0          | +2         |
//!
//! # Examples
//!
//! ```
//! use peg_solitaire_types::{Coord, Direction};
//!
//! let origin = Coord::new(3, 1);
//! assert_eq!(origin.jump(Direction::Right), Some(Coord::new(3, 3)));
//! assert_eq!(origin.jump(Direction::Left), None);
//! assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
//! ```

/// Largest supported board edge length.
pub const MAX_BOARD_SIZE: u16 = 32;

/// Distance (in cells) between the origin and destination of a jump.
pub const JUMP_DISTANCE: u16 = 2;

/// Remaining peg count at or below which the puzzle counts as solved.
pub const WIN_PEG_COUNT: usize = 1;

/// A board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: u16,
    pub col: u16,
}

impl Coord {
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Offset by a signed delta. Returns `None` on underflow/overflow.
    pub fn offset(self, d_row: i16, d_col: i16) -> Option<Self> {
        Some(Self {
            row: self.row.checked_add_signed(d_row)?,
            col: self.col.checked_add_signed(d_col)?,
        })
    }

    /// One cell in `dir`.
    pub fn step(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        self.offset(dr, dc)
    }

    /// Jump destination in `dir` (two cells away).
    pub fn jump(self, dir: Direction) -> Option<Self> {
        let (dr, dc) = dir.delta();
        let d = JUMP_DISTANCE as i16;
        self.offset(dr * d, dc * d)
    }

    /// True when the coordinate lies inside an `size` x `size` board.
    #[inline]
    pub fn in_bounds(self, size: u16) -> bool {
        self.row < size && self.col < size
    }

    /// True when `self` and `other` share a row or a column.
    #[inline]
    pub fn in_line_with(self, other: Coord) -> bool {
        self.row == other.row || self.col == other.col
    }

    /// Cell between `self` and `dest` when the pair forms a jump, otherwise `None`.
    pub fn midpoint_to(self, dest: Coord) -> Option<Coord> {
        let d_row = self.row.abs_diff(dest.row);
        let d_col = self.col.abs_diff(dest.col);
        let is_jump =
            (d_row == JUMP_DISTANCE && d_col == 0) || (d_row == 0 && d_col == JUMP_DISTANCE);
        if !is_jump {
            return None;
        }
        Some(Coord {
            row: self.row.min(dest.row) + d_row / 2,
            col: self.col.min(dest.col) + d_col / 2,
        })
    }
}

impl From<(u16, u16)> for Coord {
    fn from((row, col): (u16, u16)) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Status of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    Peg,
    Empty,
    /// Not part of the board shape. Never changes after construction.
    Void,
}

impl CellStatus {
    /// Stable wire encoding: 0 = empty, 1 = peg, 2 = void.
    pub fn as_u8(self) -> u8 {
        match self {
            CellStatus::Empty => 0,
            CellStatus::Peg => 1,
            CellStatus::Void => 2,
        }
    }

    pub fn is_peg(self) -> bool {
        self == CellStatus::Peg
    }
}

/// Jump / swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit (row, col) delta.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Parse direction from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "u" | "north" => Some(Direction::Up),
            "down" | "d" | "south" => Some(Direction::Down),
            "left" | "l" | "west" => Some(Direction::Left),
            "right" | "r" | "east" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Player intent as reduced by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Tap on a cell: toggles selection on a peg, attempts a jump onto an empty cell.
    Tap(Coord),
    /// Swipe relative to the current selection.
    Swipe(Direction),
    Restart,
}

/// How a move attempt was initiated. Decides what happens to the selection
/// after a successful jump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveForm {
    /// Swipe from the selected peg; the landed peg stays selected.
    Direction,
    /// Direct tap on the destination; the selection is cleared.
    Target,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coord_offset_checks_bounds() {
        let c = Coord::new(0, 0);
        assert_eq!(c.offset(-1, 0), None);
        assert_eq!(c.offset(0, -1), None);
        assert_eq!(c.offset(1, 2), Some(Coord::new(1, 2)));
        assert_eq!(Coord::new(u16::MAX, 0).offset(1, 0), None);
    }

    #[test]
    fn test_jump_targets() {
        let c = Coord::new(3, 3);
        assert_eq!(c.jump(Direction::Up), Some(Coord::new(1, 3)));
        assert_eq!(c.jump(Direction::Down), Some(Coord::new(5, 3)));
        assert_eq!(c.jump(Direction::Left), Some(Coord::new(3, 1)));
        assert_eq!(c.jump(Direction::Right), Some(Coord::new(3, 5)));
        assert_eq!(Coord::new(1, 1).jump(Direction::Up), None);
    }

    #[test]
    fn test_midpoint_only_for_straight_two_cell_pairs() {
        let o = Coord::new(2, 2);
        assert_eq!(o.midpoint_to(Coord::new(2, 4)), Some(Coord::new(2, 3)));
        assert_eq!(o.midpoint_to(Coord::new(0, 2)), Some(Coord::new(1, 2)));
        assert_eq!(o.midpoint_to(Coord::new(2, 3)), None);
        assert_eq!(o.midpoint_to(Coord::new(4, 4)), None);
        assert_eq!(o.midpoint_to(Coord::new(2, 5)), None);
        assert_eq!(o.midpoint_to(o), None);
    }

    #[test]
    fn test_coords_with_two_digit_indices_are_distinct() {
        assert_ne!(Coord::new(1, 23), Coord::new(12, 3));
    }

    #[test]
    fn test_cell_status_wire_encoding() {
        assert_eq!(CellStatus::Empty.as_u8(), 0);
        assert_eq!(CellStatus::Peg.as_u8(), 1);
        assert_eq!(CellStatus::Void.as_u8(), 2);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(Direction::from_str("Left"), Some(Direction::Left));
        assert_eq!(Direction::from_str("east"), Some(Direction::Right));
        assert_eq!(Direction::from_str("sideways"), None);
        for d in Direction::ALL {
            assert_eq!(Direction::from_str(d.as_str()), Some(d));
        }
    }
}
