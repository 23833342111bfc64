//! Structured error types for the rules engine.

use crate::types::Coord;

/// Why a move attempt was rejected. A rejected move never changes any cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("no peg is selected")]
    NoSelection,

    #[error("no peg at origin {0}")]
    NoPegAtOrigin(Coord),

    #[error("destination is outside the board")]
    OutOfBounds,

    #[error("destination {0} is not part of the board")]
    DestinationVoid(Coord),

    #[error("destination {0} already holds a peg")]
    DestinationOccupied(Coord),

    #[error("{from} to {to} is not a two-cell straight jump")]
    NotAJump { from: Coord, to: Coord },

    #[error("no peg to jump over at {0}")]
    NothingToJump(Coord),
}

impl MoveError {
    /// Stable snake_case reason used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::NoSelection => "no_selection",
            MoveError::NoPegAtOrigin(_) => "no_peg_at_origin",
            MoveError::OutOfBounds => "out_of_bounds",
            MoveError::DestinationVoid(_) => "destination_void",
            MoveError::DestinationOccupied(_) => "destination_occupied",
            MoveError::NotAJump { .. } => "not_a_jump",
            MoveError::NothingToJump(_) => "nothing_to_jump",
        }
    }
}

/// Construction-time layout problems. Surfaced immediately, never tolerated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("layout is empty")]
    Empty,

    #[error("board size {size} is outside 1..={max}")]
    InvalidSize { size: usize, max: u16 },

    #[error("layout has {rows} rows, expected {expected}")]
    RowCount { rows: usize, expected: u16 },

    #[error("layout row {row} has {len} cells, expected {expected}")]
    RowLength {
        row: usize,
        len: usize,
        expected: u16,
    },

    #[error("void cell {coord} is outside a {size}x{size} board")]
    VoidOutOfBounds { coord: Coord, size: u16 },

    #[error("unknown layout symbol {symbol:?} at row {row}, col {col}")]
    UnknownSymbol {
        row: usize,
        col: usize,
        symbol: char,
    },

    #[error("unknown preset {0:?} (expected english, european or mini)")]
    UnknownPreset(String),
}
