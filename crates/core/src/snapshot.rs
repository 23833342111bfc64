//! Read-only snapshot of a game, for views and the remote adapter.

use crate::types::{CellStatus, Coord};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSnapshot {
    pub size: u16,
    /// Row-major statuses (row * size + col)
    pub cells: Vec<CellStatus>,
    pub selection: Option<Coord>,
    pub pegs: usize,
    pub won: bool,
    /// Not won and no legal jump left.
    pub stuck: bool,
    pub episode_id: u32,
    pub moves: u32,
}

impl GameSnapshot {
    pub fn get(&self, c: Coord) -> Option<CellStatus> {
        if !c.in_bounds(self.size) {
            return None;
        }
        self.cells
            .get((c.row as usize) * (self.size as usize) + c.col as usize)
            .copied()
    }

    /// Rows as status slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[CellStatus]> {
        self.cells.chunks(self.size.max(1) as usize)
    }
}
