//! Board module - manages the peg grid
//!
//! The board is an N x N grid where each cell is a peg, an empty hole, or void.
//! Uses a flat row-major vector; `Board` owns its cells, so cloning always
//! yields an independent copy.
//! Coordinates: (row, col) with (0, 0) at the top-left corner.

use crate::error::MoveError;
use crate::layout::Layout;
use crate::types::{CellStatus, Coord, Direction};

/// A validated jump: `from` lands on `to`, removing the peg at `over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Jump {
    pub from: Coord,
    pub over: Coord,
    pub to: Coord,
}

/// The game board - `size` x `size` cells using flat vector storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: u16,
    /// Row-major cells (row * size + col)
    cells: Vec<CellStatus>,
}

impl Board {
    /// Seed a board from a layout. Void coordinates win over the peg flag.
    pub fn from_layout(layout: &Layout) -> Self {
        let size = layout.size();
        let mut cells = Vec::with_capacity((size as usize) * (size as usize));
        for row in 0..size {
            for col in 0..size {
                let c = Coord::new(row, col);
                cells.push(if layout.is_void(c) {
                    CellStatus::Void
                } else if layout.has_peg(c) {
                    CellStatus::Peg
                } else {
                    CellStatus::Empty
                });
            }
        }
        Self { size, cells }
    }

    /// Calculate flat index from a coordinate
    #[inline(always)]
    fn index(&self, c: Coord) -> Option<usize> {
        if !c.in_bounds(self.size) {
            return None;
        }
        Some((c.row as usize) * (self.size as usize) + (c.col as usize))
    }

    /// Edge length of the board
    pub fn size(&self) -> u16 {
        self.size
    }

    /// Get cell status, `None` when out of bounds
    pub fn get(&self, c: Coord) -> Option<CellStatus> {
        self.index(c).map(|idx| self.cells[idx])
    }

    /// Set a playable cell to `Peg` or `Empty`.
    ///
    /// Returns false if out of bounds, if the cell is void, or if `status` is
    /// `Void`: the board shape is fixed once seeded.
    pub fn set(&mut self, c: Coord, status: CellStatus) -> bool {
        if status == CellStatus::Void {
            return false;
        }
        match self.index(c) {
            Some(idx) if self.cells[idx] != CellStatus::Void => {
                self.cells[idx] = status;
                true
            }
            _ => false,
        }
    }

    pub fn is_peg(&self, c: Coord) -> bool {
        matches!(self.get(c), Some(CellStatus::Peg))
    }

    /// Number of pegs remaining on the board
    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_peg()).count()
    }

    /// Validate a jump without touching the board.
    ///
    /// Checks run in a fixed order and the first failure is reported:
    /// origin, bounds, destination status, geometry, midpoint.
    pub fn check_jump(&self, from: Coord, to: Coord) -> Result<Jump, MoveError> {
        if !self.is_peg(from) {
            return Err(MoveError::NoPegAtOrigin(from));
        }
        match self.get(to) {
            None => return Err(MoveError::OutOfBounds),
            Some(CellStatus::Void) => return Err(MoveError::DestinationVoid(to)),
            Some(CellStatus::Peg) => return Err(MoveError::DestinationOccupied(to)),
            Some(CellStatus::Empty) => {}
        }
        let over = from
            .midpoint_to(to)
            .ok_or(MoveError::NotAJump { from, to })?;
        if !self.is_peg(over) {
            return Err(MoveError::NothingToJump(over));
        }
        Ok(Jump { from, over, to })
    }

    /// Validate and apply a jump. Either all three cells change or none do.
    pub fn try_jump(&mut self, from: Coord, to: Coord) -> Result<Jump, MoveError> {
        let jump = self.check_jump(from, to)?;
        self.apply_checked(jump);
        Ok(jump)
    }

    fn apply_checked(&mut self, jump: Jump) {
        // check_jump already proved all three cells are in bounds and not void.
        self.set(jump.from, CellStatus::Empty);
        self.set(jump.over, CellStatus::Empty);
        self.set(jump.to, CellStatus::Peg);
    }

    /// Legal jumps starting at `from`, in `Direction::ALL` order
    pub fn jumps_from(&self, from: Coord) -> impl Iterator<Item = Jump> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            let to = from.jump(dir)?;
            self.check_jump(from, to).ok()
        })
    }

    /// Every legal jump on the board, row-major by origin
    pub fn legal_jumps(&self) -> Vec<Jump> {
        self.coords()
            .filter(|&c| self.is_peg(c))
            .flat_map(|c| self.jumps_from(c))
            .collect()
    }

    /// True when at least one jump is available
    pub fn has_legal_jump(&self) -> bool {
        self.coords()
            .filter(|&c| self.is_peg(c))
            .any(|c| self.jumps_from(c).next().is_some())
    }

    /// All coordinates, row-major
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let size = self.size;
        (0..size).flat_map(move |row| (0..size).map(move |col| Coord::new(row, col)))
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[CellStatus] {
        &self.cells
    }

    /// Copy statuses into `out`, reusing its allocation
    pub fn write_status_grid(&self, out: &mut Vec<CellStatus>) {
        out.clear();
        out.extend_from_slice(&self.cells);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Preset;

    fn mini() -> Board {
        Board::from_layout(&Preset::Mini.layout())
    }

    #[test]
    fn test_board_index_calculation() {
        let board = mini();
        assert_eq!(board.index(Coord::new(0, 0)), Some(0));
        assert_eq!(board.index(Coord::new(0, 4)), Some(4));
        assert_eq!(board.index(Coord::new(1, 0)), Some(5));
        assert_eq!(board.index(Coord::new(4, 4)), Some(24));
        assert_eq!(board.index(Coord::new(5, 0)), None);
        assert_eq!(board.index(Coord::new(0, 5)), None);
    }

    #[test]
    fn test_set_never_touches_voids() {
        let mut board = Board::from_layout(&Preset::English.layout());
        let corner = Coord::new(0, 0);
        assert!(!board.set(corner, CellStatus::Peg));
        assert!(!board.set(Coord::new(3, 3), CellStatus::Void));
        assert_eq!(board.get(corner), Some(CellStatus::Void));
        assert!(board.set(Coord::new(3, 3), CellStatus::Peg));
        assert_eq!(board.peg_count(), 33);
    }

    #[test]
    fn test_try_jump_is_atomic_on_failure() {
        let mut board = mini();
        let before = board.clone();
        assert_eq!(
            board.try_jump(Coord::new(1, 0), Coord::new(1, 2)),
            Err(MoveError::DestinationOccupied(Coord::new(1, 2)))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = mini();
        let snapshot = board.clone();
        board.try_jump(Coord::new(2, 0), Coord::new(2, 2)).unwrap();
        assert_ne!(board, snapshot);
        assert_eq!(snapshot.get(Coord::new(2, 0)), Some(CellStatus::Peg));
        assert_eq!(board.get(Coord::new(2, 0)), Some(CellStatus::Empty));
    }

    #[test]
    fn test_legal_jumps_on_mini() {
        let board = mini();
        let jumps = board.legal_jumps();
        // Only the four edge midpoints can jump into the centre.
        assert_eq!(jumps.len(), 4);
        assert!(jumps.iter().all(|j| j.to == Coord::new(2, 2)));
        assert_eq!(jumps[0].from, Coord::new(0, 2));
        assert_eq!(jumps[0].over, Coord::new(1, 2));
        assert!(board.has_legal_jump());
    }
}
