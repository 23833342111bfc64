//! Layout module - validated initial board descriptions
//!
//! A [`Layout`] is what a board is seeded from: an N x N peg/empty assignment
//! plus the set of void coordinates that shape the board. Layouts are validated
//! once, at construction, so the engine never has to re-check dimensions.
//!
//! Text format (one line per row):
//!
//! ```text
//! xxoooxx      o / O / ●  peg
//! xxoooxx      . / ○      empty hole
//! ooooooo      x / X / #  void (not part of the board)
//! ooo.ooo
//! ooooooo
//! xxoooxx
//! xxoooxx
//! ```

use std::collections::BTreeSet;

use crate::error::LayoutError;
use crate::types::{Coord, MAX_BOARD_SIZE};

const ENGLISH: &str = "\
xxoooxx
xxoooxx
ooooooo
ooo.ooo
ooooooo
xxoooxx
xxoooxx";

const EUROPEAN: &str = "\
xxoooxx
xooooox
ooooooo
ooo.ooo
ooooooo
xooooox
xxoooxx";

const MINI: &str = "\
xooox
ooooo
oo.oo
ooooo
xooox";

/// Validated initial layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    size: u16,
    /// Row-major peg presence; void coordinates are kept but ignored.
    pegs: Vec<bool>,
    voids: BTreeSet<Coord>,
}

impl Layout {
    /// Build a layout from boolean rows (`true` = peg) and a void set.
    ///
    /// `rows` must be exactly `size` rows of `size` cells and every void must
    /// lie on the board.
    pub fn new(
        size: u16,
        rows: Vec<Vec<bool>>,
        voids: impl IntoIterator<Item = Coord>,
    ) -> Result<Self, LayoutError> {
        if size == 0 || size > MAX_BOARD_SIZE {
            return Err(LayoutError::InvalidSize {
                size: size as usize,
                max: MAX_BOARD_SIZE,
            });
        }
        if rows.len() != size as usize {
            return Err(LayoutError::RowCount {
                rows: rows.len(),
                expected: size,
            });
        }

        let mut pegs = Vec::with_capacity((size as usize) * (size as usize));
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != size as usize {
                return Err(LayoutError::RowLength {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            pegs.extend_from_slice(cells);
        }

        let mut void_set = BTreeSet::new();
        for coord in voids {
            if !coord.in_bounds(size) {
                return Err(LayoutError::VoidOutOfBounds { coord, size });
            }
            void_set.insert(coord);
        }

        Ok(Self {
            size,
            pegs,
            voids: void_set,
        })
    }

    /// Parse the text format described in the module docs.
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let start = lines.iter().position(|l| !l.is_empty());
        let end = lines.iter().rposition(|l| !l.is_empty());
        let (Some(start), Some(end)) = (start, end) else {
            return Err(LayoutError::Empty);
        };
        let lines = &lines[start..=end];

        if lines.len() > MAX_BOARD_SIZE as usize {
            return Err(LayoutError::InvalidSize {
                size: lines.len(),
                max: MAX_BOARD_SIZE,
            });
        }
        let size = lines.len() as u16;

        let mut rows = Vec::with_capacity(lines.len());
        let mut voids = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let mut cells = Vec::with_capacity(line.len());
            for (col, symbol) in line.chars().enumerate() {
                match symbol {
                    'o' | 'O' | '●' => cells.push(true),
                    '.' | '○' => cells.push(false),
                    'x' | 'X' | '#' => {
                        cells.push(false);
                        voids.push(Coord::new(row as u16, col as u16));
                    }
                    _ => return Err(LayoutError::UnknownSymbol { row, col, symbol }),
                }
            }
            rows.push(cells);
        }

        Self::new(size, rows, voids)
    }

    /// Render back into the text format (`o`, `.`, `x`).
    pub fn to_text(&self) -> String {
        let n = self.size as usize;
        let mut out = String::with_capacity(n * (n + 1));
        for row in 0..self.size {
            for col in 0..self.size {
                let c = Coord::new(row, col);
                out.push(if self.is_void(c) {
                    'x'
                } else if self.has_peg(c) {
                    'o'
                } else {
                    '.'
                });
            }
            if (row as usize) + 1 < n {
                out.push('\n');
            }
        }
        out
    }

    pub fn size(&self) -> u16 {
        self.size
    }

    pub fn is_void(&self, coord: Coord) -> bool {
        self.voids.contains(&coord)
    }

    /// Peg presence in the raw layout. Void coordinates always report `false`.
    pub fn has_peg(&self, coord: Coord) -> bool {
        if !coord.in_bounds(self.size) || self.is_void(coord) {
            return false;
        }
        self.pegs[(coord.row as usize) * (self.size as usize) + coord.col as usize]
    }

    pub fn voids(&self) -> impl Iterator<Item = Coord> + '_ {
        self.voids.iter().copied()
    }

    /// Pegs a board seeded from this layout starts with.
    pub fn peg_count(&self) -> usize {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| Coord::new(row, col)))
            .filter(|&c| self.has_peg(c))
            .count()
    }
}

/// Bundled board shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// 33-hole cross, centre empty.
    English,
    /// 37-hole French board, centre empty.
    European,
    /// 21-hole 5x5 cross, centre empty.
    Mini,
}

impl Preset {
    /// Parse preset from string (case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "english" | "british" => Some(Preset::English),
            "european" | "french" => Some(Preset::European),
            "mini" => Some(Preset::Mini),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::English => "english",
            Preset::European => "european",
            Preset::Mini => "mini",
        }
    }

    pub fn layout(self) -> Layout {
        let text = match self {
            Preset::English => ENGLISH,
            Preset::European => EUROPEAN,
            Preset::Mini => MINI,
        };
        Layout::parse(text).expect("bundled presets are well-formed")
    }
}

impl std::str::FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolve a preset name into a layout.
pub fn preset_layout(name: &str) -> Result<Layout, LayoutError> {
    Preset::from_str(name)
        .map(Preset::layout)
        .ok_or_else(|| LayoutError::UnknownPreset(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_peg_counts() {
        assert_eq!(Preset::English.layout().peg_count(), 32);
        assert_eq!(Preset::European.layout().peg_count(), 36);
        assert_eq!(Preset::Mini.layout().peg_count(), 20);
    }

    #[test]
    fn test_english_shape() {
        let layout = Preset::English.layout();
        assert_eq!(layout.size(), 7);
        assert_eq!(layout.voids().count(), 16);
        assert!(layout.is_void(Coord::new(0, 0)));
        assert!(!layout.is_void(Coord::new(0, 2)));
        assert!(!layout.has_peg(Coord::new(3, 3)));
    }

    #[test]
    fn test_void_overrides_peg_flag() {
        let rows = vec![vec![true, true], vec![true, true]];
        let layout = Layout::new(2, rows, [Coord::new(0, 1)]).unwrap();
        assert!(!layout.has_peg(Coord::new(0, 1)));
        assert_eq!(layout.peg_count(), 3);
    }

    #[test]
    fn test_new_rejects_mismatched_rows() {
        assert_eq!(
            Layout::new(3, vec![vec![true; 3]; 2], []),
            Err(LayoutError::RowCount {
                rows: 2,
                expected: 3
            })
        );
        assert_eq!(
            Layout::new(2, vec![vec![true; 2], vec![true; 3]], []),
            Err(LayoutError::RowLength {
                row: 1,
                len: 3,
                expected: 2
            })
        );
    }

    #[test]
    fn test_new_rejects_out_of_bounds_void() {
        let err = Layout::new(3, vec![vec![true; 3]; 3], [Coord::new(0, 3)]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::VoidOutOfBounds {
                coord: Coord::new(0, 3),
                size: 3
            }
        );
    }

    #[test]
    fn test_new_rejects_zero_and_oversized() {
        assert!(matches!(
            Layout::new(0, vec![], []),
            Err(LayoutError::InvalidSize { .. })
        ));
        let n = MAX_BOARD_SIZE + 1;
        let rows = vec![vec![true; n as usize]; n as usize];
        assert!(matches!(
            Layout::new(n, rows, []),
            Err(LayoutError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_parse_ignores_surrounding_blank_lines() {
        let layout = Layout::parse("\n\n  o.o\n  xox  \n  o.o\n\n").unwrap();
        assert_eq!(layout.size(), 3);
        assert!(layout.is_void(Coord::new(1, 0)));
        assert_eq!(layout.to_text(), "o.o\nxox\no.o");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Layout::parse("  \n "), Err(LayoutError::Empty));
        assert_eq!(
            Layout::parse("oo\no?"),
            Err(LayoutError::UnknownSymbol {
                row: 1,
                col: 1,
                symbol: '?'
            })
        );
        // Two rows of three: the row count fixes the size, so the rows are too long.
        assert!(matches!(
            Layout::parse("ooo\nooo"),
            Err(LayoutError::RowLength {
                row: 0,
                len: 3,
                expected: 2
            })
        ));
    }

    #[test]
    fn test_to_text_roundtrips_presets() {
        for preset in [Preset::English, Preset::European, Preset::Mini] {
            let layout = preset.layout();
            assert_eq!(Layout::parse(&layout.to_text()).unwrap(), layout);
        }
    }

    #[test]
    fn test_preset_lookup() {
        assert_eq!(preset_layout("English").unwrap(), Preset::English.layout());
        assert_eq!(
            preset_layout("hexagon"),
            Err(LayoutError::UnknownPreset("hexagon".to_string()))
        );
    }
}
