//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellStatus, Coord};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterStatusView {
    pub enabled: bool,
    pub client_count: u16,
    pub controller_id: Option<usize>,
    pub streaming_count: u16,
}

/// Presentation-only state drawn on top of the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    /// Highlighted cell for keyboard play.
    pub cursor: Option<Coord>,
    /// `None` when the remote adapter is off.
    pub adapter: Option<&'a AdapterStatusView>,
    /// One-line message under the board (e.g. "YOU WON!").
    pub notice: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR_BG: Rgb = Rgb::new(70, 70, 120);

const PEG: CellStyle = CellStyle::fg(Rgb::new(210, 160, 90)).on(BOARD_BG);
const SELECTED: CellStyle = CellStyle::fg(Rgb::new(255, 220, 80)).on(BOARD_BG).bold();
const HOLE: CellStyle = CellStyle::fg(Rgb::new(90, 90, 100)).on(BOARD_BG).dim();
const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const NOTICE: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

pub const PEG_GLYPH: char = '●';
pub const SELECTED_GLYPH: char = '◉';
pub const HOLE_GLYPH: char = '○';

const HELP: [&str; 5] = [
    "arrows/hjkl move",
    "space/enter tap",
    "wasd jump",
    "r restart",
    "q quit",
];

/// A lightweight terminal renderer for the board.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer size of the bordered board in terminal cells.
    pub fn frame_size(&self, board_size: u16) -> (u16, u16) {
        (board_size * self.cell_w + 2, board_size + 2)
    }

    /// Render into an existing framebuffer, reusing its allocation.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.size);
        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = match self.anchor_y {
            // Leave a row for the notice line.
            AnchorY::Center => viewport.height.saturating_sub(frame_h + 1) / 2,
            AnchorY::Top => 0,
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let c = Coord::new(row, col);
                let Some(status) = snap.get(c) else {
                    continue;
                };
                let selected = snap.selection == Some(c);
                let under_cursor = hud.cursor == Some(c);
                self.draw_cell(fb, start_x, start_y, c, status, selected, under_cursor);
            }
        }

        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        self.draw_side_panel(fb, snap, hud.adapter, viewport, panel_x, start_y);

        if let Some(text) = hud.notice {
            fb.put_str_centered(start_x, start_y + frame_h, frame_w, text, NOTICE);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', BORDER);
        fb.put_char(x + w - 1, y, '┐', BORDER);
        fb.put_char(x, y + h - 1, '└', BORDER);
        fb.put_char(x + w - 1, y + h - 1, '┘', BORDER);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', BORDER);
            fb.put_char(x + dx, y + h - 1, '─', BORDER);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', BORDER);
            fb.put_char(x + w - 1, y + dy, '│', BORDER);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        c: Coord,
        status: CellStatus,
        selected: bool,
        cursor: bool,
    ) {
        let px = start_x + 1 + c.col * self.cell_w;
        let py = start_y + 1 + c.row;

        let (glyph, mut style) = match status {
            // Voids are not part of the board: leave the background showing.
            CellStatus::Void => (' ', CellStyle::default()),
            CellStatus::Peg if selected => (SELECTED_GLYPH, SELECTED),
            CellStatus::Peg => (PEG_GLYPH, PEG),
            CellStatus::Empty => (HOLE_GLYPH, HOLE),
        };
        if cursor {
            style = style.on(CURSOR_BG);
        }

        fb.fill_rect(px, py, self.cell_w, 1, ' ', style);
        fb.put_char(px + (self.cell_w - 1) / 2, py, glyph, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        adapter: Option<&AdapterStatusView>,
        viewport: Viewport,
        panel_x: u16,
        start_y: u16,
    ) {
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let mut y = start_y;
        fb.put_str(panel_x, y, "PEGS", LABEL);
        fb.put_u32(panel_x + 9, y, snap.pegs as u32, VALUE);
        y += 1;
        fb.put_str(panel_x, y, "EPISODE", LABEL);
        fb.put_u32(panel_x + 9, y, snap.episode_id, VALUE);
        y += 1;
        fb.put_str(panel_x, y, "MOVES", LABEL);
        fb.put_u32(panel_x + 9, y, snap.moves, VALUE);
        y += 2;

        let status = if snap.won {
            "SOLVED"
        } else if snap.stuck {
            "NO MOVES"
        } else {
            "PLAYING"
        };
        fb.put_str(panel_x, y, status, VALUE.bold());
        y += 2;

        fb.put_str(panel_x, y, "REMOTE", LABEL);
        match adapter {
            Some(st) if st.enabled => {
                fb.put_str(panel_x + 9, y, "ON", VALUE);
                y += 1;
                let x = fb.put_str(panel_x, y, "C", VALUE);
                fb.put_u32(x + 1, y, st.client_count as u32, VALUE);
                let x = fb.put_str(panel_x + 5, y, "S", VALUE);
                fb.put_u32(x + 1, y, st.streaming_count as u32, VALUE);
                y += 1;
                let x = fb.put_str(panel_x, y, "CTRL", VALUE);
                match st.controller_id {
                    Some(id) => fb.put_u32(x + 1, y, id as u32, VALUE),
                    None => fb.put_str(x + 1, y, "-", VALUE),
                };
            }
            _ => {
                fb.put_str(panel_x + 9, y, "OFF", VALUE);
            }
        }
        y += 2;

        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, VALUE.dim());
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PegGame, Preset};

    #[test]
    fn test_frame_size_scales_with_cell_width() {
        assert_eq!(GameView::default().frame_size(7), (16, 9));
        assert_eq!(GameView::new(3).frame_size(5), (17, 7));
        assert_eq!(GameView::new(0).frame_size(5), (7, 7));
    }

    #[test]
    fn test_cursor_changes_background_only() {
        let snap = PegGame::new(Preset::Mini.layout()).snapshot();
        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let vp = Viewport::new(12, 8);
        let plain = view.render(&snap, Hud::default(), vp);
        let hud = Hud {
            cursor: Some(Coord::new(0, 1)),
            ..Hud::default()
        };
        let fb = view.render(&snap, hud, vp);

        let (x, y) = (1 + 2, 1);
        assert_eq!(fb.get(x, y).unwrap().ch, PEG_GLYPH);
        assert_eq!(fb.get(x, y).unwrap().style.bg, CURSOR_BG);
        assert_eq!(plain.get(x, y).unwrap().style.bg, BOARD_BG);
    }
}
