//! Terminal "game renderer" module.
//!
//! Renders the board into a simple framebuffer that is diff-flushed to the
//! terminal with crossterm, rather than going through a widget toolkit.
//!
//! - [`GameView`] is pure: snapshot in, framebuffer out
//! - [`TerminalRenderer`] owns the terminal and only writes changed runs

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use peg_solitaire_core as core;
pub use peg_solitaire_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AdapterStatusView, AnchorY, GameView, Hud, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
