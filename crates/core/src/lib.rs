//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the peg solitaire rules and board state. It has no
//! dependencies on UI, networking, or I/O, so the same engine drives the
//! terminal front-end, the remote adapter and headless tests.
//!
//! # Module Structure
//!
//! - [`board`]: N x N cell grid, jump validation and application
//! - [`game_state`]: selection, move forms, win detection and events
//! - [`layout`]: validated initial layouts, text format and bundled presets
//! - [`snapshot`]: read-only copy of the game for views
//! - [`error`]: move rejections and layout construction errors
//!
//! # Rules
//!
//! - A peg jumps exactly two cells up, down, left or right
//! - The cell jumped over must hold a peg, which is removed
//! - The destination must be an empty, non-void cell
//! - The puzzle is solved once at most one peg remains
//!
//! # Example
//!
//! ```
//! use peg_solitaire_core::{PegGame, Preset};
//! use peg_solitaire_types::{Coord, Direction, GameAction};
//!
//! let mut game = PegGame::new(Preset::English.layout());
//! assert_eq!(game.peg_count(), 32);
//!
//! game.apply_action(GameAction::Tap(Coord::new(3, 1)));
//! game.apply_action(GameAction::Swipe(Direction::Right));
//!
//! assert_eq!(game.peg_count(), 31);
//! assert_eq!(game.selection(), Some(Coord::new(3, 3)));
//! ```

pub mod board;
pub mod error;
pub mod game_state;
pub mod layout;
pub mod snapshot;

pub use peg_solitaire_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Jump};
pub use error::{LayoutError, MoveError};
pub use game_state::{ActionOutcome, GameEvent, PegGame};
pub use layout::{preset_layout, Layout, Preset};
pub use snapshot::GameSnapshot;
