//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`InputAction`]s and resolves them against a board [`Cursor`]
//! into [`crate::types::GameAction`]s the engine understands.

pub mod cursor;
pub mod map;

pub use peg_solitaire_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, InputAction};
