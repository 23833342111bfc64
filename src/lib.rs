//! Peg solitaire (workspace facade crate).
//!
//! Re-exports the workspace crates under short names so integration tests and
//! the binary can use `peg_solitaire::{core,adapter,term,input,types}`, and
//! owns the application [`config`].

pub mod config;
pub mod error;

pub use peg_solitaire_adapter as adapter;
pub use peg_solitaire_core as core;
pub use peg_solitaire_input as input;
pub use peg_solitaire_term as term;
pub use peg_solitaire_types as types;

pub use config::AppConfig;
pub use error::ConfigError;
