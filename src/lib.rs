//! Flip-dot Tetris (workspace facade crate).
//!
//! Re-exports the member crates under `flipdot_tetris::{core,panel,types}` and
//! adds the runtime configuration and demo helpers used by the binary.

pub mod config;
pub mod demo;

pub use flipdot_tetris_core as core;
pub use flipdot_tetris_panel as panel;
pub use flipdot_tetris_types as types;

pub use config::{ConfigError, FlipdotConfig};
