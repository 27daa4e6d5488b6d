//! Core game logic - the flip-dot falling-block engine
//!
//! Everything here is synchronous and free of terminal or hardware I/O. The two
//! outside capabilities the engine needs, random numbers and the pause between
//! flash toggles, come in through the [`RandomSource`] and [`Pause`] traits.
//!
//! # Module Structure
//!
//! - [`catalog`]: static 5x5 piece definitions, validated at compile time
//! - [`board`]: 12x32 settled grid, placement checks, commit and row collapse
//! - [`line_clear`]: per-row collapse, cleared-row counter and flash sequence
//! - [`game_state`]: active piece, spawning, movement and the lock sequence
//! - [`render`]: board + active piece composed into one frame
//! - [`rng`]: random sources (deterministic LCG, `rand`-backed entropy)
//! - [`pause`]: thread sleep or a recording virtual clock
//!
//! # Example
//!
//! ```
//! use flipdot_tetris_core::GameState;
//! use flipdot_tetris_core::types::{ActionOutcome, GameAction};
//!
//! let mut game = GameState::headless(12345);
//! game.init_game();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//!
//! // Gravity until the piece locks
//! let outcome = game.hard_drop();
//! assert!(matches!(outcome, ActionOutcome::Locked { .. }));
//! assert_eq!(game.board().occupied_count(), 4);
//! ```

pub mod board;
pub mod catalog;
pub mod game_state;
pub mod line_clear;
pub mod pause;
pub mod render;
pub mod rng;

pub use flipdot_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use catalog::{block_type, occupied_cells, validate, CatalogError};
pub use game_state::{ActivePiece, GameState, LockEvent};
pub use line_clear::LineClearSequencer;
pub use pause::{ManualPause, Pause, ThreadPause};
pub use render::{compose, compose_into, Frame};
pub use rng::{EntropyRng, RandomSource, ScriptedRng, SimpleRng};
