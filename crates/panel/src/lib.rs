//! Flip-dot display side of the game.
//!
//! [`PanelRenderer`] turns composed frames into dot actuations on a [`DotSink`]:
//! the physical panel driver, the [`TerminalPanel`] simulator, or a
//! [`RecordingSink`] in tests. The text overlay shares the same path.

pub mod dots;
pub mod font;
pub mod renderer;
pub mod terminal;

pub use flipdot_tetris_core as core;
pub use flipdot_tetris_types as types;

pub use dots::{DotImage, PANEL_COLS, PANEL_ROWS, TEXT_CHARS};
pub use font::glyph;
pub use renderer::{DotSink, Flip, PanelRenderer, RecordingSink};
pub use terminal::TerminalPanel;
