//! Dot image in panel coordinates.
//!
//! The panel is mounted sideways: its rows run along the board's width and its
//! columns along the board's height, with the board's top at the far column.

use flipdot_tetris_core::Frame;
use flipdot_tetris_types::{BOARD_HEIGHT, BOARD_WIDTH};

use crate::font::{glyph, GLYPH_COLS, GLYPH_ROWS};

/// Dot rows on the panel (one per board column)
pub const PANEL_ROWS: usize = BOARD_WIDTH as usize;

/// Dot columns on the panel (one per board row)
pub const PANEL_COLS: usize = BOARD_HEIGHT as usize;

/// Characters that fit across the panel
pub const TEXT_CHARS: usize = 5;

/// Column pitch of the text overlay (glyph plus one blank column)
pub const TEXT_PITCH: usize = GLYPH_COLS + 1;

/// On/off state of every dot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DotImage {
    dots: [[bool; PANEL_COLS]; PANEL_ROWS],
}

impl DotImage {
    /// All dots off
    pub fn new() -> Self {
        Self::filled(false)
    }

    pub fn filled(on: bool) -> Self {
        Self {
            dots: [[on; PANEL_COLS]; PANEL_ROWS],
        }
    }

    /// Board `(x, y)` lands on dot `(x, BOARD_HEIGHT - 1 - y)`; any non-zero cell is lit.
    pub fn from_frame(frame: &Frame) -> Self {
        let mut image = Self::new();
        image.load_frame(frame);
        image
    }

    /// Overwrite every dot from `frame`
    pub fn load_frame(&mut self, frame: &Frame) {
        for (row, dots) in self.dots.iter_mut().enumerate() {
            for (col, dot) in dots.iter_mut().enumerate() {
                *dot = frame.is_lit(row as i8, (PANEL_COLS - 1 - col) as i8);
            }
        }
    }

    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.dots.get(row).and_then(|dots| dots.get(col)).copied()
    }

    /// Writes outside the panel are ignored
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        if let Some(dot) = self.dots.get_mut(row).and_then(|dots| dots.get_mut(col)) {
            *dot = on;
        }
    }

    pub fn fill(&mut self, on: bool) {
        for dots in &mut self.dots {
            dots.fill(on);
        }
    }

    pub fn lit_count(&self) -> usize {
        self.dots.iter().flatten().filter(|&&on| on).count()
    }

    /// Clear the image and write up to [`TEXT_CHARS`] characters across it.
    ///
    /// Character `i` starts at column `TEXT_PITCH * i`; glyph bit `r` of each
    /// font column lights dot row `r`.
    pub fn draw_text(&mut self, text: &str) {
        self.fill(false);
        for (i, ch) in text.chars().take(TEXT_CHARS).enumerate() {
            let left = i * TEXT_PITCH;
            for (dx, bits) in glyph(ch).iter().enumerate() {
                for row in 0..GLYPH_ROWS {
                    self.set(row, left + dx, bits & (1 << row) != 0);
                }
            }
        }
    }

    /// Image showing `text`
    pub fn text(text: &str) -> Self {
        let mut image = Self::new();
        image.draw_text(text);
        image
    }
}

impl Default for DotImage {
    fn default() -> Self {
        Self::new()
    }
}
