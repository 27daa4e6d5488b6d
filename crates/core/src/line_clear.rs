//! Line-clear sequencer - collapse a full row, then blink the revealed row
//!
//! Per cleared row:
//! 1. the row collapses (everything above drops by one, row 0 empties)
//! 2. the total-cleared counter goes up by one
//! 3. the flashing-row indicator toggles `Some(row)`, `None`, `Some(row)`, `None`
//!    with a pause between toggles
//!
//! The collapse comes first so the blink lands on the row that slid into place,
//! not on the one that was removed. The flash never touches the board.

use std::time::Duration;

use tracing::debug;

use crate::board::Board;
use crate::pause::Pause;
use crate::types::FLASH_PAUSE_MS;

/// Indicator states shown during one flash, in order
const FLASH_PATTERN: [bool; 4] = [true, false, true, false];

/// Counter and flash state for line clears
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearSequencer {
    total_cleared: u32,
    flashing_row: Option<usize>,
    flash_pause: Duration,
}

impl LineClearSequencer {
    pub fn new(flash_pause: Duration) -> Self {
        Self {
            total_cleared: 0,
            flashing_row: None,
            flash_pause,
        }
    }

    /// Rows cleared since the last reset
    pub fn total_cleared(&self) -> u32 {
        self.total_cleared
    }

    /// Row currently blinking, if a flash is in progress
    pub fn flashing_row(&self) -> Option<usize> {
        self.flashing_row
    }

    pub fn flash_pause(&self) -> Duration {
        self.flash_pause
    }

    /// Zero the counter and drop any flash indicator (game start)
    pub fn reset(&mut self) {
        self.total_cleared = 0;
        self.flashing_row = None;
    }

    /// Run the full sequence for row `y`. Blocks for three flash pauses.
    ///
    /// `on_flash` sees the board and indicator after every toggle.
    pub fn clear_row<P: Pause>(
        &mut self,
        board: &mut Board,
        y: usize,
        pause: &mut P,
        mut on_flash: impl FnMut(&Board, Option<usize>),
    ) {
        board.collapse_row(y);
        self.total_cleared += 1;
        debug!(row = y, total = self.total_cleared, "row cleared");

        for (i, &lit) in FLASH_PATTERN.iter().enumerate() {
            self.flashing_row = lit.then_some(y);
            on_flash(board, self.flashing_row);
            if i + 1 < FLASH_PATTERN.len() {
                pause.pause(self.flash_pause);
            }
        }
    }
}

impl Default for LineClearSequencer {
    fn default() -> Self {
        Self::new(Duration::from_millis(FLASH_PAUSE_MS as u64))
    }
}
