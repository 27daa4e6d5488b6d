//! Render composition - settled board plus active piece, as one frame
//!
//! The frame uses board coordinates. Mapping onto the physical panel (which is
//! mounted sideways) and diffing against the last shown frame belong to the
//! display sink, not here.

use crate::board::{Board, BOARD_SIZE};
use crate::catalog::occupied_cells;
use crate::game_state::ActivePiece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, LOCKED};

/// Frame buffer the same shape as the board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Row-major, like the board
    cells: [Cell; BOARD_SIZE],
}

impl Frame {
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    #[inline(always)]
    fn idx(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::idx(x, y).map(|i| self.cells[i])
    }

    /// Writes outside the frame are ignored
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) {
        if let Some(i) = Self::idx(x, y) {
            self.cells[i] = cell;
        }
    }

    /// Whether the dot for `(x, y)` should show (any non-zero value)
    pub fn is_lit(&self, x: i8, y: i8) -> bool {
        self.get(x, y).is_some_and(|cell| cell != EMPTY)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn clear(&mut self) {
        self.cells.fill(EMPTY);
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Rebuild `out` from scratch: copy of the board, the flashing row (if any)
/// drawn fully lit, then the active piece's blocks with their catalog values.
pub fn compose_into(
    board: &Board,
    active: Option<&ActivePiece>,
    flashing_row: Option<usize>,
    out: &mut Frame,
) {
    out.cells.copy_from_slice(board.cells());

    if let Some(row) = flashing_row.filter(|&row| row < BOARD_HEIGHT as usize) {
        let width = BOARD_WIDTH as usize;
        out.cells[row * width..(row + 1) * width].fill(LOCKED);
    }

    if let Some(piece) = active {
        for (dx, dy, value) in occupied_cells(piece.kind, piece.rotation) {
            out.set(piece.x + dx, piece.y + dy, value);
        }
    }
}

/// Allocate-and-compose convenience around [`compose_into`]
pub fn compose(board: &Board, active: Option<&ActivePiece>, flashing_row: Option<usize>) -> Frame {
    let mut frame = Frame::new();
    compose_into(board, active, flashing_row, &mut frame);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PieceKind, Rotation, BLOCK, PIVOT};

    #[test]
    fn test_frame_starts_from_board_copy() {
        let mut board = Board::new();
        board.set(0, 31, LOCKED);
        board.set(11, 0, LOCKED);
        let frame = compose(&board, None, None);
        assert_eq!(frame.cells(), board.cells());
    }

    #[test]
    fn test_active_piece_overlay_uses_catalog_values() {
        let board = Board::new();
        let piece = ActivePiece {
            kind: PieceKind::T,
            rotation: Rotation::East,
            x: 3,
            y: 10,
        };
        let frame = compose(&board, Some(&piece), None);
        // T/East: grid (2,1), (2,2) pivot, (2,3), (3,2)
        assert_eq!(frame.get(5, 11), Some(BLOCK));
        assert_eq!(frame.get(5, 12), Some(PIVOT));
        assert_eq!(frame.get(5, 13), Some(BLOCK));
        assert_eq!(frame.get(6, 12), Some(BLOCK));
        assert_eq!(frame.cells().iter().filter(|&&c| c != EMPTY).count(), 4);
        // Board untouched
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_overlay_clips_above_top() {
        let board = Board::new();
        let piece = ActivePiece {
            kind: PieceKind::I,
            rotation: Rotation::North,
            x: 4,
            y: -3,
        };
        let frame = compose(&board, Some(&piece), None);
        assert_eq!(frame.cells().iter().filter(|&&c| c != EMPTY).count(), 2);
        assert!(frame.is_lit(6, 0));
        assert!(frame.is_lit(6, 1));
    }

    #[test]
    fn test_flashing_row_lit_in_frame_only() {
        let board = Board::new();
        let frame = compose(&board, None, Some(30));
        assert!((0..12).all(|x| frame.is_lit(x, 30)));
        assert!(!frame.is_lit(0, 29));
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_compose_into_overwrites_previous_contents() {
        let board = Board::new();
        let mut frame = Frame::new();
        frame.set(2, 2, LOCKED);
        compose_into(&board, None, None, &mut frame);
        assert!(!frame.is_lit(2, 2));
    }
}
