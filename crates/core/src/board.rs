//! Board module - manages the settled grid
//!
//! The board is a 12x32 grid of settled blocks. The falling piece is never stored
//! here; it only reaches the board through [`Board::commit`].
//! Uses a flat array for better cache locality and zero-allocation.
//! Coordinates: (x, y) where x ranges 0..11 (left to right), y ranges 0..31 (top to bottom)

use arrayvec::ArrayVec;

use crate::catalog::occupied_cells;
use crate::line_clear::LineClearSequencer;
use crate::pause::Pause;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, EMPTY, LOCKED};

/// Total number of cells on the board
pub const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Row indices cleared by one scan, top to bottom
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 12 columns x 32 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [EMPTY; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }

    /// True iff the cell holds `EMPTY`.
    ///
    /// The caller guarantees `(x, y)` is on the board; this does not bounds-check.
    #[inline]
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        debug_assert!(!self.is_out_of_bounds(x, y), "is_free({x}, {y}) off the board");
        self.cells[(y as usize) * (BOARD_WIDTH as usize) + (x as usize)] == EMPTY
    }

    /// Check if position is out of bounds
    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        Self::index(x, y).is_none()
    }

    /// Whether a piece anchored at `(x, y)` fits.
    ///
    /// Every occupied sub-cell must be inside the side walls and above the floor.
    /// Sub-cells above the top edge (negative y) are not checked for occupancy,
    /// which is what lets a piece spawn partly off the board.
    pub fn is_placement_legal(&self, x: i8, y: i8, kind: PieceKind, rotation: Rotation) -> bool {
        for (dx, dy, _) in occupied_cells(kind, rotation) {
            let px = x + dx;
            let py = y + dy;
            if px < 0 || px >= BOARD_WIDTH as i8 || py >= BOARD_HEIGHT as i8 {
                return false;
            }
            if py >= 0 && !self.is_free(px, py) {
                return false;
            }
        }
        true
    }

    /// Write a piece into the board as `LOCKED` cells.
    ///
    /// No legality check: callers validate with [`Board::is_placement_legal`] first.
    /// Sub-cells above the top edge have nowhere to go and are dropped.
    pub fn commit(&mut self, x: i8, y: i8, kind: PieceKind, rotation: Rotation) {
        for (dx, dy, _) in occupied_cells(kind, rotation) {
            self.set(x + dx, y + dy, LOCKED);
        }
    }

    /// Any block in the top row ends the game
    pub fn is_game_over(&self) -> bool {
        self.row(0).iter().any(|&cell| cell != EMPTY)
    }

    /// Cells of row `y`, left to right
    pub fn row(&self, y: usize) -> &[Cell] {
        let width = BOARD_WIDTH as usize;
        &self.cells[y * width..(y + 1) * width]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT as usize {
            return false;
        }
        self.row(y).iter().all(|&cell| cell != EMPTY)
    }

    /// Remove row `y`: every row above shifts down by one and row 0 is emptied.
    pub fn collapse_row(&mut self, y: usize) {
        if y >= BOARD_HEIGHT as usize {
            return;
        }

        let width = BOARD_WIDTH as usize;

        // copy_within handles overlapping ranges safely
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            let dst_start = row * width;
            self.cells
                .copy_within(src_start..src_start + width, dst_start);
        }

        self.cells[..width].fill(EMPTY);
    }

    /// Single top-to-bottom pass: every full row goes through the line-clear
    /// sequence, then the scan continues with the next row.
    ///
    /// Rows above a cleared row were already scanned and found not full, so the
    /// row shifted into the cleared index never needs a second look.
    pub fn scan_and_clear_filled_rows<P: Pause>(
        &mut self,
        sequencer: &mut LineClearSequencer,
        pause: &mut P,
        mut on_flash: impl FnMut(&Board, Option<usize>),
    ) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                sequencer.clear_row(self, y, pause, &mut on_flash);
                cleared.push(y);
            }
        }
        cleared
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell != EMPTY).count()
    }

    /// Create from a 2D vector for testing (converts to flat array)
    #[cfg(test)]
    pub fn from_cells(cells_2d: Vec<Vec<Cell>>) -> Self {
        assert_eq!(cells_2d.len(), BOARD_HEIGHT as usize);
        assert!(cells_2d.iter().all(|row| row.len() == BOARD_WIDTH as usize));

        let mut flat = [EMPTY; BOARD_SIZE];
        for (y, row) in cells_2d.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                flat[y * BOARD_WIDTH as usize + x] = *cell;
            }
        }
        Self { cells: flat }
    }

    /// Convert to 2D vector for testing/display
    #[cfg(test)]
    pub fn to_cells(&self) -> Vec<Vec<Cell>> {
        (0..BOARD_HEIGHT as usize)
            .map(|y| self.row(y).to_vec())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pause::ManualPause;

    fn fill_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, LOCKED);
        }
    }

    #[test]
    fn test_board_index_calculation() {
        assert_eq!(Board::index(0, 0), Some(0));
        assert_eq!(Board::index(11, 0), Some(11));
        assert_eq!(Board::index(0, 1), Some(12));
        assert_eq!(Board::index(11, 31), Some(383));
        assert_eq!(Board::index(-1, 0), None);
        assert_eq!(Board::index(12, 0), None);
        assert_eq!(Board::index(0, 32), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new();

        board.set(0, 0, LOCKED);
        board.set(5, 10, LOCKED);

        assert_eq!(board.get(0, 0), Some(LOCKED));
        assert_eq!(board.get(5, 10), Some(LOCKED));

        // Verify internal array
        assert_eq!(board.cells[0], LOCKED);
        assert_eq!(board.cells[10 * 12 + 5], LOCKED);
    }

    #[test]
    fn test_board_from_cells_roundtrip() {
        let mut cells_2d = vec![vec![EMPTY; 12]; 32];
        cells_2d[5][3] = LOCKED;
        cells_2d[31][11] = LOCKED;

        let board = Board::from_cells(cells_2d.clone());
        assert_eq!(board.to_cells(), cells_2d);
    }

    #[test]
    fn test_reset_empties_everything() {
        let mut board = Board::new();
        fill_row(&mut board, 31);
        board.set(3, 3, LOCKED);
        board.reset();
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_placement_legal_allows_overhang_above_top() {
        let board = Board::new();
        // I/North occupies column 2, rows 1..=4 of its grid; anchored at y = -3
        // two of its blocks sit above the board
        assert!(board.is_placement_legal(4, -3, PieceKind::I, Rotation::North));
    }

    #[test]
    fn test_placement_illegal_through_floor_and_walls() {
        let board = Board::new();
        // I/North bottom block is grid row 4: y + 4 must stay < 32
        assert!(board.is_placement_legal(0, 27, PieceKind::I, Rotation::North));
        assert!(!board.is_placement_legal(0, 28, PieceKind::I, Rotation::North));
        // I/West spans grid columns 0..=3 on row 2
        assert!(board.is_placement_legal(0, 0, PieceKind::I, Rotation::West));
        assert!(!board.is_placement_legal(-1, 0, PieceKind::I, Rotation::West));
        // Empty grid columns may hang past the wall
        assert!(board.is_placement_legal(-2, 0, PieceKind::I, Rotation::North));
        assert!(board.is_placement_legal(9, 0, PieceKind::I, Rotation::North));
        assert!(!board.is_placement_legal(10, 0, PieceKind::I, Rotation::North));
    }

    #[test]
    fn test_placement_illegal_on_collision() {
        let mut board = Board::new();
        board.set(6, 10, LOCKED);
        // I/North at x = 4 occupies column 6
        assert!(!board.is_placement_legal(4, 7, PieceKind::I, Rotation::North));
        assert!(board.is_placement_legal(4, 5, PieceKind::I, Rotation::North));
        assert!(board.is_placement_legal(3, 7, PieceKind::I, Rotation::North));
    }

    #[test]
    fn test_commit_writes_locked_marker() {
        let mut board = Board::new();
        board.commit(4, 10, PieceKind::T, Rotation::North);
        for (dx, dy, _) in occupied_cells(PieceKind::T, Rotation::North) {
            assert_eq!(board.get(4 + dx, 10 + dy), Some(LOCKED));
        }
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_commit_drops_cells_above_top() {
        let mut board = Board::new();
        // I/North at y = -2: grid rows 1..=4 land on board rows -1..=2
        board.commit(4, -2, PieceKind::I, Rotation::North);
        assert_eq!(board.occupied_count(), 3);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_game_over_only_from_top_row() {
        let mut board = Board::new();
        assert!(!board.is_game_over());
        board.set(5, 1, LOCKED);
        assert!(!board.is_game_over());
        board.set(11, 0, LOCKED);
        assert!(board.is_game_over());
    }

    #[test]
    fn test_collapse_row_shifts_and_empties_top() {
        let mut board = Board::new();
        board.set(0, 0, LOCKED);
        board.set(1, 5, LOCKED);
        fill_row(&mut board, 6);
        board.set(2, 7, LOCKED);

        board.collapse_row(6);

        assert_eq!(board.get(0, 1), Some(LOCKED));
        assert_eq!(board.get(1, 6), Some(LOCKED));
        assert_eq!(board.get(2, 7), Some(LOCKED));
        assert!(board.row(0).iter().all(|&c| c == EMPTY));
        assert_eq!(board.occupied_count(), 3);
    }

    #[test]
    fn test_collapse_row_zero_just_empties_it() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        board.collapse_row(0);
        assert_eq!(board.occupied_count(), 0);
    }

    #[test]
    fn test_scan_clears_adjacent_rows_in_one_pass() {
        let mut board = Board::new();
        fill_row(&mut board, 30);
        fill_row(&mut board, 31);
        board.set(4, 29, LOCKED);

        let mut seq = LineClearSequencer::default();
        let mut pause = ManualPause::new();
        let cleared = board.scan_and_clear_filled_rows(&mut seq, &mut pause, |_, _| {});

        assert_eq!(cleared.as_slice(), &[30, 31]);
        assert_eq!(seq.total_cleared(), 2);
        assert_eq!(board.get(4, 31), Some(LOCKED));
        assert_eq!(board.occupied_count(), 1);
    }

    #[test]
    fn test_scan_with_gap_between_full_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 27);
        board.set(0, 28, LOCKED);
        fill_row(&mut board, 29);

        let mut seq = LineClearSequencer::default();
        let mut pause = ManualPause::new();
        let cleared = board.scan_and_clear_filled_rows(&mut seq, &mut pause, |_, _| {});

        assert_eq!(cleared.as_slice(), &[27, 29]);
        // The lone block only drops for the clear beneath it
        assert_eq!(board.get(0, 29), Some(LOCKED));
        assert_eq!(board.occupied_count(), 1);
    }
}
