//! Piece catalog - static 5x5 definitions for every piece kind and rotation
//!
//! Each (kind, rotation) pair maps to a `PIECE_BLOCKS x PIECE_BLOCKS` grid of cell
//! values. Non-zero entries are occupied sub-cells: `BLOCK` for ordinary blocks and
//! `PIVOT` for the block the piece turns around (always at the grid center).
//!
//! Grids are indexed `[x][y]`: each inner array literal below is one *column*, read
//! top to bottom. The table is checked at compile time by [`validate`].

use thiserror::Error;

use crate::types::{Cell, PieceKind, Rotation, BLOCK, EMPTY, PIECE_BLOCKS, PIECE_KINDS, PIVOT, ROTATIONS};

/// One orientation of one piece, indexed `[x][y]`
pub type PieceGrid = [[Cell; PIECE_BLOCKS as usize]; PIECE_BLOCKS as usize];

/// Every orientation of every piece, indexed `[kind][rotation]`
pub type CatalogTable = [[PieceGrid; ROTATIONS as usize]; PIECE_KINDS as usize];

/// Number of occupied sub-cells in every piece definition
pub const BLOCKS_PER_PIECE: u8 = 4;

const __: Cell = EMPTY;
const B: Cell = BLOCK;
const P: Cell = PIVOT;

const TABLE: CatalogTable = [
    // O
    [
        [[__, __, __, __, __], [__, __, __, __, __], [__, __, P, B, __], [__, __, B, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, __, P, B, __], [__, __, B, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, __, P, B, __], [__, __, B, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, __, P, B, __], [__, __, B, B, __], [__, __, __, __, __]],
    ],
    // I
    [
        [[__, __, __, __, __], [__, __, __, __, __], [__, B, P, B, B], [__, __, __, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, __, __], [__, __, P, __, __], [__, __, B, __, __], [__, __, B, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [B, B, P, B, __], [__, __, __, __, __], [__, __, __, __, __]],
        [[__, __, B, __, __], [__, __, B, __, __], [__, __, P, __, __], [__, __, B, __, __], [__, __, __, __, __]],
    ],
    // L
    [
        [[__, __, __, __, __], [__, __, B, __, __], [__, __, P, __, __], [__, __, B, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, B, P, B, __], [__, B, __, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, B, B, __, __], [__, __, P, __, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, B, __], [__, B, P, B, __], [__, __, __, __, __], [__, __, __, __, __]],
    ],
    // J
    [
        [[__, __, __, __, __], [__, __, B, __, __], [__, __, P, __, __], [__, B, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, B, __, __, __], [__, B, P, B, __], [__, __, __, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, B, __], [__, __, P, __, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, B, P, B, __], [__, __, __, B, __], [__, __, __, __, __]],
    ],
    // S
    [
        [[__, __, __, __, __], [__, __, __, B, __], [__, __, P, B, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, B, P, __, __], [__, __, B, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, __, __], [__, B, P, __, __], [__, B, __, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, B, B, __, __], [__, __, P, B, __], [__, __, __, __, __], [__, __, __, __, __]],
    ],
    // Z
    [
        [[__, __, __, __, __], [__, __, B, __, __], [__, __, P, B, __], [__, __, __, B, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, __, P, B, __], [__, B, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, B, __, __, __], [__, B, P, __, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, B, __], [__, B, P, __, __], [__, __, __, __, __], [__, __, __, __, __]],
    ],
    // T
    [
        [[__, __, __, __, __], [__, __, B, __, __], [__, __, P, B, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, __, __, __], [__, B, P, B, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, __, __], [__, B, P, __, __], [__, __, B, __, __], [__, __, __, __, __]],
        [[__, __, __, __, __], [__, __, B, __, __], [__, B, P, B, __], [__, __, __, __, __], [__, __, __, __, __]],
    ],
];

const _: () = assert!(validate(&TABLE).is_ok(), "standard piece catalog is malformed");

/// The standard catalog
pub static PIECES: CatalogTable = TABLE;

/// A malformed piece definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("{kind:?}/{rotation:?}: expected 4 blocks, found {found}")]
    BlockCount {
        kind: PieceKind,
        rotation: Rotation,
        found: u8,
    },
    #[error("{kind:?}/{rotation:?}: expected exactly one pivot, found {found}")]
    PivotCount {
        kind: PieceKind,
        rotation: Rotation,
        found: u8,
    },
    #[error("{kind:?}/{rotation:?}: invalid cell value {value} at ({x}, {y})")]
    InvalidCell {
        kind: PieceKind,
        rotation: Rotation,
        x: u8,
        y: u8,
        value: Cell,
    },
}

/// Check that every orientation of every kind has exactly four blocks, one of them
/// the pivot, and no values outside `EMPTY..=PIVOT`.
pub const fn validate(table: &CatalogTable) -> Result<(), CatalogError> {
    let mut k = 0;
    while k < PIECE_KINDS as usize {
        let mut r = 0;
        while r < ROTATIONS as usize {
            let kind = PieceKind::ALL[k];
            let rotation = Rotation::ALL[r];
            let grid = &table[k][r];
            let mut blocks = 0u8;
            let mut pivots = 0u8;
            let mut x = 0;
            while x < PIECE_BLOCKS as usize {
                let mut y = 0;
                while y < PIECE_BLOCKS as usize {
                    let value = grid[x][y];
                    if value > PIVOT {
                        return Err(CatalogError::InvalidCell {
                            kind,
                            rotation,
                            x: x as u8,
                            y: y as u8,
                            value,
                        });
                    }
                    if value != EMPTY {
                        blocks += 1;
                    }
                    if value == PIVOT {
                        pivots += 1;
                    }
                    y += 1;
                }
                x += 1;
            }
            if blocks != BLOCKS_PER_PIECE {
                return Err(CatalogError::BlockCount {
                    kind,
                    rotation,
                    found: blocks,
                });
            }
            if pivots != 1 {
                return Err(CatalogError::PivotCount {
                    kind,
                    rotation,
                    found: pivots,
                });
            }
            r += 1;
        }
        k += 1;
    }
    Ok(())
}

/// Grid for a kind and rotation
#[inline]
pub fn grid(kind: PieceKind, rotation: Rotation) -> &'static PieceGrid {
    &PIECES[kind.index()][rotation.index()]
}

/// Cell value of sub-cell `(x, y)`, with `x, y` in `0..PIECE_BLOCKS`
#[inline]
pub fn block_type(kind: PieceKind, rotation: Rotation, x: u8, y: u8) -> Cell {
    grid(kind, rotation)[x as usize][y as usize]
}

/// Occupied sub-cells of a piece as `(x, y, value)`, scanning row by row
pub fn occupied_cells(kind: PieceKind, rotation: Rotation) -> impl Iterator<Item = (i8, i8, Cell)> {
    let grid = grid(kind, rotation);
    (0..PIECE_BLOCKS as usize).flat_map(move |y| {
        (0..PIECE_BLOCKS as usize).filter_map(move |x| {
            let value = grid[x][y];
            (value != EMPTY).then_some((x as i8, y as i8, value))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_catalog_is_valid() {
        assert_eq!(validate(&PIECES), Ok(()));
    }

    #[test]
    fn test_pivot_is_grid_center() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                assert_eq!(block_type(kind, rotation, 2, 2), PIVOT, "{kind:?}/{rotation:?}");
            }
        }
    }

    #[test]
    fn test_occupied_cells_count() {
        for kind in PieceKind::ALL {
            for rotation in Rotation::ALL {
                assert_eq!(occupied_cells(kind, rotation).count(), BLOCKS_PER_PIECE as usize);
            }
        }
    }

    #[test]
    fn test_o_piece_same_in_every_rotation() {
        let north = grid(PieceKind::O, Rotation::North);
        for rotation in Rotation::ALL {
            assert_eq!(grid(PieceKind::O, rotation), north);
        }
    }

    #[test]
    fn test_i_piece_vertical_footprint() {
        // North orientation is the vertical bar in column 2
        let cells: Vec<_> = occupied_cells(PieceKind::I, Rotation::North).collect();
        assert_eq!(cells, vec![(2, 1, BLOCK), (2, 2, PIVOT), (2, 3, BLOCK), (2, 4, BLOCK)]);
    }

    #[test]
    fn test_validate_rejects_bad_block_count() {
        let mut table = PIECES;
        table[3][1][0][0] = BLOCK;
        assert_eq!(
            validate(&table),
            Err(CatalogError::BlockCount {
                kind: PieceKind::J,
                rotation: Rotation::East,
                found: 5,
            })
        );
    }

    #[test]
    fn test_validate_rejects_missing_pivot() {
        let mut table = PIECES;
        table[6][0][2][2] = BLOCK;
        let err = validate(&table).unwrap_err();
        assert_eq!(
            err,
            CatalogError::PivotCount {
                kind: PieceKind::T,
                rotation: Rotation::North,
                found: 0,
            }
        );
        assert_eq!(err.to_string(), "T/North: expected exactly one pivot, found 0");
    }

    #[test]
    fn test_validate_rejects_locked_marker() {
        let mut table = PIECES;
        table[0][0][2][2] = crate::types::LOCKED;
        assert!(matches!(
            validate(&table),
            Err(CatalogError::InvalidCell { x: 2, y: 2, value: 3, .. })
        ));
    }
}
