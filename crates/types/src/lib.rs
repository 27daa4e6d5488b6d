//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, panel rendering, the demo runner).
//!
//! # Board Dimensions
//!
//! The playfield matches the physical flip-dot panel, laid on its side:
//!
//! - **Width**: 12 columns (indexed 0-11)
//! - **Height**: 32 rows (indexed 0-31)
//! - **Spawn position**: (4, -1), one row above the visible board
//!
//! # Cell Values
//!
//! | Constant | Value | Meaning |
//! |----------|-------|---------|
//! | `EMPTY` | 0 | Free cell |
//! | `BLOCK` | 1 | Piece block (catalog and frame only) |
//! | `PIVOT` | 2 | Piece rotation pivot (catalog and frame only) |
//! | `LOCKED` | 3 | Settled block on the board |
//!
//! # Examples
//!
//! ```
//! use flipdot_tetris_types::{PieceKind, Rotation, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_index(6).unwrap();
//! assert_eq!(piece, PieceKind::T);
//!
//! let rotation = Rotation::West;
//! assert_eq!(rotation.rotate_cw(), Rotation::North);
//!
//! assert_eq!(BOARD_WIDTH, 12);
//! assert_eq!(BOARD_HEIGHT, 32);
//! ```

/// Board width in cells (12 columns)
pub const BOARD_WIDTH: u8 = 12;

/// Board height in cells (32 rows)
pub const BOARD_HEIGHT: u8 = 32;

/// Side length of the square grid each piece definition occupies
pub const PIECE_BLOCKS: u8 = 5;

/// Number of piece kinds in the catalog
pub const PIECE_KINDS: u8 = 7;

/// Number of orientations per piece kind
pub const ROTATIONS: u8 = 4;

/// Column a new piece is anchored at, so the 5x5 definition straddles the middle
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - (PIECE_BLOCKS / 2) as i8;

/// Anchor row of the very first piece of a game
pub const INITIAL_SPAWN_Y: i8 = 0;

/// Anchor row of every subsequent piece (one row above the board)
pub const SPAWN_Y: i8 = -1;

/// Default pause between flash toggles during a line clear (milliseconds)
pub const FLASH_PAUSE_MS: u32 = 80;

/// Default gravity interval used by the demo runner (milliseconds)
pub const DEFAULT_DROP_MS: u32 = 300;

/// Cell value on the board or in a frame
pub type Cell = u8;

/// Free cell
pub const EMPTY: Cell = 0;

/// Ordinary piece block
pub const BLOCK: Cell = 1;

/// Rotation pivot block of a piece
pub const PIVOT: Cell = 2;

/// Settled block written by a lock
pub const LOCKED: Cell = 3;

/// Piece kinds, in catalog order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    L,
    J,
    S,
    Z,
    T,
}

impl PieceKind {
    /// Every kind, indexed by catalog position
    pub const ALL: [PieceKind; PIECE_KINDS as usize] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Look up a kind by its catalog index (0-6)
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Catalog index of this kind
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "o",
            PieceKind::I => "i",
            PieceKind::L => "l",
            PieceKind::J => "j",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::T => "t",
        }
    }
}

/// Rotation states (North = catalog orientation 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; ROTATIONS as usize] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Look up a rotation by its catalog index (0-3)
    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Rotate clockwise (next catalog orientation)
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Movement attempts on the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
}

impl GameAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Rotate => "rotate",
            GameAction::SoftDrop => "softDrop",
        }
    }
}

/// Result of applying a [`GameAction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Candidate placement was legal; the active piece moved
    Moved,
    /// Candidate placement was illegal; nothing changed
    Rejected,
    /// A downward move was illegal, so the piece locked and a new one spawned
    Locked { lines_cleared: u32 },
    /// The game is over (either just now, or already)
    GameOver,
}
