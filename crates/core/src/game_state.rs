//! Game state module - owns the board, the active piece and the line-clear state
//!
//! Every movement is "compute a candidate, keep it only if the board accepts it".
//! A soft drop that the board rejects locks the piece instead: commit, clear full
//! rows, check for game over, spawn the next piece.

use std::time::Duration;

use tracing::{debug, info};

use crate::board::{Board, ClearedRows};
use crate::line_clear::LineClearSequencer;
use crate::pause::{ManualPause, Pause, ThreadPause};
use crate::render::{compose_into, Frame};
use crate::rng::{RandomSource, SimpleRng};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    /// Anchor of the piece's 5x5 grid, in board coordinates
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    pub fn new(kind: PieceKind, rotation: Rotation, x: i8, y: i8) -> Self {
        Self { kind, rotation, x, y }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Same piece turned to the next orientation
    pub fn rotated(&self) -> Self {
        Self {
            rotation: self.rotation.rotate_cw(),
            ..*self
        }
    }

    /// Check if the board accepts this placement
    pub fn fits(&self, board: &Board) -> bool {
        board.is_placement_legal(self.x, self.y, self.kind, self.rotation)
    }
}

/// What happened on the last lock (consumed by observers)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub piece: ActivePiece,
    pub cleared_rows: ClearedRows,
    pub game_over: bool,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState<R = SimpleRng, P = ThreadPause> {
    board: Board,
    active: Option<ActivePiece>,
    rng: R,
    pause: P,
    line_clear: LineClearSequencer,
    /// Pieces spawned since the game started (the first piece counts)
    pieces_spawned: u32,
    last_event: Option<LockEvent>,
    game_over: bool,
}

impl GameState<SimpleRng, ManualPause> {
    /// Deterministic game whose flash pauses return immediately
    pub fn headless(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed), ManualPause::new())
    }
}

impl<R: RandomSource, P: Pause> GameState<R, P> {
    /// Create an idle game; call [`GameState::init_game`] to start it
    pub fn new(rng: R, pause: P) -> Self {
        Self {
            board: Board::new(),
            active: None,
            rng,
            pause,
            line_clear: LineClearSequencer::default(),
            pieces_spawned: 0,
            last_event: None,
            game_over: false,
        }
    }

    /// Replace the pause between flash toggles
    pub fn with_flash_pause(mut self, flash_pause: Duration) -> Self {
        self.line_clear = LineClearSequencer::new(flash_pause);
        self
    }

    /// Reset everything and spawn the first piece at the top of the board
    pub fn init_game(&mut self) {
        self.board.reset();
        self.line_clear.reset();
        self.game_over = false;
        self.pieces_spawned = 0;
        self.last_event = None;
        self.spawn_at(INITIAL_SPAWN_Y);
        info!(
            kind = self.active.map(|p| p.kind.as_str()),
            "game started"
        );
    }

    /// Pick a random kind and rotation and place it centered, one row above the board
    pub fn spawn_next_piece(&mut self) {
        self.spawn_at(SPAWN_Y);
    }

    fn spawn_at(&mut self, y: i8) {
        let kind = pick(&mut self.rng, &PieceKind::ALL);
        let rotation = pick(&mut self.rng, &Rotation::ALL);
        let piece = ActivePiece::new(kind, rotation, SPAWN_X, y);
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        debug!(kind = kind.as_str(), rotation = rotation.as_str(), y, "spawned piece");
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<ActivePiece> {
        self.active
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Rows cleared since the game started
    pub fn total_cleared(&self) -> u32 {
        self.line_clear.total_cleared()
    }

    /// Row currently blinking, if a line clear is in its flash phase
    pub fn flashing_row(&self) -> Option<usize> {
        self.line_clear.flashing_row()
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn pause_mut(&mut self) -> &mut P {
        &mut self.pause
    }

    pub fn pause(&self) -> &P {
        &self.pause
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Replace the active piece (test setup and scripted demos)
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = Some(piece);
    }

    /// Accept `candidate` iff the board allows it
    fn try_place(&mut self, candidate: ActivePiece) -> bool {
        if candidate.fits(&self.board) {
            self.active = Some(candidate);
            true
        } else {
            false
        }
    }

    /// Try to move the active piece
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        match self.active {
            Some(active) if !self.game_over => self.try_place(active.shifted(dx, dy)),
            _ => false,
        }
    }

    /// Try to turn the active piece in place (no wall kicks)
    pub fn try_rotate(&mut self) -> bool {
        match self.active {
            Some(active) if !self.game_over => self.try_place(active.rotated()),
            _ => false,
        }
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> ActionOutcome {
        self.apply_action_with(action, |_| {})
    }

    /// Apply a game action; `on_flash` receives each frame of a line-clear blink
    pub fn apply_action_with(
        &mut self,
        action: GameAction,
        on_flash: impl FnMut(&Frame),
    ) -> ActionOutcome {
        if self.game_over {
            return ActionOutcome::GameOver;
        }
        let moved = match action {
            GameAction::MoveLeft => self.try_move(-1, 0),
            GameAction::MoveRight => self.try_move(1, 0),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => return self.soft_drop_with(on_flash),
        };
        if moved {
            ActionOutcome::Moved
        } else {
            ActionOutcome::Rejected
        }
    }

    /// Gravity step: same as a soft drop
    pub fn tick(&mut self) -> ActionOutcome {
        self.soft_drop_with(|_| {})
    }

    /// Move down one row, or lock if the board refuses
    pub fn soft_drop_with(&mut self, on_flash: impl FnMut(&Frame)) -> ActionOutcome {
        if self.game_over {
            return ActionOutcome::GameOver;
        }
        if self.active.is_none() {
            return ActionOutcome::Rejected;
        }
        if self.try_move(0, 1) {
            return ActionOutcome::Moved;
        }
        self.lock_piece(on_flash)
    }

    /// Drop until the piece locks
    pub fn hard_drop(&mut self) -> ActionOutcome {
        self.hard_drop_with(|_| {})
    }

    pub fn hard_drop_with(&mut self, mut on_flash: impl FnMut(&Frame)) -> ActionOutcome {
        loop {
            match self.soft_drop_with(&mut on_flash) {
                ActionOutcome::Moved => continue,
                outcome => return outcome,
            }
        }
    }

    /// Lock the active piece at its current position and run the aftermath
    fn lock_piece(&mut self, mut on_flash: impl FnMut(&Frame)) -> ActionOutcome {
        let Some(piece) = self.active.take() else {
            return ActionOutcome::Rejected;
        };

        self.board.commit(piece.x, piece.y, piece.kind, piece.rotation);
        debug!(kind = piece.kind.as_str(), x = piece.x, y = piece.y, "locked piece");

        let mut frame = Frame::new();
        let cleared_rows = self.board.scan_and_clear_filled_rows(
            &mut self.line_clear,
            &mut self.pause,
            |board, row| {
                compose_into(board, None, row, &mut frame);
                on_flash(&frame);
            },
        );
        let lines_cleared = cleared_rows.len() as u32;

        self.game_over = self.board.is_game_over();
        self.last_event = Some(LockEvent {
            piece,
            cleared_rows,
            game_over: self.game_over,
        });

        if self.game_over {
            info!(
                total_cleared = self.line_clear.total_cleared(),
                pieces = self.pieces_spawned,
                "game over"
            );
            return ActionOutcome::GameOver;
        }

        self.spawn_next_piece();
        ActionOutcome::Locked { lines_cleared }
    }

    /// Board plus active piece (plus the flashing row, mid-clear)
    pub fn compose_frame(&self) -> Frame {
        let mut frame = Frame::new();
        self.compose_frame_into(&mut frame);
        frame
    }

    pub fn compose_frame_into(&self, out: &mut Frame) {
        compose_into(
            &self.board,
            self.active.as_ref(),
            self.line_clear.flashing_row(),
            out,
        );
    }
}

/// Uniform pick from a non-empty table
fn pick<T: Copy, const N: usize>(rng: &mut impl RandomSource, items: &[T; N]) -> T {
    let i = rng.range_inclusive(0, N as u32 - 1) as usize;
    items[i % N]
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(SimpleRng::default(), ThreadPause)
    }
}
