//! Integration test for the path from game state to panel dots
//!
//! Builds games headlessly, composes frames and pushes them through a
//! `PanelRenderer` backed by a `RecordingSink`.

use flipdot_tetris::core::{compose, occupied_cells, ActivePiece, Board, GameState};
use flipdot_tetris::panel::{DotImage, PanelRenderer, RecordingSink, PANEL_COLS, PANEL_ROWS};
use flipdot_tetris::types::{
    ActionOutcome, PieceKind, Rotation, BLOCK, BOARD_HEIGHT, EMPTY, LOCKED, PIVOT,
};

/// Hardware dot for board cell `(x, y)` after the sideways mount and the
/// reversed column addressing
fn hardware_dot(x: i8, y: i8) -> (usize, usize) {
    (x as usize, y as usize)
}

#[test]
fn test_compose_never_touches_board() {
    let mut state = GameState::headless(3);
    state.init_game();
    let board_before = state.board().clone();
    let _ = state.compose_frame();
    assert_eq!(state.board(), &board_before);
    assert_eq!(state.board().occupied_count(), 0);
}

#[test]
fn test_frame_shows_block_and_pivot_values() {
    let mut board = Board::new();
    board.set(0, 31, LOCKED);
    let piece = ActivePiece::new(PieceKind::L, Rotation::North, 4, 10);
    let frame = compose(&board, Some(&piece), None);

    assert_eq!(frame.get(0, 31), Some(LOCKED));
    for (dx, dy, value) in occupied_cells(PieceKind::L, Rotation::North) {
        assert_eq!(frame.get(4 + dx, 10 + dy), Some(value));
        assert!(value == BLOCK || value == PIVOT);
    }
    let lit = frame.cells().iter().filter(|&&c| c != EMPTY).count();
    assert_eq!(lit, 5);
}

#[test]
fn test_locked_and_active_cells_reach_the_panel() {
    let mut state = GameState::headless(7);
    state.init_game();
    state.set_active(ActivePiece::new(PieceKind::O, Rotation::North, 0, 0));
    assert_eq!(state.hard_drop(), ActionOutcome::Locked { lines_cleared: 0 });
    state.set_active(ActivePiece::new(PieceKind::T, Rotation::South, 5, 10));

    let mut renderer = PanelRenderer::new(RecordingSink::new());
    renderer.draw_frame(&state.compose_frame()).unwrap();

    let frame = state.compose_frame();
    let sink = renderer.sink();
    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..12 {
            let (row, col) = hardware_dot(x, y);
            assert_eq!(sink.is_on(row, col), frame.is_lit(x, y), "({x}, {y})");
        }
    }
    // O landed on the floor in columns 2 and 3
    assert!(sink.is_on(2, 31) && sink.is_on(3, 30));
}

#[test]
fn test_moving_piece_flips_only_changed_dots() {
    let mut state = GameState::headless(7);
    state.init_game();
    state.set_active(ActivePiece::new(PieceKind::I, Rotation::North, 4, 10));

    let mut renderer = PanelRenderer::new(RecordingSink::new());
    renderer.draw_frame(&state.compose_frame()).unwrap();
    renderer.sink_mut().clear_flips();

    // One row down: the top block goes dark, a new block appears under the bottom
    assert!(state.try_move(0, 1));
    let flips = renderer.draw_frame(&state.compose_frame()).unwrap();
    assert_eq!(flips, 2);
    let mut changed: Vec<_> = renderer
        .sink()
        .flips()
        .iter()
        .map(|f| (f.row, f.col, f.on))
        .collect();
    changed.sort();
    assert_eq!(changed, vec![(6, 11, false), (6, 15, true)]);
}

#[test]
fn test_line_clear_blinks_on_the_panel() {
    let mut state = GameState::headless(21);
    state.init_game();
    for x in [0, 4] {
        state.set_active(ActivePiece::new(PieceKind::I, Rotation::West, x, 0));
        state.hard_drop();
    }

    let mut renderer = PanelRenderer::new(RecordingSink::new());
    renderer.draw_frame(&state.compose_frame()).unwrap();

    state.set_active(ActivePiece::new(PieceKind::I, Rotation::West, 8, 0));
    let mut bottom_row_states = Vec::new();
    let mut draw_errors = 0;
    let outcome = state.hard_drop_with(|frame| {
        if renderer.draw_frame(frame).is_err() {
            draw_errors += 1;
        }
        let sink = renderer.sink();
        bottom_row_states.push((0..12).all(|x| sink.is_on(x, 31)));
    });

    assert_eq!(draw_errors, 0);
    assert_eq!(outcome, ActionOutcome::Locked { lines_cleared: 1 });
    assert_eq!(bottom_row_states, vec![true, false, true, false]);
}

#[test]
fn test_game_over_text_replaces_board() {
    let mut renderer = PanelRenderer::new(RecordingSink::new());
    renderer.fill(true).unwrap();

    let flips = renderer.draw_text("GAME").unwrap();
    let expected = DotImage::text("GAME");
    assert_eq!(flips, PANEL_ROWS * PANEL_COLS - expected.lit_count());
    assert_eq!(renderer.shown(), Some(&expected));

    // Image column c is hardware column 31 - c
    let sink = renderer.sink();
    for row in 0..PANEL_ROWS {
        for col in 0..PANEL_COLS {
            assert_eq!(
                sink.is_on(row, PANEL_COLS - 1 - col),
                expected.get(row, col).unwrap()
            );
        }
    }
}
