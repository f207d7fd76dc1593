//! Integration test: cursor navigation and pointer resolution
//!
//! Randomised reveal states check that movement always lands on an
//! unrevealed cell, and scripted scenarios exercise pointer fallback through
//! the session.

use clover::board::{Board, CellState};
use clover::navigation::{cycle_selection, move_selection, Direction};
use clover::pointer::{resolve_pointer, CameraState, Viewport};
use clover::session::PointerButton;
use clover::{process_input, GameConfig, GameInput, GameSession, SessionEvent};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

fn random_reveal_state(rng: &mut ChaCha8Rng) -> Board {
    let width = rng.gen_range(1..=12);
    let height = rng.gen_range(1..=12);
    let revealed = rng.gen_range(0.0..1.0);
    let mut board = Board::new(width, height);
    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(revealed) {
                board.grid[row][col].state = CellState::Revealed;
            } else if rng.gen_bool(0.2) {
                board.grid[row][col].state = CellState::Flagged;
            }
        }
    }
    board
}

#[test]
fn test_move_always_lands_on_unrevealed() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for _ in 0..200 {
        let board = random_reveal_state(&mut rng);
        let any_unrevealed = board.cells().any(|cell| cell.is_unrevealed());

        for row in 0..board.height {
            for col in 0..board.width {
                for dir in DIRECTIONS {
                    let (d_row, d_col) = dir.delta();
                    let next = move_selection(&board, (row, col), d_row, d_col);
                    if any_unrevealed {
                        assert!(
                            board.is_unrevealed(next.0, next.1),
                            "{:?} from ({}, {}) on {}x{} landed on revealed {:?}",
                            dir,
                            row,
                            col,
                            board.width,
                            board.height,
                            next
                        );
                    } else {
                        assert_eq!(next, (row, col));
                    }
                }
            }
        }
    }
}

#[test]
fn test_cycle_visits_every_unrevealed_cell() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    for _ in 0..50 {
        let board = random_reveal_state(&mut rng);
        let unrevealed = board.unrevealed_positions();
        let Some(&start) = unrevealed.first() else {
            assert_eq!(cycle_selection(&board, (0, 0)), None);
            continue;
        };

        let mut visited = vec![start];
        let mut current = start;
        for _ in 1..unrevealed.len() {
            current = cycle_selection(&board, current).unwrap();
            visited.push(current);
        }
        assert_eq!(visited, unrevealed);
        assert_eq!(cycle_selection(&board, current), Some(start));
    }
}

#[test]
fn test_pointer_result_is_always_unrevealed() {
    let mut rng = ChaCha8Rng::seed_from_u64(31);
    let viewport = Viewport::new(1200.0, 800.0);

    for _ in 0..100 {
        let board = random_reveal_state(&mut rng);
        let x = rng.gen_range(-100.0..1300.0);
        let y = rng.gen_range(-100.0..900.0);
        if let Some((row, col)) = resolve_pointer(&board, x, y, viewport, CameraState::default()) {
            assert!(board.is_unrevealed(row, col));
        }
    }
}

#[test]
fn test_pointer_press_uses_fallback_search() {
    let mut board = Board::new(10, 10);
    for row in 0..10 {
        for col in 0..10 {
            if (row, col) != (5, 4) && (row, col) != (7, 3) {
                board.grid[row][col].state = CellState::Revealed;
            }
        }
    }
    let config = GameConfig {
        seed: Some(1),
        ..GameConfig::default()
    };
    let mut session = GameSession::with_board(config, board).unwrap();
    process_input(
        &mut session,
        GameInput::Resize(Viewport::new(1000.0, 1000.0)),
    );

    // All three estimates land on revealed (3, 3); (5, 4) is the nearest
    // hidden cell.
    let events = process_input(
        &mut session,
        GameInput::PointerPressed {
            x: 400.0,
            y: 400.0,
            button: PointerButton::Primary,
        },
    );

    assert_eq!(
        events,
        vec![
            SessionEvent::SelectionMoved { row: 5, col: 4 },
            SessionEvent::CellsRevealed { count: 1 },
            SessionEvent::SelectionMoved { row: 7, col: 3 },
        ]
    );
    assert!(session.board.grid[5][4].is_revealed());
}

#[test]
fn test_pointer_miss_changes_nothing() {
    let mut board = Board::new(10, 10);
    for row in 0..10 {
        for col in 0..10 {
            if (row, col) != (9, 9) {
                board.grid[row][col].state = CellState::Revealed;
            }
        }
    }
    let config = GameConfig {
        seed: Some(1),
        ..GameConfig::default()
    };
    let mut session = GameSession::with_board(config, board).unwrap();
    session.viewport = Viewport::new(1000.0, 1000.0);
    let selection = session.selection;

    let events = process_input(
        &mut session,
        GameInput::PointerPressed {
            x: 400.0,
            y: 400.0,
            button: PointerButton::Secondary,
        },
    );
    assert!(events.is_empty());
    assert_eq!(session.selection, selection);
    assert_eq!(session.flags_placed, 0);
}
