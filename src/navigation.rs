//! Selection cursor movement that skips revealed cells.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// Directional move commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(d_row, d_col)` for this direction.
    pub fn delta(&self) -> (i64, i64) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }
}

/// Step `value` by `delta` modulo `len`. Returns the new value and whether
/// it crossed an edge.
fn wrap_step(value: usize, delta: i64, len: usize) -> (usize, bool) {
    let len = len as i64;
    let raw = value as i64 + delta;
    let wrapped = raw.rem_euclid(len);
    (wrapped as usize, wrapped != raw)
}

/// Move the cursor from `from` in direction `(d_row, d_col)`, wrapping around
/// the edges, until it lands on a hidden or flagged cell.
///
/// The straight line is walked for at most `max(width, height)` steps. That
/// bound alone can leave the cursor stuck when its row or column is fully
/// revealed, so a second sweep of up to `width * height` steps follows: it
/// carries into the next row (horizontal moves) or column (vertical moves)
/// each time it wraps. The cursor therefore always ends up on an unrevealed
/// cell when one exists, even if that takes more than `max(width, height)`
/// steps. Returns `from` only when every cell is revealed.
pub fn move_selection(board: &Board, from: (usize, usize), d_row: i64, d_col: i64) -> (usize, usize) {
    if board.width == 0 || board.height == 0 || (d_row == 0 && d_col == 0) {
        return from;
    }

    let (mut row, mut col) = from;
    for _ in 0..board.width.max(board.height) {
        row = wrap_step(row, d_row, board.height).0;
        col = wrap_step(col, d_col, board.width).0;
        if board.is_unrevealed(row, col) {
            return (row, col);
        }
    }

    if d_row != 0 && d_col != 0 {
        return next_unrevealed_from(board, from).unwrap_or(from);
    }

    // Straight line exhausted: sweep the rest of the board
    let (mut row, mut col) = from;
    for _ in 0..board.total_cells() {
        if d_col != 0 {
            let (next_col, wrapped) = wrap_step(col, d_col, board.width);
            col = next_col;
            if wrapped {
                row = wrap_step(row, d_col, board.height).0;
            }
        } else {
            let (next_row, wrapped) = wrap_step(row, d_row, board.height);
            row = next_row;
            if wrapped {
                col = wrap_step(col, d_row, board.width).0;
            }
        }
        if board.is_unrevealed(row, col) {
            return (row, col);
        }
    }

    from
}

/// Next unrevealed cell strictly after `from` in row-major order, wrapping.
/// `from` itself is checked last.
pub fn next_unrevealed_from(board: &Board, from: (usize, usize)) -> Option<(usize, usize)> {
    let total = board.total_cells();
    if total == 0 {
        return None;
    }
    let start = (from.0 * board.width + from.1) % total;
    (1..=total)
        .map(|offset| (start + offset) % total)
        .map(|index| (index / board.width, index % board.width))
        .find(|&(row, col)| board.is_unrevealed(row, col))
}

/// Advance to the next unrevealed cell in row-major order.
///
/// If `current` is unrevealed the entry after it is chosen (wrapping to the
/// first); otherwise the first unrevealed cell. `None` when nothing is left.
pub fn cycle_selection(board: &Board, current: (usize, usize)) -> Option<(usize, usize)> {
    let unrevealed = board.unrevealed_positions();
    if unrevealed.is_empty() {
        return None;
    }

    let next_index = match unrevealed.iter().position(|&pos| pos == current) {
        Some(index) => (index + 1) % unrevealed.len(),
        None => 0,
    };
    Some(unrevealed[next_index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    fn reveal_all_except(board: &mut Board, keep: &[(usize, usize)]) {
        for row in 0..board.height {
            for col in 0..board.width {
                if !keep.contains(&(row, col)) {
                    board.grid[row][col].state = CellState::Revealed;
                }
            }
        }
    }

    #[test]
    fn test_move_to_adjacent_hidden() {
        let board = Board::new(5, 5);
        assert_eq!(move_selection(&board, (2, 2), 0, 1), (2, 3));
        assert_eq!(move_selection(&board, (2, 2), -1, 0), (1, 2));
    }

    #[test]
    fn test_move_wraps_around_edges() {
        let board = Board::new(5, 4);
        assert_eq!(move_selection(&board, (0, 4), 0, 1), (0, 0));
        assert_eq!(move_selection(&board, (0, 0), 0, -1), (0, 4));
        assert_eq!(move_selection(&board, (0, 2), -1, 0), (3, 2));
        assert_eq!(move_selection(&board, (3, 2), 1, 0), (0, 2));
    }

    #[test]
    fn test_move_skips_revealed() {
        let mut board = Board::new(5, 5);
        board.grid[2][3].state = CellState::Revealed;
        board.grid[2][4].state = CellState::Revealed;
        assert_eq!(move_selection(&board, (2, 2), 0, 1), (2, 0));
    }

    #[test]
    fn test_move_lands_on_flagged() {
        let mut board = Board::new(3, 3);
        board.grid[1][1].state = CellState::Revealed;
        board.grid[1][2].state = CellState::Flagged;
        assert_eq!(move_selection(&board, (1, 0), 0, 1), (1, 2));
    }

    #[test]
    fn test_move_all_revealed_stays_put() {
        let mut board = Board::new(4, 4);
        reveal_all_except(&mut board, &[]);
        for (d_row, d_col) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            assert_eq!(move_selection(&board, (1, 2), d_row, d_col), (1, 2));
        }
    }

    #[test]
    fn test_move_reaches_last_hidden_from_anywhere() {
        let mut board = Board::new(10, 10);
        reveal_all_except(&mut board, &[(0, 0)]);

        for dir in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            let (d_row, d_col) = dir.delta();
            for row in 0..10 {
                for col in 0..10 {
                    assert_eq!(
                        move_selection(&board, (row, col), d_row, d_col),
                        (0, 0),
                        "{:?} from ({}, {})",
                        dir,
                        row,
                        col
                    );
                }
            }
        }
    }

    #[test]
    fn test_sweep_carries_in_direction_of_travel() {
        let mut board = Board::new(4, 4);
        reveal_all_except(&mut board, &[(3, 1), (0, 2)]);
        // Row 1 is empty, moving right carries into row 2 then row 3
        assert_eq!(move_selection(&board, (1, 1), 0, 1), (3, 1));
        // Column 1 holds (3, 1) directly
        assert_eq!(move_selection(&board, (1, 1), 1, 0), (3, 1));
        // Moving left from row 1 carries backwards into row 0
        assert_eq!(move_selection(&board, (1, 1), 0, -1), (0, 2));
    }

    #[test]
    fn test_cycle_selection_order() {
        let mut board = Board::new(3, 2);
        board.grid[0][1].state = CellState::Revealed;
        board.grid[1][1].state = CellState::Flagged;

        assert_eq!(cycle_selection(&board, (0, 0)), Some((0, 2)));
        assert_eq!(cycle_selection(&board, (0, 2)), Some((1, 0)));
        assert_eq!(cycle_selection(&board, (1, 1)), Some((1, 2)));
        assert_eq!(cycle_selection(&board, (1, 2)), Some((0, 0)));
        // Cursor on a revealed cell jumps to the first entry
        assert_eq!(cycle_selection(&board, (0, 1)), Some((0, 0)));
    }

    #[test]
    fn test_cycle_selection_empty() {
        let mut board = Board::new(2, 2);
        reveal_all_except(&mut board, &[]);
        assert_eq!(cycle_selection(&board, (0, 0)), None);
    }

    #[test]
    fn test_next_unrevealed_from_wraps() {
        let mut board = Board::new(3, 3);
        reveal_all_except(&mut board, &[(0, 1), (2, 2)]);
        assert_eq!(next_unrevealed_from(&board, (1, 1)), Some((2, 2)));
        assert_eq!(next_unrevealed_from(&board, (2, 2)), Some((0, 1)));
        assert_eq!(next_unrevealed_from(&board, (0, 1)), Some((2, 2)));
    }
}
