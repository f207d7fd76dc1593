//! Mine placement and adjacency counting.

use rand::Rng;

use super::types::{get_neighbors, Board};
use crate::core::config::validate_board_params;
use crate::core::error::Result;

/// `floor(width * height * density)`.
pub fn mine_count_for(width: usize, height: usize, mine_density: f64) -> usize {
    ((width * height) as f64 * mine_density).floor() as usize
}

/// Generate a fresh layer with mines placed and adjacency counts filled in.
///
/// Fails on zero dimensions or a density outside [0, 1); nothing is clamped.
pub fn generate_board<R: Rng>(
    width: usize,
    height: usize,
    mine_density: f64,
    rng: &mut R,
) -> Result<Board> {
    validate_board_params(width, height, mine_density)?;

    let mut board = Board::new(width, height);
    let mine_count = mine_count_for(width, height, mine_density);
    place_mines(&mut board, mine_count, rng);
    calculate_adjacent_counts(&mut board);

    tracing::debug!(width, height, mine_count, "generated layer");
    Ok(board)
}

/// Place exactly `mine_count` mines by rejection sampling.
///
/// Coordinates are drawn uniformly until `mine_count` distinct cells are
/// mined; a draw landing on an existing mine is discarded. The caller must
/// keep `mine_count` below the cell count.
pub fn place_mines<R: Rng>(board: &mut Board, mine_count: usize, rng: &mut R) {
    debug_assert!(mine_count < board.total_cells() || mine_count == 0);

    let mut mines_placed = 0;
    while mines_placed < mine_count {
        let row = rng.gen_range(0..board.height);
        let col = rng.gen_range(0..board.width);
        let cell = &mut board.grid[row][col];
        if !cell.has_mine {
            cell.has_mine = true;
            mines_placed += 1;
        }
    }

    board.set_mine_count(mine_count);
}

/// Calculate adjacent mine counts for all non-mine cells.
pub fn calculate_adjacent_counts(board: &mut Board) {
    for row in 0..board.height {
        for col in 0..board.width {
            if board.grid[row][col].has_mine {
                continue;
            }

            let count = get_neighbors(row, col, board.height, board.width)
                .into_iter()
                .filter(|&(n_row, n_col)| board.grid[n_row][n_col].has_mine)
                .count();

            board.grid[row][col].adjacent_mines = count as u8;
        }
    }
}
