//! Board model and generator for a single layer.

pub mod generation;
pub mod types;

pub use generation::{calculate_adjacent_counts, generate_board, mine_count_for, place_mines};
pub use types::{get_neighbors, Board, Cell, CellState};
