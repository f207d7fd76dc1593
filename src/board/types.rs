//! Cell and grid containers for one layer.

use serde::{Deserialize, Serialize};

/// Player-visible state of a cell. `Revealed` is final.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Flagged,
    Revealed,
}

/// Represents a single cell in a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    /// Whether this cell contains a live mine.
    pub has_mine: bool,
    /// Number of adjacent mines (0-8). Left at 0 for mine cells.
    pub adjacent_mines: u8,
    pub state: CellState,
    /// Mine marker shown while hack mode is on. Never affects gameplay.
    pub hack_visible: bool,
}

impl Cell {
    pub fn is_revealed(&self) -> bool {
        self.state == CellState::Revealed
    }

    /// Hidden or flagged.
    pub fn is_unrevealed(&self) -> bool {
        !self.is_revealed()
    }

    pub fn is_flagged(&self) -> bool {
        self.state == CellState::Flagged
    }
}

/// One layer of the puzzle, indexed as `grid[row][col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub grid: Vec<Vec<Cell>>,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
    mine_count: usize,
}

impl Board {
    /// An empty board: every cell hidden, no mines.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid: vec![vec![Cell::default(); width]; height],
            width,
            height,
            mine_count: 0,
        }
    }

    /// Build a board with mines at the given `(row, col)` positions and
    /// adjacency counts filled in. Out-of-bounds positions are ignored.
    pub fn from_mine_positions(width: usize, height: usize, mines: &[(usize, usize)]) -> Self {
        let mut board = Self::new(width, height);
        for &(row, col) in mines {
            if let Some(cell) = board.get_mut(row, col) {
                cell.has_mine = true;
            }
        }
        board.mine_count = board.cells().filter(|cell| cell.has_mine).count();
        super::generation::calculate_adjacent_counts(&mut board);
        board
    }

    pub(crate) fn set_mine_count(&mut self, mine_count: usize) {
        self.mine_count = mine_count;
    }

    /// Mines placed at generation. Defusing a mine does not change this.
    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn total_cells(&self) -> usize {
        self.width * self.height
    }

    pub fn total_safe_cells(&self) -> usize {
        self.total_cells() - self.mine_count
    }

    pub fn in_bounds(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.grid.get(row).and_then(|cells| cells.get(col))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.grid.get_mut(row).and_then(|cells| cells.get_mut(col))
    }

    /// Bounds-checked lookup for signed coordinates.
    pub fn get_signed(&self, row: i64, col: i64) -> Option<&Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.get(row, col)
    }

    /// True when the cell exists and is hidden or flagged.
    pub fn is_unrevealed(&self, row: usize, col: usize) -> bool {
        self.get(row, col).is_some_and(Cell::is_unrevealed)
    }

    pub fn neighbors(&self, row: usize, col: usize) -> Vec<(usize, usize)> {
        get_neighbors(row, col, self.height, self.width)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.grid.iter().flat_map(|row| row.iter())
    }

    /// Positions of hidden or flagged cells in row-major order.
    pub fn unrevealed_positions(&self) -> Vec<(usize, usize)> {
        let mut positions = Vec::new();
        for (row, cells) in self.grid.iter().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                if cell.is_unrevealed() {
                    positions.push((row, col));
                }
            }
        }
        positions
    }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells().filter(|cell| cell.state == state).count()
    }

    /// Mark every live mine as hack-visible, or clear all markers.
    pub fn set_hack_visibility(&mut self, enabled: bool) {
        for cell in self.grid.iter_mut().flat_map(|row| row.iter_mut()) {
            cell.hack_visible = enabled && cell.has_mine;
        }
    }
}

/// Get valid neighbor coordinates for a cell.
///
/// Returns `(row, col)` pairs for all in-bounds neighbors (up to 8). Edges
/// clamp, they never wrap.
pub fn get_neighbors(row: usize, col: usize, height: usize, width: usize) -> Vec<(usize, usize)> {
    let mut neighbors = Vec::with_capacity(8);

    for d_row in -1i64..=1 {
        for d_col in -1i64..=1 {
            if d_row == 0 && d_col == 0 {
                continue;
            }

            let new_row = row as i64 + d_row;
            let new_col = col as i64 + d_col;

            if new_row >= 0 && new_row < height as i64 && new_col >= 0 && new_col < width as i64 {
                neighbors.push((new_row as usize, new_col as usize));
            }
        }
    }

    neighbors
}
