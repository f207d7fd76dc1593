//! Screen-to-grid pointer resolution.
//!
//! There is no unprojection here. The pointer is normalised against the
//! viewport and pushed through three fixed affine maps calibrated against the
//! rendered board; the first estimate that lands on an unrevealed cell wins,
//! with a short proximity search as the fallback. The offsets and scales are
//! empirical calibration values for the default camera, not derived geometry.

use serde::{Deserialize, Serialize};

use crate::board::Board;

/// `grid = (normalised - offset) * cells / scale`, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineMap {
    pub offset: f64,
    pub scale: f64,
}

impl AffineMap {
    pub const fn new(offset: f64, scale: f64) -> Self {
        Self { offset, scale }
    }

    /// Truncates toward zero, so small negative values land on cell 0.
    fn apply(&self, normalised: f64, cells: usize) -> i64 {
        ((normalised - self.offset) * cells as f64 / self.scale) as i64
    }
}

pub const FIRST_PERSON_PRIMARY: AffineMap = AffineMap::new(0.025, 0.95);
pub const OVERVIEW_PRIMARY: AffineMap = AffineMap::new(0.115, 0.77);
pub const ALTERNATE: AffineMap = AffineMap::new(0.12, 0.76);
pub const CENTER_WEIGHTED: AffineMap = AffineMap::new(0.118, 0.764);

/// How far the third estimate is pulled toward the screen centre.
pub const CENTER_BIAS: f64 = 0.1 * 0.05;
/// Overview yaw correction: `sin(yaw)` on x, `cos(yaw)` on y.
pub const YAW_CORRECTION_X: f64 = 0.02;
pub const YAW_CORRECTION_Y: f64 = 0.01;
pub const FALLBACK_SEARCH_RADIUS: i64 = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Elevated third-person view of the whole layer.
    #[default]
    Overview,
    /// Close-up view.
    FirstPerson,
}

impl CameraMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Overview => Self::FirstPerson,
            Self::FirstPerson => Self::Overview,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::FirstPerson => "First person",
        }
    }
}

/// Camera parameters the resolver depends on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub mode: CameraMode,
    /// Horizontal camera angle in degrees.
    pub yaw_degrees: f64,
}

/// Size of the surface pointer coordinates are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}

/// The three raw `(row, col)` estimates, in priority order, before clamping.
pub fn candidate_positions(
    x: f64,
    y: f64,
    viewport: Viewport,
    camera: CameraState,
    width: usize,
    height: usize,
) -> [(i64, i64); 3] {
    let norm_x = x / viewport.width;
    let norm_y = y / viewport.height;

    let primary = match camera.mode {
        CameraMode::FirstPerson => (
            FIRST_PERSON_PRIMARY.apply(norm_y, height),
            FIRST_PERSON_PRIMARY.apply(norm_x, width),
        ),
        CameraMode::Overview => {
            let yaw = camera.yaw_degrees.to_radians();
            let map_x = norm_x + yaw.sin() * YAW_CORRECTION_X;
            let map_y = norm_y + yaw.cos() * YAW_CORRECTION_Y;
            (
                OVERVIEW_PRIMARY.apply(map_y, height),
                OVERVIEW_PRIMARY.apply(map_x, width),
            )
        }
    };

    let alternate = (ALTERNATE.apply(norm_y, height), ALTERNATE.apply(norm_x, width));

    let weighted_x = norm_x + (0.5 - norm_x) * CENTER_BIAS;
    let weighted_y = norm_y + (0.5 - norm_y) * CENTER_BIAS;
    let weighted = (
        CENTER_WEIGHTED.apply(weighted_y, height),
        CENTER_WEIGHTED.apply(weighted_x, width),
    );

    [primary, alternate, weighted]
}

fn clamp_to_board(board: &Board, (row, col): (i64, i64)) -> (usize, usize) {
    (
        row.clamp(0, board.height as i64 - 1) as usize,
        col.clamp(0, board.width as i64 - 1) as usize,
    )
}

/// Resolve a pointer position to the best matching unrevealed cell.
///
/// Returns `None` for an empty viewport or when no hidden or flagged cell
/// lies within [`FALLBACK_SEARCH_RADIUS`] of the estimates.
pub fn resolve_pointer(
    board: &Board,
    x: f64,
    y: f64,
    viewport: Viewport,
    camera: CameraState,
) -> Option<(usize, usize)> {
    if viewport.is_empty() || board.width == 0 || board.height == 0 {
        return None;
    }

    let candidates = candidate_positions(x, y, viewport, camera, board.width, board.height)
        .map(|candidate| clamp_to_board(board, candidate));

    if let Some(&hit) = candidates
        .iter()
        .find(|&&(row, col)| board.is_unrevealed(row, col))
    {
        return Some(hit);
    }

    let count = candidates.len() as f64;
    let center_row = (candidates.iter().map(|c| c.0 as f64).sum::<f64>() / count) as i64;
    let center_col = (candidates.iter().map(|c| c.1 as f64).sum::<f64>() / count) as i64;

    nearest_unrevealed(board, (center_row, center_col), FALLBACK_SEARCH_RADIUS)
}

/// Closest unrevealed cell to `center` within rings `1..=max_radius`, by
/// Euclidean distance. `center` itself is never a result. Ties go to the
/// first cell in ring scan order (inner rings first, row-major within a ring).
pub fn nearest_unrevealed(
    board: &Board,
    center: (i64, i64),
    max_radius: i64,
) -> Option<(usize, usize)> {
    let mut best: Option<((usize, usize), f64)> = None;

    for radius in 1..=max_radius {
        for d_row in -radius..=radius {
            for d_col in -radius..=radius {
                if d_row.abs().max(d_col.abs()) != radius {
                    continue;
                }

                let (row, col) = (center.0 + d_row, center.1 + d_col);
                let eligible = board.get_signed(row, col).is_some_and(|cell| cell.is_unrevealed());
                if !eligible {
                    continue;
                }

                let distance = ((d_row * d_row + d_col * d_col) as f64).sqrt();
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some(((row as usize, col as usize), distance));
                }
            }
        }
    }

    best.map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CellState;

    const VIEWPORT: Viewport = Viewport {
        width: 1000.0,
        height: 1000.0,
    };

    fn overview() -> CameraState {
        CameraState::default()
    }

    fn first_person() -> CameraState {
        CameraState {
            mode: CameraMode::FirstPerson,
            yaw_degrees: 0.0,
        }
    }

    fn revealed_board_except(keep: &[(usize, usize)]) -> Board {
        let mut board = Board::new(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                if !keep.contains(&(row, col)) {
                    board.grid[row][col].state = CellState::Revealed;
                }
            }
        }
        board
    }

    #[test]
    fn test_direct_hit_on_fresh_board() {
        let board = Board::new(10, 10);
        // norm (0.4, 0.4) lands on (3, 3) under every map
        assert_eq!(
            resolve_pointer(&board, 400.0, 400.0, VIEWPORT, overview()),
            Some((3, 3))
        );
        assert_eq!(
            resolve_pointer(&board, 240.0, 160.0, Viewport::new(1200.0, 800.0), overview()),
            Some((1, 1))
        );
    }

    #[test]
    fn test_candidates_agree_in_open_area() {
        let candidates = candidate_positions(400.0, 400.0, VIEWPORT, overview(), 10, 10);
        assert_eq!(candidates, [(3, 3), (3, 3), (3, 3)]);
    }

    #[test]
    fn test_camera_mode_changes_primary_map() {
        let overview_primary = candidate_positions(150.0, 700.0, VIEWPORT, overview(), 10, 10)[0];
        let close_primary = candidate_positions(150.0, 700.0, VIEWPORT, first_person(), 10, 10)[0];
        assert_eq!(overview_primary.1, 0);
        assert_eq!(close_primary.1, 1);
    }

    #[test]
    fn test_yaw_shifts_overview_primary() {
        let straight = candidate_positions(190.0, 400.0, VIEWPORT, overview(), 10, 10)[0];
        let turned = CameraState {
            mode: CameraMode::Overview,
            yaw_degrees: 90.0,
        };
        let rotated = candidate_positions(190.0, 400.0, VIEWPORT, turned, 10, 10)[0];
        assert_eq!(straight.1, 0);
        assert_eq!(rotated.1, 1);
    }

    #[test]
    fn test_yaw_ignored_in_first_person() {
        let turned = CameraState {
            mode: CameraMode::FirstPerson,
            yaw_degrees: 90.0,
        };
        assert_eq!(
            candidate_positions(190.0, 400.0, VIEWPORT, turned, 10, 10),
            candidate_positions(190.0, 400.0, VIEWPORT, first_person(), 10, 10)
        );
    }

    #[test]
    fn test_out_of_range_candidates_are_clamped() {
        let board = Board::new(10, 10);
        assert_eq!(
            resolve_pointer(&board, 5000.0, 5000.0, VIEWPORT, overview()),
            Some((9, 9))
        );
        assert_eq!(
            resolve_pointer(&board, -300.0, -300.0, VIEWPORT, overview()),
            Some((0, 0))
        );
    }

    #[test]
    fn test_fallback_finds_cell_within_radius_two() {
        // Every estimate lands on revealed (3, 3); the only nearby hidden
        // cell is two rows down and one column right.
        let board = revealed_board_except(&[(5, 4), (7, 3)]);
        assert_eq!(
            resolve_pointer(&board, 400.0, 400.0, VIEWPORT, overview()),
            Some((5, 4))
        );
    }

    #[test]
    fn test_fallback_accepts_flagged_cells() {
        let mut board = revealed_board_except(&[(4, 4)]);
        board.grid[4][4].state = CellState::Flagged;
        assert_eq!(
            resolve_pointer(&board, 400.0, 400.0, VIEWPORT, overview()),
            Some((4, 4))
        );
    }

    #[test]
    fn test_fallback_ties_use_scan_order() {
        let board = revealed_board_except(&[(4, 3), (2, 3)]);
        assert_eq!(
            resolve_pointer(&board, 400.0, 400.0, VIEWPORT, overview()),
            Some((2, 3))
        );
    }

    #[test]
    fn test_fallback_prefers_true_distance_over_ring() {
        // (0, 0) is a ring-3 corner (distance ~4.24), (7, 3) a ring-4 edge (4.0)
        let board = revealed_board_except(&[(0, 0), (7, 3)]);
        assert_eq!(nearest_unrevealed(&board, (3, 3), 4), Some((7, 3)));
    }

    #[test]
    fn test_fallback_skips_center_cell() {
        let board = revealed_board_except(&[(3, 3), (3, 5)]);
        assert_eq!(nearest_unrevealed(&board, (3, 3), 4), Some((3, 5)));

        let board = revealed_board_except(&[(3, 3)]);
        assert_eq!(nearest_unrevealed(&board, (3, 3), 4), None);
    }

    #[test]
    fn test_nothing_within_radius() {
        let board = revealed_board_except(&[(9, 9)]);
        assert_eq!(resolve_pointer(&board, 400.0, 400.0, VIEWPORT, overview()), None);
    }

    #[test]
    fn test_empty_viewport() {
        let board = Board::new(10, 10);
        let viewport = Viewport::new(0.0, 800.0);
        assert_eq!(resolve_pointer(&board, 10.0, 10.0, viewport, overview()), None);
    }
}
