//! Read-only view of a session for renderers.

use serde::Serialize;

use super::types::{GameSession, SessionPhase};
use crate::board::{Cell, CellState};
use crate::pointer::CameraState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CellView {
    pub state: CellState,
    pub adjacent_mines: u8,
    /// Mine shown to the player: revealed, or marked by hack mode.
    pub mine: bool,
}

impl From<&Cell> for CellView {
    fn from(cell: &Cell) -> Self {
        Self {
            state: cell.state,
            adjacent_mines: cell.adjacent_mines,
            mine: cell.has_mine && (cell.hack_visible || cell.is_revealed()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeView {
    pub row: usize,
    pub col: usize,
    pub problem: String,
    pub input: String,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub timed_out: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PhaseView {
    Playing,
    Defusing,
    LayerComplete,
    GameOver,
    Won,
}

impl From<&SessionPhase> for PhaseView {
    fn from(phase: &SessionPhase) -> Self {
        match phase {
            SessionPhase::Playing => Self::Playing,
            SessionPhase::Defusing(_) => Self::Defusing,
            SessionPhase::LayerComplete { .. } => Self::LayerComplete,
            SessionPhase::GameOver => Self::GameOver,
            SessionPhase::Won => Self::Won,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub width: usize,
    pub height: usize,
    /// `cells[row][col]`.
    pub cells: Vec<Vec<CellView>>,
    pub selection: (usize, usize),
    pub hover: Option<(usize, usize)>,
    pub phase: PhaseView,
    /// One-based layer number for display.
    pub layer: u32,
    pub total_layers: u32,
    pub score: u64,
    pub mine_count: usize,
    pub flags_placed: usize,
    pub safe_cells_revealed: usize,
    pub total_safe_cells: usize,
    pub scanner_charges: u32,
    pub hack_mode: bool,
    pub camera: CameraState,
    pub challenge: Option<ChallengeView>,
}

impl GameSession {
    pub fn snapshot(&self) -> SessionSnapshot {
        let cells = self
            .board
            .grid
            .iter()
            .map(|row| row.iter().map(CellView::from).collect())
            .collect();

        let challenge = self.challenge().map(|challenge| ChallengeView {
            row: challenge.cell.0,
            col: challenge.cell.1,
            problem: challenge.problem.text.clone(),
            input: challenge.input.clone(),
            elapsed_ms: challenge.elapsed_ms,
            remaining_ms: challenge.remaining_ms(),
            timed_out: challenge.is_timed_out(),
        });

        SessionSnapshot {
            width: self.board.width,
            height: self.board.height,
            cells,
            selection: self.selection,
            hover: self.hover,
            phase: PhaseView::from(&self.phase),
            layer: (self.current_layer + 1).min(self.config.total_layers),
            total_layers: self.config.total_layers,
            score: self.score,
            mine_count: self.board.mine_count(),
            flags_placed: self.flags_placed,
            safe_cells_revealed: self.safe_cells_revealed,
            total_safe_cells: self.board.total_safe_cells(),
            scanner_charges: self.scanner_charges,
            hack_mode: self.hack_mode,
            camera: self.camera,
            challenge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::core::GameConfig;
    use crate::session::reveal::reveal_cell;

    fn session() -> GameSession {
        let board = Board::from_mine_positions(4, 4, &[(0, 0), (3, 3)]);
        let config = GameConfig {
            seed: Some(1),
            ..GameConfig::default()
        };
        GameSession::with_board(config, board).unwrap()
    }

    #[test]
    fn test_hidden_mines_stay_hidden() {
        let mut session = session();
        let snapshot = session.snapshot();
        assert!(snapshot.cells.iter().flatten().all(|cell| !cell.mine));
        assert_eq!(snapshot.layer, 1);
        assert_eq!(snapshot.total_safe_cells, 14);
        assert_eq!(snapshot.phase, PhaseView::Playing);

        session.hack_mode = true;
        session.board.set_hack_visibility(true);
        let snapshot = session.snapshot();
        assert!(snapshot.cells[0][0].mine);
        assert!(snapshot.cells[3][3].mine);
    }

    #[test]
    fn test_challenge_view() {
        let mut session = session();
        reveal_cell(&mut session, 0, 0);
        let snapshot = session.snapshot();

        assert_eq!(snapshot.phase, PhaseView::Defusing);
        assert!(snapshot.cells[0][0].mine);
        let challenge = snapshot.challenge.unwrap();
        assert_eq!((challenge.row, challenge.col), (0, 0));
        assert_eq!(challenge.remaining_ms, 5_000);
        assert!(!challenge.timed_out);
        assert!(challenge.problem.ends_with("= ?"));
    }

    #[test]
    fn test_snapshot_serializes() {
        let json = serde_json::to_value(session().snapshot()).unwrap();
        assert_eq!(json["width"], 4);
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["cells"][0][0]["state"], "Hidden");
        assert_eq!(json["camera"]["mode"], "Overview");
    }
}
