//! Reveal engine: cell reveals, flood fill, flags, the scanner, defuse
//! resolution, and layer progression.

use super::types::{GameSession, SessionPhase};
use crate::board::CellState;
use crate::challenge::{check_answer, start_challenge};
use crate::core::constants::{
    DEFUSE_BONUS_POINTS, LAYER_COMPLETE_BONUS, SAFE_REVEAL_POINTS, VICTORY_BONUS,
};
use crate::navigation::next_unrevealed_from;

/// What a single reveal request did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Wrong phase, out of bounds, or the cell was not hidden.
    NoChange,
    /// Safe cells revealed, the clicked cell included.
    Revealed(usize),
    /// A mine was revealed and a defuse challenge started.
    MineTriggered,
    /// The reveal finished the layer.
    LayerComplete(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeResolution {
    Defused { row: usize, col: usize },
    Detonated { row: usize, col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerAdvance {
    /// Zero-based index of the new layer.
    NextLayer(u32),
    Victory,
}

fn complete_layer(session: &mut GameSession) {
    session.score += LAYER_COMPLETE_BONUS;
    session.phase = SessionPhase::LayerComplete { elapsed_ms: 0 };
    tracing::info!(
        layer = session.current_layer + 1,
        score = session.score,
        "layer complete"
    );
}

/// Count a safe cell as revealed. Returns true when that finished the layer.
fn record_safe_cell(session: &mut GameSession, points: u64) -> bool {
    session.safe_cells_revealed += 1;
    session.score += points;
    if session.safe_cells_revealed >= session.board.total_safe_cells() {
        complete_layer(session);
        true
    } else {
        false
    }
}

/// Reveal a hidden safe cell and count it.
fn reveal_safe(session: &mut GameSession, row: usize, col: usize, points: u64) -> bool {
    session.board.grid[row][col].state = CellState::Revealed;
    record_safe_cell(session, points)
}

/// Reveal the cell at `(row, col)`.
///
/// A mine starts a defuse challenge. A safe cell scores and, if it has no
/// adjacent mines, flood-fills outward through hidden neighbors. Flagged
/// cells are never revealed. The layer completes as soon as the last safe
/// cell is counted; any remaining flood work is dropped.
pub fn reveal_cell(session: &mut GameSession, row: usize, col: usize) -> RevealOutcome {
    if !session.phase.is_playing() {
        return RevealOutcome::NoChange;
    }
    let cell = match session.board.get(row, col) {
        Some(cell) if cell.state == CellState::Hidden => *cell,
        _ => return RevealOutcome::NoChange,
    };

    if cell.has_mine {
        session.board.grid[row][col].state = CellState::Revealed;
        let challenge = start_challenge(
            (row, col),
            &mut session.problem_history,
            &session.config,
            &mut session.rng,
        );
        session.phase = SessionPhase::Defusing(challenge);
        return RevealOutcome::MineTriggered;
    }

    let mut revealed = 1;
    if reveal_safe(session, row, col, SAFE_REVEAL_POINTS) {
        return RevealOutcome::LayerComplete(revealed);
    }

    let mut stack = Vec::new();
    if cell.adjacent_mines == 0 {
        stack.push((row, col));
    }

    while let Some((r, c)) = stack.pop() {
        for (nr, nc) in session.board.neighbors(r, c) {
            let neighbor = session.board.grid[nr][nc];
            if neighbor.state != CellState::Hidden || neighbor.has_mine {
                continue;
            }

            revealed += 1;
            if reveal_safe(session, nr, nc, SAFE_REVEAL_POINTS) {
                return RevealOutcome::LayerComplete(revealed);
            }
            if neighbor.adjacent_mines == 0 {
                stack.push((nr, nc));
            }
        }
    }

    tracing::debug!(row, col, revealed, "cells revealed");
    RevealOutcome::Revealed(revealed)
}

/// Toggle a flag on a hidden or flagged cell. Returns true if the cell
/// changed.
pub fn toggle_flag(session: &mut GameSession, row: usize, col: usize) -> bool {
    if !session.phase.is_playing() {
        return false;
    }
    let Some(cell) = session.board.get_mut(row, col) else {
        return false;
    };

    match cell.state {
        CellState::Hidden => {
            cell.state = CellState::Flagged;
            session.flags_placed += 1;
            true
        }
        CellState::Flagged => {
            cell.state = CellState::Hidden;
            session.flags_placed = session.flags_placed.saturating_sub(1);
            true
        }
        CellState::Revealed => false,
    }
}

/// Spend a scanner charge on the 3x3 block around the selection.
///
/// Hidden safe cells are revealed without points and without flood fill.
/// Mines and flagged cells are left alone. Returns how many cells were
/// revealed, or `None` if no charge could be spent.
pub fn use_scanner(session: &mut GameSession) -> Option<usize> {
    if !session.phase.is_playing() || session.scanner_charges == 0 {
        return None;
    }
    let (row, col) = session.selection;
    if !session.board.in_bounds(row, col) {
        return None;
    }

    session.scanner_charges -= 1;
    let mut revealed = 0;

    for d_row in -1i64..=1 {
        for d_col in -1i64..=1 {
            let (r, c) = (row as i64 + d_row, col as i64 + d_col);
            let target = match session.board.get_signed(r, c) {
                Some(cell) if cell.state == CellState::Hidden && !cell.has_mine => {
                    (r as usize, c as usize)
                }
                _ => continue,
            };

            revealed += 1;
            if reveal_safe(session, target.0, target.1, 0) {
                return Some(revealed);
            }
        }
    }

    tracing::info!(
        row,
        col,
        revealed,
        charges_left = session.scanner_charges,
        "scanner used"
    );
    Some(revealed)
}

/// Settle the pending defuse challenge.
///
/// On success the mine is removed, the cell stays revealed with its own
/// adjacency count, and it counts toward the layer like any safe cell.
/// Neighbor counts are not recomputed. On failure the session is over.
pub fn resolve_challenge(session: &mut GameSession, success: bool) -> Option<ChallengeResolution> {
    let (row, col) = session.challenge()?.cell;

    if !success {
        session.phase = SessionPhase::GameOver;
        tracing::info!(row, col, score = session.score, "mine detonated");
        return Some(ChallengeResolution::Detonated { row, col });
    }

    let adjacent = session
        .board
        .neighbors(row, col)
        .into_iter()
        .filter(|&(r, c)| session.board.grid[r][c].has_mine)
        .count() as u8;

    let cell = &mut session.board.grid[row][col];
    cell.has_mine = false;
    cell.hack_visible = false;
    cell.adjacent_mines = adjacent;
    cell.state = CellState::Revealed;

    session.phase = SessionPhase::Playing;
    tracing::info!(row, col, "mine defused");
    record_safe_cell(session, DEFUSE_BONUS_POINTS);
    Some(ChallengeResolution::Defused { row, col })
}

/// Check `raw` against the pending challenge and resolve it.
pub fn submit_answer(session: &mut GameSession, raw: &str) -> Option<ChallengeResolution> {
    let correct = check_answer(session.challenge()?, raw);
    resolve_challenge(session, correct)
}

/// Move past a completed layer: either generate the next one or finish the
/// game with the victory bonus.
pub fn advance_layer(session: &mut GameSession) -> Option<LayerAdvance> {
    if !session.is_layer_complete() {
        return None;
    }

    session.current_layer += 1;
    if session.current_layer >= session.config.total_layers {
        session.score += VICTORY_BONUS;
        session.phase = SessionPhase::Won;
        tracing::info!(score = session.score, "all layers cleared");
        return Some(LayerAdvance::Victory);
    }

    if let Err(err) = session.start_layer() {
        tracing::error!(error = %err, "failed to generate next layer");
        session.phase = SessionPhase::GameOver;
        return None;
    }
    tracing::info!(
        layer = session.current_layer + 1,
        mines = session.board.mine_count(),
        "layer started"
    );
    Some(LayerAdvance::NextLayer(session.current_layer))
}

/// Keep the cursor off revealed cells. Returns true if it moved.
pub fn ensure_selection_unrevealed(session: &mut GameSession) -> bool {
    let (row, col) = session.selection;
    if session.board.is_unrevealed(row, col) {
        return false;
    }
    match next_unrevealed_from(&session.board, session.selection) {
        Some(next) => {
            session.selection = next;
            true
        }
        None => false,
    }
}
