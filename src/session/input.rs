//! Input routing and the per-frame tick.
//!
//! Frontends translate their own key and mouse events into [`GameInput`] and
//! call [`tick`] once per frame; both return the [`SessionEvent`]s that
//! resulted so the frontend can react without diffing state.

use super::reveal::{
    advance_layer, ensure_selection_unrevealed, resolve_challenge, reveal_cell, submit_answer,
    toggle_flag, use_scanner, ChallengeResolution, LayerAdvance, RevealOutcome,
};
use super::types::{GameSession, SessionPhase};
use crate::challenge::{apply_key, tick_challenge, ChallengeKey, ChallengeTick, KeyResult};
use crate::navigation::{cycle_selection, move_selection, Direction};
use crate::pointer::{resolve_pointer, CameraMode, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Reveal.
    Primary,
    /// Flag.
    Secondary,
}

/// A player command, independent of the device that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameInput {
    Move(Direction),
    CycleSelection,
    RevealSelected,
    ToggleFlagSelected,
    UseScanner,
    ToggleHackMode,
    ToggleCameraMode,
    /// Rotate the overview camera by this many degrees.
    RotateCamera(f64),
    Reset,
    Resize(Viewport),
    PointerMoved { x: f64, y: f64 },
    PointerPressed { x: f64, y: f64, button: PointerButton },
    Challenge(ChallengeKey),
}

/// Something that happened in the session as a result of input or time.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    SelectionMoved { row: usize, col: usize },
    CellsRevealed { count: usize },
    MineTriggered { row: usize, col: usize, problem: String },
    FlagToggled { row: usize, col: usize, flagged: bool },
    ScannerUsed { revealed: usize, charges_left: u32 },
    HackModeToggled(bool),
    CameraModeChanged(CameraMode),
    MineDefused { row: usize, col: usize },
    MineDetonated { row: usize, col: usize, timed_out: bool },
    /// Zero-based index of the layer just cleared.
    LayerComplete { layer: u32 },
    /// Zero-based index of the layer just started.
    LayerAdvanced { layer: u32 },
    GameWon { score: u64 },
    SessionReset,
}

fn reveal_at(session: &mut GameSession, row: usize, col: usize, events: &mut Vec<SessionEvent>) {
    match reveal_cell(session, row, col) {
        RevealOutcome::NoChange => {}
        RevealOutcome::Revealed(count) => events.push(SessionEvent::CellsRevealed { count }),
        RevealOutcome::MineTriggered => {
            let problem = session
                .challenge()
                .map(|challenge| challenge.problem.text.clone())
                .unwrap_or_default();
            events.push(SessionEvent::MineTriggered { row, col, problem });
        }
        RevealOutcome::LayerComplete(count) => {
            events.push(SessionEvent::CellsRevealed { count });
            events.push(SessionEvent::LayerComplete {
                layer: session.current_layer,
            });
        }
    }
    follow_selection(session, events);
}

fn flag_at(session: &mut GameSession, row: usize, col: usize, events: &mut Vec<SessionEvent>) {
    if toggle_flag(session, row, col) {
        let flagged = session.board.grid[row][col].is_flagged();
        events.push(SessionEvent::FlagToggled { row, col, flagged });
    }
}

fn follow_selection(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    if session.phase.is_playing() && ensure_selection_unrevealed(session) {
        let (row, col) = session.selection;
        events.push(SessionEvent::SelectionMoved { row, col });
    }
}

fn set_selection(session: &mut GameSession, next: (usize, usize), events: &mut Vec<SessionEvent>) {
    if next != session.selection {
        session.selection = next;
        events.push(SessionEvent::SelectionMoved {
            row: next.0,
            col: next.1,
        });
    }
}

fn push_resolution(
    session: &GameSession,
    resolution: ChallengeResolution,
    timed_out: bool,
    events: &mut Vec<SessionEvent>,
) {
    match resolution {
        ChallengeResolution::Defused { row, col } => {
            events.push(SessionEvent::MineDefused { row, col });
            if session.is_layer_complete() {
                events.push(SessionEvent::LayerComplete {
                    layer: session.current_layer,
                });
            }
        }
        ChallengeResolution::Detonated { row, col } => {
            events.push(SessionEvent::MineDetonated {
                row,
                col,
                timed_out,
            });
        }
    }
}

fn handle_challenge_key(session: &mut GameSession, key: ChallengeKey, events: &mut Vec<SessionEvent>) {
    let SessionPhase::Defusing(challenge) = &mut session.phase else {
        return;
    };
    if let KeyResult::Submitted(raw) = apply_key(challenge, key) {
        if let Some(resolution) = submit_answer(session, &raw) {
            push_resolution(session, resolution, false, events);
            follow_selection(session, events);
        }
    }
}

fn reset_session(session: &mut GameSession, events: &mut Vec<SessionEvent>) {
    match session.reset() {
        Ok(()) => events.push(SessionEvent::SessionReset),
        Err(err) => tracing::error!(error = %err, "reset failed"),
    }
}

/// Apply one player command.
///
/// While a defuse challenge is pending only challenge keystrokes and resizes
/// are accepted. Once a layer is complete, or the game has ended, board
/// commands are ignored but reset and camera controls still work.
pub fn process_input(session: &mut GameSession, input: GameInput) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    match input {
        GameInput::Resize(viewport) => {
            session.viewport = viewport;
            return events;
        }
        GameInput::Challenge(key) => {
            handle_challenge_key(session, key, &mut events);
            return events;
        }
        _ if session.phase.is_defusing() => return events,
        GameInput::Reset => {
            reset_session(session, &mut events);
            return events;
        }
        GameInput::ToggleCameraMode => {
            session.camera.mode = session.camera.mode.toggled();
            events.push(SessionEvent::CameraModeChanged(session.camera.mode));
            return events;
        }
        GameInput::RotateCamera(degrees) => {
            session.camera.yaw_degrees = (session.camera.yaw_degrees + degrees).rem_euclid(360.0);
            return events;
        }
        GameInput::ToggleHackMode => {
            session.hack_mode = !session.hack_mode;
            session.board.set_hack_visibility(session.hack_mode);
            events.push(SessionEvent::HackModeToggled(session.hack_mode));
            return events;
        }
        _ if !session.phase.is_playing() => return events,
        _ => {}
    }

    match input {
        GameInput::Move(direction) => {
            let (d_row, d_col) = direction.delta();
            let next = move_selection(&session.board, session.selection, d_row, d_col);
            set_selection(session, next, &mut events);
        }
        GameInput::CycleSelection => {
            if let Some(next) = cycle_selection(&session.board, session.selection) {
                set_selection(session, next, &mut events);
            }
        }
        GameInput::RevealSelected => {
            let (row, col) = session.selection;
            reveal_at(session, row, col, &mut events);
        }
        GameInput::ToggleFlagSelected => {
            let (row, col) = session.selection;
            flag_at(session, row, col, &mut events);
        }
        GameInput::UseScanner => {
            if let Some(revealed) = use_scanner(session) {
                events.push(SessionEvent::ScannerUsed {
                    revealed,
                    charges_left: session.scanner_charges,
                });
                if session.is_layer_complete() {
                    events.push(SessionEvent::LayerComplete {
                        layer: session.current_layer,
                    });
                }
                follow_selection(session, &mut events);
            }
        }
        GameInput::PointerMoved { x, y } => {
            session.hover = resolve_pointer(&session.board, x, y, session.viewport, session.camera);
        }
        GameInput::PointerPressed { x, y, button } => {
            let Some((row, col)) =
                resolve_pointer(&session.board, x, y, session.viewport, session.camera)
            else {
                return events;
            };
            set_selection(session, (row, col), &mut events);
            match button {
                PointerButton::Primary => reveal_at(session, row, col, &mut events),
                PointerButton::Secondary => flag_at(session, row, col, &mut events),
            }
        }
        _ => {}
    }

    events
}

/// Advance time-driven state by `dt_ms`.
///
/// Expires a pending challenge once the grace period runs out, and moves to
/// the next layer after the transition delay.
pub fn tick(session: &mut GameSession, dt_ms: u64) -> Vec<SessionEvent> {
    let mut events = Vec::new();

    let expired = match &mut session.phase {
        SessionPhase::Defusing(challenge) => tick_challenge(challenge, dt_ms) == ChallengeTick::Expired,
        _ => false,
    };
    if expired {
        tracing::info!("defuse challenge expired");
        if let Some(resolution) = resolve_challenge(session, false) {
            push_resolution(session, resolution, true, &mut events);
        }
        return events;
    }

    let transition_ms = session.config.layer_transition_ms;
    let ready = match &mut session.phase {
        SessionPhase::LayerComplete { elapsed_ms } => {
            *elapsed_ms = elapsed_ms.saturating_add(dt_ms);
            *elapsed_ms >= transition_ms
        }
        _ => false,
    };
    if ready {
        match advance_layer(session) {
            Some(LayerAdvance::NextLayer(layer)) => {
                events.push(SessionEvent::LayerAdvanced { layer });
            }
            Some(LayerAdvance::Victory) => {
                events.push(SessionEvent::GameWon {
                    score: session.score,
                });
            }
            None => {}
        }
    }

    events
}
