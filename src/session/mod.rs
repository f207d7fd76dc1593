//! Game session: owns the active layer and routes input to the engine.

pub mod input;
pub mod reveal;
pub mod snapshot;
pub mod types;

pub use input::{process_input, tick, GameInput, PointerButton, SessionEvent};
pub use reveal::{
    advance_layer, ensure_selection_unrevealed, resolve_challenge, reveal_cell, submit_answer,
    toggle_flag, use_scanner, ChallengeResolution, LayerAdvance, RevealOutcome,
};
pub use snapshot::{CellView, ChallengeView, PhaseView, SessionSnapshot};
pub use types::{GameSession, SessionPhase};
