//! Clover - layered minesweeper with a timed arithmetic defuse challenge.
//!
//! This crate exposes the game engine for the terminal frontend and tests.

pub mod board;
pub mod build_info;
pub mod challenge;
pub mod core;
pub mod navigation;
pub mod pointer;
pub mod session;

pub use crate::core::{GameConfig, GameError, Result};
pub use session::{process_input, tick, GameInput, GameSession, SessionEvent, SessionPhase};
