//! Timed arithmetic defuse challenge triggered by revealing a mine.

pub mod logic;
pub mod types;

pub use logic::{apply_key, check_answer, generate_unique_problem, start_challenge, tick_challenge};
pub use types::{
    ChallengeKey, ChallengeTick, DefuseChallenge, KeyResult, Operator, Problem, ProblemHistory,
    ProblemKey, ProblemSettings,
};
