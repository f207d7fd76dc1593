//! Defuse challenge data structures.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constants::{DEFAULT_OPERAND_MAX, DEFAULT_OPERAND_MIN, MAX_PROBLEM_ATTEMPTS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Subtract, Operator::Multiply];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "x",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Identity of a problem, used to avoid issuing the same one twice.
///
/// For subtraction `lhs >= rhs` always holds, so `7 - 3` and `3 - 7` share
/// a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProblemKey {
    pub lhs: u32,
    pub op: Operator,
    pub rhs: u32,
}

impl ProblemKey {
    /// Build a key, swapping subtraction operands so the result is non-negative.
    pub fn new(lhs: u32, op: Operator, rhs: u32) -> Self {
        let (lhs, rhs) = if op == Operator::Subtract && lhs < rhs {
            (rhs, lhs)
        } else {
            (lhs, rhs)
        };
        Self { lhs, op, rhs }
    }

    pub fn answer(&self) -> i64 {
        let (lhs, rhs) = (i64::from(self.lhs), i64::from(self.rhs));
        match self.op {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
        }
    }
}

impl fmt::Display for ProblemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} = ?", self.lhs, self.op, self.rhs)
    }
}

/// A generated problem ready to show the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub key: ProblemKey,
    pub text: String,
    pub answer: i64,
}

impl From<ProblemKey> for Problem {
    fn from(key: ProblemKey) -> Self {
        Self {
            key,
            text: key.to_string(),
            answer: key.answer(),
        }
    }
}

/// Problems issued so far. Only cleared on exhaustion or by an explicit
/// restart policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProblemHistory {
    used: HashSet<ProblemKey>,
}

impl ProblemHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &ProblemKey) -> bool {
        self.used.contains(key)
    }

    /// Returns false if the key was already recorded.
    pub fn insert(&mut self, key: ProblemKey) -> bool {
        self.used.insert(key)
    }

    pub fn clear(&mut self) {
        self.used.clear();
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }
}

/// Operand range and retry budget for problem generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemSettings {
    pub operand_min: u32,
    pub operand_max: u32,
    pub max_attempts: u32,
}

impl Default for ProblemSettings {
    fn default() -> Self {
        Self {
            operand_min: DEFAULT_OPERAND_MIN,
            operand_max: DEFAULT_OPERAND_MAX,
            max_attempts: MAX_PROBLEM_ATTEMPTS,
        }
    }
}

/// A pending defuse attempt. Lives only while the session is defusing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefuseChallenge {
    /// Cell whose mine triggered the challenge, as `(row, col)`.
    pub cell: (usize, usize),
    pub problem: Problem,
    /// Keystrokes typed so far.
    pub input: String,
    pub elapsed_ms: u64,
    pub time_limit_ms: u64,
    pub grace_ms: u64,
}

impl DefuseChallenge {
    pub fn remaining_ms(&self) -> u64 {
        self.time_limit_ms.saturating_sub(self.elapsed_ms)
    }

    /// Past the time limit. Answers are still accepted until the grace
    /// period runs out too, then the challenge auto-fails.
    pub fn is_timed_out(&self) -> bool {
        self.elapsed_ms > self.time_limit_ms
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed_ms > self.time_limit_ms + self.grace_ms
    }
}

/// Keystrokes accepted while a challenge is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeKey {
    /// A character typed. Only ASCII digits and `-` are kept.
    Char(char),
    Backspace,
    Submit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyResult {
    Edited,
    Ignored,
    /// Enter pressed; carries the raw buffer.
    Submitted(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChallengeTick {
    Running,
    Expired,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subtraction_key_is_non_negative() {
        let key = ProblemKey::new(3, Operator::Subtract, 19);
        assert_eq!(key.lhs, 19);
        assert_eq!(key.rhs, 3);
        assert_eq!(key.answer(), 16);
        assert_eq!(key, ProblemKey::new(19, Operator::Subtract, 3));
    }

    #[test]
    fn test_non_subtraction_keeps_order() {
        let key = ProblemKey::new(2, Operator::Add, 9);
        assert_eq!((key.lhs, key.rhs), (2, 9));
        assert_ne!(key, ProblemKey::new(9, Operator::Add, 2));
    }

    #[test]
    fn test_problem_text() {
        let problem = Problem::from(ProblemKey::new(12, Operator::Multiply, 4));
        assert_eq!(problem.text, "12 x 4 = ?");
        assert_eq!(problem.answer, 48);

        let problem = Problem::from(ProblemKey::new(5, Operator::Add, 6));
        assert_eq!(problem.text, "5 + 6 = ?");
    }

    #[test]
    fn test_history_insert_and_clear() {
        let mut history = ProblemHistory::new();
        let key = ProblemKey::new(1, Operator::Add, 1);
        assert!(history.insert(key));
        assert!(!history.insert(key));
        assert!(history.contains(&key));
        assert_eq!(history.len(), 1);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_challenge_timing_flags() {
        let mut challenge = DefuseChallenge {
            cell: (0, 0),
            problem: Problem::from(ProblemKey::new(1, Operator::Add, 2)),
            input: String::new(),
            elapsed_ms: 0,
            time_limit_ms: 5_000,
            grace_ms: 1_000,
        };
        assert_eq!(challenge.remaining_ms(), 5_000);

        challenge.elapsed_ms = 5_000;
        assert!(!challenge.is_timed_out());

        challenge.elapsed_ms = 5_001;
        assert!(challenge.is_timed_out());
        assert!(!challenge.is_expired());
        assert_eq!(challenge.remaining_ms(), 0);

        challenge.elapsed_ms = 6_001;
        assert!(challenge.is_expired());
    }
}
