//! Problem generation and the pending-challenge state machine.

use rand::Rng;

use super::types::{
    ChallengeKey, ChallengeTick, DefuseChallenge, KeyResult, Operator, Problem, ProblemHistory,
    ProblemKey, ProblemSettings,
};
use crate::core::constants::MAX_ANSWER_INPUT_LEN;
use crate::core::GameConfig;

fn random_key<R: Rng>(settings: &ProblemSettings, rng: &mut R) -> ProblemKey {
    let lhs = rng.gen_range(settings.operand_min..=settings.operand_max);
    let rhs = rng.gen_range(settings.operand_min..=settings.operand_max);
    let op = Operator::ALL[rng.gen_range(0..Operator::ALL.len())];
    ProblemKey::new(lhs, op, rhs)
}

/// Generate a problem whose key is not in `history`, and record it.
///
/// Draws up to `settings.max_attempts` candidates. If every one is a repeat
/// the history is cleared and generation starts over without a bound, so
/// repeats become possible again once the problem space runs dry.
pub fn generate_unique_problem<R: Rng>(
    history: &mut ProblemHistory,
    settings: &ProblemSettings,
    rng: &mut R,
) -> Problem {
    for _ in 0..settings.max_attempts {
        let key = random_key(settings, rng);
        if history.insert(key) {
            return Problem::from(key);
        }
    }

    tracing::warn!(
        issued = history.len(),
        attempts = settings.max_attempts,
        "defuse problem space exhausted, clearing history"
    );
    history.clear();

    loop {
        let key = random_key(settings, rng);
        if history.insert(key) {
            return Problem::from(key);
        }
    }
}

/// Begin a defuse challenge for the mine at `cell`.
pub fn start_challenge<R: Rng>(
    cell: (usize, usize),
    history: &mut ProblemHistory,
    config: &GameConfig,
    rng: &mut R,
) -> DefuseChallenge {
    let problem = generate_unique_problem(history, &config.problem_settings(), rng);
    tracing::info!(
        row = cell.0,
        col = cell.1,
        problem = %problem.text,
        issued = history.len(),
        "defuse challenge started"
    );

    DefuseChallenge {
        cell,
        problem,
        input: String::new(),
        elapsed_ms: 0,
        time_limit_ms: config.challenge_time_limit_ms,
        grace_ms: config.challenge_grace_ms,
    }
}

/// Apply one keystroke to the answer buffer.
///
/// Digits and `-` append up to the input length cap; anything else is
/// ignored. Enter hands back the buffer for [`check_answer`].
pub fn apply_key(challenge: &mut DefuseChallenge, key: ChallengeKey) -> KeyResult {
    match key {
        ChallengeKey::Char(c) if c.is_ascii_digit() || c == '-' => {
            if challenge.input.len() < MAX_ANSWER_INPUT_LEN {
                challenge.input.push(c);
                KeyResult::Edited
            } else {
                KeyResult::Ignored
            }
        }
        ChallengeKey::Char(_) => KeyResult::Ignored,
        ChallengeKey::Backspace => match challenge.input.pop() {
            Some(_) => KeyResult::Edited,
            None => KeyResult::Ignored,
        },
        ChallengeKey::Submit => KeyResult::Submitted(challenge.input.clone()),
    }
}

/// Whether `raw` is an accepted answer. Unparseable input counts as wrong.
/// A correct answer still counts during the grace period after the time
/// limit; only an expired challenge rejects everything.
pub fn check_answer(challenge: &DefuseChallenge, raw: &str) -> bool {
    if challenge.is_expired() {
        return false;
    }
    raw.trim()
        .parse::<i64>()
        .is_ok_and(|value| value == challenge.problem.answer)
}

/// Advance the challenge clock by one frame.
pub fn tick_challenge(challenge: &mut DefuseChallenge, dt_ms: u64) -> ChallengeTick {
    challenge.elapsed_ms = challenge.elapsed_ms.saturating_add(dt_ms);
    if challenge.is_expired() {
        ChallengeTick::Expired
    } else {
        ChallengeTick::Running
    }
}
