//! Session state: the single aggregate behind a running game.
//!
//! ## Session
//!
//! - Deck of upcoming problems, the current one at the front
//! - Score and in-process high score
//! - Round timer ceiling and the countdown within it
//! - Correct/wrong streaks (mutually exclusive)
//! - Status (playing, paused, high-score checkpoint, game over)
//!
//! The session never decides anything itself. The scoring engine computes a
//! [`TurnOutcome`](crate::rules::TurnOutcome) and the controller commits it
//! through [`Session::apply_turn`]. Every mutation path clamps the timers.

use std::time::Duration;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::problem::Problem;
use crate::rules::TurnOutcome;

/// Why a game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    /// The round timer ceiling reached its maximum on a correct answer.
    Win,
    /// Score dropped below zero, or a wrong answer came in the danger zone.
    Lose,
    /// The countdown reached zero before an answer.
    Timeout,
}

impl std::fmt::Display for EndReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EndReason::Win => "win",
            EndReason::Lose => "lose",
            EndReason::Timeout => "timeout",
        };
        f.write_str(s)
    }
}

/// Session status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Playing,
    Paused,
    /// Deck exhausted; waiting for the player to acknowledge the high score.
    AwaitingHighScoreAck,
    GameOver(EndReason),
}

impl Status {
    /// Whether a problem is current in this status.
    #[must_use]
    pub fn shows_problem(self) -> bool {
        matches!(self, Status::Playing | Status::Paused)
    }

    #[must_use]
    pub fn end_reason(self) -> Option<EndReason> {
        match self {
            Status::GameOver(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Complete state of one game.
///
/// Uses an `im` vector for the deck so cloning a session (for snapshots or
/// speculative evaluation) is O(1).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    /// Current problem first. Answered problems are dropped.
    deck: Vector<Problem>,
    answered: u64,
    score: i64,
    high_score: i64,
    round_timer: Duration,
    time_left: Duration,
    correct_streak: u32,
    wrong_streak: u32,
    status: Status,
}

impl Session {
    /// Start a fresh session over `deck`.
    ///
    /// # Panics
    ///
    /// Panics if `deck` is empty. The controller never deals an empty deck.
    ///
    /// ## Defaults
    ///
    /// - `score`, streaks, `high_score`: 0
    /// - `round_timer`, `time_left`: the configured initial ceiling
    /// - `status`: `Playing`
    #[must_use]
    pub fn new(config: &GameConfig, deck: Vec<Problem>) -> Self {
        assert!(!deck.is_empty(), "Session needs at least one problem");

        Self {
            deck: deck.into_iter().collect(),
            answered: 0,
            score: 0,
            high_score: 0,
            round_timer: config.initial_round_timer(),
            time_left: config.initial_round_timer(),
            correct_streak: 0,
            wrong_streak: 0,
            status: Status::Playing,
        }
    }

    /// Carry a high score over from a previous session.
    #[must_use]
    pub fn with_high_score(mut self, high_score: i64) -> Self {
        self.high_score = high_score.max(self.score);
        self
    }

    /// Set the score. Negative scores are clamped to zero.
    #[must_use]
    pub fn with_score(mut self, score: i64) -> Self {
        self.score = score.max(0);
        self.high_score = self.high_score.max(self.score);
        self
    }

    /// Set ceiling and countdown, clamped to their bounds.
    #[must_use]
    pub fn with_timers(mut self, config: &GameConfig, round_timer: Duration, time_left: Duration) -> Self {
        let max = config.max_round_timer();
        let min = config.min_round_timer();
        self.round_timer = round_timer.clamp(min, max);
        self.time_left = time_left.min(self.round_timer);
        self
    }

    /// Set one streak. A nonzero correct streak wins over a wrong one so the
    /// two stay mutually exclusive.
    #[must_use]
    pub fn with_streaks(mut self, correct: u32, wrong: u32) -> Self {
        self.correct_streak = correct;
        self.wrong_streak = if correct > 0 { 0 } else { wrong };
        self
    }

    // === Accessors ===

    #[must_use]
    pub fn score(&self) -> i64 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> i64 {
        self.high_score
    }

    #[must_use]
    pub fn round_timer(&self) -> Duration {
        self.round_timer
    }

    #[must_use]
    pub fn time_left(&self) -> Duration {
        self.time_left
    }

    #[must_use]
    pub fn correct_streak(&self) -> u32 {
        self.correct_streak
    }

    #[must_use]
    pub fn wrong_streak(&self) -> u32 {
        self.wrong_streak
    }

    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Problems answered since the session started.
    #[must_use]
    pub fn answered(&self) -> u64 {
        self.answered
    }

    /// The current problem followed by the upcoming ones.
    #[must_use]
    pub fn deck(&self) -> &Vector<Problem> {
        &self.deck
    }

    /// The current problem. `None` outside `Playing`/`Paused`.
    #[must_use]
    pub fn current_problem(&self) -> Option<&Problem> {
        if self.status.shows_problem() {
            self.deck.front()
        } else {
            None
        }
    }

    /// Problems queued after the current one.
    #[must_use]
    pub fn remaining_ahead(&self) -> usize {
        self.deck.len().saturating_sub(1)
    }

    // === Deck ===

    /// Append problems to the end of the deck.
    pub fn append(&mut self, problems: Vec<Problem>) {
        self.deck.extend(problems);
    }

    /// Swap the current problem for `problem`. Returns the replaced one.
    pub fn replace_current(&mut self, problem: Problem) -> Option<Problem> {
        if self.deck.is_empty() {
            None
        } else {
            Some(self.deck.set(0, problem))
        }
    }

    // === Timers ===

    /// Set the countdown, clamped to `[0, round_timer]`.
    pub fn set_time_left(&mut self, time_left: Duration) {
        self.time_left = time_left.min(self.round_timer);
    }

    /// Refill the countdown to the current ceiling.
    pub fn refill_time(&mut self) {
        self.time_left = self.round_timer;
    }

    // === Status ===

    pub fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// End the game.
    pub fn end(&mut self, reason: EndReason) {
        self.status = Status::GameOver(reason);
    }

    // === Turns ===

    /// Commit an evaluated turn.
    ///
    /// Non-terminal turns discard the answered problem, so the next one
    /// becomes current. A terminal turn commits its score together with
    /// `GameOver`, so a negative score is never visible while playing.
    pub fn apply_turn(&mut self, config: &GameConfig, outcome: &TurnOutcome) {
        self.score += outcome.score_delta;
        self.high_score = self.high_score.max(self.score);
        self.round_timer = outcome
            .round_timer_after
            .clamp(config.min_round_timer(), config.max_round_timer());
        self.time_left = outcome.time_left_after.min(self.round_timer);
        self.correct_streak = outcome.correct_streak_after;
        self.wrong_streak = outcome.wrong_streak_after;

        match outcome.end_game {
            Some(reason) => self.status = Status::GameOver(reason),
            None => {
                self.deck.pop_front();
                self.answered += 1;
            }
        }

        debug_assert!(self.invariants_hold(config));
    }

    /// Check the session invariants.
    #[must_use]
    pub fn invariants_hold(&self, config: &GameConfig) -> bool {
        let timers = self.round_timer >= config.min_round_timer()
            && self.round_timer <= config.max_round_timer()
            && self.time_left <= self.round_timer;
        let streaks = self.correct_streak == 0 || self.wrong_streak == 0;
        let score = self.score >= 0 || matches!(self.status, Status::GameOver(EndReason::Lose));
        let current = !self.status.shows_problem() || !self.deck.is_empty();

        timers && streaks && score && current
    }
}
