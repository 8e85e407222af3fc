//! Scoring and timer engine.
//!
//! Pure functions of (session, answer) and (session, elapsed time). Nothing
//! here mutates a session; the controller commits the returned outcome.
//!
//! ## Turn evaluation order
//!
//! 1. A wrong answer with `time_left <= MIN` loses at once. No score, timer
//!    or streak change is applied for that turn.
//! 2. Time band points, signed by correctness.
//! 3. Streak update and streak rules (exact length matches), plus the
//!    per-wrong ceiling penalty.
//! 4. Ceiling clamp to `[MIN, MAX]`.
//! 5. Win check against the clamped ceiling (correct answers only).
//! 6. Loss check against the updated score.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConfigError, EndReason, GameConfig, ProblemId, Session, Status, StreakRule};

/// Everything one answer changes, as computed by [`ScoringEngine::evaluate_answer`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// Problem that was answered.
    pub problem: ProblemId,

    /// The submitted answer (`true` = right swipe).
    pub answer: bool,

    pub correct: bool,

    /// Signed time band points.
    pub time_points: i64,

    /// Signed sum of streak rules that fired.
    pub streak_points: i64,

    /// Win bonus (0 unless this turn wins).
    pub win_bonus: i64,

    /// `time_points + streak_points + win_bonus`.
    pub score_delta: i64,

    /// Effective ceiling change in seconds, after clamping.
    pub timer_ceiling_delta: i64,

    pub round_timer_after: Duration,

    pub time_left_after: Duration,

    pub correct_streak_after: u32,

    pub wrong_streak_after: u32,

    /// Streak rules that fired this turn.
    pub fired_rules: SmallVec<[StreakRule; 2]>,

    /// `Some` if this turn ends the game.
    pub end_game: Option<EndReason>,
}

/// Result of one countdown tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickOutcome {
    pub time_left_after: Duration,
    /// `Some(Timeout)` when the countdown reached zero.
    pub end_game: Option<EndReason>,
}

/// Applies the game rules described by a validated [`GameConfig`].
#[derive(Clone, Debug)]
pub struct ScoringEngine {
    config: GameConfig,
}

impl ScoringEngine {
    /// Create an engine. Fails if the configuration is inconsistent.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Fraction of the current ceiling still on the clock.
    ///
    /// The ceiling is never below `MIN > 0`, so this never divides by zero.
    #[must_use]
    pub fn time_progress(&self, session: &Session) -> f64 {
        session.time_left().as_secs_f64() / session.round_timer().as_secs_f64()
    }

    /// Win bonus for winning with `time_left` on the clock:
    /// `base + ceil(time_left * 10)`.
    #[must_use]
    pub fn win_bonus(&self, time_left: Duration) -> i64 {
        const TENTH_NANOS: u128 = 100_000_000;
        let tenths = (time_left.as_nanos() + TENTH_NANOS - 1) / TENTH_NANOS;
        self.config.win_bonus + tenths as i64
    }

    /// Evaluate an answer to the current problem.
    ///
    /// Returns `None` when no problem is current or the session is not playing.
    #[must_use]
    pub fn evaluate_answer(&self, session: &Session, answer: bool) -> Option<TurnOutcome> {
        if session.status() != Status::Playing {
            return None;
        }
        let problem = session.current_problem()?;
        let config = &self.config;

        let correct = problem.is_correct_answer(answer);
        let time_left = session.time_left();
        let round_timer = session.round_timer();

        if !correct && time_left <= config.min_round_timer() {
            return Some(TurnOutcome {
                problem: problem.id,
                answer,
                correct,
                time_points: 0,
                streak_points: 0,
                win_bonus: 0,
                score_delta: 0,
                timer_ceiling_delta: 0,
                round_timer_after: round_timer,
                time_left_after: time_left,
                correct_streak_after: session.correct_streak(),
                wrong_streak_after: session.wrong_streak(),
                fired_rules: SmallVec::new(),
                end_game: Some(EndReason::Lose),
            });
        }

        let points = config.time_bands.points(self.time_progress(session));
        let time_points = if correct { points } else { -points };

        let mut correct_streak = session.correct_streak();
        let mut wrong_streak = session.wrong_streak();
        let mut timer_secs = 0;

        let (streak, rules) = if correct {
            correct_streak += 1;
            wrong_streak = 0;
            (&mut correct_streak, &config.correct_streaks)
        } else {
            wrong_streak += 1;
            correct_streak = 0;
            timer_secs -= config.wrong_timer_penalty_secs;
            (&mut wrong_streak, &config.wrong_streaks)
        };

        let fired: SmallVec<[StreakRule; 2]> =
            rules.iter().filter(|r| r.length == *streak).copied().collect();
        let streak_points: i64 = fired.iter().map(|r| r.score).sum();
        timer_secs += fired.iter().map(|r| r.timer_secs).sum::<i64>();
        if fired.iter().any(|r| r.resets) {
            *streak = 0;
        }

        let ceiling_before = round_timer.as_secs() as i64;
        let round_timer_after = config.clamp_round_timer(ceiling_before + timer_secs);
        let timer_ceiling_delta = round_timer_after.as_secs() as i64 - ceiling_before;

        let won = correct && round_timer_after >= config.max_round_timer();
        let win_bonus = if won { self.win_bonus(time_left) } else { 0 };
        let score_delta = time_points + streak_points + win_bonus;

        let end_game = if won {
            Some(EndReason::Win)
        } else if session.score() + score_delta < 0 {
            Some(EndReason::Lose)
        } else {
            None
        };

        let time_left_after = if correct && end_game.is_none() {
            round_timer_after
        } else {
            time_left.min(round_timer_after)
        };

        Some(TurnOutcome {
            problem: problem.id,
            answer,
            correct,
            time_points,
            streak_points,
            win_bonus,
            score_delta,
            timer_ceiling_delta,
            round_timer_after,
            time_left_after,
            correct_streak_after: correct_streak,
            wrong_streak_after: wrong_streak,
            fired_rules: fired,
            end_game,
        })
    }

    /// Evaluate `elapsed` time passing on the countdown.
    ///
    /// Returns `None` unless the session is playing.
    #[must_use]
    pub fn evaluate_tick(&self, session: &Session, elapsed: Duration) -> Option<TickOutcome> {
        if session.status() != Status::Playing {
            return None;
        }

        let time_left_after = session.time_left().saturating_sub(elapsed);
        let end_game = time_left_after.is_zero().then_some(EndReason::Timeout);

        Some(TickOutcome {
            time_left_after,
            end_game,
        })
    }
}
