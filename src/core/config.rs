//! Game configuration.
//!
//! Every rule constant the engine consults lives here:
//! - Round timer bounds (`MIN`, `MAX`, initial ceiling)
//! - Time bands that scale the per-answer score delta
//! - Streak rule tables for correct and wrong runs
//! - Deck sizing and replenishment
//! - Controller cadence (tick interval, settle delay)
//!
//! `Default` is the canonical rule set. Hosts may load a partial JSON
//! document; missing fields fall back to the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// A streak threshold: fires when a run reaches exactly `length`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakRule {
    /// Run length that fires this rule (exact match).
    pub length: u32,

    /// Score added when the rule fires (negative for penalties).
    pub score: i64,

    /// Seconds added to the round timer ceiling (negative for penalties).
    pub timer_secs: i64,

    /// Reset the run to 0 after firing.
    pub resets: bool,
}

impl StreakRule {
    /// Create a streak rule that keeps the run going after firing.
    #[must_use]
    pub const fn new(length: u32, score: i64, timer_secs: i64) -> Self {
        Self {
            length,
            score,
            timer_secs,
            resets: false,
        }
    }

    /// Reset the run once this rule fires.
    #[must_use]
    pub const fn resetting(mut self) -> Self {
        self.resets = true;
        self
    }
}

/// Score delta bands keyed on the fraction of the ceiling left when answering.
///
/// Comparisons are strict: a fraction of exactly `high` falls in the mid band.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimeBands {
    /// Fraction above which `high_points` apply.
    pub high: f64,
    /// Fraction above which `mid_points` apply.
    pub mid: f64,
    pub high_points: i64,
    pub mid_points: i64,
    pub low_points: i64,
}

impl Default for TimeBands {
    fn default() -> Self {
        Self {
            high: 0.75,
            mid: 0.50,
            high_points: 3,
            mid_points: 2,
            low_points: 1,
        }
    }
}

impl TimeBands {
    /// Unsigned points for answering with `progress` of the ceiling left.
    #[must_use]
    pub fn points(&self, progress: f64) -> i64 {
        if progress > self.high {
            self.high_points
        } else if progress > self.mid {
            self.mid_points
        } else {
            self.low_points
        }
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Round timer ceiling at session start, in seconds.
    pub initial_round_timer_secs: u64,

    /// Lower clamp for the ceiling. Also the "danger zone": a wrong answer
    /// with this much time left or less ends the game.
    pub min_round_timer_secs: u64,

    /// Upper clamp for the ceiling. Reaching it on a correct answer wins.
    pub max_round_timer_secs: u64,

    /// Time-based score bands.
    pub time_bands: TimeBands,

    /// Rules checked after every correct answer, in order.
    pub correct_streaks: Vec<StreakRule>,

    /// Rules checked after every wrong answer, in order.
    pub wrong_streaks: Vec<StreakRule>,

    /// Ceiling penalty applied on every wrong answer, stacked with any
    /// wrong-streak penalty that fires on the same turn.
    pub wrong_timer_penalty_secs: i64,

    /// Fixed part of the win bonus. One more point is added per started
    /// tenth of a second left on the clock.
    pub win_bonus: i64,

    /// Problems dealt at session start and on restart.
    pub initial_deck_size: usize,

    /// Replenish when fewer than this many problems are queued behind the
    /// current one.
    pub low_water_mark: usize,

    /// Problems appended on replenishment. 0 disables replenishment, which
    /// makes deck exhaustion stop at the high-score checkpoint.
    pub refill_batch: usize,

    /// Countdown tick cadence in milliseconds.
    pub tick_interval_ms: u64,

    /// Delay between an answer and its commit, in milliseconds.
    pub settle_delay_ms: u64,

    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            initial_round_timer_secs: 15,
            min_round_timer_secs: 3,
            max_round_timer_secs: 30,
            time_bands: TimeBands::default(),
            correct_streaks: vec![StreakRule::new(3, 5, 1), StreakRule::new(5, 10, 3).resetting()],
            wrong_streaks: vec![StreakRule::new(3, -5, -3), StreakRule::new(5, -10, -5).resetting()],
            wrong_timer_penalty_secs: 1,
            win_bonus: 100,
            initial_deck_size: 10,
            low_water_mark: 3,
            refill_batch: 5,
            tick_interval_ms: 100,
            settle_delay_ms: 250,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Set a fixed RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the starting ceiling.
    #[must_use]
    pub fn with_initial_round_timer(mut self, secs: u64) -> Self {
        self.initial_round_timer_secs = secs;
        self
    }

    /// Set the ceiling clamp range.
    #[must_use]
    pub fn with_round_timer_bounds(mut self, min_secs: u64, max_secs: u64) -> Self {
        self.min_round_timer_secs = min_secs;
        self.max_round_timer_secs = max_secs;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub fn with_settle_delay_ms(mut self, ms: u64) -> Self {
        self.settle_delay_ms = ms;
        self
    }

    /// Set the tick cadence.
    #[must_use]
    pub fn with_tick_interval_ms(mut self, ms: u64) -> Self {
        self.tick_interval_ms = ms;
        self
    }

    /// Set the starting deck size.
    #[must_use]
    pub fn with_initial_deck_size(mut self, size: usize) -> Self {
        self.initial_deck_size = size;
        self
    }

    /// Set the replenishment batch (0 disables replenishment).
    #[must_use]
    pub fn with_refill_batch(mut self, batch: usize) -> Self {
        self.refill_batch = batch;
        self
    }

    #[must_use]
    pub fn initial_round_timer(&self) -> Duration {
        Duration::from_secs(self.initial_round_timer_secs)
    }

    #[must_use]
    pub fn min_round_timer(&self) -> Duration {
        Duration::from_secs(self.min_round_timer_secs)
    }

    #[must_use]
    pub fn max_round_timer(&self) -> Duration {
        Duration::from_secs(self.max_round_timer_secs)
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Clamp a ceiling to `[MIN, MAX]`.
    #[must_use]
    pub fn clamp_round_timer(&self, secs: i64) -> Duration {
        let min = self.min_round_timer_secs as i64;
        let max = self.max_round_timer_secs as i64;
        Duration::from_secs(secs.clamp(min, max) as u64)
    }

    /// Check every invariant the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_round_timer_secs == 0 {
            return Err(ConfigError::ZeroMinimumTimer);
        }

        let (min, initial, max) = (
            self.min_round_timer_secs,
            self.initial_round_timer_secs,
            self.max_round_timer_secs,
        );
        if !(min <= initial && initial <= max) {
            return Err(ConfigError::TimerBounds { min, initial, max });
        }

        let bands = &self.time_bands;
        if !(0.0 <= bands.mid && bands.mid < bands.high && bands.high <= 1.0) {
            return Err(ConfigError::TimeBands {
                mid: bands.mid,
                high: bands.high,
            });
        }

        if let Some(rule) = self
            .correct_streaks
            .iter()
            .chain(&self.wrong_streaks)
            .find(|r| r.length == 0)
        {
            return Err(ConfigError::ZeroStreakLength(*rule));
        }

        if self.wrong_timer_penalty_secs < 0 {
            return Err(ConfigError::NegativePenalty(self.wrong_timer_penalty_secs));
        }

        if self.initial_deck_size == 0 {
            return Err(ConfigError::EmptyDeck);
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        if self.refill_batch > 0 && self.low_water_mark == 0 {
            return Err(ConfigError::ZeroLowWaterMark {
                batch: self.refill_batch,
            });
        }

        Ok(())
    }
}
