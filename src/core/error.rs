//! Configuration errors.
//!
//! Gameplay itself has no failure modes: commands issued in the wrong state
//! are reported through `CommandStatus`, not errors.

use thiserror::Error;

use super::config::StreakRule;

/// Invalid `GameConfig`.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// A zero minimum would allow a zero ceiling and a division by zero
    /// when computing time progress.
    #[error("minimum round timer must be greater than zero")]
    ZeroMinimumTimer,

    #[error("round timer bounds out of order: min {min}s, initial {initial}s, max {max}s")]
    TimerBounds { min: u64, initial: u64, max: u64 },

    #[error("time bands must satisfy 0 <= mid < high <= 1 (mid {mid}, high {high})")]
    TimeBands { mid: f64, high: f64 },

    #[error("streak rule has zero length: {0:?}")]
    ZeroStreakLength(StreakRule),

    #[error("per-wrong timer penalty must not be negative, got {0}")]
    NegativePenalty(i64),

    #[error("initial deck must hold at least one problem")]
    EmptyDeck,

    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,

    /// With refills enabled, a zero mark never triggers one and play runs
    /// off the end of the deck.
    #[error("low-water mark must be at least 1 when refills are enabled (batch {batch})")]
    ZeroLowWaterMark { batch: usize },
}
