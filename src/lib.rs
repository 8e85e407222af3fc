//! # swipe-math
//!
//! Game core for a swipeable true/false arithmetic card game.
//!
//! ## Design Principles
//!
//! 1. **Presentation-Agnostic**: No rendering, animation or input handling.
//!    The crate exposes plain data and accepts commands.
//!
//! 2. **Deterministic**: Problems come from a seedable RNG and time is a
//!    virtual clock the host advances. The same seed and the same command
//!    sequence always produce the same game.
//!
//! 3. **Configuration Over Convention**: Every rule constant lives in
//!    `GameConfig` and is validated once at startup.
//!
//! ## Architecture
//!
//! - **Pure Rules**: `ScoringEngine` maps (session, answer) to an outcome
//!   without touching the session. The controller commits outcomes.
//!
//! - **Persistent Deck**: The deck is an `im` vector, so snapshots are O(1).
//!
//! - **Single Owner**: One `GameController` owns the session and every
//!   pending timer. Restarting cancels all of them.
//!
//! ## Modules
//!
//! - `core`: Problems, session state, RNG, configuration, errors
//! - `problems`: Expression synthesis and the problem generator
//! - `rules`: Scoring and timer engine
//! - `controller`: Turn sequencing, scheduler, snapshots and hints

pub mod core;
pub mod problems;
pub mod rules;
pub mod controller;

// Re-export commonly used types
pub use crate::core::{
    GameConfig, StreakRule, TimeBands, ConfigError,
    Problem, ProblemId, QuestionKind,
    GameRng,
    EndReason, Session, Status,
};

pub use crate::problems::{ProblemGenerator, ProblemSource};

pub use crate::rules::{ScoringEngine, TickOutcome, TurnOutcome};

pub use crate::controller::{
    CommandStatus, Direction, GameController, Hint, Snapshot,
};
