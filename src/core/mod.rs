//! Core types: problems, session state, RNG, configuration, errors.
//!
//! Everything here is plain data. Decisions live in `rules`, sequencing in
//! `controller`.

pub mod config;
pub mod error;
pub mod problem;
pub mod rng;
pub mod session;

pub use config::{GameConfig, StreakRule, TimeBands};
pub use error::ConfigError;
pub use problem::{Problem, ProblemId, QuestionKind};
pub use rng::GameRng;
pub use session::{EndReason, Session, Status};
