//! Scoring and timer rules.
//!
//! `ScoringEngine` maps the current session and an answer (or elapsed time)
//! to an outcome:
//! - Score delta from time bands and streak rules
//! - Round timer ceiling change
//! - Countdown after the turn
//! - Win/lose/timeout decision
//!
//! The engine never mutates a session. The controller commits outcomes.

pub mod engine;

pub use engine::{ScoringEngine, TickOutcome, TurnOutcome};
