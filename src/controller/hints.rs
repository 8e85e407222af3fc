//! One-shot notifications for the presentation layer.
//!
//! Hints describe what just happened (a feedback glyph, a score popup, a
//! timer popup). They are drained by the renderer and never stored in the
//! session.

use serde::{Deserialize, Serialize};

use crate::core::{EndReason, ProblemId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    /// ✓ or ✗ for the answer just given.
    Feedback { correct: bool },

    /// Score popup with the signed total change for the turn.
    ScoreChange(i64),

    /// Streak rule fired: extra points and ceiling change in seconds.
    StreakBonus { points: i64, timer_secs: i64 },

    /// "Add time" / "reduce time" popup: signed ceiling change in seconds.
    TimeChange(i64),

    /// The current problem was swapped while pausing.
    ProblemReplaced { old: ProblemId, new: ProblemId },

    /// Deck exhausted; showing the high-score card.
    HighScoreCheckpoint { high_score: i64 },

    GameOver { reason: EndReason, score: i64 },

    /// A fresh session started.
    Restarted,
}
