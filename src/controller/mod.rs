//! Game controller: turn sequencing, scheduling and the presentation surface.
//!
//! The controller owns the canonical [`Session`](crate::core::Session) and a
//! virtual-clock [`Scheduler`]. The host feeds it commands and elapsed time;
//! it answers with [`Snapshot`]s and one-shot [`Hint`]s.
//!
//! ## Example Usage
//!
//! ```
//! use std::time::Duration;
//! use swipe_math::controller::{Direction, GameController};
//! use swipe_math::core::{GameConfig, Status};
//!
//! let mut game = GameController::new(GameConfig::default().with_seed(42)).unwrap();
//!
//! let truth = game.snapshot().current_problem.unwrap().ground_truth;
//! game.swipe(if truth { Direction::Right } else { Direction::Left });
//!
//! // Let the settle delay pass so the turn commits.
//! game.advance(Duration::from_millis(250));
//! assert_eq!(game.snapshot().score, 3);
//! assert_eq!(game.snapshot().status, Status::Playing);
//! ```

mod game;
mod hints;
mod scheduler;

pub use game::GameController;
pub use hints::Hint;
pub use scheduler::{Scheduled, Scheduler, TimerId, TimerKind};

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{EndReason, Problem, Status};

/// Swipe direction. Right means "true", left means "false".
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// The boolean answer this swipe gives.
    #[must_use]
    pub const fn as_answer(self) -> bool {
        matches!(self, Direction::Right)
    }

    #[must_use]
    pub const fn from_answer(answer: bool) -> Self {
        if answer {
            Direction::Right
        } else {
            Direction::Left
        }
    }
}

/// Whether a command changed anything.
///
/// Commands issued in the wrong state are not errors; they are ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    Accepted,
    Ignored,
}

impl CommandStatus {
    #[must_use]
    pub fn is_accepted(self) -> bool {
        self == CommandStatus::Accepted
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// `None` at the high-score checkpoint and after game over.
    pub current_problem: Option<Problem>,
    pub score: i64,
    pub high_score: i64,
    pub time_left: Duration,
    pub round_timer: Duration,
    pub status: Status,
    pub end_reason: Option<EndReason>,
    /// An answer has been accepted and is waiting for its settle delay.
    pub settling: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_answers() {
        assert!(Direction::Right.as_answer());
        assert!(!Direction::Left.as_answer());
        assert_eq!(Direction::from_answer(true), Direction::Right);
        assert_eq!(Direction::from_answer(false), Direction::Left);
    }

    #[test]
    fn test_command_status() {
        assert!(CommandStatus::Accepted.is_accepted());
        assert!(!CommandStatus::Ignored.is_accepted());
    }
}
