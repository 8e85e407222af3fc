//! Problem cards: the statement shown to the player and its ground truth.

use serde::{Deserialize, Serialize};

/// Problem identifier, assigned in generation order.
///
/// Only the presentation layer cares (as a rendering key); game logic never
/// looks at it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub u64);

impl ProblemId {
    /// Create a new problem ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ProblemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Problem({})", self.0)
    }
}

/// Question category. Each maps to one fixed prompt template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    /// `a OP b = shown`, asking whether the equation is wrong.
    IsWrong,
    /// Bare expression, asking whether the result is odd.
    IsOdd,
    /// Bare expression, asking whether the result is even.
    IsEven,
    /// Bare expression, asking whether the result exceeds a threshold.
    IsGreaterThan,
    /// Bare expression, asking whether the result is below a threshold.
    IsLessThan,
    /// `a OP b = shown`, asking whether the equation is correct.
    IsCorrect,
    /// `a OP b REL c OP d`, asking whether the relation holds.
    Comparison,
}

impl QuestionKind {
    /// All kinds, in a fixed order for uniform selection.
    pub const ALL: [QuestionKind; 7] = [
        QuestionKind::IsWrong,
        QuestionKind::IsOdd,
        QuestionKind::IsEven,
        QuestionKind::IsGreaterThan,
        QuestionKind::IsLessThan,
        QuestionKind::IsCorrect,
        QuestionKind::Comparison,
    ];

    /// Prompt text. Threshold kinds embed their threshold.
    #[must_use]
    pub fn prompt(self, threshold: Option<i64>) -> String {
        match self {
            QuestionKind::IsWrong => "Is this equation wrong?".to_string(),
            QuestionKind::IsOdd => "Is the answer odd?".to_string(),
            QuestionKind::IsEven => "Is the answer even?".to_string(),
            QuestionKind::IsGreaterThan => {
                format!("Is the answer greater than {}?", threshold.unwrap_or_default())
            }
            QuestionKind::IsLessThan => {
                format!("Is the answer less than {}?", threshold.unwrap_or_default())
            }
            QuestionKind::IsCorrect => "Is this equation correct?".to_string(),
            QuestionKind::Comparison => "Is this statement correct?".to_string(),
        }
    }
}

/// A generated true/false question.
///
/// Immutable once created. `ground_truth == true` means the right swipe
/// ("true") is the correct answer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub id: ProblemId,
    pub kind: QuestionKind,
    /// Expression or statement, including any shown (possibly false) result.
    pub statement: String,
    pub prompt: String,
    pub ground_truth: bool,
}

impl Problem {
    /// Whether `answer` is the correct swipe for this problem.
    #[must_use]
    pub fn is_correct_answer(&self, answer: bool) -> bool {
        answer == self.ground_truth
    }
}
