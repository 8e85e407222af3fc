//! Randomized problem synthesis.

use tracing::trace;

use super::expression::{
    greater_than_threshold, is_odd, less_than_threshold, Expression, Operator, Relation,
};
use super::ProblemSource;
use crate::core::{GameRng, Problem, ProblemId, QuestionKind};

/// Operand range for `+` and `-`.
const ADDITIVE_OPERANDS: (i64, i64) = (1, 12);
/// Small factor range for `×`.
const SMALL_FACTOR: (i64, i64) = (1, 9);
/// Large factor range for `×`.
const LARGE_FACTOR: (i64, i64) = (1, 20);

/// Generates problems from an injected, seedable RNG.
///
/// IDs are assigned in generation order and never repeat for the lifetime
/// of the generator, including across session restarts.
#[derive(Clone, Debug)]
pub struct ProblemGenerator {
    rng: GameRng,
    next_id: u64,
}

impl ProblemGenerator {
    /// Create a generator drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng, next_id: 0 }
    }

    /// Create a generator with a fixed seed.
    #[must_use]
    pub fn from_seed(seed: u64) -> Self {
        Self::new(GameRng::new(seed))
    }

    /// Seed of the underlying RNG.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Synthesize one `a OP b` expression.
    ///
    /// Products keep one factor in `[1, 9]` so they stay readable; which side
    /// gets the small factor is random.
    pub fn expression(&mut self) -> Expression {
        let op = *self.rng.choose(&Operator::ALL).unwrap_or(&Operator::Add);

        match op {
            Operator::Mul => {
                let small = self.rng.gen_range(SMALL_FACTOR.0..=SMALL_FACTOR.1);
                let large = self.rng.gen_range(LARGE_FACTOR.0..=LARGE_FACTOR.1);
                if self.rng.coin() {
                    Expression::new(small, op, large)
                } else {
                    Expression::new(large, op, small)
                }
            }
            Operator::Add | Operator::Sub => {
                let lhs = self.rng.gen_range(ADDITIVE_OPERANDS.0..=ADDITIVE_OPERANDS.1);
                let rhs = self.rng.gen_range(ADDITIVE_OPERANDS.0..=ADDITIVE_OPERANDS.1);
                Expression::new(lhs, op, rhs)
            }
        }
    }

    /// Generate a problem of a specific kind.
    pub fn generate_kind(&mut self, kind: QuestionKind) -> Problem {
        let (statement, threshold, ground_truth) = match kind {
            QuestionKind::Comparison => {
                let left = self.expression();
                let right = self.expression();
                let relation = *self.rng.choose(&Relation::ALL).unwrap_or(&Relation::Equal);
                let statement = format!("{} {} {}", left, relation.symbol(), right);
                (statement, None, relation.holds(left.value(), right.value()))
            }
            QuestionKind::IsWrong => {
                let expr = self.expression();
                // Always off by exactly one, never zero.
                let shown = expr.value() + self.rng.unit_sign();
                (format!("{} = {}", expr, shown), None, shown != expr.value())
            }
            QuestionKind::IsCorrect => {
                let expr = self.expression();
                let shown = if self.rng.coin() {
                    expr.value()
                } else {
                    expr.value() + self.rng.unit_sign()
                };
                (format!("{} = {}", expr, shown), None, shown == expr.value())
            }
            QuestionKind::IsOdd => {
                let expr = self.expression();
                (expr.to_string(), None, is_odd(expr.value()))
            }
            QuestionKind::IsEven => {
                let expr = self.expression();
                (expr.to_string(), None, !is_odd(expr.value()))
            }
            QuestionKind::IsGreaterThan => {
                let expr = self.expression();
                let threshold = greater_than_threshold(expr.value());
                (expr.to_string(), Some(threshold), expr.value() > threshold)
            }
            QuestionKind::IsLessThan => {
                let expr = self.expression();
                let threshold = less_than_threshold(expr.value());
                (expr.to_string(), Some(threshold), expr.value() < threshold)
            }
        };

        let id = ProblemId::new(self.next_id);
        self.next_id += 1;

        trace!(%id, ?kind, %statement, ground_truth, "Generated problem");

        Problem {
            id,
            kind,
            statement,
            prompt: kind.prompt(threshold),
            ground_truth,
        }
    }
}

impl ProblemSource for ProblemGenerator {
    fn generate(&mut self) -> Problem {
        let kind = *self
            .rng
            .choose(&QuestionKind::ALL)
            .unwrap_or(&QuestionKind::IsCorrect);
        self.generate_kind(kind)
    }
}
