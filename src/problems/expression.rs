//! Arithmetic building blocks: expressions, relations and thresholds.
//!
//! All arithmetic is exact `i64`. Operands stay small, so nothing overflows.

use serde::{Deserialize, Serialize};

/// Binary operator used in generated expressions. Division is never used.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

    /// Display glyph.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "×",
        }
    }

    #[must_use]
    pub const fn apply(self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
        }
    }
}

/// `lhs OP rhs`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Expression {
    pub lhs: i64,
    pub op: Operator,
    pub rhs: i64,
}

impl Expression {
    #[must_use]
    pub const fn new(lhs: i64, op: Operator, rhs: i64) -> Self {
        Self { lhs, op, rhs }
    }

    /// True result.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.op.apply(self.lhs, self.rhs)
    }
}

impl std::fmt::Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.op.symbol(), self.rhs)
    }
}

/// Relation between two expression results.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relation {
    Greater,
    Less,
    Equal,
    LessOrEqual,
    GreaterOrEqual,
}

impl Relation {
    pub const ALL: [Relation; 5] = [
        Relation::Greater,
        Relation::Less,
        Relation::Equal,
        Relation::LessOrEqual,
        Relation::GreaterOrEqual,
    ];

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Relation::Greater => ">",
            Relation::Less => "<",
            Relation::Equal => "=",
            Relation::LessOrEqual => "≤",
            Relation::GreaterOrEqual => "≥",
        }
    }

    /// Whether `lhs REL rhs` holds.
    #[must_use]
    pub const fn holds(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Relation::Greater => lhs > rhs,
            Relation::Less => lhs < rhs,
            Relation::Equal => lhs == rhs,
            Relation::LessOrEqual => lhs <= rhs,
            Relation::GreaterOrEqual => lhs >= rhs,
        }
    }
}

/// `floor((result + 1) / 2)`, floored toward negative infinity.
#[must_use]
pub const fn greater_than_threshold(result: i64) -> i64 {
    (result + 1).div_euclid(2)
}

/// `ceil(result * 1.5)`, rounded toward positive infinity.
#[must_use]
pub const fn less_than_threshold(result: i64) -> i64 {
    -((-3 * result).div_euclid(2))
}

/// Parity on the absolute value, so negative differences behave.
#[must_use]
pub const fn is_odd(result: i64) -> bool {
    result.abs() % 2 == 1
}
