//! Problem generation.
//!
//! The controller draws problems through the [`ProblemSource`] trait so hosts
//! and tests can substitute a scripted deck for the random generator.
//!
//! ```
//! use swipe_math::problems::{ProblemGenerator, ProblemSource};
//!
//! let mut generator = ProblemGenerator::from_seed(42);
//! let deck = generator.generate_batch(10);
//! assert_eq!(deck.len(), 10);
//! ```

mod expression;
mod generator;

pub use expression::{
    greater_than_threshold, is_odd, less_than_threshold, Expression, Operator, Relation,
};
pub use generator::ProblemGenerator;

use crate::core::Problem;

/// Anything that can deal problems.
pub trait ProblemSource {
    /// Produce one problem.
    fn generate(&mut self) -> Problem;

    /// Produce `count` independent problems. Duplicates are allowed.
    fn generate_batch(&mut self, count: usize) -> Vec<Problem> {
        (0..count).map(|_| self.generate()).collect()
    }
}
