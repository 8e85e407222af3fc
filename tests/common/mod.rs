//! Shared fixtures for integration tests.

#![allow(dead_code)]

use swipe_math::core::{Problem, ProblemId, QuestionKind};
use swipe_math::problems::ProblemSource;

/// Deals `IsCorrect` problems whose ground truth cycles through a script.
pub struct ScriptedSource {
    truths: Vec<bool>,
    next: u64,
}

impl ScriptedSource {
    pub fn new(truths: &[bool]) -> Self {
        assert!(!truths.is_empty());
        Self {
            truths: truths.to_vec(),
            next: 0,
        }
    }

    pub fn all_true() -> Self {
        Self::new(&[true])
    }

    pub fn all_false() -> Self {
        Self::new(&[false])
    }

    /// Number of problems dealt so far.
    pub fn dealt(&self) -> u64 {
        self.next
    }
}

impl ProblemSource for ScriptedSource {
    fn generate(&mut self) -> Problem {
        let id = self.next;
        self.next += 1;
        let truth = self.truths[(id as usize) % self.truths.len()];
        let shown = if truth { 2 } else { 3 };
        Problem {
            id: ProblemId::new(id),
            kind: QuestionKind::IsCorrect,
            statement: format!("1 + 1 = {shown}"),
            prompt: QuestionKind::IsCorrect.prompt(None),
            ground_truth: truth,
        }
    }
}
