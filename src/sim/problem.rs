//! Arithmetic problems
//!
//! Single-digit operands with `+`, `-` or `*`. Division is never produced so
//! every answer is an exact integer.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest operand value (inclusive)
pub const MAX_OPERAND: i32 = 9;

/// Supported operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
}

impl Operator {
    pub const ALL: [Operator; 3] = [Operator::Add, Operator::Sub, Operator::Mul];

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
        }
    }

    pub fn apply(&self, lhs: i32, rhs: i32) -> i32 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
        }
    }
}

/// A problem and its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    pub lhs: i32,
    pub operator: Operator,
    pub rhs: i32,
    pub answer: i32,
}

impl Problem {
    pub fn new(lhs: i32, operator: Operator, rhs: i32) -> Self {
        Self {
            lhs,
            operator,
            rhs,
            answer: operator.apply(lhs, rhs),
        }
    }

    /// Random problem: operands uniform in `0..=9`, operator uniform
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let lhs = rng.random_range(0..=MAX_OPERAND);
        let rhs = rng.random_range(0..=MAX_OPERAND);
        let operator = Operator::ALL[rng.random_range(0..Operator::ALL.len())];
        Self::new(lhs, operator, rhs)
    }

    /// "3 + 4"
    pub fn expression(&self) -> String {
        self.to_string()
    }

    /// "3 + 4 = ?"
    pub fn prompt(&self) -> String {
        format!("{self} = ?")
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.lhs, self.operator.symbol(), self.rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_text() {
        let problem = Problem::new(3, Operator::Sub, 7);
        assert_eq!(problem.answer, -4);
        assert_eq!(problem.expression(), "3 - 7");
        assert_eq!(problem.prompt(), "3 - 7 = ?");
        assert_eq!(Problem::new(6, Operator::Mul, 9).answer, 54);
    }

    #[test]
    fn test_all_operators_show_up() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let problem = Problem::generate(&mut rng);
            let idx = Operator::ALL.iter().position(|&op| op == problem.operator).unwrap();
            seen[idx] = true;
        }
        assert_eq!(seen, [true, true, true]);
    }

    proptest! {
        #[test]
        fn prop_answer_matches_operator(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let problem = Problem::generate(&mut rng);
            prop_assert!((0..=MAX_OPERAND).contains(&problem.lhs));
            prop_assert!((0..=MAX_OPERAND).contains(&problem.rhs));
            let expected = match problem.operator {
                Operator::Add => problem.lhs + problem.rhs,
                Operator::Sub => problem.lhs - problem.rhs,
                Operator::Mul => problem.lhs * problem.rhs,
            };
            prop_assert_eq!(problem.answer, expected);
        }
    }
}
