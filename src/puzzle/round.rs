//! Round and operation types

use serde::{Deserialize, Serialize};

use super::attempt::Outcome;

/// How chosen pieces combine into the running total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
    /// Pieces are added to a total starting at zero
    #[default]
    Add,
    /// Pieces are taken away from a starting value down to the target
    Subtract,
    /// Pieces are multiplied together, starting at one
    Multiply,
}

impl Operation {
    pub fn symbol(&self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
            Operation::Multiply => '×',
        }
    }

    /// Identity start value for operations that do not carry their own
    pub fn identity(&self) -> i64 {
        match self {
            Operation::Add | Operation::Subtract => 0,
            Operation::Multiply => 1,
        }
    }

    /// Fold one piece into a running total
    #[inline]
    pub fn apply(&self, total: i64, value: u32) -> i64 {
        let value = value as i64;
        match self {
            Operation::Add => total.saturating_add(value),
            Operation::Subtract => total.saturating_sub(value),
            Operation::Multiply => total.saturating_mul(value),
        }
    }

    /// True if `total` has moved past `target` in this operation's direction
    #[inline]
    pub fn overshoots(&self, total: i64, target: u32) -> bool {
        let target = target as i64;
        match self {
            Operation::Add | Operation::Multiply => total > target,
            Operation::Subtract => total < target,
        }
    }

    /// Classify a running total against a target
    pub fn classify(&self, total: i64, target: u32) -> Outcome {
        if total == target as i64 {
            Outcome::Exact
        } else if self.overshoots(total, target) {
            Outcome::Over
        } else {
            Outcome::Continue
        }
    }
}

/// One arithmetic puzzle: reach `target` from `start` using some of `pieces`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub operation: Operation,
    /// Value the running total starts from
    pub start: i64,
    /// The number the player must hit exactly
    pub target: u32,
    /// Candidate pieces in display order
    pub pieces: Vec<u32>,
    /// Indices of the solution the generator built (other subsets may also work)
    #[serde(default)]
    pub intended: Vec<usize>,
}

impl Round {
    pub fn new(operation: Operation, start: i64, target: u32, pieces: Vec<u32>) -> Self {
        Self {
            operation,
            start,
            target,
            pieces,
            intended: Vec::new(),
        }
    }

    /// Convenience constructor for a plain addition round
    pub fn addition(target: u32, pieces: Vec<u32>) -> Self {
        Self::new(Operation::Add, 0, target, pieces)
    }

    /// Combine the pieces at `indices` from the round's start value
    pub fn total_of(&self, indices: &[usize]) -> Option<i64> {
        indices.iter().try_fold(self.start, |total, &i| {
            self.pieces.get(i).map(|&v| self.operation.apply(total, v))
        })
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// Short human-readable prompt, e.g. "Make 12" or "Take 20 down to 7"
    pub fn prompt(&self) -> String {
        match self.operation {
            Operation::Add => format!("Make {}", self.target),
            Operation::Subtract => format!("Take {} down to {}", self.start, self.target),
            Operation::Multiply => format!("Multiply to {}", self.target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_directions() {
        assert_eq!(Operation::Add.classify(9, 10), Outcome::Continue);
        assert_eq!(Operation::Add.classify(10, 10), Outcome::Exact);
        assert_eq!(Operation::Add.classify(11, 10), Outcome::Over);

        assert_eq!(Operation::Subtract.classify(12, 10), Outcome::Continue);
        assert_eq!(Operation::Subtract.classify(9, 10), Outcome::Over);

        assert_eq!(Operation::Multiply.classify(6, 12), Outcome::Continue);
        assert_eq!(Operation::Multiply.classify(24, 12), Outcome::Over);
    }

    #[test]
    fn test_total_of() {
        let round = Round::new(Operation::Subtract, 20, 7, vec![5, 8, 3]);
        assert_eq!(round.total_of(&[0, 1]), Some(7));
        assert_eq!(round.total_of(&[]), Some(20));
        assert_eq!(round.total_of(&[4]), None);

        let round = Round::new(Operation::Multiply, 1, 12, vec![3, 4, 2]);
        assert_eq!(round.total_of(&[0, 1]), Some(12));
    }

    #[test]
    fn test_prompt() {
        assert_eq!(Round::addition(10, vec![1]).prompt(), "Make 10");
        let round = Round::new(Operation::Subtract, 20, 7, vec![13]);
        assert_eq!(round.prompt(), "Take 20 down to 7");
    }
}
