//! Selection and validation of the player's in-progress attempt
//!
//! The running total is never stored: it is folded from the picks on demand,
//! so it cannot drift out of sync with them.

use serde::{Deserialize, Serialize};

use super::round::{Operation, Round};
use crate::error::SelectError;

/// Classification of an attempt's running total against the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Total equals the target; the round is solved
    Exact,
    /// Total went past the target; the attempt must be undone or cleared
    Over,
    /// Still short of the target
    Continue,
}

/// A chosen piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pick {
    pub index: usize,
    pub value: u32,
}

/// The player's selection for the current round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attempt {
    operation: Operation,
    start: i64,
    target: u32,
    picks: Vec<Pick>,
}

impl Attempt {
    /// Create an empty attempt bound to `round`
    pub fn new(round: &Round) -> Self {
        Self {
            operation: round.operation,
            start: round.start,
            target: round.target,
            picks: Vec::new(),
        }
    }

    pub fn picks(&self) -> &[Pick] {
        &self.picks
    }

    /// Chosen values in selection order
    pub fn chosen_values(&self) -> Vec<u32> {
        self.picks.iter().map(|p| p.value).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    pub fn is_chosen(&self, index: usize) -> bool {
        self.picks.iter().any(|p| p.index == index)
    }

    pub fn running_total(&self) -> i64 {
        self.picks
            .iter()
            .fold(self.start, |total, p| self.operation.apply(total, p.value))
    }

    /// Classification of the current total
    pub fn status(&self) -> Outcome {
        self.operation.classify(self.running_total(), self.target)
    }

    /// Whether more pieces may be added
    pub fn is_open(&self) -> bool {
        self.status() == Outcome::Continue
    }

    /// Add the piece at `index` and classify the new total.
    ///
    /// Out-of-range, already-chosen and closed-attempt selections are
    /// rejected without touching the attempt.
    pub fn add_piece(&mut self, round: &Round, index: usize) -> Result<Outcome, SelectError> {
        let Some(&value) = round.pieces.get(index) else {
            return Err(SelectError::OutOfRange {
                index,
                len: round.pieces.len(),
            });
        };
        if self.is_chosen(index) {
            return Err(SelectError::AlreadyChosen { index });
        }
        if !self.is_open() {
            return Err(SelectError::Closed);
        }

        self.picks.push(Pick { index, value });
        Ok(self.status())
    }

    /// Remove the most recent pick. `None` means there was nothing to undo.
    pub fn remove_last(&mut self) -> Option<Pick> {
        self.picks.pop()
    }

    pub fn clear(&mut self) {
        self.picks.clear();
    }

    /// Render the attempt as an equation, e.g. "3 + 4 = 7"
    pub fn equation(&self) -> String {
        let symbol = self.operation.symbol();
        let mut out = match self.operation {
            Operation::Subtract => self.start.to_string(),
            _ => String::new(),
        };
        for (i, pick) in self.picks.iter().enumerate() {
            if i > 0 || self.operation == Operation::Subtract {
                out.push(' ');
                out.push(symbol);
                out.push(' ');
            }
            out.push_str(&pick.value.to_string());
        }
        if !self.picks.is_empty() {
            out.push_str(&format!(" = {}", self.running_total()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_round() -> Round {
        Round::addition(10, vec![3, 7, 4, 2, 9])
    }

    #[test]
    fn test_reach_target_exactly() {
        let round = sample_round();
        let mut attempt = Attempt::new(&round);

        assert_eq!(attempt.add_piece(&round, 0), Ok(Outcome::Continue));
        assert_eq!(attempt.running_total(), 3);
        assert_eq!(attempt.add_piece(&round, 1), Ok(Outcome::Exact));
        assert_eq!(attempt.running_total(), 10);
        assert_eq!(attempt.equation(), "3 + 7 = 10");
    }

    #[test]
    fn test_overshoot_is_reported() {
        let round = sample_round();
        let mut attempt = Attempt::new(&round);

        assert_eq!(attempt.add_piece(&round, 2), Ok(Outcome::Continue));
        assert_eq!(attempt.add_piece(&round, 4), Ok(Outcome::Over));
        assert_eq!(attempt.running_total(), 13);

        // Engine does not reset on its own
        assert_eq!(attempt.status(), Outcome::Over);
        assert_eq!(attempt.add_piece(&round, 3), Err(SelectError::Closed));
        assert_eq!(attempt.picks().len(), 2);

        attempt.remove_last();
        assert!(attempt.is_open());
        assert_eq!(attempt.add_piece(&round, 3), Ok(Outcome::Continue));
    }

    #[test]
    fn test_double_select_ignored() {
        let round = sample_round();
        let mut attempt = Attempt::new(&round);
        attempt.add_piece(&round, 0).unwrap();
        let before = attempt.clone();

        assert_eq!(
            attempt.add_piece(&round, 0),
            Err(SelectError::AlreadyChosen { index: 0 })
        );
        assert_eq!(attempt, before);
    }

    #[test]
    fn test_out_of_range_ignored() {
        let round = sample_round();
        let mut attempt = Attempt::new(&round);
        assert_eq!(
            attempt.add_piece(&round, 5),
            Err(SelectError::OutOfRange { index: 5, len: 5 })
        );
        assert!(attempt.is_empty());
    }

    #[test]
    fn test_empty_undo() {
        let round = sample_round();
        let mut attempt = Attempt::new(&round);
        let before = attempt.clone();
        assert_eq!(attempt.remove_last(), None);
        assert_eq!(attempt, before);
    }

    #[test]
    fn test_subtract_attempt() {
        let round = Round::new(Operation::Subtract, 20, 7, vec![5, 8, 9]);
        let mut attempt = Attempt::new(&round);
        assert_eq!(attempt.running_total(), 20);
        assert_eq!(attempt.add_piece(&round, 0), Ok(Outcome::Continue));
        assert_eq!(attempt.add_piece(&round, 1), Ok(Outcome::Exact));
        assert_eq!(attempt.equation(), "20 - 5 - 8 = 7");

        let mut attempt = Attempt::new(&round);
        attempt.add_piece(&round, 2).unwrap();
        assert_eq!(attempt.add_piece(&round, 1), Ok(Outcome::Over));
    }

    #[test]
    fn test_multiply_attempt() {
        let round = Round::new(Operation::Multiply, 1, 12, vec![3, 4, 5]);
        let mut attempt = Attempt::new(&round);
        assert_eq!(attempt.add_piece(&round, 0), Ok(Outcome::Continue));
        assert_eq!(attempt.add_piece(&round, 2), Ok(Outcome::Over));
        attempt.remove_last();
        assert_eq!(attempt.add_piece(&round, 1), Ok(Outcome::Exact));
    }

    fn round_strategy() -> impl Strategy<Value = Round> {
        (1u32..40, prop::collection::vec(1u32..12, 1..9))
            .prop_map(|(target, pieces)| Round::addition(target, pieces))
    }

    proptest! {
        #[test]
        fn prop_classification_matches_total(round in round_strategy(), order in prop::collection::vec(0usize..9, 0..9)) {
            let mut attempt = Attempt::new(&round);
            for index in order {
                let prior = attempt.running_total();
                match attempt.add_piece(&round, index) {
                    Ok(outcome) => {
                        let total = prior + round.pieces[index] as i64;
                        prop_assert_eq!(attempt.running_total(), total);
                        let expected = if total == round.target as i64 {
                            Outcome::Exact
                        } else if total > round.target as i64 {
                            Outcome::Over
                        } else {
                            Outcome::Continue
                        };
                        prop_assert_eq!(outcome, expected);
                    }
                    Err(_) => prop_assert_eq!(attempt.running_total(), prior),
                }
            }
            let sum: i64 = attempt.chosen_values().iter().map(|&v| v as i64).sum();
            prop_assert_eq!(attempt.running_total(), sum);
        }

        #[test]
        fn prop_undo_restores_attempt(round in round_strategy(), order in prop::collection::vec(0usize..9, 0..9), next in 0usize..9) {
            let mut attempt = Attempt::new(&round);
            for index in order {
                let _ = attempt.add_piece(&round, index);
            }
            let before = attempt.clone();
            if attempt.add_piece(&round, next).is_ok() {
                attempt.remove_last();
            }
            prop_assert_eq!(attempt, before);
        }

        #[test]
        fn prop_chosen_index_never_repeats(round in round_strategy(), order in prop::collection::vec(0usize..9, 0..20)) {
            let mut attempt = Attempt::new(&round);
            for index in order {
                let _ = attempt.add_piece(&round, index);
            }
            let mut seen: Vec<usize> = attempt.picks().iter().map(|p| p.index).collect();
            let len = seen.len();
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), len);
        }
    }
}
