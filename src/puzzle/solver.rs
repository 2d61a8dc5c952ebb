//! Exhaustive subset search over a round's pieces
//!
//! Rounds hold at most nine pieces, so trying every subset is cheap. All
//! operations are monotonic for positive pieces, which means any subset that
//! lands on the target can be played in any order without overshooting.

use super::attempt::Attempt;
use crate::consts::MAX_PIECES;
use super::round::Round;

/// Every index subset of size 1..=`max_terms` that reaches the target
pub fn solutions(round: &Round, max_terms: usize) -> Vec<Vec<usize>> {
    let indices: Vec<usize> = (0..round.pieces.len()).collect();
    subsets_reaching(round, round.start, &indices, max_terms)
}

pub fn is_solvable(round: &Round, max_terms: usize) -> bool {
    !solutions(round, max_terms).is_empty()
}

/// Smallest solution, preferring lower indices on ties
pub fn best_solution(round: &Round, max_terms: usize) -> Option<Vec<usize>> {
    solutions(round, max_terms).into_iter().min_by_key(|s| s.len())
}

/// An unchosen piece that belongs to some completion of `attempt`.
///
/// Returns `None` when the attempt is already closed or its picks can no
/// longer be completed; the player has to undo first.
pub fn hint(round: &Round, attempt: &Attempt) -> Option<usize> {
    if !attempt.is_open() {
        return None;
    }
    let available: Vec<usize> = (0..round.pieces.len())
        .filter(|&i| !attempt.is_chosen(i))
        .collect();
    subsets_reaching(round, attempt.running_total(), &available, available.len())
        .into_iter()
        .min_by_key(|s| s.len())
        .and_then(|s| s.first().copied())
}

fn subsets_reaching(round: &Round, from: i64, indices: &[usize], max_terms: usize) -> Vec<Vec<usize>> {
    if indices.len() > MAX_PIECES {
        log::warn!(
            "Not searching {} pieces; rounds hold at most {}",
            indices.len(),
            MAX_PIECES
        );
        return Vec::new();
    }
    let target = round.target as i64;
    let mut found = Vec::new();
    for mask in 1u32..(1 << indices.len()) {
        if mask.count_ones() as usize > max_terms {
            continue;
        }
        let subset: Vec<usize> = indices
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, &i)| i)
            .collect();
        let total = subset
            .iter()
            .fold(from, |total, &i| round.operation.apply(total, round.pieces[i]));
        if total == target {
            found.push(subset);
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::Operation;

    #[test]
    fn test_solutions_for_sample_round() {
        let round = Round::addition(10, vec![3, 7, 4, 2, 9]);
        assert_eq!(solutions(&round, 3), vec![vec![0, 1]]);
        assert_eq!(best_solution(&round, 3), Some(vec![0, 1]));
    }

    #[test]
    fn test_unsolvable_round() {
        let round = Round::addition(100, vec![1, 2, 3]);
        assert!(!is_solvable(&round, 3));
        assert_eq!(best_solution(&round, 3), None);
    }

    #[test]
    fn test_max_terms_limits_search() {
        let round = Round::addition(6, vec![1, 2, 3]);
        assert!(is_solvable(&round, 3));
        assert!(!is_solvable(&round, 2));
    }

    #[test]
    fn test_hint_completes_attempt() {
        let round = Round::addition(10, vec![3, 7, 4, 2, 9]);
        let mut attempt = Attempt::new(&round);
        assert_eq!(hint(&round, &attempt), Some(0));

        attempt.add_piece(&round, 0).unwrap();
        assert_eq!(hint(&round, &attempt), Some(1));

        attempt.add_piece(&round, 1).unwrap();
        assert_eq!(hint(&round, &attempt), None);
    }

    #[test]
    fn test_oversized_round_is_not_searched() {
        let round = Round::addition(5, vec![1; 40]);
        assert!(solutions(&round, 3).is_empty());
        assert_eq!(hint(&round, &Attempt::new(&round)), None);
    }

    #[test]
    fn test_hint_dead_end() {
        let round = Round::addition(10, vec![9, 7, 3]);
        let mut attempt = Attempt::new(&round);
        attempt.add_piece(&round, 0).unwrap(); // 9, nothing adds 1
        assert_eq!(hint(&round, &attempt), None);
    }

    #[test]
    fn test_subtract_and_multiply_solutions() {
        let round = Round::new(Operation::Subtract, 20, 7, vec![5, 8, 6]);
        assert_eq!(solutions(&round, 3), vec![vec![0, 1]]);

        let round = Round::new(Operation::Multiply, 1, 12, vec![5, 3, 4]);
        assert_eq!(solutions(&round, 3), vec![vec![1, 2]]);
    }
}
