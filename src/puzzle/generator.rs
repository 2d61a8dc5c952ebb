//! Solvable round generation
//!
//! Every round is built backwards from its answer: pick a target, split it
//! into a few in-range pieces, pad with decoys, shuffle. The split always
//! exists by construction, so a generated round is always solvable.

use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use super::round::{Operation, Round};
use crate::tuning::{RoundParams, Tuning};

/// Targets tried before multiplication falls back to a built product
const MULTIPLY_RETRIES: u32 = 16;

/// Generate a round for `difficulty` using `tuning` and the supplied RNG
pub fn generate_round<R: Rng + ?Sized>(tuning: &Tuning, difficulty: u32, rng: &mut R) -> Round {
    generate_with_params(&tuning.params(difficulty), rng)
}

/// Generate a round from explicit parameters
pub fn generate_with_params<R: Rng + ?Sized>(params: &RoundParams, rng: &mut R) -> Round {
    let bounds = Bounds::from_params(params);
    let max_terms = params.max_terms.min(params.piece_count).max(1);

    let (start, target, solution) = match params.operation {
        Operation::Add => {
            let target = rng.random_range(bounds.target_lo..=bounds.target_hi);
            let parts = split_sum(target, bounds.piece_lo, bounds.piece_hi, max_terms, rng)
                .unwrap_or_else(|| fallback_split(target, max_terms));
            (0, target, parts)
        }
        Operation::Subtract => {
            let target = rng.random_range(bounds.target_lo..=bounds.target_hi);
            let gap_hi = bounds.piece_hi.saturating_mul(max_terms as u32);
            let gap = rng.random_range(bounds.piece_lo..=gap_hi);
            let parts = split_sum(gap, bounds.piece_lo, bounds.piece_hi, max_terms, rng)
                .unwrap_or_else(|| fallback_split(gap, max_terms));
            (target as i64 + gap as i64, target, parts)
        }
        Operation::Multiply => {
            let (target, parts) = multiply_solution(&bounds, max_terms, rng);
            (1, target, parts)
        }
    };

    let decoy_count = params.piece_count.saturating_sub(solution.len());
    let mut tagged: Vec<(u32, bool)> = solution.iter().map(|&v| (v, true)).collect();
    tagged.extend(
        (0..decoy_count).map(|_| (rng.random_range(bounds.piece_lo..=bounds.piece_hi), false)),
    );
    tagged.shuffle(rng);

    let pieces: Vec<u32> = tagged.iter().map(|&(v, _)| v).collect();
    let intended: Vec<usize> = tagged
        .iter()
        .enumerate()
        .filter_map(|(i, &(_, part))| part.then_some(i))
        .collect();

    log::debug!(
        "Generated {:?} round: start={} target={} pieces={:?} intended={:?}",
        params.operation,
        start,
        target,
        pieces,
        intended
    );

    Round {
        operation: params.operation,
        start,
        target,
        pieces,
        intended,
    }
}

/// Non-empty, positive ranges regardless of what the tuning said
struct Bounds {
    target_lo: u32,
    target_hi: u32,
    piece_lo: u32,
    piece_hi: u32,
}

impl Bounds {
    fn from_params(params: &RoundParams) -> Self {
        // A product target of 1 equals the starting total and leaves nothing to pick
        let floor = match params.operation {
            Operation::Multiply => 2,
            _ => 1,
        };
        let target_lo = (*params.target_range.start()).max(floor);
        let piece_lo = (*params.piece_range.start()).max(1);
        Self {
            target_lo,
            target_hi: (*params.target_range.end()).max(target_lo),
            piece_lo,
            piece_hi: (*params.piece_range.end()).max(piece_lo),
        }
    }
}

/// Split `total` into 1..=`max_terms` parts, each in `lo..=hi`.
///
/// Each part is peeled off the remainder with bounds that keep the rest
/// splittable; the last part takes whatever is left. Returns `None` when no
/// such split exists.
pub fn split_sum<R: Rng + ?Sized>(
    total: u32,
    lo: u32,
    hi: u32,
    max_terms: usize,
    rng: &mut R,
) -> Option<Vec<u32>> {
    if lo == 0 || lo > hi || total < lo || max_terms == 0 {
        return None;
    }
    let fewest = total.div_ceil(hi) as usize;
    let most = max_terms.min((total / lo) as usize);
    if fewest > most {
        return None;
    }

    let terms = rng.random_range(fewest..=most);
    let mut parts = Vec::with_capacity(terms);
    let mut remaining = total;
    for left in (1..terms).rev() {
        let left = left as u32;
        let low = lo.max(remaining.saturating_sub(hi.saturating_mul(left)));
        let high = hi.min(remaining.saturating_sub(lo.saturating_mul(left)));
        if low > high {
            return None;
        }
        let part = rng.random_range(low..=high);
        parts.push(part);
        remaining -= part;
    }

    if !(lo..=hi).contains(&remaining) {
        return None;
    }
    parts.push(remaining);
    Some(parts)
}

/// Minimal split used when the ranges cannot hold the total
fn fallback_split(total: u32, max_terms: usize) -> Vec<u32> {
    log::warn!("Falling back to minimal split for {}", total);
    if total <= 1 || max_terms < 2 {
        vec![total.max(1)]
    } else {
        vec![1, total - 1]
    }
}

fn multiply_solution<R: Rng + ?Sized>(
    bounds: &Bounds,
    max_terms: usize,
    rng: &mut R,
) -> (u32, Vec<u32>) {
    let factor_lo = bounds.piece_lo.max(2);
    let factor_hi = bounds.piece_hi.max(factor_lo);

    for _ in 0..MULTIPLY_RETRIES {
        let target = rng.random_range(bounds.target_lo..=bounds.target_hi);
        let splits = factorizations(target, bounds.piece_lo, factor_hi, max_terms);
        if let Some(split) = splits.choose(rng) {
            return (target, split.clone());
        }
    }

    let a = rng.random_range(factor_lo..=factor_hi);
    if max_terms < 2 {
        log::warn!("No factorable target found; using single factor {}", a);
        return (a, vec![a]);
    }
    let b = rng.random_range(factor_lo..=factor_hi);
    log::warn!("No factorable target found; using {} x {}", a, b);
    (a * b, vec![a, b])
}

/// All multisets of 1..=`max_terms` factors in range whose product is `target`.
///
/// Multi-factor splits never use 1, which would only pad the answer.
pub fn factorizations(target: u32, piece_lo: u32, hi: u32, max_terms: usize) -> Vec<Vec<u32>> {
    let mut out = Vec::new();
    if (piece_lo..=hi).contains(&target) {
        out.push(vec![target]);
    }
    if max_terms >= 2 {
        let mut current = Vec::with_capacity(max_terms);
        collect_factors(target, piece_lo.max(2), hi, max_terms, &mut current, &mut out);
    }
    out
}

fn collect_factors(
    remaining: u32,
    min_factor: u32,
    hi: u32,
    terms_left: usize,
    current: &mut Vec<u32>,
    out: &mut Vec<Vec<u32>>,
) {
    for f in min_factor..=hi.min(remaining) {
        if remaining % f != 0 {
            continue;
        }
        current.push(f);
        let rest = remaining / f;
        if rest == 1 {
            if current.len() >= 2 {
                out.push(current.clone());
            }
        } else if terms_left > 1 && rest >= f {
            collect_factors(rest, f, hi, terms_left - 1, current, out);
        }
        current.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::solver;
    use crate::tuning::Skin;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn assert_solvable(round: &Round, max_terms: usize) {
        assert!(!round.intended.is_empty());
        assert!(round.intended.len() <= max_terms);
        assert_eq!(round.total_of(&round.intended), Some(round.target as i64));
        assert!(solver::is_solvable(round, max_terms), "unsolvable: {:?}", round);
        assert!(round.pieces.iter().all(|&v| v > 0));
    }

    #[test]
    fn test_difficulty_zero_thousand_rounds() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let round = generate_round(&tuning, 0, &mut rng);
            assert_solvable(&round, tuning.max_terms);
            assert_eq!(round.pieces.len(), tuning.piece_count);
            assert!((5..=12).contains(&round.target));
            assert!(round.pieces.iter().all(|&v| (1..=9).contains(&v)));
        }
    }

    #[test]
    fn test_same_seed_same_round() {
        let tuning = Tuning::default();
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        for d in 0..10 {
            assert_eq!(
                generate_round(&tuning, d, &mut a),
                generate_round(&tuning, d, &mut b)
            );
        }
    }

    #[test]
    fn test_unsplittable_target_falls_back() {
        let tuning = Tuning {
            target_min: 100,
            target_max: 100,
            piece_max_growth_every: 0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let round = generate_round(&tuning, 0, &mut rng);
        assert_eq!(round.target, 100);
        assert!(round.pieces.contains(&1));
        assert!(round.pieces.contains(&99));
        assert_solvable(&round, tuning.max_terms);
    }

    #[test]
    fn test_split_sum_bounds() {
        let mut rng = Pcg32::seed_from_u64(3);
        for total in 1..=27 {
            let parts = split_sum(total, 1, 9, 3, &mut rng).unwrap();
            assert_eq!(parts.iter().sum::<u32>(), total);
            assert!(parts.len() <= 3);
            assert!(parts.iter().all(|&p| (1..=9).contains(&p)));
        }
        assert_eq!(split_sum(28, 1, 9, 3, &mut rng), None);
        assert_eq!(split_sum(0, 1, 9, 3, &mut rng), None);
        assert_eq!(split_sum(5, 6, 9, 3, &mut rng), None);
    }

    #[test]
    fn test_factorizations() {
        let mut splits = factorizations(12, 1, 9, 3);
        splits.sort();
        assert_eq!(splits, vec![vec![2, 2, 3], vec![2, 6], vec![3, 4]]);

        // Prime above the piece range cannot be built
        assert!(factorizations(13, 1, 9, 3).is_empty());
        assert_eq!(factorizations(7, 1, 9, 3), vec![vec![7]]);
    }

    #[test]
    fn test_multiply_fallback_is_solvable() {
        let tuning = Tuning {
            operation: crate::puzzle::Operation::Multiply,
            target_min: 97,
            target_max: 97,
            max_terms: 2,
            piece_max_growth_every: 0,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(5);
        let round = generate_round(&tuning, 0, &mut rng);
        assert_solvable(&round, 2);
    }

    #[test]
    fn test_multiply_never_starts_on_target() {
        // Bypasses validation, which refuses this tuning
        let tuning = Tuning {
            operation: crate::puzzle::Operation::Multiply,
            target_min: 1,
            target_max: 1,
            ..Default::default()
        };
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let round = generate_round(&tuning, 0, &mut rng);
            assert!(round.target >= 2);
            assert_ne!(round.start, round.target as i64);
            assert!(crate::puzzle::Attempt::new(&round).is_open());
            assert_solvable(&round, tuning.max_terms);
        }
    }

    #[test]
    fn test_extreme_difficulty_still_solvable() {
        let mut rng = Pcg32::seed_from_u64(9);
        for skin in Skin::ALL {
            let tuning = skin.tuning();
            let round = generate_round(&tuning, u32::MAX, &mut rng);
            assert_solvable(&round, tuning.max_terms);
        }
    }

    proptest! {
        #[test]
        fn prop_every_skin_generates_solvable_rounds(seed in any::<u64>(), difficulty in 0u32..60, skin_index in 0usize..5) {
            let tuning = Skin::ALL[skin_index].tuning();
            let mut rng = Pcg32::seed_from_u64(seed);
            let round = generate_round(&tuning, difficulty, &mut rng);
            prop_assert!(!round.intended.is_empty());
            prop_assert!(round.intended.len() <= tuning.max_terms);
            prop_assert_eq!(round.total_of(&round.intended), Some(round.target as i64));
            prop_assert!(solver::is_solvable(&round, tuning.max_terms));
            prop_assert!(round.pieces.len() >= round.intended.len());
            prop_assert!(round.pieces.len() <= crate::consts::MAX_PIECES);
            prop_assert_ne!(round.start, round.target as i64);
        }
    }
}
