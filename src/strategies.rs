//! Frequency- and statistics-driven strategy analyses.
//!
//! These complement the pattern catalog: instead of asking "which numbers fit
//! a named shape", each strategy proposes numbers from observed draw behavior.
//! All strategies return through the same `CandidateSet` shape so the
//! consensus scorer can treat pattern and strategy nominations uniformly.

use std::collections::BTreeMap;

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{CandidateSet, CandidateSource, DigitString, StrategyId};
use crate::generate::{self, weighted_number};
use crate::stats::HistorySnapshot;

/// How many candidates each strategy aims to propose.
const STRATEGY_TARGET: usize = 5;
/// Attempt budget for sum-targeted sampling.
const SUM_ATTEMPTS: usize = 50;
/// Attempt budget for topping a pool up with fresh random numbers.
const FILL_ATTEMPTS: usize = 20;

const EVENS: [u8; 5] = [0, 2, 4, 6, 8];
const ODDS: [u8; 5] = [1, 3, 5, 7, 9];

/// Run one strategy against the snapshot.
pub fn analyze(
    id: StrategyId,
    snapshot: &HistorySnapshot,
    window: usize,
    rng: &mut StdRng,
) -> CandidateSet {
    let pool = match id {
        StrategyId::Frequency => frequency_leaders(snapshot, rng),
        StrategyId::PositionWeighted => position_weighted(snapshot, rng),
        StrategyId::HotColdNumbers => hot_cold_numbers(snapshot, rng),
        StrategyId::EvenOddTemplates => even_odd_templates(rng),
        StrategyId::DigitSum => digit_sum_targets(snapshot, rng),
        StrategyId::Repetition => repetition_shapes(rng),
        StrategyId::PrizePosition => prize_position(snapshot, rng),
        StrategyId::SlidingWindow => sliding_window(snapshot, window, rng),
        StrategyId::Rarest => rarest_numbers(snapshot),
    };
    generate::finalize(CandidateSource::Strategy(id), pool, STRATEGY_TARGET, rng)
}

/// Run every strategy, in catalog order.
pub fn analyze_all(
    snapshot: &HistorySnapshot,
    window: usize,
    seeds: impl Fn(StrategyId) -> StdRng,
) -> Vec<CandidateSet> {
    StrategyId::ALL
        .iter()
        .map(|&id| {
            let mut rng = seeds(id);
            analyze(id, snapshot, window, &mut rng)
        })
        .collect()
}

/// Number occurrence counts over a slice of history, keyed for deterministic
/// iteration (numeric ascending).
fn occurrence_counts(numbers: &[DigitString]) -> BTreeMap<DigitString, usize> {
    let mut counts = BTreeMap::new();
    for &n in numbers {
        *counts.entry(n).or_insert(0usize) += 1;
    }
    counts
}

/// Top `limit` numbers by occurrence, ties broken numeric ascending.
fn top_by_count(counts: &BTreeMap<DigitString, usize>, limit: usize) -> Vec<DigitString> {
    let mut ranked: Vec<(DigitString, usize)> = counts.iter().map(|(&n, &c)| (n, c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(n, _)| n).collect()
}

/// The most-drawn numbers, topped up with fresh random picks.
fn frequency_leaders(snapshot: &HistorySnapshot, rng: &mut StdRng) -> Vec<DigitString> {
    let counts = occurrence_counts(&snapshot.numbers);
    let mut pool = top_by_count(&counts, 3);
    fill_with_random(&mut pool, rng);
    pool
}

/// Top a pool up to the strategy target with fresh unique random numbers.
/// Attempt-bounded; a still-short pool on exhaustion is returned as is.
fn fill_with_random(pool: &mut Vec<DigitString>, rng: &mut StdRng) {
    for _ in 0..FILL_ATTEMPTS {
        if pool.len() >= STRATEGY_TARGET {
            break;
        }
        let n = random_number(rng);
        if !pool.contains(&n) {
            pool.push(n);
        }
    }
}

fn position_weighted(snapshot: &HistorySnapshot, rng: &mut StdRng) -> Vec<DigitString> {
    (0..STRATEGY_TARGET)
        .map(|_| weighted_number(snapshot, rng))
        .collect()
}

/// Two hot-alphabet numbers, two cold-alphabet numbers, one mixed.
fn hot_cold_numbers(snapshot: &HistorySnapshot, rng: &mut StdRng) -> Vec<DigitString> {
    let hot = snapshot.hot_cold.hot();
    let cold = snapshot.hot_cold.cold();
    let mut pool = Vec::with_capacity(STRATEGY_TARGET);

    for _ in 0..2 {
        pool.push(from_alphabet_or(hot, rng, [1, 3, 5, 7]));
    }
    for _ in 0..2 {
        pool.push(from_alphabet_or(cold, rng, [2, 4, 6, 8]));
    }
    // One number mixing both temperatures, shuffled so the split is not
    // positional.
    if !hot.is_empty() && !cold.is_empty() {
        let mut digits = [
            hot[rng.gen_range(0..hot.len())],
            hot[rng.gen_range(0..hot.len())],
            cold[rng.gen_range(0..cold.len())],
            cold[rng.gen_range(0..cold.len())],
        ];
        digits.shuffle(rng);
        if let Some(n) = DigitString::from_digits(digits) {
            pool.push(n);
        }
    } else {
        pool.push(random_number(rng));
    }
    pool
}

/// Parity templates applied left to right: even/odd alternations plus one
/// all-even ticket.
fn even_odd_templates(rng: &mut StdRng) -> Vec<DigitString> {
    // true = even slot, false = odd slot.
    const TEMPLATES: [[bool; 4]; 5] = [
        [true, true, false, false],
        [true, false, true, false],
        [false, false, true, true],
        [false, true, false, true],
        [true, true, true, true],
    ];

    TEMPLATES
        .iter()
        .filter_map(|template| {
            let mut digits = [0u8; 4];
            for (slot, &even) in digits.iter_mut().zip(template) {
                let alphabet = if even { EVENS } else { ODDS };
                *slot = alphabet[rng.gen_range(0..alphabet.len())];
            }
            DigitString::from_digits(digits)
        })
        .collect()
}

/// For each of the three most common historical digit sums, sample one number
/// with that sum, then fill to target with weighted draws.
fn digit_sum_targets(snapshot: &HistorySnapshot, rng: &mut StdRng) -> Vec<DigitString> {
    let mut sum_counts: BTreeMap<u8, usize> = BTreeMap::new();
    for n in &snapshot.numbers {
        *sum_counts.entry(n.digit_sum()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(u8, usize)> = sum_counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut pool = Vec::new();
    for (target, _) in ranked.into_iter().take(3) {
        for _ in 0..SUM_ATTEMPTS {
            let n = random_number(rng);
            if n.digit_sum() == target {
                pool.push(n);
                break;
            }
        }
    }
    while pool.len() < STRATEGY_TARGET {
        pool.push(weighted_number(snapshot, rng));
    }
    pool
}

/// One ticket per repetition shape, with freshly drawn distinct digits.
fn repetition_shapes(rng: &mut StdRng) -> Vec<DigitString> {
    let a = rng.gen_range(0..10u8);
    let mut b = rng.gen_range(0..10u8);
    for _ in 0..FILL_ATTEMPTS {
        if b != a {
            break;
        }
        b = rng.gen_range(0..10u8);
    }
    if b == a {
        // Exhausted redraws; the neighboring digit keeps the shapes distinct.
        b = (a + 1) % 10;
    }

    [
        [a, a, b, b],
        [a, b, a, b],
        [a, b, b, a],
        [a, a, a, b],
        [a, a, a, a],
    ]
    .into_iter()
    .filter_map(DigitString::from_digits)
    .collect()
}

/// One digit per position, each taken from a draw sampled out of the
/// matching prize column (digit i of a column-i sample). Positions with no
/// column data fall back to a uniform digit.
fn prize_position(snapshot: &HistorySnapshot, rng: &mut StdRng) -> Vec<DigitString> {
    (0..STRATEGY_TARGET)
        .map(|_| {
            let mut digits = [0u8; 4];
            for (pos, slot) in digits.iter_mut().enumerate() {
                *slot = match snapshot.columns.get(pos).filter(|c| !c.is_empty()) {
                    Some(column) => column[rng.gen_range(0..column.len())].digit(pos),
                    None => rng.gen_range(0..10u8),
                };
            }
            DigitString::from_digits(digits).unwrap_or(DigitString::ZERO)
        })
        .collect()
}

/// Frequency leaders restricted to the most recent `window` draws.
fn sliding_window(snapshot: &HistorySnapshot, window: usize, rng: &mut StdRng) -> Vec<DigitString> {
    let counts = occurrence_counts(snapshot.recent(window));
    let mut pool = top_by_count(&counts, 3);
    fill_with_random(&mut pool, rng);
    pool
}

/// The least-drawn numbers on record, ties broken numeric ascending.
fn rarest_numbers(snapshot: &HistorySnapshot) -> Vec<DigitString> {
    let counts = occurrence_counts(&snapshot.numbers);
    let mut ranked: Vec<(DigitString, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(STRATEGY_TARGET)
        .map(|(n, _)| n)
        .collect()
}

fn random_number(rng: &mut StdRng) -> DigitString {
    DigitString::from_index(rng.gen_range(0..10_000u16)).unwrap_or(DigitString::ZERO)
}

fn from_alphabet_or(alphabet: &[u8], rng: &mut StdRng, fallback: [u8; 4]) -> DigitString {
    if alphabet.is_empty() {
        return DigitString::from_digits(fallback).unwrap_or(DigitString::ZERO);
    }
    let mut digits = [0u8; 4];
    for slot in &mut digits {
        *slot = alphabet[rng.gen_range(0..alphabet.len())];
    }
    DigitString::from_digits(digits).unwrap_or(DigitString::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DrawRecord;
    use chrono::NaiveDate;

    fn ds(s: &str) -> DigitString {
        DigitString::parse(s).unwrap()
    }

    fn snapshot_of(raw: &[&str]) -> HistorySnapshot {
        HistorySnapshot::build(&[DrawRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            numbers: raw.iter().map(|s| ds(s)).collect(),
        }])
    }

    #[test]
    fn frequency_leaders_rank_by_count_then_value() {
        let snapshot = snapshot_of(&["5555", "5555", "5555", "1234", "1234", "9876", "0001"]);
        let counts = occurrence_counts(&snapshot.numbers);
        let top = top_by_count(&counts, 3);
        assert_eq!(top[0], ds("5555"));
        assert_eq!(top[1], ds("1234"));
        // Single-occurrence tie: 0001 before 9876.
        assert_eq!(top[2], ds("0001"));
    }

    #[test]
    fn frequency_strategy_includes_the_leaders() {
        let snapshot = snapshot_of(&["5555", "5555", "5555", "1234", "1234"]);
        let mut rng = StdRng::seed_from_u64(1);
        let set = analyze(StrategyId::Frequency, &snapshot, 20, &mut rng);
        assert!(set.numbers.len() <= STRATEGY_TARGET);
        assert!(set.numbers.contains(&ds("5555")));
        assert!(set.numbers.contains(&ds("1234")));
    }

    #[test]
    fn random_fill_is_attempt_bounded() {
        // A pool already at target is left untouched.
        let mut full: Vec<DigitString> = ["1111", "2222", "3333", "4444", "5555"]
            .iter()
            .map(|s| ds(s))
            .collect();
        let mut rng = StdRng::seed_from_u64(8);
        fill_with_random(&mut full, &mut rng);
        assert_eq!(full.len(), STRATEGY_TARGET);

        // Filling from scratch draws at most FILL_ATTEMPTS times and never
        // overshoots the target.
        for seed in 0..20u64 {
            let mut pool = Vec::new();
            let mut rng = StdRng::seed_from_u64(seed);
            fill_with_random(&mut pool, &mut rng);
            assert!(pool.len() <= STRATEGY_TARGET, "seed {seed}");
            let mut unique = pool.clone();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), pool.len(), "seed {seed}");
        }
    }

    #[test]
    fn repetition_digits_are_distinct_for_every_seed() {
        for seed in 0..50u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pool = repetition_shapes(&mut rng);
            let d = pool[0].digits();
            assert_ne!(d[0], d[2], "seed {seed}");
        }
    }

    #[test]
    fn even_odd_templates_honor_parity() {
        let mut rng = StdRng::seed_from_u64(2);
        let pool = even_odd_templates(&mut rng);
        assert_eq!(pool.len(), 5);
        // First template: EEOO.
        let d = pool[0].digits();
        assert!(d[0] % 2 == 0 && d[1] % 2 == 0 && d[2] % 2 == 1 && d[3] % 2 == 1);
        // Last template: all even.
        assert!(pool[4].digits().iter().all(|&x| x % 2 == 0));
    }

    #[test]
    fn digit_sum_targets_hit_common_sums() {
        // All historical numbers sum to 18, the most common sum overall, so
        // rejection sampling finds a match for nearly every seed.
        let snapshot = snapshot_of(&["9900", "5544", "8622", "6633"]);
        let hit = (0..20u64).any(|seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            digit_sum_targets(&snapshot, &mut rng)
                .iter()
                .any(|n| n.digit_sum() == 18)
        });
        assert!(hit);
    }

    #[test]
    fn digit_sum_targets_fill_to_target_length() {
        let snapshot = snapshot_of(&["9900", "5544"]);
        let mut rng = StdRng::seed_from_u64(3);
        assert!(digit_sum_targets(&snapshot, &mut rng).len() >= STRATEGY_TARGET);
    }

    #[test]
    fn repetition_shapes_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(4);
        let pool = repetition_shapes(&mut rng);
        assert_eq!(pool.len(), 5);
        // AABB shape with distinct halves.
        let d = pool[0].digits();
        assert_eq!(d[0], d[1]);
        assert_eq!(d[2], d[3]);
        assert_ne!(d[0], d[2]);
        // Final shape is a quad.
        assert_eq!(pool[4].distinct_digits(), 1);
    }

    #[test]
    fn prize_position_samples_each_digit_from_its_column() {
        // Two prize columns: every first number starts with 9 and every
        // second number has 8 in position 1, so those digits are forced.
        // Positions 2 and 3 have no third or fourth column to draw from.
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let records = vec![
            DrawRecord {
                date,
                numbers: vec![ds("9123"), ds("1874")],
            },
            DrawRecord {
                date: date + chrono::Duration::days(3),
                numbers: vec![ds("9456"), ds("3872")],
            },
        ];
        let snapshot = HistorySnapshot::build(&records);

        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed);
            let pool = prize_position(&snapshot, &mut rng);
            assert_eq!(pool.len(), STRATEGY_TARGET, "seed {seed}");
            for n in &pool {
                assert_eq!(n.digit(0), 9, "seed {seed}");
                assert_eq!(n.digit(1), 8, "seed {seed}");
            }
        }
    }

    #[test]
    fn prize_position_survives_empty_history() {
        let snapshot = snapshot_of(&[]);
        let mut rng = StdRng::seed_from_u64(6);
        let set = analyze(StrategyId::PrizePosition, &snapshot, 20, &mut rng);
        assert!(!set.numbers.is_empty());
    }

    #[test]
    fn sliding_window_only_sees_recent_draws() {
        // 1111 dominates overall but never appears in the last 3 numbers.
        let snapshot = snapshot_of(&["1111", "1111", "1111", "2222", "2222", "3333"]);
        let counts = occurrence_counts(snapshot.recent(3));
        let top = top_by_count(&counts, 3);
        assert_eq!(top[0], ds("2222"));
        assert!(!top.contains(&ds("1111")));
    }

    #[test]
    fn rarest_prefers_low_counts_then_value() {
        let snapshot = snapshot_of(&["5555", "5555", "5555", "1234", "9876", "0001"]);
        let pool = rarest_numbers(&snapshot);
        assert_eq!(&pool[..3], &[ds("0001"), ds("1234"), ds("9876")]);
        // 5555 still shows up once the singles are exhausted.
        assert!(pool.contains(&ds("5555")));
    }

    #[test]
    fn hot_cold_strategy_survives_empty_history() {
        let snapshot = snapshot_of(&[]);
        let mut rng = StdRng::seed_from_u64(5);
        let set = analyze(StrategyId::HotColdNumbers, &snapshot, 20, &mut rng);
        assert!(!set.numbers.is_empty());
    }

    #[test]
    fn strategies_are_deterministic_per_seed() {
        let snapshot = snapshot_of(&["1221", "3443", "9876", "1234"]);
        for id in StrategyId::ALL {
            let mut a = StdRng::seed_from_u64(7);
            let mut b = StdRng::seed_from_u64(7);
            let first = analyze(id, &snapshot, 20, &mut a);
            let second = analyze(id, &snapshot, 20, &mut b);
            assert_eq!(first.numbers, second.numbers, "{}", id.display_name());
        }
    }
}
