//! Candidate generation for every catalog pattern.
//!
//! Three strategies, chosen per pattern:
//!
//! - exhaustive enumeration for small closed forms (palindrome grids, quads)
//! - bounded rejection/alphabet sampling for shapes without a closed form
//! - curated lists for lucky/seasonal/date rules
//!
//! Every sampling loop is attempt-bounded; an under-filled pool is returned
//! as a shorter set, never treated as an error. Finalization dedups, then
//! shuffles, then truncates to the requested count.

use chrono::{Datelike, NaiveDate};
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::{CandidateSet, CandidateSource, DigitString, PatternId};
use crate::patterns::{self, curated};
use crate::stats::HistorySnapshot;

/// Draw budget for alphabet-restricted sampling (always accepts).
const ALPHABET_DRAWS: usize = 20;
/// Attempt budget for predicate-rejection sampling.
const REJECT_ATTEMPTS: usize = 50;
/// Attempt budget for the wider rejection passes (totals, all-different).
const WIDE_ATTEMPTS: usize = 100;
/// Cap on enumeration pools that would otherwise grow past usefulness.
const ENUM_CAP: usize = 100;

/// Produce a bounded candidate set for one pattern.
pub fn generate(
    id: PatternId,
    requested: usize,
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
    rng: &mut StdRng,
) -> CandidateSet {
    let pool = pool_for(id, snapshot, asof, rng);
    finalize(CandidateSource::Pattern(id), pool, requested, rng)
}

/// Dedup (first occurrence wins), shuffle, truncate.
pub fn finalize(
    source: CandidateSource,
    pool: Vec<DigitString>,
    requested: usize,
    rng: &mut StdRng,
) -> CandidateSet {
    let mut seen = std::collections::HashSet::new();
    let mut numbers: Vec<DigitString> = pool.into_iter().filter(|n| seen.insert(*n)).collect();
    numbers.shuffle(rng);
    numbers.truncate(requested);
    CandidateSet { source, numbers }
}

/// One uniform 4-digit number.
fn uniform_number(rng: &mut StdRng) -> DigitString {
    // The range is exactly 0..10_000, so the index is always valid.
    DigitString::from_index(rng.gen_range(0..10_000u16)).unwrap_or(DigitString::ZERO)
}

/// Four digits drawn independently from a restricted alphabet.
fn from_alphabet(alphabet: &[u8], rng: &mut StdRng) -> Option<DigitString> {
    if alphabet.is_empty() {
        return None;
    }
    let mut digits = [0u8; 4];
    for slot in &mut digits {
        *slot = alphabet[rng.gen_range(0..alphabet.len())];
    }
    DigitString::from_digits(digits)
}

fn from_arrays(arrays: &[[u8; 4]]) -> Vec<DigitString> {
    arrays.iter().copied().filter_map(DigitString::from_digits).collect()
}

/// One number with each position drawn from the empirical per-position digit
/// distribution, falling back to a uniform digit where a position has no
/// historical data.
pub fn weighted_number(snapshot: &HistorySnapshot, rng: &mut StdRng) -> DigitString {
    let mut digits = [0u8; 4];
    for (pos, slot) in digits.iter_mut().enumerate() {
        if snapshot.positions.is_empty(pos) {
            *slot = rng.gen_range(0..10u8);
            continue;
        }
        let counts = snapshot.positions.position(pos);
        match WeightedIndex::new(counts.iter().copied()) {
            Ok(dist) => *slot = dist.sample(rng) as u8,
            Err(_) => *slot = rng.gen_range(0..10u8),
        }
    }
    DigitString::from_digits(digits).unwrap_or(DigitString::ZERO)
}

fn pool_for(
    id: PatternId,
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
    rng: &mut StdRng,
) -> Vec<DigitString> {
    let mut pool = Vec::new();
    match id {
        PatternId::SequentialUp => {
            for start in 0u8..10 {
                let digits = [start, (start + 1) % 10, (start + 2) % 10, (start + 3) % 10];
                pool.extend(DigitString::from_digits(digits));
            }
        }
        PatternId::SequentialDown => {
            for start in 0u8..10 {
                let digits = [start, (start + 9) % 10, (start + 8) % 10, (start + 7) % 10];
                pool.extend(DigitString::from_digits(digits));
            }
        }
        PatternId::Palindrome => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    pool.extend(DigitString::from_digits([i, j, j, i]));
                }
            }
        }
        PatternId::MirrorAbba | PatternId::Bookend => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    if i != j {
                        pool.extend(DigitString::from_digits([i, j, j, i]));
                    }
                }
            }
        }
        PatternId::RepeatAabb | PatternId::DoublePair => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    if i != j {
                        pool.extend(DigitString::from_digits([i, i, j, j]));
                    }
                }
            }
        }
        PatternId::AlternatingAbab => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    if i != j {
                        pool.extend(DigitString::from_digits([i, j, i, j]));
                    }
                }
            }
        }
        PatternId::AllEven => {
            for _ in 0..ALPHABET_DRAWS {
                pool.extend(from_alphabet(&[0, 2, 4, 6, 8], rng));
            }
        }
        PatternId::AllOdd => {
            for _ in 0..ALPHABET_DRAWS {
                pool.extend(from_alphabet(&[1, 3, 5, 7, 9], rng));
            }
        }
        PatternId::MixedEvenOdd => {
            for _ in 0..REJECT_ATTEMPTS {
                let n = uniform_number(rng);
                if patterns::predicates::mixed_even_odd(n.digits()) {
                    pool.push(n);
                }
            }
        }
        PatternId::SmallDigits => {
            for _ in 0..ALPHABET_DRAWS {
                pool.extend(from_alphabet(&[0, 1, 2, 3, 4], rng));
            }
        }
        PatternId::BigDigits => {
            for _ in 0..ALPHABET_DRAWS {
                pool.extend(from_alphabet(&[5, 6, 7, 8, 9], rng));
            }
        }
        PatternId::BigSmallMix => {
            // Two small then two big digits; the predicate accepts any 2/2 split.
            for _ in 0..REJECT_ATTEMPTS {
                let digits = [
                    rng.gen_range(0..5u8),
                    rng.gen_range(0..5u8),
                    rng.gen_range(5..10u8),
                    rng.gen_range(5..10u8),
                ];
                pool.extend(DigitString::from_digits(digits));
            }
        }
        PatternId::Arithmetic => {
            // Enumerate short progressions, keeping only those whose plain
            // (unwrapped) differences stay constant.
            for diff in [1i8, 2, 3, -1, -2, -3] {
                for start in 0i8..10 {
                    let values = [start, start + diff, start + 2 * diff, start + 3 * diff];
                    if values.iter().all(|&v| (0..10).contains(&v)) {
                        let digits = [
                            values[0] as u8,
                            values[1] as u8,
                            values[2] as u8,
                            values[3] as u8,
                        ];
                        pool.extend(DigitString::from_digits(digits));
                    }
                }
            }
        }
        PatternId::Geometric => {
            // The space of zero-free numbers is tiny; scan it.
            for i in 0..10_000u16 {
                if let Some(n) = DigitString::from_index(i) {
                    if patterns::predicates::geometric(n.digits()).matched {
                        pool.push(n);
                    }
                }
            }
        }
        PatternId::FibonacciLike => {
            for a in 0u8..10 {
                for b in 0u8..10 {
                    let c = (a + b) % 10;
                    let d = (b + c) % 10;
                    pool.extend(DigitString::from_digits([a, b, c, d]));
                }
            }
        }
        PatternId::Birthday => {
            'outer: for day in 1u8..=31 {
                for month in 1u8..=12 {
                    let digits = [day / 10, day % 10, month / 10, month % 10];
                    pool.extend(DigitString::from_digits(digits));
                    if pool.len() >= ENUM_CAP {
                        break 'outer;
                    }
                }
            }
        }
        PatternId::Mountain => {
            for _ in 0..WIDE_ATTEMPTS {
                let n = uniform_number(rng);
                if patterns::predicates::mountain(n.digits()) {
                    pool.push(n);
                }
            }
        }
        PatternId::Valley => {
            for _ in 0..WIDE_ATTEMPTS {
                let n = uniform_number(rng);
                if patterns::predicates::valley(n.digits()) {
                    pool.push(n);
                }
            }
        }
        PatternId::Plateau => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    if i == j {
                        continue;
                    }
                    for k in 0u8..10 {
                        if k != j {
                            pool.extend(DigitString::from_digits([i, j, j, k]));
                        }
                    }
                }
            }
        }
        PatternId::Cliff => {
            for _ in 0..REJECT_ATTEMPTS {
                let n = uniform_number(rng);
                if patterns::predicates::cliff(n.digits()) {
                    pool.push(n);
                }
            }
        }
        PatternId::Triple => {
            for i in 0u8..10 {
                for j in 0u8..10 {
                    if i != j {
                        pool.extend(DigitString::from_digits([i, i, i, j]));
                        pool.extend(DigitString::from_digits([j, i, i, i]));
                        pool.extend(DigitString::from_digits([i, j, j, j]));
                    }
                }
            }
        }
        PatternId::Quad => {
            for i in 0u8..10 {
                pool.extend(DigitString::from_digits([i, i, i, i]));
            }
        }
        PatternId::AllDifferent => {
            let mut digits: Vec<u8> = (0..10).collect();
            for _ in 0..WIDE_ATTEMPTS {
                digits.shuffle(rng);
                let pick = [digits[0], digits[1], digits[2], digits[3]];
                pool.extend(DigitString::from_digits(pick));
            }
        }
        PatternId::FirstLastSame => {
            for _ in 0..REJECT_ATTEMPTS {
                let a = rng.gen_range(0..10u8);
                let b = rng.gen_range(0..10u8);
                let c = rng.gen_range(0..10u8);
                pool.extend(DigitString::from_digits([a, b, c, a]));
            }
        }
        PatternId::MiddleSame => {
            for _ in 0..REJECT_ATTEMPTS {
                let a = rng.gen_range(0..10u8);
                let b = rng.gen_range(0..10u8);
                let c = rng.gen_range(0..10u8);
                pool.extend(DigitString::from_digits([a, b, b, c]));
            }
        }
        PatternId::SmallTotal => {
            // Digits capped at 2 keep the sum within the band by construction,
            // but the predicate check stays as the contract.
            for _ in 0..WIDE_ATTEMPTS {
                let digits = [
                    rng.gen_range(0..3u8),
                    rng.gen_range(0..3u8),
                    rng.gen_range(0..3u8),
                    rng.gen_range(0..3u8),
                ];
                if let Some(n) = DigitString::from_digits(digits) {
                    if patterns::predicates::small_total(&n) {
                        pool.push(n);
                    }
                }
            }
        }
        PatternId::MediumTotal => {
            for _ in 0..WIDE_ATTEMPTS {
                let n = uniform_number(rng);
                if patterns::predicates::medium_total(&n) {
                    pool.push(n);
                }
            }
        }
        PatternId::LargeTotal => {
            for _ in 0..WIDE_ATTEMPTS {
                let digits = [
                    rng.gen_range(5..10u8),
                    rng.gen_range(5..10u8),
                    rng.gen_range(0..10u8),
                    rng.gen_range(0..10u8),
                ];
                if let Some(n) = DigitString::from_digits(digits) {
                    if patterns::predicates::large_total(&n) {
                        pool.push(n);
                    }
                }
            }
        }
        PatternId::ExtremeTotal => {
            for _ in 0..WIDE_ATTEMPTS {
                let digits = [
                    rng.gen_range(7..10u8),
                    rng.gen_range(7..10u8),
                    rng.gen_range(7..10u8),
                    rng.gen_range(7..10u8),
                ];
                if let Some(n) = DigitString::from_digits(digits) {
                    if patterns::predicates::extreme_total(&n) {
                        pool.push(n);
                    }
                }
            }
        }
        PatternId::HotDigits => {
            let hot = snapshot.hot_cold.hot();
            if hot.is_empty() {
                pool = from_arrays(&[[1, 1, 1, 1], [2, 2, 2, 2], [3, 3, 3, 3]]);
            } else {
                for _ in 0..REJECT_ATTEMPTS {
                    pool.extend(from_alphabet(hot, rng));
                }
            }
        }
        PatternId::ColdDigits => {
            let cold = snapshot.hot_cold.cold();
            if cold.is_empty() {
                pool = from_arrays(&[[4, 4, 4, 4], [5, 5, 5, 5], [6, 6, 6, 6]]);
            } else {
                for _ in 0..REJECT_ATTEMPTS {
                    pool.extend(from_alphabet(cold, rng));
                }
            }
        }
        PatternId::Balanced => {
            let hot = snapshot.hot_cold.hot();
            let cold = snapshot.hot_cold.cold();
            if hot.is_empty() || cold.is_empty() {
                pool = from_arrays(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 0, 1, 2]]);
            } else {
                for _ in 0..REJECT_ATTEMPTS {
                    let mut digits = [
                        hot[rng.gen_range(0..hot.len())],
                        hot[rng.gen_range(0..hot.len())],
                        cold[rng.gen_range(0..cold.len())],
                        cold[rng.gen_range(0..cold.len())],
                    ];
                    digits.shuffle(rng);
                    pool.extend(DigitString::from_digits(digits));
                }
            }
        }
        PatternId::Lucky => {
            pool = from_arrays(curated::LUCKY_POOL);
        }
        PatternId::HistoricalEcho => {
            // Neighbors of the last few draws: one position shifted by one.
            let recent = snapshot.recent(5);
            if recent.len() < 5 {
                pool = from_arrays(&[[1, 2, 3, 4], [5, 6, 7, 8], [9, 8, 7, 6]]);
            } else {
                for number in recent {
                    for pos in 0..4 {
                        for shift in [1u8, 9] {
                            let mut digits = number.digits();
                            digits[pos] = (digits[pos] + shift) % 10;
                            pool.extend(DigitString::from_digits(digits));
                        }
                    }
                }
            }
        }
        PatternId::Seasonal => {
            pool = from_arrays(curated::seasonal_list(asof.month()));
        }
        PatternId::DateBased => {
            pool = curated::date_combinations(asof);
        }
        PatternId::Unseen => {
            for i in 0..10_000u16 {
                if let Some(n) = DigitString::from_index(i) {
                    if !snapshot.seen.contains(&n) {
                        pool.push(n);
                        if pool.len() >= ENUM_CAP {
                            break;
                        }
                    }
                }
            }
        }
        PatternId::SpecialCombination => {
            let mut historical: Vec<DigitString> = snapshot
                .seen
                .iter()
                .copied()
                .filter(|n| patterns::is_special_combination(n, snapshot, asof))
                .collect();
            historical.sort();
            if historical.is_empty() {
                pool = from_arrays(curated::SPECIAL_COMBINATIONS);
            } else {
                pool = historical;
            }
        }
    }
    pool
}
