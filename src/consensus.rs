//! Cross-source consensus scoring and ranking.
//!
//! Candidate sets from patterns and strategies are merged into one tally.
//! Two rankings come out of it:
//!
//! - `rank_by_bonus`: weighted bonus score for the recommendation list
//! - `rank_by_recurrence`: plain nomination count for the strategy consensus
//!
//! All tallies use `BTreeMap` keyed by the number so iteration order, and
//! therefore tie-breaking, is independent of how the sets arrived.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{CandidateSet, Confidence, DigitString, ScoredCandidate};
use crate::patterns;
use crate::stats::HistorySnapshot;

/// Per-number tally accumulated across every candidate set.
#[derive(Debug, Default, Clone)]
struct Tally {
    recurrence: usize,
    sources: Vec<String>,
}

/// Count, per number, how many distinct sources nominated it.
///
/// A source nominating the same number twice still counts once.
fn tally(sets: &[CandidateSet]) -> BTreeMap<DigitString, Tally> {
    let mut tallies: BTreeMap<DigitString, Tally> = BTreeMap::new();
    for set in sets {
        let mut seen_in_set = std::collections::HashSet::new();
        for &number in &set.numbers {
            if !seen_in_set.insert(number) {
                continue;
            }
            let entry = tallies.entry(number).or_default();
            entry.recurrence += 1;
            entry.sources.push(set.source.display_name().to_string());
        }
    }
    tallies
}

/// Weighted bonus score for one candidate.
///
/// Rewards numbers that echo recent history, have never been drawn, carry a
/// mid-range digit sum, lean on hot digits without being all-hot, use four
/// distinct digits, or hit the lucky/special lists.
pub fn bonus_score(number: &DigitString, snapshot: &HistorySnapshot, asof: NaiveDate) -> i32 {
    let mut score = 0i32;

    if patterns::is_historical_echo(number, snapshot) {
        score += 3;
    }
    if !snapshot.seen.contains(number) {
        score += 2;
    }
    if (10..=18).contains(&number.digit_sum()) {
        score += 2;
    }
    let hot = snapshot.hot_cold.hot_count(number);
    if (2..=3).contains(&hot) {
        score += hot as i32;
    }
    if number.distinct_digits() == 4 {
        score += 1;
    }
    if patterns::is_lucky(number) {
        score += 2;
    }
    if patterns::is_special_combination(number, snapshot, asof) {
        score += 3;
    }
    score
}

/// Rank candidates by bonus score for the recommendation list.
///
/// Order: score descending, then recurrence descending, then numeric
/// ascending. Truncated to `top_n`.
pub fn rank_by_bonus(
    sets: &[CandidateSet],
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
    top_n: usize,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = tally(sets)
        .into_iter()
        .map(|(number, t)| ScoredCandidate {
            number,
            score: bonus_score(&number, snapshot, asof),
            recurrence: t.recurrence,
            confidence: Confidence::from_recurrence(t.recurrence),
            sources: t.sources,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then(b.recurrence.cmp(&a.recurrence))
            .then(a.number.cmp(&b.number))
    });
    scored.truncate(top_n);
    scored
}

/// Rank candidates by how many sources agreed on them.
///
/// Order: recurrence descending, then numeric ascending. Truncated to `top_n`.
pub fn rank_by_recurrence(
    sets: &[CandidateSet],
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
    top_n: usize,
) -> Vec<ScoredCandidate> {
    let mut scored: Vec<ScoredCandidate> = tally(sets)
        .into_iter()
        .map(|(number, t)| ScoredCandidate {
            number,
            score: bonus_score(&number, snapshot, asof),
            recurrence: t.recurrence,
            confidence: Confidence::from_recurrence(t.recurrence),
            sources: t.sources,
        })
        .collect();

    scored.sort_by(|a, b| {
        b.recurrence
            .cmp(&a.recurrence)
            .then(a.number.cmp(&b.number))
    });
    scored.truncate(top_n);
    scored
}
