//! Digit statistics over the historical corpus.
//!
//! Everything here is a pure function of the loaded draw history. Derived
//! state is assembled once into a `HistorySnapshot` and threaded explicitly
//! through predicates and generators; nothing is cached globally.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{DigitString, DrawRecord};

/// Hot/cold thresholds relative to the mean per-digit frequency.
const HOT_FACTOR: f64 = 1.2;
const COLD_FACTOR: f64 = 0.8;

/// How many of the most recent numbers the echo rules look at.
pub const RECENT_WINDOW: usize = 10;

/// Occurrence count per digit (0-9) across every number in the corpus.
///
/// Recomputed per snapshot; never mutated in place after a computation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitFrequencyTable {
    counts: [u64; 10],
}

impl DigitFrequencyTable {
    pub fn count(&self, digit: u8) -> u64 {
        self.counts[digit as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Mean per-digit frequency (total occurrences / 10).
    pub fn mean(&self) -> f64 {
        self.total() as f64 / 10.0
    }
}

/// Partition of digits into hot, cold, and neither.
///
/// Invariant: the hot and cold sets are disjoint. Both are empty for an
/// all-zero table, which callers treat as "no information".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotColdClassification {
    hot: Vec<u8>,
    cold: Vec<u8>,
}

impl HotColdClassification {
    pub fn hot(&self) -> &[u8] {
        &self.hot
    }

    pub fn cold(&self) -> &[u8] {
        &self.cold
    }

    pub fn is_hot(&self, digit: u8) -> bool {
        self.hot.contains(&digit)
    }

    pub fn is_cold(&self, digit: u8) -> bool {
        self.cold.contains(&digit)
    }

    pub fn hot_count(&self, number: &DigitString) -> usize {
        number.digits().iter().filter(|&&d| self.is_hot(d)).count()
    }

    pub fn cold_count(&self, number: &DigitString) -> usize {
        number.digits().iter().filter(|&&d| self.is_cold(d)).count()
    }
}

/// Per-position digit counts used by digit-weighted generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionDistribution {
    counts: [[u64; 10]; 4],
}

impl PositionDistribution {
    /// Counts for one of the four positions.
    pub fn position(&self, pos: usize) -> &[u64; 10] {
        &self.counts[pos]
    }

    /// True when this position has no observations (weighted draw must fall
    /// back to uniform).
    pub fn is_empty(&self, pos: usize) -> bool {
        self.counts[pos].iter().all(|&c| c == 0)
    }
}

/// Count every digit occurrence across every number in the corpus.
pub fn compute_frequencies(corpus: &[DigitString]) -> DigitFrequencyTable {
    let mut counts = [0u64; 10];
    for number in corpus {
        for d in number.digits() {
            counts[d as usize] += 1;
        }
    }
    DigitFrequencyTable { counts }
}

/// Classify digits as hot/cold relative to the mean frequency.
pub fn classify(table: &DigitFrequencyTable) -> HotColdClassification {
    if table.total() == 0 {
        return HotColdClassification {
            hot: Vec::new(),
            cold: Vec::new(),
        };
    }

    let mean = table.mean();
    let mut hot = Vec::new();
    let mut cold = Vec::new();
    for digit in 0u8..10 {
        let freq = table.count(digit) as f64;
        if freq > mean * HOT_FACTOR {
            hot.push(digit);
        } else if freq < mean * COLD_FACTOR {
            cold.push(digit);
        }
    }
    HotColdClassification { hot, cold }
}

fn compute_positions(corpus: &[DigitString]) -> PositionDistribution {
    let mut counts = [[0u64; 10]; 4];
    for number in corpus {
        for (pos, d) in number.digits().into_iter().enumerate() {
            counts[pos][d as usize] += 1;
        }
    }
    PositionDistribution { counts }
}

/// Immutable derived state for one analysis session.
///
/// Built once from the full corpus and passed by reference into every
/// predicate and generator call; invalidated only by loading a new corpus.
#[derive(Debug, Clone)]
pub struct HistorySnapshot {
    /// Every valid number in draw order (oldest first).
    pub numbers: Vec<DigitString>,
    /// Numbers grouped by prize column: `columns[j]` holds the j-th number
    /// of every draw that had one. Rows may be ragged.
    pub columns: Vec<Vec<DigitString>>,
    /// Membership set for "has this number ever been drawn" queries.
    pub seen: HashSet<DigitString>,
    pub frequencies: DigitFrequencyTable,
    pub hot_cold: HotColdClassification,
    pub positions: PositionDistribution,
    pub draw_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl HistorySnapshot {
    pub fn build(records: &[DrawRecord]) -> Self {
        let numbers: Vec<DigitString> = records
            .iter()
            .flat_map(|r| r.numbers.iter().copied())
            .collect();
        let mut columns: Vec<Vec<DigitString>> = Vec::new();
        for record in records {
            for (j, &n) in record.numbers.iter().enumerate() {
                if columns.len() <= j {
                    columns.resize(j + 1, Vec::new());
                }
                columns[j].push(n);
            }
        }
        let seen: HashSet<DigitString> = numbers.iter().copied().collect();
        let frequencies = compute_frequencies(&numbers);
        let hot_cold = classify(&frequencies);
        let positions = compute_positions(&numbers);

        Self {
            columns,
            seen,
            frequencies,
            hot_cold,
            positions,
            draw_count: records.len(),
            first_date: records.first().map(|r| r.date),
            last_date: records.last().map(|r| r.date),
            numbers,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// The most recent numbers, newest last, at most `limit` entries.
    pub fn recent(&self, limit: usize) -> &[DigitString] {
        let start = self.numbers.len().saturating_sub(limit);
        &self.numbers[start..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(raw: &[&str]) -> Vec<DigitString> {
        raw.iter().map(|s| DigitString::parse(s).unwrap()).collect()
    }

    #[test]
    fn empty_corpus_yields_zero_table_and_empty_sets() {
        let table = compute_frequencies(&[]);
        for d in 0u8..10 {
            assert_eq!(table.count(d), 0);
        }
        let hc = classify(&table);
        assert!(hc.hot().is_empty());
        assert!(hc.cold().is_empty());
    }

    #[test]
    fn hot_and_cold_sets_are_disjoint() {
        let table = compute_frequencies(&corpus(&["1111", "1234", "9876", "1122"]));
        let hc = classify(&table);
        for d in hc.hot() {
            assert!(!hc.cold().contains(d));
        }
    }

    #[test]
    fn worked_example_classification() {
        // "1221" twice + "3443": four 1s, four 2s, two 3s, two 4s.
        // Mean = 12/10 = 1.2; hot > 1.44, cold < 0.96.
        let table = compute_frequencies(&corpus(&["1221", "1221", "3443"]));
        assert_eq!(table.count(1), 4);
        assert_eq!(table.count(2), 4);
        assert_eq!(table.count(3), 2);
        assert_eq!(table.count(4), 2);
        assert_eq!(table.total(), 12);

        let hc = classify(&table);
        assert_eq!(hc.hot(), &[1, 2]);
        // 3 and 4 sit between the thresholds: neither hot nor cold.
        assert!(!hc.is_hot(3) && !hc.is_cold(3));
        assert!(!hc.is_hot(4) && !hc.is_cold(4));
        assert_eq!(hc.cold(), &[0, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn snapshot_collects_recent_and_membership() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let records = vec![
            DrawRecord {
                date,
                numbers: corpus(&["1221", "3443"]),
            },
            DrawRecord {
                date: date + chrono::Duration::days(3),
                numbers: corpus(&["9876"]),
            },
        ];

        let snapshot = HistorySnapshot::build(&records);
        assert_eq!(snapshot.numbers.len(), 3);
        assert_eq!(snapshot.draw_count, 2);
        // Column 0 holds each draw's first number; column 1 is ragged.
        assert_eq!(snapshot.columns.len(), 2);
        assert_eq!(snapshot.columns[0], corpus(&["1221", "9876"]));
        assert_eq!(snapshot.columns[1], corpus(&["3443"]));
        assert!(snapshot.seen.contains(&DigitString::parse("9876").unwrap()));
        assert!(!snapshot.seen.contains(&DigitString::parse("0000").unwrap()));
        assert_eq!(snapshot.recent(2), &corpus(&["3443", "9876"])[..]);
        assert_eq!(snapshot.first_date, Some(date));
    }

    #[test]
    fn position_distribution_counts_and_fallback_flag() {
        let snapshot = HistorySnapshot::build(&[DrawRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            numbers: corpus(&["1234", "1567"]),
        }]);
        assert_eq!(snapshot.positions.position(0)[1], 2);
        assert_eq!(snapshot.positions.position(1)[2], 1);
        assert_eq!(snapshot.positions.position(1)[5], 1);
        assert!(!snapshot.positions.is_empty(0));

        let empty = HistorySnapshot::build(&[]);
        assert!(empty.positions.is_empty(0));
    }
}
