//! The pattern classification catalog.
//!
//! Forty named predicates over a 4-digit number. Each is pure given its
//! inputs, the immutable `HistorySnapshot`, and the reference date; dispatch
//! goes through `classify` so every caller sees the same catalog.
//!
//! Structural rules live in `predicates`; curated lists in `curated`.

use chrono::{Datelike, NaiveDate};

use crate::domain::{DigitString, PatternId, Verdict};
use crate::stats::{HistorySnapshot, RECENT_WINDOW};

pub mod curated;
pub mod predicates;

/// Patterns that feed the Special Combination meta-rule.
const SPECIAL_MEMBERS: [PatternId; 6] = [
    PatternId::Palindrome,
    PatternId::MirrorAbba,
    PatternId::RepeatAabb,
    PatternId::AlternatingAbab,
    PatternId::Arithmetic,
    PatternId::FibonacciLike,
];

/// Classify one number against one catalog entry.
pub fn classify(
    id: PatternId,
    number: &DigitString,
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
) -> Verdict {
    let d = number.digits();
    match id {
        PatternId::SequentialUp => bool_verdict(predicates::sequential_up(d)),
        PatternId::SequentialDown => bool_verdict(predicates::sequential_down(d)),
        PatternId::Palindrome => bool_verdict(predicates::palindrome(d)),
        PatternId::MirrorAbba => bool_verdict(predicates::mirror_abba(d)),
        PatternId::RepeatAabb => bool_verdict(predicates::repeat_aabb(d)),
        PatternId::AlternatingAbab => bool_verdict(predicates::alternating_abab(d)),
        PatternId::AllEven => bool_verdict(predicates::all_even(d)),
        PatternId::AllOdd => bool_verdict(predicates::all_odd(d)),
        PatternId::MixedEvenOdd => bool_verdict(predicates::mixed_even_odd(d)),
        PatternId::SmallDigits => bool_verdict(predicates::small_digits(d)),
        PatternId::BigDigits => bool_verdict(predicates::big_digits(d)),
        PatternId::BigSmallMix => bool_verdict(predicates::big_small_mix(d)),
        PatternId::Arithmetic => predicates::arithmetic(d),
        PatternId::Geometric => predicates::geometric(d),
        PatternId::FibonacciLike => bool_verdict(predicates::fibonacci_like(d)),
        PatternId::Birthday => predicates::birthday(number),
        PatternId::Mountain => bool_verdict(predicates::mountain(d)),
        PatternId::Valley => bool_verdict(predicates::valley(d)),
        PatternId::Plateau => bool_verdict(predicates::plateau(d)),
        PatternId::Cliff => bool_verdict(predicates::cliff(d)),
        PatternId::DoublePair => bool_verdict(predicates::double_pair(number)),
        PatternId::Triple => bool_verdict(predicates::triple(number)),
        PatternId::Quad => bool_verdict(predicates::quad(number)),
        PatternId::AllDifferent => bool_verdict(predicates::all_different(number)),
        PatternId::FirstLastSame => bool_verdict(predicates::first_last_same(d)),
        PatternId::MiddleSame => bool_verdict(predicates::middle_same(d)),
        PatternId::Bookend => bool_verdict(predicates::bookend(d)),
        PatternId::SmallTotal => bool_verdict(predicates::small_total(number)),
        PatternId::MediumTotal => bool_verdict(predicates::medium_total(number)),
        PatternId::LargeTotal => bool_verdict(predicates::large_total(number)),
        PatternId::ExtremeTotal => bool_verdict(predicates::extreme_total(number)),
        PatternId::HotDigits => bool_verdict(snapshot.hot_cold.hot_count(number) >= 3),
        PatternId::ColdDigits => bool_verdict(snapshot.hot_cold.cold_count(number) >= 3),
        PatternId::Balanced => bool_verdict(is_balanced(number, snapshot)),
        PatternId::Lucky => bool_verdict(is_lucky(number)),
        PatternId::HistoricalEcho => bool_verdict(is_historical_echo(number, snapshot)),
        PatternId::Seasonal => bool_verdict(is_seasonal(number, asof)),
        PatternId::DateBased => bool_verdict(is_date_based(number, asof)),
        PatternId::Unseen => bool_verdict(!snapshot.seen.contains(number)),
        PatternId::SpecialCombination => {
            bool_verdict(is_special_combination(number, snapshot, asof))
        }
    }
}

/// Classify one number against the whole catalog, in catalog order.
pub fn classify_all(
    number: &DigitString,
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
) -> Vec<(PatternId, Verdict)> {
    PatternId::ALL
        .iter()
        .map(|&id| (id, classify(id, number, snapshot, asof)))
        .collect()
}

fn bool_verdict(matched: bool) -> Verdict {
    if matched { Verdict::yes() } else { Verdict::no() }
}

fn is_balanced(number: &DigitString, snapshot: &HistorySnapshot) -> bool {
    let hot = snapshot.hot_cold.hot_count(number);
    let cold = snapshot.hot_cold.cold_count(number);
    (1..=2).contains(&hot) && (1..=2).contains(&cold)
}

pub fn is_lucky(number: &DigitString) -> bool {
    let d = number.digits();
    curated::LUCKY_NUMBERS.contains(&d)
        || curated::LUCKY_RUNS.iter().any(|run| number.contains_run(run))
}

/// True when the number shares at least 3 digit positions with any of the
/// most recent draws. With fewer than `RECENT_WINDOW` numbers on record the
/// rule has too little context and returns false.
pub fn is_historical_echo(number: &DigitString, snapshot: &HistorySnapshot) -> bool {
    if snapshot.numbers.len() < RECENT_WINDOW {
        return false;
    }
    snapshot
        .recent(RECENT_WINDOW)
        .iter()
        .any(|recent| number.shared_positions(recent) >= 3)
}

fn is_seasonal(number: &DigitString, asof: NaiveDate) -> bool {
    curated::seasonal_list(asof.month()).contains(&number.digits())
}

fn is_date_based(number: &DigitString, asof: NaiveDate) -> bool {
    curated::date_combinations(asof).contains(number)
}

pub fn is_special_combination(
    number: &DigitString,
    snapshot: &HistorySnapshot,
    asof: NaiveDate,
) -> bool {
    let matches = SPECIAL_MEMBERS
        .iter()
        .filter(|&&member| classify(member, number, snapshot, asof).matched)
        .count();
    matches >= 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DrawRecord;

    fn ds(s: &str) -> DigitString {
        DigitString::parse(s).unwrap()
    }

    fn snapshot_of(raw: &[&str]) -> HistorySnapshot {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        HistorySnapshot::build(&[DrawRecord {
            date,
            numbers: raw.iter().map(|s| ds(s)).collect(),
        }])
    }

    fn asof() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn hot_cold_patterns_use_snapshot() {
        // 1 and 2 hot; 0,5,6,7,8,9 cold; 3,4 neither.
        let snapshot = snapshot_of(&["1221", "1221", "3443"]);

        assert!(classify(PatternId::HotDigits, &ds("1212"), &snapshot, asof()).matched);
        assert!(!classify(PatternId::HotDigits, &ds("3434"), &snapshot, asof()).matched);
        assert!(classify(PatternId::ColdDigits, &ds("5678"), &snapshot, asof()).matched);
        // 2 hot + 2 cold = balanced.
        assert!(classify(PatternId::Balanced, &ds("1256"), &snapshot, asof()).matched);
        // 4 hot digits is not balanced.
        assert!(!classify(PatternId::Balanced, &ds("1122"), &snapshot, asof()).matched);
    }

    #[test]
    fn unseen_checks_membership() {
        let snapshot = snapshot_of(&["1221", "3443"]);
        assert!(!classify(PatternId::Unseen, &ds("1221"), &snapshot, asof()).matched);
        assert!(classify(PatternId::Unseen, &ds("9999"), &snapshot, asof()).matched);
    }

    #[test]
    fn historical_echo_needs_enough_history() {
        let snapshot = snapshot_of(&["1234", "5678"]);
        assert!(!is_historical_echo(&ds("1235"), &snapshot));

        let snapshot = snapshot_of(&[
            "1111", "2222", "3333", "4444", "5555", "6666", "7777", "8888", "9999", "1234",
        ]);
        // Shares three positions with the recent "1234".
        assert!(is_historical_echo(&ds("1235"), &snapshot));
        // Shares at most two positions with anything recent.
        assert!(!is_historical_echo(&ds("5067"), &snapshot));
    }

    #[test]
    fn lucky_set_and_runs() {
        assert!(is_lucky(&ds("1314")));
        assert!(is_lucky(&ds("1688")));
        // Contains the run 888.
        assert!(is_lucky(&ds("8881")));
        // Contains the run 168.
        assert!(is_lucky(&ds("0168")));
        assert!(!is_lucky(&ds("2457")));
    }

    #[test]
    fn seasonal_and_date_based_follow_reference_date() {
        let snapshot = snapshot_of(&["1221"]);
        // March list contains 0303.
        assert!(classify(PatternId::Seasonal, &ds("0303"), &snapshot, asof()).matched);
        assert!(!classify(PatternId::Seasonal, &ds("0404"), &snapshot, asof()).matched);

        // 2025-03-14: DDMM = 1403.
        assert!(classify(PatternId::DateBased, &ds("1403"), &snapshot, asof()).matched);
        assert!(classify(PatternId::DateBased, &ds("0314"), &snapshot, asof()).matched);
        assert!(!classify(PatternId::DateBased, &ds("9999"), &snapshot, asof()).matched);
    }

    #[test]
    fn special_combination_needs_two_members() {
        let snapshot = snapshot_of(&["1221"]);
        // 1221: palindrome + mirror + bookend -> at least 2 members.
        assert!(is_special_combination(&ds("1221"), &snapshot, asof()));
        // 1234: arithmetic only among the members.
        assert!(!is_special_combination(&ds("1234"), &snapshot, asof()));
        // 1111: palindrome + mirror + alternating? alternating needs d0!=d1.
        // Palindrome + mirror still makes two.
        assert!(is_special_combination(&ds("1111"), &snapshot, asof()));
    }

    #[test]
    fn classify_all_covers_catalog() {
        let snapshot = snapshot_of(&["1221"]);
        let verdicts = classify_all(&ds("1221"), &snapshot, asof());
        assert_eq!(verdicts.len(), 40);
        assert!(
            verdicts
                .iter()
                .find(|(id, _)| *id == PatternId::Palindrome)
                .is_some_and(|(_, v)| v.matched)
        );
    }
}
