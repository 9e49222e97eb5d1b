//! Pure structural predicates over the four digits.
//!
//! Each function is total over its declared domain. Wraparound arithmetic
//! always uses non-negative modulo (results in 0..=9).

use crate::domain::{DateForm, DigitString, PatternPayload, Verdict};

/// Tolerance for comparing consecutive ratios in geometric progressions.
const RATIO_EPS: f64 = 1e-3;

pub fn sequential_up(d: [u8; 4]) -> bool {
    (0..3).all(|i| d[i + 1] == (d[i] + 1) % 10)
}

pub fn sequential_down(d: [u8; 4]) -> bool {
    (0..3).all(|i| d[i + 1] == (d[i] + 9) % 10)
}

pub fn palindrome(d: [u8; 4]) -> bool {
    let mut rev = d;
    rev.reverse();
    d == rev
}

pub fn mirror_abba(d: [u8; 4]) -> bool {
    d[0] == d[3] && d[1] == d[2]
}

pub fn repeat_aabb(d: [u8; 4]) -> bool {
    d[0] == d[1] && d[2] == d[3] && d[0] != d[2]
}

pub fn alternating_abab(d: [u8; 4]) -> bool {
    d[0] == d[2] && d[1] == d[3] && d[0] != d[1]
}

pub fn all_even(d: [u8; 4]) -> bool {
    d.iter().all(|&x| x % 2 == 0)
}

pub fn all_odd(d: [u8; 4]) -> bool {
    d.iter().all(|&x| x % 2 == 1)
}

pub fn mixed_even_odd(d: [u8; 4]) -> bool {
    let even = d.iter().filter(|&&x| x % 2 == 0).count();
    (1..=3).contains(&even)
}

pub fn small_digits(d: [u8; 4]) -> bool {
    d.iter().all(|&x| x <= 4)
}

pub fn big_digits(d: [u8; 4]) -> bool {
    d.iter().all(|&x| x >= 5)
}

pub fn big_small_mix(d: [u8; 4]) -> bool {
    let small = d.iter().filter(|&&x| x <= 4).count();
    (1..=3).contains(&small)
}

/// Arithmetic progression: consecutive differences equal and nonzero.
/// Differences are plain (not wrapped); payload is the common difference.
pub fn arithmetic(d: [u8; 4]) -> Verdict {
    let diffs: Vec<i8> = (0..3).map(|i| d[i + 1] as i8 - d[i] as i8).collect();
    if diffs[0] != 0 && diffs.iter().all(|&x| x == diffs[0]) {
        Verdict::yes_with(PatternPayload::Difference(diffs[0]))
    } else {
        Verdict::no()
    }
}

/// Geometric progression: consecutive ratios equal within tolerance.
/// Any zero digit makes the ratio undefined, so such numbers are rejected.
pub fn geometric(d: [u8; 4]) -> Verdict {
    if d.iter().any(|&x| x == 0) {
        return Verdict::no();
    }
    let ratios: Vec<f64> = (0..3).map(|i| f64::from(d[i + 1]) / f64::from(d[i])).collect();
    let (min, max) = ratios
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
            (lo.min(r), hi.max(r))
        });
    if (max - min).abs() < RATIO_EPS {
        Verdict::yes_with(PatternPayload::Ratio(ratios[0]))
    } else {
        Verdict::no()
    }
}

pub fn fibonacci_like(d: [u8; 4]) -> bool {
    d[2] == (d[0] + d[1]) % 10 && d[3] == (d[1] + d[2]) % 10
}

/// Birthday-style match, resolved in a fixed priority order:
/// DDMM first, then MMDD, then a plausible 4-digit year (1900-2100).
pub fn birthday(n: &DigitString) -> Verdict {
    let d = n.digits();
    let first = u16::from(d[0]) * 10 + u16::from(d[1]);
    let second = u16::from(d[2]) * 10 + u16::from(d[3]);

    if (1..=31).contains(&first) && (1..=12).contains(&second) {
        return Verdict::yes_with(PatternPayload::Date(DateForm::DayMonth));
    }
    if (1..=12).contains(&first) && (1..=31).contains(&second) {
        return Verdict::yes_with(PatternPayload::Date(DateForm::MonthDay));
    }
    if (1900..=2100).contains(&n.value()) {
        return Verdict::yes_with(PatternPayload::Date(DateForm::Year));
    }
    Verdict::no()
}

pub fn mountain(d: [u8; 4]) -> bool {
    d[0] < d[1] && d[1] > d[2] && d[2] > d[3]
}

pub fn valley(d: [u8; 4]) -> bool {
    d[0] > d[1] && d[1] < d[2] && d[2] < d[3]
}

pub fn plateau(d: [u8; 4]) -> bool {
    d[1] == d[2] && d[0] != d[1] && d[2] != d[3]
}

pub fn cliff(d: [u8; 4]) -> bool {
    (0..3).any(|i| (d[i + 1] as i8 - d[i] as i8).abs() >= 5)
}

pub fn double_pair(n: &DigitString) -> bool {
    let d = n.digits();
    n.distinct_digits() == 2 && d[0] == d[1] && d[2] == d[3]
}

/// Exactly two distinct digits, one appearing exactly three times.
pub fn triple(n: &DigitString) -> bool {
    if n.distinct_digits() != 2 {
        return false;
    }
    let d = n.digits();
    let first_count = d.iter().filter(|&&x| x == d[0]).count();
    first_count == 3 || first_count == 1
}

pub fn quad(n: &DigitString) -> bool {
    n.distinct_digits() == 1
}

pub fn all_different(n: &DigitString) -> bool {
    n.distinct_digits() == 4
}

pub fn first_last_same(d: [u8; 4]) -> bool {
    d[0] == d[3]
}

pub fn middle_same(d: [u8; 4]) -> bool {
    d[1] == d[2]
}

/// Stricter mirror: ABBA with A != B.
pub fn bookend(d: [u8; 4]) -> bool {
    d[0] == d[3] && d[1] == d[2] && d[0] != d[1]
}

pub fn small_total(n: &DigitString) -> bool {
    n.digit_sum() <= 9
}

pub fn medium_total(n: &DigitString) -> bool {
    (10..=18).contains(&n.digit_sum())
}

pub fn large_total(n: &DigitString) -> bool {
    (19..=27).contains(&n.digit_sum())
}

pub fn extreme_total(n: &DigitString) -> bool {
    (28..=36).contains(&n.digit_sum())
}
