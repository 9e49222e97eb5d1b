//! Curated number lists backing the lucky/seasonal/date rules.
//!
//! Numbers are stored as digit arrays so the tables are validated at compile
//! time rather than parsed on every classification call.

use chrono::{Datelike, NaiveDate};

use crate::domain::DigitString;

/// Numbers traditionally considered lucky by players of this game.
pub const LUCKY_NUMBERS: &[[u8; 4]] = &[
    [1, 6, 8, 8],
    [1, 3, 1, 4],
    [8, 8, 8, 8],
    [9, 9, 9, 9],
    [1, 1, 1, 1],
    [2, 2, 2, 2],
    [3, 3, 3, 3],
    [4, 4, 4, 4],
    [5, 5, 5, 5],
    [6, 6, 6, 6],
    [7, 7, 7, 7],
    [5, 2, 0, 0],
    [3, 3, 4, 4],
    [1, 1, 3, 3],
    [2, 2, 3, 3],
    [1, 1, 2, 2],
    [1, 2, 2, 1],
    [1, 3, 3, 1],
];

/// Digit runs whose presence anywhere in the number counts as lucky.
pub const LUCKY_RUNS: &[[u8; 3]] = &[[1, 6, 8], [1, 3, 1], [8, 8, 8], [9, 9, 9]];

/// Wider pool used when generating lucky candidates (matches the report's
/// traditional list rather than the strict classification set).
pub const LUCKY_POOL: &[[u8; 4]] = &[
    [1, 6, 8, 8],
    [1, 3, 1, 4],
    [8, 8, 8, 8],
    [9, 9, 9, 9],
    [1, 1, 1, 1],
    [2, 2, 2, 2],
    [3, 3, 3, 3],
    [4, 4, 4, 4],
    [5, 5, 5, 5],
    [6, 6, 6, 6],
    [7, 7, 7, 7],
    [1, 2, 3, 4],
    [4, 3, 2, 1],
    [1, 1, 2, 2],
    [2, 2, 3, 3],
    [3, 3, 4, 4],
    [4, 4, 5, 5],
    [5, 5, 6, 6],
    [6, 6, 7, 7],
    [7, 7, 8, 8],
    [8, 8, 9, 9],
    [9, 9, 0, 0],
    [0, 0, 8, 8],
    [1, 1, 8, 8],
    [2, 2, 8, 8],
    [3, 3, 8, 8],
    [4, 4, 8, 8],
    [5, 5, 8, 8],
];

/// Fallback pool for the special-combination generator when no historical
/// number qualifies.
pub const SPECIAL_COMBINATIONS: &[[u8; 4]] = &[
    [1, 2, 2, 1],
    [1, 3, 3, 1],
    [1, 4, 4, 1],
    [2, 3, 3, 2],
    [3, 4, 4, 3],
    [1, 1, 1, 2],
    [2, 2, 2, 3],
    [3, 3, 3, 4],
    [1, 1, 2, 2],
    [2, 2, 3, 3],
    [3, 3, 4, 4],
    [1, 2, 1, 2],
    [1, 3, 1, 3],
    [1, 4, 1, 4],
    [1, 2, 3, 2],
    [1, 3, 4, 3],
    [1, 4, 5, 4],
    [4, 3, 2, 3],
    [5, 4, 3, 4],
    [6, 5, 4, 5],
];

/// Per-calendar-month curated seasonal numbers (January = 1).
pub fn seasonal_list(month: u32) -> &'static [[u8; 4]] {
    match month {
        1 => &[[1, 1, 1, 1], [2, 2, 2, 2], [0, 1, 0, 1], [0, 1, 1, 0], [1, 0, 0, 1]],
        2 => &[[0, 2, 0, 2], [1, 4, 1, 4], [2, 3, 2, 3], [1, 3, 1, 4], [0, 2, 1, 4]],
        3 => &[[0, 3, 0, 3], [0, 3, 1, 2], [1, 2, 2, 1], [1, 3, 2, 4], [2, 4, 1, 3]],
        4 => &[[0, 4, 0, 4], [0, 4, 1, 5], [1, 5, 2, 4], [0, 4, 2, 0], [2, 0, 0, 4]],
        5 => &[[0, 5, 0, 5], [0, 5, 1, 5], [1, 5, 2, 0], [0, 5, 2, 5], [2, 5, 0, 5]],
        6 => &[[0, 6, 0, 6], [0, 6, 1, 8], [1, 8, 2, 4], [0, 6, 3, 0], [3, 0, 0, 6]],
        7 => &[[0, 7, 0, 7], [0, 7, 1, 4], [1, 4, 2, 1], [0, 7, 2, 8], [2, 8, 0, 7]],
        8 => &[[0, 8, 0, 8], [0, 8, 1, 6], [1, 6, 2, 4], [0, 8, 3, 1], [3, 1, 0, 8]],
        9 => &[[0, 9, 0, 9], [0, 9, 1, 8], [1, 8, 2, 7], [0, 9, 3, 0], [3, 0, 0, 9]],
        10 => &[[1, 0, 1, 0], [1, 0, 2, 0], [2, 0, 3, 0], [1, 0, 3, 1], [3, 1, 1, 0]],
        11 => &[[1, 1, 1, 1], [1, 1, 2, 2], [2, 2, 3, 3], [1, 1, 3, 0], [3, 0, 1, 1]],
        _ => &[[1, 2, 1, 2], [1, 2, 2, 5], [2, 5, 1, 2], [1, 2, 3, 1], [3, 1, 1, 2]],
    }
}

/// All 4-digit combinations of the reference date's components
/// (DDMM, MMDD, YYMM, MMYY, DDYY, YYDD).
///
/// A number is date-based when it matches one of these; the date-based
/// generator proposes exactly this list.
pub fn date_combinations(asof: NaiveDate) -> Vec<DigitString> {
    let two = |v: u32| -> (u8, u8) { ((v / 10 % 10) as u8, (v % 10) as u8) };
    let (d1, d2) = two(asof.day());
    let (m1, m2) = two(asof.month());
    let (y1, y2) = two(asof.year().rem_euclid(100) as u32);

    [
        [d1, d2, m1, m2],
        [m1, m2, d1, d2],
        [y1, y2, m1, m2],
        [m1, m2, y1, y2],
        [d1, d2, y1, y2],
        [y1, y2, d1, d2],
    ]
    .into_iter()
    .filter_map(DigitString::from_digits)
    .collect()
}
