//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the statistics/generation code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use chrono::NaiveDate;

use crate::domain::{AnalysisConfig, CandidateSet, CandidateSource, PatternId, ScoredCandidate};
use crate::io::ingest::IngestedHistory;
use crate::patterns;
use crate::stats::HistorySnapshot;

/// Numbers scanned for the historical pattern-frequency section.
const FREQUENCY_SCAN: usize = 100;

/// Format the run header: corpus stats, digit frequencies, hot/cold digits.
pub fn format_run_summary(
    ingest: &IngestedHistory,
    snapshot: &HistorySnapshot,
    config: &AnalysisConfig,
) -> String {
    let mut out = String::new();

    out.push_str("=== fourcast - 4D Draw Analysis ===\n");
    out.push_str(&format!("As-of: {}\n", config.asof_date));
    match (snapshot.first_date, snapshot.last_date) {
        (Some(first), Some(last)) => {
            out.push_str(&format!(
                "History: {} draws, {} numbers ({first} to {last})\n",
                snapshot.draw_count,
                snapshot.numbers.len(),
            ));
        }
        _ => out.push_str("History: empty\n"),
    }
    out.push_str(&format!(
        "Ingest: {} rows read | {} numbers kept | {} cells dropped | {} rows dropped\n",
        ingest.rows_read, ingest.numbers_kept, ingest.cells_dropped, ingest.rows_dropped,
    ));

    out.push_str("\nDigit frequencies:\n");
    let total = snapshot.frequencies.total();
    for digit in 0u8..10 {
        let count = snapshot.frequencies.count(digit);
        let pct = if total > 0 {
            count as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        let mark = if snapshot.hot_cold.is_hot(digit) {
            " hot"
        } else if snapshot.hot_cold.is_cold(digit) {
            " cold"
        } else {
            ""
        };
        out.push_str(&format!("  {digit}: {count:>6} ({pct:>5.1}%){mark}\n"));
    }

    out.push_str(&format!(
        "Hot digits : {}\n",
        fmt_digit_list(snapshot.hot_cold.hot())
    ));
    out.push_str(&format!(
        "Cold digits: {}\n",
        fmt_digit_list(snapshot.hot_cold.cold())
    ));
    out.push('\n');

    out
}

/// Format how often each catalog pattern occurred in recent history.
pub fn format_pattern_frequency(snapshot: &HistorySnapshot, asof: NaiveDate) -> String {
    let mut out = String::new();
    let sample = snapshot.recent(FREQUENCY_SCAN);
    out.push_str(&format!(
        "Pattern frequency (last {} numbers):\n",
        sample.len()
    ));

    for id in PatternId::ALL {
        let hits = sample
            .iter()
            .filter(|n| patterns::classify(id, n, snapshot, asof).matched)
            .count();
        if hits > 0 {
            out.push_str(&format!(
                "  {:<20} {:>4} ({:.1}%)\n",
                id.display_name(),
                hits,
                hits as f64 / sample.len() as f64 * 100.0,
            ));
        }
    }
    out.push('\n');
    out
}

/// Format every source's candidate list with digit-sum and hot annotations.
pub fn format_candidates(
    heading: &str,
    sets: &[CandidateSet],
    snapshot: &HistorySnapshot,
) -> String {
    let mut out = String::new();
    out.push_str(heading);
    out.push_str(":\n");
    for set in sets {
        if set.numbers.is_empty() {
            continue;
        }
        let entries: Vec<String> = set
            .numbers
            .iter()
            .map(|n| {
                format!(
                    "{n} (sum {}, hot {})",
                    n.digit_sum(),
                    snapshot.hot_cold.hot_count(n)
                )
            })
            .collect();
        let kind = match set.source {
            CandidateSource::Pattern(id) => format!(" [{}]", id.generation_kind().label()),
            CandidateSource::Strategy(_) => String::new(),
        };
        out.push_str(&format!(
            "  {:<20}{kind} {}\n",
            set.source.display_name(),
            entries.join(", ")
        ));
    }
    out.push('\n');
    out
}

/// Format the bonus-scored recommendation list.
pub fn format_recommendations(recommendations: &[ScoredCandidate]) -> String {
    let mut out = String::new();
    out.push_str("Recommendations (bonus-scored):\n");
    out.push_str(&format!(
        "{:<6} {:>6} {:>6} {:>10}  {}\n",
        "number", "score", "seen", "confidence", "sources"
    ));
    for c in recommendations {
        out.push_str(&format!(
            "{:<6} {:>6} {:>6} {:>10}  {}\n",
            c.number.to_string(),
            c.score,
            c.recurrence,
            c.confidence.label(),
            c.sources.join(" + "),
        ));
    }
    out.push('\n');
    out
}

/// Format the recurrence-ranked strategy consensus.
pub fn format_consensus(ranked: &[ScoredCandidate]) -> String {
    let mut out = String::new();
    out.push_str("Strategy consensus (by recurrence):\n");
    for c in ranked {
        out.push_str(&format!(
            "  {} nominated by {} source{} ({})\n",
            c.number,
            c.recurrence,
            if c.recurrence == 1 { "" } else { "s" },
            c.confidence.label(),
        ));
    }
    out.push('\n');
    out
}

fn fmt_digit_list(digits: &[u8]) -> String {
    if digits.is_empty() {
        return "(none)".to_string();
    }
    digits
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CandidateSource, Confidence, DigitString, DrawRecord, StrategyId};

    fn ds(s: &str) -> DigitString {
        DigitString::parse(s).unwrap()
    }

    fn snapshot_of(raw: &[&str]) -> HistorySnapshot {
        HistorySnapshot::build(&[DrawRecord {
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            numbers: raw.iter().map(|s| ds(s)).collect(),
        }])
    }

    fn asof() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 14).unwrap()
    }

    #[test]
    fn summary_marks_hot_and_cold_digits() {
        let snapshot = snapshot_of(&["1221", "1221", "3443"]);
        let ingest = IngestedHistory {
            records: Vec::new(),
            rows_read: 1,
            numbers_kept: 3,
            cells_dropped: 0,
            rows_dropped: 0,
        };
        let config = AnalysisConfig {
            history_path: "history.csv".into(),
            asof_date: asof(),
            per_pattern: 2,
            top_n: 10,
            seed: 42,
            window: 20,
            export_report: None,
            export_json: None,
        };

        let text = format_run_summary(&ingest, &snapshot, &config);
        assert!(text.contains("Hot digits : 1, 2"));
        assert!(text.contains("Cold digits: 0, 5, 6, 7, 8, 9"));
        assert!(text.contains("3 numbers kept"));
    }

    #[test]
    fn pattern_frequency_counts_matches() {
        let snapshot = snapshot_of(&["1221", "1221", "1234"]);
        let text = format_pattern_frequency(&snapshot, asof());
        assert!(text.contains("Palindrome"));
        assert!(text.contains("Arithmetic"));
        // No quads in this corpus, so the line is omitted entirely.
        assert!(!text.contains("Quad"));
    }

    #[test]
    fn candidate_listing_annotates_sums() {
        let snapshot = snapshot_of(&["1221", "1221", "3443"]);
        let sets = vec![CandidateSet {
            source: CandidateSource::Strategy(StrategyId::Frequency),
            numbers: vec![ds("1256")],
        }];
        let text = format_candidates("Strategy candidates", &sets, &snapshot);
        assert!(text.starts_with("Strategy candidates:\n"));
        assert!(text.contains("1256 (sum 14, hot 2)"));
    }

    #[test]
    fn recommendation_table_lists_sources_and_confidence() {
        let recs = vec![ScoredCandidate {
            number: ds("1234"),
            score: 5,
            recurrence: 2,
            confidence: Confidence::Medium,
            sources: vec!["Arithmetic".to_string(), "Frequency Leaders".to_string()],
        }];
        let text = format_recommendations(&recs);
        assert!(text.contains("1234"));
        assert!(text.contains("medium"));
        assert!(text.contains("Arithmetic + Frequency Leaders"));
    }
}
