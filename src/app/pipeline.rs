//! The analysis pipeline: ingest, derive, generate, rank.
//!
//! Pattern generation is embarrassingly parallel, so the forty generators run
//! under rayon. Each task seeds its own `StdRng` from the base seed and its
//! own identity, which keeps results reproducible regardless of scheduling.

use std::hash::{DefaultHasher, Hash, Hasher};

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;

use crate::consensus;
use crate::domain::{AnalysisConfig, CandidateSet, PatternId, ScoredCandidate, StrategyId};
use crate::error::AppError;
use crate::generate;
use crate::io::ingest::{self, IngestedHistory};
use crate::report::format;
use crate::stats::HistorySnapshot;
use crate::strategies;

/// Everything one analysis run produced.
#[derive(Debug)]
pub struct RunOutput {
    pub ingest: IngestedHistory,
    pub snapshot: HistorySnapshot,
    /// One candidate set per catalog pattern, in catalog order.
    pub pattern_sets: Vec<CandidateSet>,
    /// One candidate set per strategy, in catalog order.
    pub strategy_sets: Vec<CandidateSet>,
    /// Bonus-scored recommendations drawn from the pattern candidates.
    pub recommendations: Vec<ScoredCandidate>,
    /// Recurrence-ranked consensus drawn from the strategy candidates.
    pub consensus: Vec<ScoredCandidate>,
}

/// Run the whole pipeline for one configuration.
pub fn run_analysis(config: &AnalysisConfig) -> Result<RunOutput, AppError> {
    let ingest = ingest::load_history(&config.history_path)?;
    let snapshot = HistorySnapshot::build(&ingest.records);
    if snapshot.is_empty() {
        return Err(AppError::new(
            3,
            format!(
                "No usable draw data in '{}' ({} rows read, {} dropped).",
                config.history_path.display(),
                ingest.rows_read,
                ingest.rows_dropped,
            ),
        ));
    }

    let pattern_sets: Vec<CandidateSet> = PatternId::ALL
        .as_slice()
        .par_iter()
        .map(|&id| {
            let mut rng = StdRng::seed_from_u64(derive_seed(config.seed, id.display_name()));
            generate::generate(id, config.per_pattern, &snapshot, config.asof_date, &mut rng)
        })
        .collect();

    let strategy_sets = strategies::analyze_all(&snapshot, config.window, |id: StrategyId| {
        StdRng::seed_from_u64(derive_seed(config.seed, id.display_name()))
    });

    let recommendations =
        consensus::rank_by_bonus(&pattern_sets, &snapshot, config.asof_date, config.top_n);
    let consensus =
        consensus::rank_by_recurrence(&strategy_sets, &snapshot, config.asof_date, 5);

    Ok(RunOutput {
        ingest,
        snapshot,
        pattern_sets,
        strategy_sets,
        recommendations,
        consensus,
    })
}

/// Derive a per-task seed from the base seed and a task label.
fn derive_seed(base: u64, label: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    base.hash(&mut hasher);
    label.hash(&mut hasher);
    hasher.finish()
}

/// The complete text report, identical to the terminal output of `analyze`.
pub fn full_report(run: &RunOutput, config: &AnalysisConfig) -> String {
    let mut out = String::new();
    out.push_str(&format::format_run_summary(&run.ingest, &run.snapshot, config));
    out.push_str(&format::format_pattern_frequency(&run.snapshot, config.asof_date));
    out.push_str(&format::format_candidates("Pattern candidates", &run.pattern_sets, &run.snapshot));
    out.push_str(&format::format_candidates("Strategy candidates", &run.strategy_sets, &run.snapshot));
    out.push_str(&format::format_recommendations(&run.recommendations));
    out.push_str(&format::format_consensus(&run.consensus));
    out
}

/// Serializable view of a run for the JSON export.
#[derive(Debug, Serialize)]
pub struct RunExport {
    pub asof_date: chrono::NaiveDate,
    pub seed: u64,
    pub draw_count: usize,
    pub number_count: usize,
    pub hot_digits: Vec<u8>,
    pub cold_digits: Vec<u8>,
    pub pattern_candidates: Vec<CandidateSet>,
    pub strategy_candidates: Vec<CandidateSet>,
    pub recommendations: Vec<ScoredCandidate>,
    pub consensus: Vec<ScoredCandidate>,
}

pub fn export_view(run: &RunOutput, config: &AnalysisConfig) -> RunExport {
    RunExport {
        asof_date: config.asof_date,
        seed: config.seed,
        draw_count: run.snapshot.draw_count,
        number_count: run.snapshot.numbers.len(),
        hot_digits: run.snapshot.hot_cold.hot().to_vec(),
        cold_digits: run.snapshot.hot_cold.cold().to_vec(),
        pattern_candidates: run.pattern_sets.clone(),
        strategy_candidates: run.strategy_sets.clone(),
        recommendations: run.recommendations.clone(),
        consensus: run.consensus.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn write_history(name: &str, body: &str) -> PathBuf {
        let dir = std::env::temp_dir().join("fourcast-pipeline-test");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    fn config_for(path: PathBuf) -> AnalysisConfig {
        AnalysisConfig {
            history_path: path,
            asof_date: chrono::NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            per_pattern: 2,
            top_n: 10,
            seed: 42,
            window: 20,
            export_report: None,
            export_json: None,
        }
    }

    #[test]
    fn full_pipeline_produces_all_sections() {
        let path = write_history(
            "ok.csv",
            "Draw_Date,First,Second,Third\n\
             2025-01-01,1221,3443,9876\n\
             2025-01-04,5555,1234,8888\n\
             2025-01-08,2468,1357,1122\n\
             2025-01-11,9012,4321,6789\n",
        );
        let config = config_for(path);
        let run = run_analysis(&config).unwrap();

        assert_eq!(run.pattern_sets.len(), 40);
        assert_eq!(run.strategy_sets.len(), 9);
        assert!(!run.recommendations.is_empty());
        assert!(run.recommendations.len() <= config.top_n);
        assert!(run.consensus.len() <= 5);

        let report = full_report(&run, &config);
        assert!(report.contains("Digit frequencies"));
        assert!(report.contains("Pattern candidates:"));
        assert!(report.contains("Strategy candidates:"));
        assert!(report.contains("Recommendations"));
        assert!(report.contains("Strategy consensus"));
    }

    #[test]
    fn pipeline_is_deterministic_for_a_seed() {
        let path = write_history(
            "det.csv",
            "Draw_Date,Number\n\
             2025-01-01,1221\n\
             2025-01-04,3443\n\
             2025-01-08,9876\n",
        );
        let config = config_for(path);
        let a = run_analysis(&config).unwrap();
        let b = run_analysis(&config).unwrap();

        for (x, y) in a.pattern_sets.iter().zip(&b.pattern_sets) {
            assert_eq!(x.numbers, y.numbers);
        }
        let na: Vec<_> = a.recommendations.iter().map(|c| c.number).collect();
        let nb: Vec<_> = b.recommendations.iter().map(|c| c.number).collect();
        assert_eq!(na, nb);
    }

    #[test]
    fn empty_history_is_exit_code_three() {
        let path = write_history("empty.csv", "Draw_Date,Number\n");
        let err = run_analysis(&config_for(path)).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn missing_file_is_exit_code_two() {
        let err = run_analysis(&config_for(PathBuf::from("/nonexistent/nope.csv"))).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn derived_seeds_differ_per_label() {
        assert_ne!(derive_seed(42, "Palindrome"), derive_seed(42, "Quad"));
        assert_eq!(derive_seed(42, "Palindrome"), derive_seed(42, "Palindrome"));
    }
}
