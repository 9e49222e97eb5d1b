//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - ingests the draw history
//! - runs the analysis pipeline
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{AnalyzeArgs, Command};
use crate::domain::AnalysisConfig;
use crate::error::AppError;
use crate::report::format;

pub mod pipeline;

/// Entry point for the `fourcast` binary.
pub fn run() -> Result<(), AppError> {
    // We want `fourcast history.csv` to behave like `fourcast analyze
    // history.csv`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the shorthand UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Analyze(args) => handle_analyze(args, OutputMode::Full),
        Command::Rank(args) => handle_analyze(args, OutputMode::RankOnly),
        Command::Stats(args) => handle_analyze(args, OutputMode::StatsOnly),
        Command::Strategies(args) => handle_analyze(args, OutputMode::StrategiesOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    RankOnly,
    StatsOnly,
    StrategiesOnly,
}

fn handle_analyze(args: AnalyzeArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = analysis_config_from_args(&args);
    let run = pipeline::run_analysis(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", format::format_run_summary(&run.ingest, &run.snapshot, &config));
            println!("{}", format::format_pattern_frequency(&run.snapshot, config.asof_date));
            println!("{}", format::format_candidates("Pattern candidates", &run.pattern_sets, &run.snapshot));
            println!("{}", format::format_candidates("Strategy candidates", &run.strategy_sets, &run.snapshot));
            println!("{}", format::format_recommendations(&run.recommendations));
            println!("{}", format::format_consensus(&run.consensus));
        }
        OutputMode::RankOnly => {
            println!("{}", format::format_recommendations(&run.recommendations));
            println!("{}", format::format_consensus(&run.consensus));
        }
        OutputMode::StatsOnly => {
            println!("{}", format::format_run_summary(&run.ingest, &run.snapshot, &config));
            println!("{}", format::format_pattern_frequency(&run.snapshot, config.asof_date));
        }
        OutputMode::StrategiesOnly => {
            println!("{}", format::format_candidates("Strategy candidates", &run.strategy_sets, &run.snapshot));
            println!("{}", format::format_consensus(&run.consensus));
        }
    }

    // Optional exports.
    if let Some(path) = &config.export_report {
        crate::io::export::write_report(path, &pipeline::full_report(&run, &config))?;
    }
    if let Some(path) = &config.export_json {
        crate::io::export::write_json(path, &pipeline::export_view(&run, &config))?;
    }

    Ok(())
}

pub fn analysis_config_from_args(args: &AnalyzeArgs) -> AnalysisConfig {
    AnalysisConfig {
        history_path: args.history.clone(),
        asof_date: args.asof.unwrap_or_else(|| chrono::Local::now().date_naive()),
        per_pattern: args.count,
        top_n: args.top,
        seed: args.seed,
        window: args.window,
        export_report: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

/// Rewrite argv so `fourcast <csv>` defaults to `fourcast analyze <csv>`.
///
/// Rules:
/// - `fourcast history.csv ...`       -> `fourcast analyze history.csv ...`
/// - `fourcast --help/--version/-h`   -> unchanged (top-level help/version)
/// - `fourcast analyze ...` etc.      -> unchanged
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "analyze" | "rank" | "stats" | "strategies");
    if is_subcommand {
        return argv;
    }

    argv.insert(1, "analyze".to_string());
    argv
}
