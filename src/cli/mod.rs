//! Command-line parsing for the 4D draw analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the statistics/generation code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "fourcast", version, about = "4D lottery draw analyzer and candidate generator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full analysis: stats, pattern candidates, strategies, rankings.
    Analyze(AnalyzeArgs),
    /// Print the ranked recommendation and consensus lists only (for scripting).
    Rank(AnalyzeArgs),
    /// Print corpus statistics and historical pattern frequencies only.
    Stats(AnalyzeArgs),
    /// Run the strategy analyses and their consensus only.
    Strategies(AnalyzeArgs),
}

/// Common options for every analysis mode.
#[derive(Debug, Parser, Clone)]
pub struct AnalyzeArgs {
    /// Draw-history CSV (needs a `draw_date` column plus number columns).
    #[arg(value_name = "CSV")]
    pub history: PathBuf,

    /// Candidates to keep per pattern.
    #[arg(short = 'c', long, default_value_t = 2)]
    pub count: usize,

    /// Length of the final recommendation list.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Base random seed; every generation task derives its own stream from it.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Reference date for seasonal/date-based rules (defaults to today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub asof: Option<NaiveDate>,

    /// Draws covered by the sliding-window strategy.
    #[arg(long, default_value_t = 20)]
    pub window: usize,

    /// Write the full text report to a file.
    #[arg(long, value_name = "TXT")]
    pub export: Option<PathBuf>,

    /// Write the run results as JSON.
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}
