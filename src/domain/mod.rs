//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the validated 4-digit number type (`DigitString`)
//! - draw-history records (`DrawRecord`)
//! - the pattern catalog identity (`PatternId`) and verdicts
//! - candidate sets and scored recommendations
//! - the resolved run configuration (`AnalysisConfig`)

pub mod types;

pub use types::*;
