//! File input/output: history ingest and report export.

pub mod export;
pub mod ingest;
