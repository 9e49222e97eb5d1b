//! `fourcast` library crate.
//!
//! The binary (`fourcast`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., future GUI/daemon, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod consensus;
pub mod domain;
pub mod error;
pub mod generate;
pub mod io;
pub mod patterns;
pub mod report;
pub mod stats;
pub mod strategies;
