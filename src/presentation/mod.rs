//! Presentation Layer
//!
//! This layer handles:
//! - CLI argument parsing (via clap)
//! - Wiring configuration to infrastructure (`factory`)
//! - Output formatting (text/NDJSON)

pub mod cli;
pub mod factory;
pub mod output;

pub use cli::{Cli, Commands, SourceArgs};
pub use output::OutputFormat;
