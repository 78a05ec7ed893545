//! CLI Argument Parsing
//!
//! Global flags (`--json`, `-v`, `-q`) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::CliOverrides;

/// nbport - generate data-porting notebooks from a task tracker
#[derive(Parser, Debug)]
#[command(name = "nbport")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit machine-readable NDJSON on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where rows and payloads come from
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Workbook directory of CSV sheets, or a single CSV file
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Sheet (CSV file stem) to read
    #[arg(long)]
    pub sheet: Option<String>,

    /// Payload directory (static blocks and porting bodies)
    #[arg(long)]
    pub payload_dir: Option<PathBuf>,

    /// Only process rows with these task ids
    #[arg(long = "task", value_name = "TASK_ID")]
    pub tasks: Vec<String>,
}

impl SourceArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            source: self.source.clone(),
            sheet: self.sheet.clone(),
            out_folder: None,
            payload_dir: self.payload_dir.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate notebooks for every row and update the summary sheet
    Generate {
        #[command(flatten)]
        source: SourceArgs,

        /// Output folder name (created next to the workbook)
        #[arg(long)]
        out_folder: Option<String>,

        /// Generate without writing notebooks or the summary sheet
        #[arg(long)]
        dry_run: bool,
    },

    /// Preflight every row without writing anything
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Compare regenerated notebooks with the stored ones
    Diff {
        #[command(flatten)]
        source: SourceArgs,

        /// Output folder name holding the stored notebooks
        #[arg(long)]
        out_folder: Option<String>,
    },

    /// List known services, their synonyms and requirements
    Services,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn generate_parses_flags() {
        let cli = Cli::parse_from([
            "nbport", "--json", "generate", "--source", "tracker", "--task", "T1", "--task", "T2",
            "--dry-run",
        ]);
        assert!(cli.json);
        match cli.command {
            Commands::Generate {
                source, dry_run, ..
            } => {
                assert!(dry_run);
                assert_eq!(source.tasks, vec!["T1", "T2"]);
                assert_eq!(source.overrides().source, Some(PathBuf::from("tracker")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["nbport", "-q", "-v", "services"]).is_err());
    }
}
