//! nbport CLI
//!
//! Usage: nbport <COMMAND>
//!
//! Commands:
//!   generate  Generate notebooks and update the summary sheet
//!   check     Preflight every row without writing anything
//!   diff      Compare regenerated notebooks with stored ones
//!   services  List the service catalog

mod commands;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use nbport::config::Config;
use nbport::logging;
use nbport::presentation::{Cli, Commands, OutputFormat};

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the command finished without row failures
fn run(cli: Cli) -> Result<bool> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = Config::load_layered(&cwd)?;

    logging::init(logging::effective_level(
        config.log.level,
        cli.verbose,
        cli.quiet,
    ));
    for warning in &warnings {
        tracing::warn!("{}", warning);
    }

    let format = OutputFormat::from_json_flag(cli.json);
    match cli.command {
        Commands::Generate {
            source,
            out_folder,
            dry_run,
        } => {
            let mut overrides = source.overrides();
            overrides.out_folder = out_folder;
            let config = config.with_cli_overrides(&overrides);
            commands::generate::cmd_generate(&config, &source.tasks, dry_run, format)
        }
        Commands::Check { source } => {
            let config = config.with_cli_overrides(&source.overrides());
            commands::check::cmd_check(&config, &source.tasks, format)
        }
        Commands::Diff { source, out_folder } => {
            let mut overrides = source.overrides();
            overrides.out_folder = out_folder;
            let config = config.with_cli_overrides(&overrides);
            commands::diff::cmd_diff(&config, &source.tasks, format)
        }
        Commands::Services => commands::services::cmd_services(&config, format),
    }
}
