use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};

use nbport::application::{PipelineOptions, RowPipeline};
use nbport::config::Config;
use nbport::presentation::factory;
use nbport::presentation::output::{render_run_report, write_event, OutputFormat};

pub fn cmd_generate(config: &Config, tasks: &[String], dry_run: bool, format: OutputFormat) -> Result<bool> {
    // Rows, payloads and the output location are checked before any row runs
    let catalog = factory::create_catalog(config);
    let payloads = factory::load_payloads(config)?;
    let rows = factory::fetch_rows(config, tasks)?;
    let store = factory::create_notebook_store(config)?;
    let summary = factory::create_summary_sink(config)?;

    let stop = Arc::new(AtomicBool::new(false));
    let stop_clone = Arc::clone(&stop);
    ctrlc::set_handler(move || {
        stop_clone.store(true, Ordering::SeqCst);
    })
    .context("failed to install Ctrl+C handler")?;

    let mut out = std::io::stdout().lock();
    if format == OutputFormat::Json {
        write_event(
            &mut out,
            &serde_json::json!({
                "event": "start",
                "command": "generate",
                "rows": rows.len(),
                "dry_run": dry_run,
            }),
        )?;
    }

    let options = PipelineOptions {
        naming_template: config.output.naming_template.clone(),
        dry_run,
    };
    let mut pipeline = RowPipeline::new(&catalog, &payloads, store, summary, options);
    let report = pipeline.run(&rows, &stop);

    render_run_report(&mut out, &report, format)?;
    Ok(report.is_success())
}
