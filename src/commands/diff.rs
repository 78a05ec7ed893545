use anyhow::Result;

use nbport::application::DiffUseCase;
use nbport::config::Config;
use nbport::presentation::factory;
use nbport::presentation::output::{render_diff, write_event, OutputFormat};

pub fn cmd_diff(config: &Config, tasks: &[String], format: OutputFormat) -> Result<bool> {
    let catalog = factory::create_catalog(config);
    let payloads = factory::load_payloads(config)?;
    let rows = factory::fetch_rows(config, tasks)?;
    let store = factory::create_notebook_store(config)?;

    let mut out = std::io::stdout().lock();
    if format == OutputFormat::Json {
        write_event(
            &mut out,
            &serde_json::json!({ "event": "start", "command": "diff", "rows": rows.len() }),
        )?;
    }

    let result =
        DiffUseCase::new(&catalog, &payloads, &store, &config.output.naming_template).execute(&rows);

    render_diff(&mut out, &result, format)?;
    Ok(result.failures() == 0)
}
