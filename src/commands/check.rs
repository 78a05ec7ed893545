use anyhow::Result;

use nbport::application::CheckUseCase;
use nbport::config::Config;
use nbport::presentation::factory;
use nbport::presentation::output::{render_check, write_event, OutputFormat};

pub fn cmd_check(config: &Config, tasks: &[String], format: OutputFormat) -> Result<bool> {
    let catalog = factory::create_catalog(config);
    let payloads = factory::load_payloads(config)?;
    let rows = factory::fetch_rows(config, tasks)?;

    let mut out = std::io::stdout().lock();
    if format == OutputFormat::Json {
        write_event(
            &mut out,
            &serde_json::json!({ "event": "start", "command": "check", "rows": rows.len() }),
        )?;
    }

    let result = CheckUseCase::new(&catalog, &payloads).execute(&rows);
    tracing::debug!(passed = result.passed, errors = result.errors, "check finished");

    render_check(&mut out, &result, format)?;
    Ok(result.is_success())
}
