use anyhow::Result;

use nbport::config::Config;
use nbport::presentation::factory;
use nbport::presentation::output::{render_services, OutputFormat};

pub fn cmd_services(config: &Config, format: OutputFormat) -> Result<bool> {
    let catalog = factory::create_catalog(config);
    render_services(&mut std::io::stdout().lock(), &catalog, format)?;
    Ok(true)
}
