//! Use Case Factory
//!
//! Wires configuration to concrete infrastructure. This is the dependency
//! injection point for the binary.

use std::path::PathBuf;

use crate::config::Config;
use crate::domain::entities::{PayloadSet, Row};
use crate::domain::ports::RowSource;
use crate::domain::services::ServiceCatalog;
use crate::error::NbportResult;
use crate::infrastructure::{
    workbook_dir, CsvRowSource, CsvSummarySink, FsPayloadRepository, LocalNotebookStore,
};

/// Catalog with configured default-dataset overrides applied
pub fn create_catalog(config: &Config) -> ServiceCatalog {
    ServiceCatalog::builtin().with_default_db_overrides(&config.services.default_db)
}

/// Load static blocks and porting bodies from the payload directory
pub fn load_payloads(config: &Config) -> NbportResult<PayloadSet> {
    let repo = FsPayloadRepository::new(&config.payloads.dir);
    Ok(PayloadSet::load(&repo)?)
}

/// Row source for the configured workbook and sheet
pub fn create_row_source(config: &Config) -> NbportResult<CsvRowSource> {
    let location = config.source_location()?;
    Ok(CsvRowSource::new(location, config.source.sheet.clone()).excluding(&config.summary.sheet))
}

/// Fetch rows, optionally keeping only the given task ids
///
/// An unreachable or empty source is fatal; so is a filter that matches
/// nothing.
pub fn fetch_rows(config: &Config, tasks: &[String]) -> NbportResult<Vec<Row>> {
    let source = create_row_source(config)?;
    let rows = source.fetch()?;
    if tasks.is_empty() {
        return Ok(rows);
    }

    let selected: Vec<Row> = rows
        .into_iter()
        .filter(|r| tasks.iter().any(|t| t == r.task_id()))
        .collect();
    if selected.is_empty() {
        return Err(crate::domain::ports::SourceError::Empty(format!(
            "{} (no rows match task ids {})",
            source.describe(),
            tasks.join(", ")
        ))
        .into());
    }
    Ok(selected)
}

/// Folder receiving generated notebooks
pub fn output_dir(config: &Config) -> NbportResult<PathBuf> {
    Ok(workbook_dir(config.source_location()?).join(&config.output.folder))
}

pub fn create_notebook_store(config: &Config) -> NbportResult<LocalNotebookStore> {
    Ok(LocalNotebookStore::new(output_dir(config)?))
}

/// Summary sheet inside the workbook
pub fn create_summary_sink(config: &Config) -> NbportResult<CsvSummarySink> {
    let path = workbook_dir(config.source_location()?).join(format!("{}.csv", config.summary.sheet));
    Ok(CsvSummarySink::open(path)?)
}
