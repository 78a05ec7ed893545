//! Row generation chain: resolve, validate, assemble, compose

use crate::domain::entities::{Artifact, PayloadSet, Row};
use crate::domain::services::assembler::assemble;
use crate::domain::services::catalog::ServiceCatalog;
use crate::domain::services::composer::compose;
use crate::domain::services::resolver::{resolve, ResolvedServiceSet};
use crate::domain::services::validator::{required_fields, validate};
use crate::error::GenerationError;

/// Everything produced for one row before persistence
#[derive(Debug, Clone)]
pub struct GeneratedRow {
    pub services: ResolvedServiceSet,
    /// Input fields the notebook was built from
    pub fields_used: Vec<&'static str>,
    pub artifact: Artifact,
}

impl GeneratedRow {
    /// `fields_used` in summary form
    pub fn fields_display(&self) -> String {
        self.fields_used.join(" | ")
    }
}

/// Run the pure part of the pipeline for one row
///
/// Stops at the first failing step; no partial artifact is returned.
pub fn generate_row(
    row: &Row,
    catalog: &ServiceCatalog,
    payloads: &PayloadSet,
) -> Result<GeneratedRow, GenerationError> {
    let services = resolve(row.services_needed(), catalog)?;
    validate(&services, row, catalog)?;

    let fragments = services
        .iter()
        .map(|service| assemble(service, row, catalog, payloads))
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        task_id = row.task_id(),
        services = %services.display(),
        "assembled porting fragments"
    );

    Ok(GeneratedRow {
        fields_used: required_fields(&services, catalog),
        artifact: compose(row, &fragments, payloads),
        services,
    })
}
