//! Input validator
//!
//! A row either has every required `<service>_initial_db` field for its
//! resolved services or fails as a unit before anything is assembled.

use crate::domain::entities::Row;
use crate::domain::services::catalog::ServiceCatalog;
use crate::domain::services::resolver::ResolvedServiceSet;
use crate::error::GenerationError;

/// Check required inputs; the first missing field (in service order) wins
pub fn validate(
    services: &ResolvedServiceSet,
    row: &Row,
    catalog: &ServiceCatalog,
) -> Result<(), GenerationError> {
    for service in services.iter() {
        for field in catalog.spec(service).required_inputs {
            if row.non_blank(field).is_none() {
                return Err(GenerationError::MissingInput {
                    service,
                    field: (*field).to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Sorted, deduplicated required fields for a service set
pub fn required_fields(services: &ResolvedServiceSet, catalog: &ServiceCatalog) -> Vec<&'static str> {
    let mut fields: Vec<&'static str> = services
        .iter()
        .flat_map(|s| catalog.spec(s).required_inputs.iter().copied())
        .collect();
    fields.sort_unstable();
    fields.dedup();
    fields
}
