//! Check Use Case
//!
//! Preflight of a whole row set: runs the generation chain for every row
//! without persisting anything and reports, per row, the resolved services
//! or the failure that would occur. Also reports services that have no
//! porting body in the payload directory.

use serde::Serialize;

use crate::domain::entities::{PayloadSet, Row};
use crate::domain::services::{generate_row, ServiceCatalog};
use crate::domain::value_objects::ServiceId;
use crate::error::FailureKind;

/// Status of one checked row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckStatus {
    Pass {
        services: Vec<ServiceId>,
        fields_used: Vec<&'static str>,
    },
    Error {
        kind: FailureKind,
        message: String,
    },
}

/// Result of checking a single row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub row: usize,
    pub task_id: String,
    #[serde(flatten)]
    pub status: CheckStatus,
}

impl CheckItem {
    pub fn is_pass(&self) -> bool {
        matches!(self.status, CheckStatus::Pass { .. })
    }
}

/// Result of the check operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct CheckResult {
    pub items: Vec<CheckItem>,
    /// Services with no porting body available
    pub missing_payloads: Vec<ServiceId>,
    pub passed: usize,
    pub errors: usize,
}

impl CheckResult {
    /// Check if every row would generate
    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}

/// Check Use Case
pub struct CheckUseCase<'a> {
    catalog: &'a ServiceCatalog,
    payloads: &'a PayloadSet,
}

impl<'a> CheckUseCase<'a> {
    pub fn new(catalog: &'a ServiceCatalog, payloads: &'a PayloadSet) -> Self {
        Self { catalog, payloads }
    }

    pub fn execute(&self, rows: &[Row]) -> CheckResult {
        let mut result = CheckResult {
            missing_payloads: ServiceId::ALL
                .into_iter()
                .filter(|s| self.payloads.porting_body(*s).is_none())
                .collect(),
            ..Default::default()
        };

        for row in rows {
            let status = match generate_row(row, self.catalog, self.payloads) {
                Ok(generated) => CheckStatus::Pass {
                    services: generated.services.as_slice().to_vec(),
                    fields_used: generated.fields_used,
                },
                Err(e) => CheckStatus::Error {
                    kind: e.kind(),
                    message: e.to_string(),
                },
            };
            let item = CheckItem {
                row: row.index(),
                task_id: row.task_id().to_string(),
                status,
            };
            if item.is_pass() {
                result.passed += 1;
            } else {
                result.errors += 1;
            }
            result.items.push(item);
        }

        result
    }
}
