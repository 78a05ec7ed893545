//! Diff Use Case
//!
//! Regenerates every row and compares the result with what the document
//! store already holds. A clean diff after a run is the idempotence check:
//! identical input must reproduce byte-identical notebooks.

use serde::Serialize;
use similar::TextDiff;

use crate::domain::entities::{PayloadSet, Row};
use crate::domain::ports::{artifact_name, DocumentStore};
use crate::domain::services::{generate_row, ServiceCatalog};
use crate::error::FailureKind;

/// Type of change for one artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// No stored artifact yet
    Create,
    /// Stored artifact differs
    Update,
    /// Stored artifact is identical
    Unchanged,
    /// Row would fail to generate
    Failed,
}

/// Diff entry for one row
#[derive(Debug, Clone, Serialize)]
pub struct DiffEntry {
    pub row: usize,
    pub task_id: String,
    pub artifact_name: String,
    pub change_type: ChangeType,
    /// Unified diff for updates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<(FailureKind, String)>,
}

/// Result of the diff operation
#[derive(Debug, Clone, Default, Serialize)]
pub struct DiffResult {
    pub entries: Vec<DiffEntry>,
}

impl DiffResult {
    fn count(&self, change: ChangeType) -> usize {
        self.entries.iter().filter(|e| e.change_type == change).count()
    }

    pub fn creates(&self) -> usize {
        self.count(ChangeType::Create)
    }

    pub fn updates(&self) -> usize {
        self.count(ChangeType::Update)
    }

    pub fn unchanged(&self) -> usize {
        self.count(ChangeType::Unchanged)
    }

    pub fn failures(&self) -> usize {
        self.count(ChangeType::Failed)
    }

    /// Check if there are any changes
    pub fn has_changes(&self) -> bool {
        self.creates() + self.updates() > 0
    }
}

/// Unified diff between stored and regenerated notebook text
pub fn unified_patch(name: &str, old: &str, new: &str) -> String {
    TextDiff::from_lines(old, new)
        .unified_diff()
        .context_radius(3)
        .header(&format!("stored/{}", name), &format!("generated/{}", name))
        .to_string()
}

/// Diff Use Case
pub struct DiffUseCase<'a, D: DocumentStore> {
    catalog: &'a ServiceCatalog,
    payloads: &'a PayloadSet,
    store: &'a D,
    naming_template: &'a str,
}

impl<'a, D: DocumentStore> DiffUseCase<'a, D> {
    pub fn new(
        catalog: &'a ServiceCatalog,
        payloads: &'a PayloadSet,
        store: &'a D,
        naming_template: &'a str,
    ) -> Self {
        Self {
            catalog,
            payloads,
            store,
            naming_template,
        }
    }

    /// Execute the diff operation without modifying anything
    pub fn execute(&self, rows: &[Row]) -> DiffResult {
        let entries = rows.iter().map(|row| self.diff_row(row)).collect();
        DiffResult { entries }
    }

    fn diff_row(&self, row: &Row) -> DiffEntry {
        let name = artifact_name(self.naming_template, row.task_id());
        let mut entry = DiffEntry {
            row: row.index(),
            task_id: row.task_id().to_string(),
            artifact_name: name.clone(),
            change_type: ChangeType::Failed,
            patch: None,
            failure: None,
        };

        let rendered = generate_row(row, self.catalog, self.payloads)
            .map_err(|e| (e.kind(), e.to_string()))
            .and_then(|g| {
                g.artifact
                    .to_notebook_json()
                    .map_err(|e| (FailureKind::Persistence, e.to_string()))
            });
        let new = match rendered {
            Ok(text) => text,
            Err(failure) => {
                entry.failure = Some(failure);
                return entry;
            }
        };

        match self.store.load(&name) {
            None => entry.change_type = ChangeType::Create,
            Some(old) if old == new => entry.change_type = ChangeType::Unchanged,
            Some(old) => {
                entry.change_type = ChangeType::Update;
                entry.patch = Some(unified_patch(&name, &old, &new));
            }
        }
        entry
    }
}
