//! Row results and the run report

use serde::Serialize;

use crate::error::{FailureKind, GenerationError};
use crate::domain::value_objects::ContentHash;

/// Outcome of one row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowOutcome {
    /// Artifact generated (and persisted unless dry-run)
    Success {
        artifact_name: String,
        locator: String,
        content_hash: String,
    },
    /// Row failed; nothing was persisted for it
    Failure { kind: FailureKind, message: String },
}

/// Result record for one row; every row yields exactly one
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowResult {
    pub row: usize,
    pub task_id: String,
    #[serde(flatten)]
    pub outcome: RowOutcome,
}

impl RowResult {
    pub fn success(
        row: usize,
        task_id: impl Into<String>,
        artifact_name: impl Into<String>,
        locator: impl Into<String>,
        content_hash: &ContentHash,
    ) -> Self {
        Self {
            row,
            task_id: task_id.into(),
            outcome: RowOutcome::Success {
                artifact_name: artifact_name.into(),
                locator: locator.into(),
                content_hash: content_hash.to_string(),
            },
        }
    }

    pub fn failure(
        row: usize,
        task_id: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            row,
            task_id: task_id.into(),
            outcome: RowOutcome::Failure {
                kind,
                message: message.into(),
            },
        }
    }

    pub fn from_generation_error(row: usize, task_id: impl Into<String>, err: &GenerationError) -> Self {
        Self::failure(row, task_id, err.kind(), err.to_string())
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, RowOutcome::Success { .. })
    }

    pub fn locator(&self) -> Option<&str> {
        match &self.outcome {
            RowOutcome::Success { locator, .. } => Some(locator),
            RowOutcome::Failure { .. } => None,
        }
    }

    pub fn failure_kind(&self) -> Option<FailureKind> {
        match &self.outcome {
            RowOutcome::Success { .. } => None,
            RowOutcome::Failure { kind, .. } => Some(*kind),
        }
    }
}

/// Report for a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub results: Vec<RowResult>,
    /// The run was stopped between rows before the source was exhausted
    pub interrupted: bool,
}

impl RunReport {
    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0 && !self.interrupted
    }
}
