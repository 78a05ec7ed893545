//! Error types for nbport
//!
//! Library errors use `thiserror`; the binary wraps them in `anyhow`.
//!
//! Two layers exist:
//! - [`GenerationError`]: failures local to one row. They never escape the
//!   row pipeline; they become a failed `RowResult` instead.
//! - [`NbportError`]: failures that abort a whole run (source unavailable,
//!   bad configuration, unreadable payloads, unusable output location).

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::domain::value_objects::ServiceId;

/// Result type alias for run-level operations
pub type NbportResult<T> = Result<T, NbportError>;

/// Run-level error type
#[derive(Error, Debug)]
pub enum NbportError {
    /// Data source unreachable or empty - fatal before any row is processed
    #[error("data source unavailable: {0}")]
    SourceUnavailable(#[from] crate::domain::ports::SourceError),

    /// Configuration invalid or incomplete
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Required configuration value missing
    #[error("missing required setting '{key}' (set {env} or [{section}] in nbport.toml)")]
    MissingSetting {
        key: &'static str,
        env: &'static str,
        section: &'static str,
    },

    /// Static or porting payload could not be read
    #[error(transparent)]
    Payload(#[from] crate::domain::ports::PayloadError),

    /// Output location could not be opened
    #[error(transparent)]
    Persistence(#[from] crate::domain::ports::PersistenceError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Classification of a row failure, as shown in the run report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    UnknownService,
    DependencyTooDeep,
    MissingInput,
    MalformedJson,
    MissingPayload,
    Persistence,
}

impl FailureKind {
    /// Stable name used in text reports
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::UnknownService => "UnknownServiceError",
            FailureKind::DependencyTooDeep => "DependencyTooDeepError",
            FailureKind::MissingInput => "MissingInputError",
            FailureKind::MalformedJson => "MalformedJsonError",
            FailureKind::MissingPayload => "MissingPayloadError",
            FailureKind::Persistence => "PersistenceError",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row-local generation failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A services token mapped to no known service
    #[error("unknown service '{token}'{}", suggestion.as_ref().map(|s| format!(" (did you mean '{}'?)", s)).unwrap_or_default())]
    UnknownService {
        token: String,
        suggestion: Option<String>,
    },

    /// A services token contained synonyms of more than one service
    #[error("service '{token}' is ambiguous between {}; list them separately", join_ids(candidates))]
    AmbiguousService {
        token: String,
        candidates: Vec<ServiceId>,
    },

    /// Implicit dependency chain exceeded the expansion bound
    #[error("dependency chain through '{service}' exceeds depth {limit}")]
    DependencyTooDeep { service: ServiceId, limit: usize },

    /// A required `<service>_initial_db` field is absent or blank
    #[error("service '{service}' requires field '{field}', which is missing or empty")]
    MissingInput { service: ServiceId, field: String },

    /// A JSON field did not parse under strict JSON rules
    #[error("field '{field}' is not valid JSON: {detail}")]
    MalformedJson { field: String, detail: String },

    /// No porting body is available for a resolved service
    #[error("no porting code available for service '{service}'")]
    MissingPayload { service: ServiceId },
}

impl GenerationError {
    /// Report classification for this error
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::UnknownService { .. } | GenerationError::AmbiguousService { .. } => {
                FailureKind::UnknownService
            }
            GenerationError::DependencyTooDeep { .. } => FailureKind::DependencyTooDeep,
            GenerationError::MissingInput { .. } => FailureKind::MissingInput,
            GenerationError::MalformedJson { .. } => FailureKind::MalformedJson,
            GenerationError::MissingPayload { .. } => FailureKind::MissingPayload,
        }
    }
}

fn join_ids(ids: &[ServiceId]) -> String {
    ids.iter()
        .map(|id| format!("'{}'", id))
        .collect::<Vec<_>>()
        .join(", ")
}
