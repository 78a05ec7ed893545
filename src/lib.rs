//! nbport - tracker-to-notebook generator
//!
//! Reads task rows from a tabular tracker, resolves the services each task
//! needs, and emits one data-porting notebook per row together with a
//! summary record.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use application::{CheckUseCase, DiffUseCase, PipelineOptions, RowPipeline};
pub use config::Config;
pub use domain::entities::{Artifact, PayloadSet, Row, RowResult, RunReport};
pub use domain::services::{generate_row, ServiceCatalog};
pub use domain::value_objects::ServiceId;
pub use error::{FailureKind, GenerationError, NbportError, NbportResult};
