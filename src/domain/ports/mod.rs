//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the generation engine.
//! The infrastructure layer provides concrete implementations.

pub mod document_store;
pub mod payload_repository;
pub mod row_source;
pub mod summary_sink;

pub use document_store::{artifact_name, DocumentStore, PersistenceError};
pub use payload_repository::{PayloadError, PayloadRepository, StaticBlock};
pub use row_source::{RowSource, SourceError};
pub use summary_sink::{SummaryRecord, SummarySink, SUMMARY_COLUMNS};
