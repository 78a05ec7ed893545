//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Atomic local writes
//! - `repositories/` - CSV row source, notebook store, summary sheet, payloads

pub mod fs;
pub mod repositories;

pub use fs::LocalFs;
pub use repositories::{
    workbook_dir, CsvRowSource, CsvSummarySink, FsPayloadRepository, LocalNotebookStore,
};
