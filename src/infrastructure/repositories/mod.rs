//! Repository Implementations
//!
//! Concrete implementations of the domain ports over local CSV workbooks
//! and directories.

mod csv_source;
mod notebook_store;
mod payloads;
mod summary_sheet;

pub use csv_source::{workbook_dir, CsvRowSource};
pub use notebook_store::LocalNotebookStore;
pub use payloads::FsPayloadRepository;
pub use summary_sheet::CsvSummarySink;
