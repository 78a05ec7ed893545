//! Row Source Port
//!
//! Read-only access to the tracker: an ordered sequence of rows keyed by
//! column name. Failing to acquire rows is fatal to a run.

use crate::domain::entities::Row;

/// Errors acquiring the row set
#[derive(Debug)]
pub enum SourceError {
    /// Source location does not exist or cannot be opened
    NotFound(String),
    /// Named sheet not present in the source
    SheetNotFound { source: String, sheet: String },
    /// Source exists but has no header or no rows
    Empty(String),
    /// Source could not be parsed
    Malformed(String),
    /// I/O error
    Io(std::io::Error),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err)
    }
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NotFound(location) => write!(f, "source not found: {}", location),
            SourceError::SheetNotFound { source, sheet } => {
                write!(f, "sheet '{}' not found in {}", sheet, source)
            }
            SourceError::Empty(location) => write!(f, "no data found in {}", location),
            SourceError::Malformed(msg) => write!(f, "malformed source: {}", msg),
            SourceError::Io(err) => write!(f, "I/O error: {}", err),
        }
    }
}

impl std::error::Error for SourceError {}

/// Tabular data source
pub trait RowSource {
    /// Human-readable description of the source (for logs and reports)
    fn describe(&self) -> String;

    /// Column names in source order
    fn headers(&self) -> Result<Vec<String>, SourceError>;

    /// All rows in source order
    ///
    /// Implementations return `SourceError::Empty` rather than an empty
    /// vector when the source has no rows.
    fn fetch(&self) -> Result<Vec<Row>, SourceError>;
}
