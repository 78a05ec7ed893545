//! Summary Sink Port
//!
//! One record per successfully processed row, keyed by task id so a re-run
//! updates the existing record instead of appending a duplicate.

use super::document_store::PersistenceError;

/// Extra columns appended after the row's original columns
pub const SUMMARY_COLUMNS: [&str; 5] = [
    "services_required",
    "initial_db_fields_used",
    "colab_url",
    "refresh_date",
    "refresh_time",
];

/// Summary record for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRecord {
    pub task_id: String,
    /// Original row columns in source order
    pub fields: Vec<(String, String)>,
    /// Resolved services joined with ` | `
    pub services_required: String,
    /// Initial-db columns consumed, joined with ` | `
    pub initial_db_fields_used: String,
    /// Artifact locator
    pub locator: String,
    pub refresh_date: String,
    pub refresh_time: String,
}

impl SummaryRecord {
    /// Values for the generated columns, in `SUMMARY_COLUMNS` order
    pub fn generated_values(&self) -> [&str; 5] {
        [
            &self.services_required,
            &self.initial_db_fields_used,
            &self.locator,
            &self.refresh_date,
            &self.refresh_time,
        ]
    }
}

/// Summary surface
pub trait SummarySink {
    fn describe(&self) -> String;

    /// Insert or update the record for `record.task_id`
    fn upsert(&mut self, record: SummaryRecord) -> Result<(), PersistenceError>;
}
