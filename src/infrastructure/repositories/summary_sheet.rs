//! CSV summary sheet
//!
//! The sheet is `<workbook>/<summary_sheet>.csv`: the tracker's original
//! columns followed by the generated columns. Records are keyed by
//! `task_id`; every upsert rewrites the sheet atomically.

use std::path::{Path, PathBuf};

use crate::domain::ports::{PersistenceError, SummaryRecord, SummarySink, SUMMARY_COLUMNS};
use crate::infrastructure::fs::LocalFs;

const KEY_COLUMN: &str = "task_id";

pub struct CsvSummarySink {
    path: PathBuf,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    fs: LocalFs,
}

impl CsvSummarySink {
    /// Open the sheet, reading existing records if present
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let mut sink = Self {
            path,
            headers: Vec::new(),
            rows: Vec::new(),
            fs: LocalFs::new(),
        };
        if sink.path.is_file() {
            sink.read_existing()?;
        }
        Ok(sink)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of records currently in the sheet
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn error(&self, message: impl ToString) -> PersistenceError {
        PersistenceError::Summary {
            target: self.path.display().to_string(),
            message: message.to_string(),
        }
    }

    fn read_existing(&mut self) -> Result<(), PersistenceError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.error(e))?;
        self.headers = reader
            .headers()
            .map_err(|e| self.error(e))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        for record in reader.records() {
            let record = record.map_err(|e| self.error(e))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(self.headers.len(), String::new());
            self.rows.push(row);
        }
        Ok(())
    }

    fn column(&mut self, name: &str) -> usize {
        match self.headers.iter().position(|h| h == name) {
            Some(i) => i,
            None => {
                self.headers.push(name.to_string());
                for row in &mut self.rows {
                    row.push(String::new());
                }
                self.headers.len() - 1
            }
        }
    }

    fn render(&self) -> Result<Vec<u8>, PersistenceError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer
            .write_record(&self.headers)
            .map_err(|e| self.error(e))?;
        for row in &self.rows {
            writer.write_record(row).map_err(|e| self.error(e))?;
        }
        writer.into_inner().map_err(|e| self.error(e))
    }
}

impl SummarySink for CsvSummarySink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn upsert(&mut self, record: SummaryRecord) -> Result<(), PersistenceError> {
        let key = self.column(KEY_COLUMN);

        let mut values: Vec<(usize, String)> = Vec::new();
        for (name, value) in &record.fields {
            if name.is_empty() || name == KEY_COLUMN {
                continue;
            }
            let idx = self.column(name);
            if !values.iter().any(|(i, _)| *i == idx) {
                values.push((idx, value.clone()));
            }
        }
        for (name, value) in SUMMARY_COLUMNS.iter().zip(record.generated_values()) {
            let idx = self.column(name);
            values.retain(|(i, _)| *i != idx);
            values.push((idx, value.to_string()));
        }

        let width = self.headers.len();
        let position = self.rows.iter().position(|r| r[key] == record.task_id);
        let row = match position {
            Some(i) => &mut self.rows[i],
            None => {
                self.rows.push(vec![String::new(); width]);
                let last = self.rows.len() - 1;
                &mut self.rows[last]
            }
        };
        row[key] = record.task_id.clone();
        for (idx, value) in values {
            row[idx] = value;
        }

        let bytes = self.render()?;
        self.fs
            .write_atomic(&self.path, &bytes)
            .map_err(|source| PersistenceError::Io {
                target: self.path.display().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn record(task_id: &str, locator: &str) -> SummaryRecord {
        SummaryRecord {
            task_id: task_id.to_string(),
            fields: vec![
                ("task_id".to_string(), task_id.to_string()),
                ("services_needed".to_string(), "Calendar".to_string()),
            ],
            services_required: "calendar".to_string(),
            initial_db_fields_used: "calendar_initial_db".to_string(),
            locator: locator.to_string(),
            refresh_date: "2026-10-18".to_string(),
            refresh_time: "09:30:00".to_string(),
        }
    }

    fn read(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let mut reader = csv::Reader::from_path(path).unwrap();
        let headers = reader.headers().unwrap().iter().map(str::to_string).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_string).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn upsert_creates_sheet_with_generated_columns() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Generated_Colabs.csv");

        let mut sink = CsvSummarySink::open(&path).unwrap();
        sink.upsert(record("T1", "/out/P_T1.ipynb")).unwrap();

        let (headers, rows) = read(&path);
        assert_eq!(
            headers,
            vec![
                "task_id",
                "services_needed",
                "services_required",
                "initial_db_fields_used",
                "colab_url",
                "refresh_date",
                "refresh_time"
            ]
        );
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][4], "/out/P_T1.ipynb");
    }

    #[test]
    fn upsert_same_task_updates_in_place() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let mut sink = CsvSummarySink::open(&path).unwrap();
        sink.upsert(record("T1", "first")).unwrap();
        sink.upsert(record("T2", "other")).unwrap();
        sink.upsert(record("T1", "second")).unwrap();
        assert_eq!(sink.len(), 2);

        let (_, rows) = read(&path);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][0], "T1");
        assert_eq!(rows[0][4], "second");
    }

    #[test]
    fn existing_sheet_is_preserved_and_extended() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        std::fs::write(&path, "task_id,owner\nT0,alice\nT1,bob\n").unwrap();

        let mut sink = CsvSummarySink::open(&path).unwrap();
        sink.upsert(record("T1", "loc")).unwrap();

        // Reopening sees the same records, so a re-run does not duplicate.
        let mut again = CsvSummarySink::open(&path).unwrap();
        again.upsert(record("T1", "loc2")).unwrap();

        let (headers, rows) = read(&path);
        assert_eq!(&headers[..3], &["task_id", "owner", "services_needed"]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec!["T0", "alice", "", "", "", "", "", ""]);
        assert_eq!(rows[1][1], "bob");
        assert_eq!(rows[1][5], "loc2");
    }

    #[test]
    fn row_without_task_id_column_still_keyed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("summary.csv");
        let mut sink = CsvSummarySink::open(&path).unwrap();

        let mut rec = record("row-3", "loc");
        rec.fields.retain(|(k, _)| k != "task_id");
        sink.upsert(rec.clone()).unwrap();
        sink.upsert(rec).unwrap();

        let (_, rows) = read(&path);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "row-3");
    }
}
