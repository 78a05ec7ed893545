//! CSV workbook row source
//!
//! A workbook is a directory of CSV files, one per sheet (`<sheet>.csv`).
//! A single CSV file is also accepted as a one-sheet workbook.

use std::path::{Path, PathBuf};

use crate::domain::entities::Row;
use crate::domain::ports::{RowSource, SourceError};

/// Directory holding the workbook's sheets
pub fn workbook_dir(location: &Path) -> PathBuf {
    if location.is_dir() {
        return location.to_path_buf();
    }
    match location.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Row source reading one sheet of a CSV workbook
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    location: PathBuf,
    sheet: Option<String>,
    excluded: Vec<String>,
}

impl CsvRowSource {
    pub fn new(location: impl Into<PathBuf>, sheet: Option<String>) -> Self {
        Self {
            location: location.into(),
            sheet,
            excluded: Vec::new(),
        }
    }

    /// Never pick `sheet` as the default sheet (e.g. the summary sheet)
    pub fn excluding(mut self, sheet: impl Into<String>) -> Self {
        self.excluded.push(sheet.into());
        self
    }

    /// Resolve the CSV file backing the selected sheet
    pub fn sheet_path(&self) -> Result<PathBuf, SourceError> {
        if self.location.is_file() {
            if let Some(sheet) = &self.sheet {
                let stem = self.location.file_stem().and_then(|s| s.to_str());
                if stem != Some(sheet.as_str()) {
                    return Err(SourceError::SheetNotFound {
                        source: self.describe(),
                        sheet: sheet.clone(),
                    });
                }
            }
            return Ok(self.location.clone());
        }

        if !self.location.is_dir() {
            return Err(SourceError::NotFound(self.describe()));
        }

        if let Some(sheet) = &self.sheet {
            let path = self.location.join(format!("{}.csv", sheet));
            return if path.is_file() {
                Ok(path)
            } else {
                Err(SourceError::SheetNotFound {
                    source: self.describe(),
                    sheet: sheet.clone(),
                })
            };
        }

        let mut sheets: Vec<PathBuf> = std::fs::read_dir(&self.location)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "csv"))
            .filter(|p| {
                let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
                !self.excluded.iter().any(|ex| ex == stem)
            })
            .collect();
        sheets.sort();
        sheets
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Empty(self.describe()))
    }

    fn reader(&self) -> Result<csv::Reader<std::fs::File>, SourceError> {
        let path = self.sheet_path()?;
        csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_error(&path, e))
    }
}

fn csv_error(path: &Path, err: csv::Error) -> SourceError {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => SourceError::Io(io),
        other => SourceError::Malformed(format!("{}: {:?}", path.display(), other)),
    }
}

fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

impl RowSource for CsvRowSource {
    fn describe(&self) -> String {
        match &self.sheet {
            Some(sheet) => format!("{} [{}]", self.location.display(), sheet),
            None => self.location.display().to_string(),
        }
    }

    fn headers(&self) -> Result<Vec<String>, SourceError> {
        let mut reader = self.reader()?;
        let headers = reader
            .headers()
            .map_err(|e| SourceError::Malformed(e.to_string()))?;
        let headers: Vec<String> = headers.iter().map(clean_header).collect();
        if headers.iter().all(String::is_empty) {
            return Err(SourceError::Empty(self.describe()));
        }
        Ok(headers)
    }

    fn fetch(&self) -> Result<Vec<Row>, SourceError> {
        let headers = self.headers()?;
        let mut reader = self.reader()?;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| SourceError::Malformed(e.to_string()))?;
            if record.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let fields = headers
                .iter()
                .enumerate()
                .filter(|(_, h)| !h.is_empty())
                .map(|(i, h)| (h.clone(), record.get(i).unwrap_or_default().to_string()));
            rows.push(Row::new(rows.len() + 1, fields));
        }

        if rows.is_empty() {
            return Err(SourceError::Empty(self.describe()));
        }
        tracing::debug!(source = %self.describe(), rows = rows.len(), "fetched rows");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const TRACKER: &str = "task_id,services_needed,calendar_initial_db\n\
        T1,Calendar,\"{\"\"events\"\": {}}\"\n\
        ,,\n\
        T2,Gmail,\n";

    #[test]
    fn reads_named_sheet_from_workbook() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Tasks.csv"), TRACKER).unwrap();

        let source = CsvRowSource::new(dir.path(), Some("Tasks".to_string()));
        let rows = source.fetch().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].task_id(), "T1");
        assert_eq!(rows[0].get("calendar_initial_db"), Some("{\"events\": {}}"));
        assert_eq!(rows[1].index(), 2);
        assert_eq!(rows[1].services_needed(), "Gmail");
    }

    #[test]
    fn default_sheet_is_first_alphabetically_excluding_summary() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Generated_Colabs.csv"), "task_id\nS1\n").unwrap();
        fs::write(dir.path().join("tasks.csv"), TRACKER).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let source = CsvRowSource::new(dir.path(), None).excluding("Generated_Colabs");
        assert_eq!(source.sheet_path().unwrap(), dir.path().join("tasks.csv"));
    }

    #[test]
    fn single_file_is_a_workbook() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("tracker.csv");
        fs::write(&file, TRACKER).unwrap();

        let rows = CsvRowSource::new(&file, None).fetch().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(workbook_dir(&file), dir.path());
    }

    #[test]
    fn short_records_are_padded() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("t.csv");
        fs::write(&file, "task_id,services_needed,query\nT1,clock\n").unwrap();

        let rows = CsvRowSource::new(&file, None).fetch().unwrap();
        assert_eq!(rows[0].get("query"), Some(""));
    }

    #[test]
    fn bom_is_stripped_from_headers() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("t.csv");
        fs::write(&file, "\u{feff}task_id,services_needed\nT7,clock\n").unwrap();

        let rows = CsvRowSource::new(&file, None).fetch().unwrap();
        assert_eq!(rows[0].task_id(), "T7");
    }

    #[test]
    fn missing_location_is_not_found() {
        let dir = tempdir().unwrap();
        let err = CsvRowSource::new(dir.path().join("nope"), None)
            .fetch()
            .unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn missing_sheet_is_reported() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("Tasks.csv"), TRACKER).unwrap();
        let err = CsvRowSource::new(dir.path(), Some("Template".to_string()))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, SourceError::SheetNotFound { .. }));
    }

    #[test]
    fn header_only_sheet_is_empty() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("t.csv");
        fs::write(&file, "task_id,services_needed\n").unwrap();
        let err = CsvRowSource::new(&file, None).fetch().unwrap_err();
        assert!(matches!(err, SourceError::Empty(_)));
    }

    #[test]
    fn empty_workbook_is_empty() {
        let dir = tempdir().unwrap();
        let err = CsvRowSource::new(dir.path(), None).fetch().unwrap_err();
        assert!(matches!(err, SourceError::Empty(_)));
    }
}
