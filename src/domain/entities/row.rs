//! Row entity - one task's record from the tracker

/// Columns consulted, in order, for the free-text services list
pub const SERVICES_COLUMNS: [&str; 3] = ["services_needed", "services_required", "services"];

/// One tracker row
///
/// Columns keep their source order so the summary record can reproduce them.
/// A row is never mutated after it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based position in the source
    index: usize,
    /// Task identifier (falls back to `row-<index>`)
    task_id: String,
    /// All columns in source order
    fields: Vec<(String, String)>,
}

impl Row {
    /// Build a row from ordered `(column, value)` pairs
    pub fn new<K, V>(index: usize, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let fields: Vec<(String, String)> = fields
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_string(), v.into()))
            .collect();
        let task_id = fields
            .iter()
            .find(|(k, _)| k == "task_id")
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| format!("row-{}", index));
        Self {
            index,
            task_id,
            fields,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Raw value of a column, if present
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value of a column if present and not blank
    pub fn non_blank(&self, column: &str) -> Option<&str> {
        self.get(column).filter(|v| !v.trim().is_empty())
    }

    /// The free-text services list
    pub fn services_needed(&self) -> &str {
        SERVICES_COLUMNS
            .iter()
            .find_map(|c| self.non_blank(c))
            .unwrap_or("")
    }

    /// Optional task query, copied into the metadata block
    pub fn query(&self) -> Option<&str> {
        self.non_blank("query").map(str::trim)
    }

    /// Optional user location, exported to the notebook environment
    pub fn user_location(&self) -> Option<&str> {
        self.non_blank("user_location").map(str::trim)
    }

    /// Columns in source order
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_reads_task_id() {
        let row = Row::new(1, [("task_id", " T1 "), ("services_needed", "Calendar")]);
        assert_eq!(row.task_id(), "T1");
        assert_eq!(row.index(), 1);
    }

    #[test]
    fn row_blank_task_id_falls_back_to_index() {
        let row = Row::new(7, [("task_id", "  ")]);
        assert_eq!(row.task_id(), "row-7");

        let row = Row::new(3, [("services_needed", "gmail")]);
        assert_eq!(row.task_id(), "row-3");
    }

    #[test]
    fn row_services_fall_back_through_columns() {
        let row = Row::new(1, [("services_needed", ""), ("services", "Clock")]);
        assert_eq!(row.services_needed(), "Clock");

        let row = Row::new(1, [("services_required", "Gmail"), ("services", "Clock")]);
        assert_eq!(row.services_needed(), "Gmail");

        let row = Row::new(1, [("task_id", "T")]);
        assert_eq!(row.services_needed(), "");
    }

    #[test]
    fn row_non_blank_filters_whitespace() {
        let row = Row::new(1, [("calendar_initial_db", "  \n")]);
        assert_eq!(row.get("calendar_initial_db"), Some("  \n"));
        assert_eq!(row.non_blank("calendar_initial_db"), None);
        assert_eq!(row.non_blank("missing"), None);
    }

    #[test]
    fn row_keeps_column_order() {
        let row = Row::new(1, [("b", "2"), ("a", "1")]);
        let names: Vec<&str> = row.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn row_optional_query_and_location() {
        let row = Row::new(1, [("query", " Book a meeting "), ("user_location", "")]);
        assert_eq!(row.query(), Some("Book a meeting"));
        assert_eq!(row.user_location(), None);
    }
}
