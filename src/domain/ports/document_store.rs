//! Document Store Port
//!
//! Persists a composed artifact under a target name and returns a stable
//! locator. The store never sees partially composed artifacts.

use thiserror::Error;

use crate::domain::entities::Artifact;
use crate::domain::value_objects::ContentHash;

/// Failure writing an artifact or summary record
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("failed to write {target}: {source}")]
    Io {
        target: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to render {target}: {source}")]
    Render {
        target: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write summary {target}: {message}")]
    Summary { target: String, message: String },
}

/// Where generated notebooks are stored
pub trait DocumentStore {
    /// Display name of the output location
    fn describe(&self) -> String;

    /// Persist the artifact; re-saving the same name replaces it
    fn save(&self, name: &str, artifact: &Artifact) -> Result<String, PersistenceError>;

    /// Previously stored content, if any
    fn load(&self, name: &str) -> Option<String>;
}

/// Artifact name for a task: `<template>_<task_id>.ipynb`
///
/// A task id that needed sanitising gets a short hash of the raw id appended,
/// so `a/b` and `a_b` land in different files.
pub fn artifact_name(naming_template: &str, task_id: &str) -> String {
    let sanitized = sanitize_task_id(task_id);
    if sanitized == task_id {
        return format!("{}_{}.ipynb", naming_template, sanitized);
    }
    let hash = ContentHash::from_content(task_id);
    format!("{}_{}_{}.ipynb", naming_template, sanitized, hash.short(8))
}

/// Keep task ids usable as file names
fn sanitize_task_id(task_id: &str) -> String {
    task_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_name_uses_template_and_task_id() {
        assert_eq!(
            artifact_name("Gemini_Apps_ID_Data_Port", "T1"),
            "Gemini_Apps_ID_Data_Port_T1.ipynb"
        );
    }

    #[test]
    fn artifact_name_sanitizes_path_separators() {
        let name = artifact_name("P", "a/b:c");
        let hash = ContentHash::from_content("a/b:c");
        assert_eq!(name, format!("P_a_b_c_{}.ipynb", hash.short(8)));
        assert!(!name.contains('/') && !name.contains(':'));
    }

    #[test]
    fn sanitized_ids_do_not_collide_with_literal_ones() {
        let slashed = artifact_name("P", "a/b");
        let underscored = artifact_name("P", "a_b");
        assert_eq!(underscored, "P_a_b.ipynb");
        assert_ne!(slashed, underscored);
        assert_ne!(slashed, artifact_name("P", "a:b"));
    }
}
