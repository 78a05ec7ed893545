//! Local notebook store
//!
//! Notebooks land in `<workbook>/<out_folder>/<name>`. The locator is the
//! absolute path of the written file.

use std::path::{Path, PathBuf};

use crate::domain::entities::Artifact;
use crate::domain::ports::{DocumentStore, PersistenceError};
use crate::infrastructure::fs::LocalFs;

pub struct LocalNotebookStore {
    dir: PathBuf,
    fs: LocalFs,
}

impl LocalNotebookStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn locator(path: &Path) -> String {
        std::fs::canonicalize(path)
            .unwrap_or_else(|_| path.to_path_buf())
            .display()
            .to_string()
    }
}

impl DocumentStore for LocalNotebookStore {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn save(&self, name: &str, artifact: &Artifact) -> Result<String, PersistenceError> {
        let path = self.dir.join(name);
        let text = artifact
            .to_notebook_json()
            .map_err(|source| PersistenceError::Render {
                target: name.to_string(),
                source,
            })?;

        self.fs
            .write_atomic(&path, text.as_bytes())
            .map_err(|source| PersistenceError::Io {
                target: path.display().to_string(),
                source,
            })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "saved notebook");
        Ok(Self::locator(&path))
    }

    fn load(&self, name: &str) -> Option<String> {
        self.fs.read_optional(&self.dir.join(name)).ok().flatten()
    }
}
