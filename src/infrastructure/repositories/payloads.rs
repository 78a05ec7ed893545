//! Filesystem payload repository
//!
//! Layout:
//!
//! ```text
//! <payload_dir>/static/setup_cell.py
//! <payload_dir>/static/pipinstall_cell.py
//! <payload_dir>/porting/<service>.py
//! ```

use std::path::{Path, PathBuf};

use crate::domain::ports::{PayloadError, PayloadRepository, StaticBlock};
use crate::domain::value_objects::ServiceId;
use crate::infrastructure::fs::LocalFs;

pub struct FsPayloadRepository {
    root: PathBuf,
    fs: LocalFs,
}

impl FsPayloadRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn static_path(&self, block: StaticBlock) -> PathBuf {
        self.root.join("static").join(block.file_name())
    }

    pub fn porting_path(&self, service: ServiceId) -> PathBuf {
        self.root.join("porting").join(format!("{}.py", service))
    }

    fn read(&self, path: &Path) -> Result<Option<String>, PayloadError> {
        self.fs.read_optional(path).map_err(|source| PayloadError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl PayloadRepository for FsPayloadRepository {
    fn static_block(&self, block: StaticBlock) -> Result<String, PayloadError> {
        let path = self.static_path(block);
        self.read(&path)?.ok_or(PayloadError::MissingStatic {
            name: block.file_name(),
            path,
        })
    }

    fn porting_body(&self, service: ServiceId) -> Result<Option<String>, PayloadError> {
        let body = self.read(&self.porting_path(service))?;
        Ok(body.filter(|b| !b.trim().is_empty()))
    }
}
