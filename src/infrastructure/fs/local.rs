//! Local File System
//!
//! Atomic writes via tempfile + rename, so a reader never observes a
//! half-written notebook or summary sheet.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Local file system access
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }

    /// Write `content` to `path`, creating parent directories
    ///
    /// The temp file lives in the destination directory so the final
    /// rename never crosses file systems.
    pub fn write_atomic(&self, path: &Path, content: &[u8]) -> io::Result<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        tmp.write_all(content)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    /// File content, or `None` when the file does not exist
    pub fn read_optional(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_atomic_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nested").join("out").join("a.ipynb");

        LocalFs::new().write_atomic(&file, b"{}").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "{}");
    }

    #[test]
    fn write_atomic_replaces_existing_content() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("a.csv");
        let fs = LocalFs::new();

        fs.write_atomic(&file, b"old").unwrap();
        fs.write_atomic(&file, b"new").unwrap();

        assert_eq!(std::fs::read_to_string(&file).unwrap(), "new");
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temp file should be renamed away");
    }

    #[test]
    fn read_optional_missing_is_none() {
        let dir = tempdir().unwrap();
        let fs = LocalFs::new();
        assert_eq!(fs.read_optional(&dir.path().join("nope")).unwrap(), None);
    }
}
