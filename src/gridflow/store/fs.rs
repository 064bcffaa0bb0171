use super::NoteStore;
use crate::error::{GridflowError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Saves the note content to one file, replacing it on every save.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current file content, if the file exists.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path).map_err(GridflowError::Io)?;
        Ok(Some(content))
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(GridflowError::Io)?;
            }
        }
        Ok(())
    }
}

impl NoteStore for FileStore {
    fn persist(&mut self, content: &str) -> Result<()> {
        self.ensure_parent()?;
        fs::write(&self.path, content).map_err(GridflowError::Io)?;
        tracing::debug!(path = %self.path.display(), bytes = content.len(), "note written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persist_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages").join("page-1.txt");
        let mut store = FileStore::new(&path);

        assert_eq!(store.load().unwrap(), None);
        store.persist("first").unwrap();
        store.persist("second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        assert_eq!(store.load().unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn persist_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        // A regular file cannot act as a parent directory.
        let mut store = FileStore::new(blocker.join("note.txt"));
        assert!(matches!(store.persist("data"), Err(GridflowError::Io(_))));
    }
}
