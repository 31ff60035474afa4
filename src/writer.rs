use crate::filename;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to create output directory '{}': {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write '{}': {source}", .path.display())]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Output directory for one run.
///
/// Remembers every filename handed out so that two titles sanitizing to the
/// same name get ` (2)`, ` (3)`, ... instead of overwriting each other.
/// Names are compared case-insensitively for the sake of macOS and Windows.
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
    used: HashSet<String>,
}

impl OutputDir {
    pub fn create(root: &Path) -> Result<Self, WriteError> {
        fs::create_dir_all(root).map_err(|source| WriteError::CreateDir {
            path: root.to_path_buf(),
            source,
        })?;

        Ok(OutputDir {
            root: root.to_path_buf(),
            used: HashSet::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Picks the filename for `title`, reserving it for this run.
    pub fn reserve(&mut self, title: &str) -> String {
        let mut name = filename::sanitize(title);
        let mut n = 2;

        while !self.used.insert(name.to_lowercase()) {
            name = filename::numbered(title, n);
            n += 1;
        }

        name
    }

    /// Writes a rendered document for `title` and returns its path.
    pub fn write(&mut self, title: &str, contents: &str) -> Result<PathBuf, WriteError> {
        let name = self.reserve(title);
        let path = self.root.join(name);

        fs::write(&path, contents).map_err(|source| WriteError::WriteFile {
            path: path.clone(),
            source,
        })?;

        debug!(path = %path.display(), bytes = contents.len(), "Wrote book");
        Ok(path)
    }
}
