//! Run marker file
//!
//! Lets outer tooling tell that an install is still in progress. The file
//! holds the process id and is removed when the guard is dropped, including
//! when the install fails.

use std::path::{Path, PathBuf};

use crate::error::LockFileError;

/// Guard owning a lock file on disk
#[derive(Debug)]
pub struct LockFile {
    path: PathBuf,
}

impl LockFile {
    /// Create the lock file, including missing parent directories
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, LockFileError> {
        let path = path.into();
        let create_failed = |e: std::io::Error| LockFileError::CreateFailed {
            path: path.clone(),
            error: e.to_string(),
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(create_failed)?;
        }
        std::fs::write(&path, std::process::id().to_string()).map_err(create_failed)?;

        tracing::debug!("Created lock file {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for LockFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::warn!("Failed to remove lock file {}: {e}", self.path.display());
        } else {
            tracing::debug!("Removed lock file {}", self.path.display());
        }
    }
}
