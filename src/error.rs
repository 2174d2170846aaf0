//! Error types for vcpkg-bootstrap
//!
//! Domain-specific error types using thiserror.

use std::path::PathBuf;
use thiserror::Error;

use crate::infra::git::GitError;
use crate::infra::process::ProcessError;

/// Toolchain provisioning errors
///
/// Collaborator failures are wrapped transparently so they surface with
/// their original message.
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// The toolchain binary is missing after provisioning completed
    #[error("Toolchain not found at '{}'. The bootstrap step may have failed; delete the checkout and retry", path.display())]
    ToolchainNotFound { path: PathBuf },

    /// Clone, open, fetch or checkout failure
    #[error(transparent)]
    Git(#[from] GitError),

    /// Bootstrap script or toolchain invocation failure
    #[error(transparent)]
    Process(#[from] ProcessError),
}

/// Lock file errors
#[derive(Error, Debug)]
pub enum LockFileError {
    /// Failed to create the lock file
    #[error("Failed to create lock file '{}': {error}", path.display())]
    CreateFailed { path: PathBuf, error: String },
}
