//! Git operations
//!
//! Clones, opens and fetches the toolchain repository using the gix crate.
//! Worktree checkout of a tag goes through the `git` CLI after the tag has
//! been resolved with gix.

use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// Git operation errors
#[derive(Error, Debug)]
pub enum GitError {
    /// Failed to clone repository
    #[error("Failed to clone '{url}': {error}")]
    CloneFailed { url: String, error: String },

    /// Invalid repository
    #[error("Invalid repository at '{path}': {error}")]
    InvalidRepository { path: PathBuf, error: String },

    /// Repository has no remote to fetch from
    #[error("Repository at '{path}' has no fetch remote configured")]
    NoRemote { path: PathBuf },

    /// Failed to fetch from the remote
    #[error("Failed to fetch into '{path}': {error}")]
    FetchFailed { path: PathBuf, error: String },

    /// Ref not found
    #[error("Ref '{reference}' not found in repository '{repo}'")]
    RefNotFound { repo: String, reference: String },

    /// Failed to checkout ref
    #[error("Failed to checkout ref '{reference}' in '{repo}': {error}")]
    CheckoutFailed {
        repo: String,
        reference: String,
        error: String,
    },
}

/// Handle to an initialized local checkout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutHandle {
    /// Path to the checkout's working tree
    pub path: PathBuf,
}

impl CheckoutHandle {
    /// Create a handle for the checkout at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Version control operations needed to provision a pinned checkout
///
/// Every failure is returned as-is; callers do not retry.
pub trait VersionControlClient {
    /// Clone `url` into `dest` and return a handle to the new checkout
    fn clone_from(&self, url: &str, dest: &Path) -> Result<CheckoutHandle, GitError>;

    /// Open the checkout already present at `dest`
    fn open_existing(&self, dest: &Path) -> Result<CheckoutHandle, GitError>;

    /// Fetch from the `origin` remote without merging
    fn fetch_origin(&self, handle: &CheckoutHandle) -> Result<(), GitError>;

    /// Check out `tag`, detaching HEAD at the tagged commit
    fn checkout_ref(&self, handle: &CheckoutHandle, tag: &str) -> Result<(), GitError>;
}

/// gix-backed version control client
#[derive(Debug, Default, Clone, Copy)]
pub struct GixClient;

impl GixClient {
    /// Create a new client
    pub fn new() -> Self {
        Self
    }

    fn open_repo(path: &Path) -> Result<gix::Repository, GitError> {
        gix::open(path).map_err(|e| GitError::InvalidRepository {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Resolve a tag to the SHA of the commit it points at
    pub fn resolve_tag_to_sha(&self, repo_path: &Path, tag: &str) -> Result<String, GitError> {
        let repo = Self::open_repo(repo_path)?;
        let reference_name = format!("refs/tags/{tag}");

        let mut reference = repo
            .find_reference(&reference_name)
            .map_err(|_| GitError::RefNotFound {
                repo: repo_path.display().to_string(),
                reference: tag.to_string(),
            })?;

        let commit = reference
            .peel_to_commit()
            .map_err(|e| GitError::CheckoutFailed {
                repo: repo_path.display().to_string(),
                reference: tag.to_string(),
                error: e.to_string(),
            })?;

        Ok(commit.id().to_hex().to_string())
    }

    /// SHA of the commit currently checked out at `repo_path`
    pub fn head_sha(&self, repo_path: &Path) -> Result<String, GitError> {
        let repo = Self::open_repo(repo_path)?;
        let id = repo.head_id().map_err(|e| GitError::InvalidRepository {
            path: repo_path.to_path_buf(),
            error: e.to_string(),
        })?;
        Ok(id.to_hex().to_string())
    }
}

impl VersionControlClient for GixClient {
    fn clone_from(&self, url: &str, dest: &Path) -> Result<CheckoutHandle, GitError> {
        let clone_failed = |e: &dyn std::fmt::Display| GitError::CloneFailed {
            url: url.to_string(),
            error: e.to_string(),
        };

        // Full history with all tags; the pinned tag is checked out afterwards.
        let mut prepare = gix::prepare_clone(url, dest)
            .map_err(|e| clone_failed(&e))?
            .configure_remote(|remote| Ok(remote.with_fetch_tags(gix::remote::fetch::Tags::All)));

        let (mut checkout, _outcome) = prepare
            .fetch_then_checkout(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| clone_failed(&e))?;

        let (_repo, _outcome) = checkout
            .main_worktree(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| clone_failed(&e))?;

        Ok(CheckoutHandle::new(dest))
    }

    fn open_existing(&self, dest: &Path) -> Result<CheckoutHandle, GitError> {
        Self::open_repo(dest)?;
        Ok(CheckoutHandle::new(dest))
    }

    fn fetch_origin(&self, handle: &CheckoutHandle) -> Result<(), GitError> {
        let fetch_failed = |e: &dyn std::fmt::Display| GitError::FetchFailed {
            path: handle.path.clone(),
            error: e.to_string(),
        };

        let mut repo = Self::open_repo(&handle.path)?;
        // Updating remote-tracking refs writes reflog entries, which need a
        // committer even on hosts without a configured git identity.
        repo.committer_or_set_generic_fallback().map_err(|e| fetch_failed(&e))?;

        let remote = repo
            .find_default_remote(gix::remote::Direction::Fetch)
            .ok_or_else(|| GitError::NoRemote {
                path: handle.path.clone(),
            })?
            .map_err(|e| fetch_failed(&e))?
            .with_fetch_tags(gix::remote::fetch::Tags::All);

        remote
            .connect(gix::remote::Direction::Fetch)
            .map_err(|e| fetch_failed(&e))?
            .prepare_fetch(gix::progress::Discard, Default::default())
            .map_err(|e| fetch_failed(&e))?
            .receive(gix::progress::Discard, &gix::interrupt::IS_INTERRUPTED)
            .map_err(|e| fetch_failed(&e))?;

        Ok(())
    }

    fn checkout_ref(&self, handle: &CheckoutHandle, tag: &str) -> Result<(), GitError> {
        let sha = self.resolve_tag_to_sha(&handle.path, tag)?;
        let repo = handle.path.display().to_string();

        // gix has no high-level checkout of an arbitrary commit into an
        // existing worktree, so the final step goes through git itself.
        let output = Command::new("git")
            .args(["-c", "advice.detachedHead=false", "checkout", "--quiet", "--detach"])
            .arg(&sha)
            .current_dir(&handle.path)
            .output()
            .map_err(|e| GitError::CheckoutFailed {
                repo: repo.clone(),
                reference: tag.to_string(),
                error: format!("failed to run git: {e}"),
            })?;

        if !output.status.success() {
            return Err(GitError::CheckoutFailed {
                repo,
                reference: tag.to_string(),
                error: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        tracing::debug!("Checked out {tag} at {sha}");
        Ok(())
    }
}
