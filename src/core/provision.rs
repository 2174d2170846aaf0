//! Toolchain provisioning
//!
//! Decides between a system-installed vcpkg, a fresh pinned clone, or an
//! update of an existing checkout, and returns the path of a usable binary.
//!
//! ```text
//! START
//!   -> SYSTEM_TOOL  (not CI and tool on PATH)         [return bare name]
//!   -> NO_CHECKOUT  -> CLONING  -> CHECKOUT_TAG -> BOOTSTRAPPING -> PATH_CHECK
//!   -> HAS_CHECKOUT -> FETCHING -> CHECKOUT_TAG -> PATH_CHECK
//! PATH_CHECK -> RESOLVED | ToolchainNotFound
//! ```
//!
//! An existing checkout is re-pinned but never re-bootstrapped.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::defaults;
use crate::config::urls;
use crate::error::ProvisionError;
use crate::infra::git::{CheckoutHandle, VersionControlClient};
use crate::infra::probe::EnvironmentProbe;
use crate::infra::process::{ProcessCommand, ProcessRunner};

/// Fixed toolchain coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainSettings {
    /// Repository to clone
    pub repo_url: String,
    /// Tag every checkout is pinned to
    pub pinned_tag: String,
    /// Checkout directory, relative to the working directory
    pub checkout_dir: String,
    /// Binary name, without executable suffix
    pub binary_name: String,
}

impl Default for ToolchainSettings {
    fn default() -> Self {
        Self {
            repo_url: urls::VCPKG_REPOSITORY.to_string(),
            pinned_tag: defaults::VCPKG_TAG.to_string(),
            checkout_dir: defaults::CHECKOUT_DIR.to_string(),
            binary_name: defaults::BINARY_NAME.to_string(),
        }
    }
}

/// One provisioning invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisioningRequest {
    /// Running under CI; disables the system fast path
    pub ci_mode: bool,
    pub repo_url: String,
    pub pinned_tag: String,
}

impl ProvisioningRequest {
    /// Build a request for the given settings
    pub fn new(ci_mode: bool, settings: &ToolchainSettings) -> Self {
        Self {
            ci_mode,
            repo_url: settings.repo_url.clone(),
            pinned_tag: settings.pinned_tag.clone(),
        }
    }
}

/// Where the resolved toolchain came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolchainSource {
    /// Found on PATH
    System,
    /// Cloned and bootstrapped during this run
    LocalFresh,
    /// Existing checkout fetched and re-pinned
    LocalUpdated,
}

impl fmt::Display for ToolchainSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::System => "system",
            Self::LocalFresh => "local (fresh clone)",
            Self::LocalUpdated => "local (updated)",
        };
        f.write_str(name)
    }
}

/// A resolved toolchain binary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainLocation {
    /// Bare command name for [`ToolchainSource::System`], otherwise a path
    /// inside the checkout
    pub path: PathBuf,
    pub source: ToolchainSource,
}

/// Provisions a pinned toolchain checkout under a working directory
#[derive(Debug)]
pub struct ToolchainProvisioner<V, P, E> {
    work_dir: PathBuf,
    settings: ToolchainSettings,
    vcs: V,
    runner: P,
    probe: E,
}

impl<V, P, E> ToolchainProvisioner<V, P, E>
where
    V: VersionControlClient,
    P: ProcessRunner,
    E: EnvironmentProbe,
{
    /// Create a provisioner with the default vcpkg settings
    pub fn new(work_dir: impl Into<PathBuf>, vcs: V, runner: P, probe: E) -> Self {
        Self {
            work_dir: work_dir.into(),
            settings: ToolchainSettings::default(),
            vcs,
            runner,
            probe,
        }
    }

    /// Replace the toolchain settings
    pub fn with_settings(mut self, settings: ToolchainSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    pub fn settings(&self) -> &ToolchainSettings {
        &self.settings
    }

    /// The process runner, shared with follow-up invocations of the toolchain
    pub fn runner(&self) -> &P {
        &self.runner
    }

    /// Path of the local checkout
    pub fn checkout_path(&self) -> PathBuf {
        self.work_dir.join(&self.settings.checkout_dir)
    }

    /// Expected binary path inside the checkout for this host
    pub fn binary_path(&self) -> PathBuf {
        let file_name = if self.probe.is_windows_host() {
            format!("{}{}", self.settings.binary_name, defaults::WINDOWS_EXE_SUFFIX)
        } else {
            self.settings.binary_name.clone()
        };
        self.checkout_path().join(file_name)
    }

    /// Ensure a usable toolchain and return its location
    pub fn ensure_toolchain(&self, ci_mode: bool) -> Result<ToolchainLocation, ProvisionError> {
        self.provision(&ProvisioningRequest::new(ci_mode, &self.settings))
    }

    /// Run the provisioning protocol for `request`
    pub fn provision(
        &self,
        request: &ProvisioningRequest,
    ) -> Result<ToolchainLocation, ProvisionError> {
        let name = &self.settings.binary_name;

        // CI always uses the pinned checkout so runs are reproducible.
        if !request.ci_mode && self.probe.command_exists_on_path(name) {
            tracing::info!("Using system {name}");
            return Ok(ToolchainLocation {
                path: PathBuf::from(name),
                source: ToolchainSource::System,
            });
        }

        let checkout = self.checkout_path();
        let source = if checkout.exists() {
            tracing::info!("Updating {name}...");
            let handle = self.vcs.open_existing(&checkout)?;
            self.vcs.fetch_origin(&handle)?;
            self.checkout_tag(&handle, &request.pinned_tag)?;
            ToolchainSource::LocalUpdated
        } else {
            tracing::info!("Downloading {name} from {}...", request.repo_url);
            let handle = self.vcs.clone_from(&request.repo_url, &checkout)?;
            self.checkout_tag(&handle, &request.pinned_tag)?;
            self.bootstrap_toolchain()?;
            ToolchainSource::LocalFresh
        };

        let path = self.binary_path();
        if !path.exists() {
            return Err(ProvisionError::ToolchainNotFound { path });
        }

        tracing::debug!("Resolved {name} at {}", path.display());
        Ok(ToolchainLocation { path, source })
    }

    /// Check out the configured pinned tag
    pub fn checkout_pinned_tag(&self, handle: &CheckoutHandle) -> Result<(), ProvisionError> {
        self.checkout_tag(handle, &self.settings.pinned_tag)
    }

    fn checkout_tag(&self, handle: &CheckoutHandle, tag: &str) -> Result<(), ProvisionError> {
        tracing::info!("Checking out {} tag: {tag}", self.settings.binary_name);
        self.vcs.checkout_ref(handle, tag)?;
        Ok(())
    }

    /// Command that bootstraps the checkout on this host
    pub fn bootstrap_command(&self) -> ProcessCommand {
        let script = if self.probe.is_windows_host() {
            defaults::BOOTSTRAP_SCRIPT_WINDOWS
        } else {
            defaults::BOOTSTRAP_SCRIPT_UNIX
        };
        ProcessCommand::shell(script)
            .echo()
            .current_dir(self.checkout_path())
    }

    /// Run the bootstrap script inside the checkout
    ///
    /// The script gets the checkout as its own working directory; the
    /// caller's current directory is left untouched whether or not the
    /// script succeeds.
    pub fn bootstrap_toolchain(&self) -> Result<(), ProvisionError> {
        tracing::info!("Bootstrapping {}...", self.settings.binary_name);
        self.runner.run(&self.bootstrap_command())?;
        Ok(())
    }
}
