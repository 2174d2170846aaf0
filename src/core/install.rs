//! Dependency installation
//!
//! Provisions the toolchain and runs `vcpkg install` for the project in the
//! working directory.

use crate::config::defaults;
use crate::core::provision::{ToolchainLocation, ToolchainProvisioner};
use crate::error::ProvisionError;
use crate::infra::git::VersionControlClient;
use crate::infra::probe::EnvironmentProbe;
use crate::infra::process::{ProcessCommand, ProcessRunner};

/// Result of an install run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallOutcome {
    /// Toolchain used for the install
    pub toolchain: ToolchainLocation,
    /// Command that was run
    pub command: ProcessCommand,
}

/// Ensure the toolchain, then install the project's declared dependencies
///
/// `extra_args` are appended after the `install` subcommand.
pub fn install_dependencies<V, P, E>(
    provisioner: &ToolchainProvisioner<V, P, E>,
    ci_mode: bool,
    extra_args: &[String],
) -> Result<InstallOutcome, ProvisionError>
where
    V: VersionControlClient,
    P: ProcessRunner,
    E: EnvironmentProbe,
{
    let toolchain = provisioner.ensure_toolchain(ci_mode)?;

    let command = ProcessCommand::new(toolchain.path.clone())
        .arg(defaults::INSTALL_SUBCOMMAND)
        .args(extra_args.iter().cloned())
        .echo()
        .current_dir(provisioner.work_dir());

    provisioner.runner().run(&command)?;

    Ok(InstallOutcome { toolchain, command })
}
