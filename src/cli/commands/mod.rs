//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod doctor;
pub mod ensure;
pub mod install;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Subcommand;
use std::path::{Path, PathBuf};

use crate::cli::output::{is_json, is_quiet};
use crate::core::global_config::GlobalConfig;
use crate::core::provision::ToolchainProvisioner;
use crate::infra::dirs::AppDirs;
use crate::infra::git::GixClient;
use crate::infra::probe::HostProbe;
use crate::infra::process::SystemProcessRunner;

/// Provisioner wired to the real host
pub type HostProvisioner = ToolchainProvisioner<GixClient, SystemProcessRunner, HostProbe>;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Make sure vcpkg is available and print its path
    Ensure {
        /// Never use a system vcpkg; always use the pinned checkout
        /// (enabled automatically when CI is set)
        #[arg(long, env = "CI", value_parser = FalseyValueParser::new())]
        ci: bool,
    },

    /// Ensure vcpkg, then install the project's dependencies
    Install {
        /// Never use a system vcpkg; always use the pinned checkout
        /// (enabled automatically when CI is set)
        #[arg(long, env = "CI", value_parser = FalseyValueParser::new())]
        ci: bool,

        /// Create this file while installing and remove it afterwards
        #[arg(long, value_name = "PATH")]
        lock_file: Option<PathBuf>,

        /// Extra arguments for `vcpkg install` (overrides config)
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },

    /// Check the host and the local checkout
    Doctor,
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        let current_dir = std::env::current_dir()?;
        match self {
            Self::Ensure { ci } => ensure::execute(&current_dir, ci),
            Self::Install {
                ci,
                lock_file,
                args,
            } => install::execute(&current_dir, ci, lock_file.as_deref(), args),
            Self::Doctor => doctor::execute(&current_dir),
        }
    }
}

/// Load the global config file
pub(crate) fn load_config() -> Result<GlobalConfig> {
    let dirs = AppDirs::new();
    GlobalConfig::load(&dirs).context("Failed to load global configuration")
}

/// Build a host provisioner for `work_dir` using `config`
///
/// In JSON or quiet mode, child process output goes to stderr so stdout
/// carries only this tool's own result.
pub(crate) fn host_provisioner(work_dir: &Path, config: &GlobalConfig) -> HostProvisioner {
    let runner = SystemProcessRunner::new().stdout_to_stderr(is_json() || is_quiet());
    ToolchainProvisioner::new(work_dir, GixClient::new(), runner, HostProbe::new())
    .with_settings(config.toolchain_settings())
}
