//! CLI command for `vcpkg-bootstrap install`
//!
//! Provisions the toolchain and runs `vcpkg install` in the current
//! directory.

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::{host_provisioner, load_config};
use crate::cli::output::{is_json, print_success};
use crate::core::install::install_dependencies;
use crate::infra::lock_file::LockFile;

/// Execute the install command
pub fn execute(
    work_dir: &Path,
    ci: bool,
    lock_file: Option<&Path>,
    args: Vec<String>,
) -> Result<()> {
    // Held until the end of the command, whatever the outcome
    let _lock = lock_file.map(LockFile::create).transpose()?;

    let config = load_config()?;
    let provisioner = host_provisioner(work_dir, &config);

    if ci {
        tracing::info!("CI environment detected");
    }

    let args = if args.is_empty() {
        config.install.args.clone()
    } else {
        args
    };

    let outcome = install_dependencies(&provisioner, ci, &args)?;

    if is_json() {
        let json_result = serde_json::json!({
            "status": "success",
            "toolchain": outcome.toolchain,
            "command": outcome.command.command_line(),
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
        return Ok(());
    }

    print_success("Dependencies installed");
    Ok(())
}
