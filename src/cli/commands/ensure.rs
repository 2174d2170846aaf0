//! CLI command for `vcpkg-bootstrap ensure`
//!
//! Provisions the toolchain and prints where it is.

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::{host_provisioner, load_config};
use crate::cli::output::{is_json, is_quiet, print_success};

/// Execute the ensure command
pub fn execute(work_dir: &Path, ci: bool) -> Result<()> {
    let config = load_config()?;
    let provisioner = host_provisioner(work_dir, &config);

    if ci {
        tracing::info!("CI environment detected");
    }

    let location = provisioner.ensure_toolchain(ci)?;

    if is_json() {
        let json_result = serde_json::json!({
            "status": "success",
            "path": location.path,
            "source": location.source,
        });
        println!("{}", serde_json::to_string_pretty(&json_result)?);
        return Ok(());
    }

    if is_quiet() {
        // Bare path so scripts can capture it
        println!("{}", location.path.display());
        return Ok(());
    }

    print_success(&format!(
        "vcpkg ready ({}): {}",
        location.source,
        location.path.display()
    ));
    Ok(())
}
