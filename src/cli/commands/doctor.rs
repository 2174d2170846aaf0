//! CLI command for `vcpkg-bootstrap doctor`
//!
//! Checks the host and the local checkout and reports issues with
//! suggestions.

use anyhow::Result;
use std::path::Path;

use crate::cli::commands::host_provisioner;
use crate::cli::output::{
    is_json, is_quiet, print_detail, print_info, print_success, print_warning, status,
};
use crate::core::doctor::run_doctor;
use crate::core::global_config::GlobalConfig;
use crate::infra::dirs::AppDirs;
use crate::infra::git::GixClient;
use crate::infra::probe::HostProbe;

/// Execute the doctor command
pub fn execute(work_dir: &Path) -> Result<()> {
    // A broken config is reported, not fatal
    let (config, config_issue) = match GlobalConfig::load(&AppDirs::new()) {
        Ok(config) => (config, None),
        Err(e) => (GlobalConfig::default(), Some(e.to_string())),
    };

    let provisioner = host_provisioner(work_dir, &config);
    let mut report = run_doctor(&provisioner, &HostProbe::new(), &GixClient::new());
    if let Some(issue) = config_issue {
        report.add_config_issue(issue);
    }

    // JSON output mode
    if is_json() {
        let overall = if report.all_passed() {
            "success"
        } else if report.failed_required().is_empty() {
            "warning"
        } else {
            "error"
        };
        let json_result = serde_json::json!({
            "status": overall,
            "checks": report.checks.iter().map(|c| serde_json::json!({
                "name": c.name,
                "passed": c.passed,
                "required": c.required,
                "detail": c.detail,
                "error": c.error,
                "suggestion": c.suggestion
            })).collect::<Vec<_>>(),
            "config_issues": report.config_issues,
            "passed_count": report.passed_count(),
            "total_count": report.checks.len()
        });
        println!("{}", serde_json::to_string_pretty(&json_result).unwrap_or_default());

        if !report.failed_required().is_empty() {
            return Err(anyhow::anyhow!("Missing required dependencies"));
        }
        return Ok(());
    }

    // Quiet mode - only show errors
    if is_quiet() {
        let failed_required = report.failed_required();
        if !failed_required.is_empty() {
            for check in failed_required {
                eprintln!("{} Missing required: {}", status::ERROR, check.name);
            }
            return Err(anyhow::anyhow!("Missing required dependencies"));
        }
        return Ok(());
    }

    print_info("Checking vcpkg provisioning...");
    println!();

    for check in &report.checks {
        let detail_str = check
            .detail
            .as_ref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();

        let required_str = if check.required { "" } else { " [optional]" };

        if check.passed {
            println!("  {} {}{detail_str}{required_str}", status::SUCCESS, check.name);
        } else {
            println!("  {} {}{required_str}", status::ERROR, check.name);
            if let Some(error) = &check.error {
                print_detail(&format!("Error: {error}"));
            }
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("Suggestion: {suggestion}"));
            }
        }
    }

    if !report.config_issues.is_empty() {
        println!();
        print_warning("Configuration issues:");
        for issue in &report.config_issues {
            print_detail(&format!("• {issue}"));
        }
    }

    println!();
    let passed = report.passed_count();
    let total = report.checks.len();
    let failed_required = report.failed_required();

    if report.all_passed() {
        print_success(&format!("All checks passed ({passed}/{total})"));
    } else if failed_required.is_empty() {
        print_warning(&format!("{passed}/{total} checks passed"));
        print_detail("vcpkg can be provisioned on this host.");
    } else {
        println!("{} {passed}/{total} checks passed", status::ERROR);
        print_detail("Please install missing required dependencies:");
        for check in &failed_required {
            if let Some(suggestion) = &check.suggestion {
                print_detail(&format!("• {}: {suggestion}", check.name));
            }
        }
        return Err(anyhow::anyhow!(
            "Missing required dependencies. Run 'vcpkg-bootstrap doctor' for details."
        ));
    }

    Ok(())
}
