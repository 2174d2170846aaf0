//! Doctor command logic
//!
//! Checks whether the host can provision the toolchain and reports the
//! state of the local checkout, with suggestions for fixing problems.

use crate::core::provision::ToolchainProvisioner;
use crate::infra::git::{GixClient, VersionControlClient};
use crate::infra::probe::EnvironmentProbe;
use crate::infra::process::ProcessRunner;

/// Result of a single check
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the thing being checked
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Version or state detail if available
    pub detail: Option<String>,
    /// Error message if check failed
    pub error: Option<String>,
    /// Suggestion for fixing the issue
    pub suggestion: Option<String>,
    /// Whether this is a required or optional check
    pub required: bool,
}

impl CheckResult {
    /// Create a passing check result
    pub fn pass(name: &str, detail: Option<String>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            detail,
            error: None,
            suggestion: None,
            required,
        }
    }

    /// Create a failing check result
    pub fn fail(name: &str, error: &str, suggestion: Option<&str>, required: bool) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            detail: None,
            error: Some(error.to_string()),
            suggestion: suggestion.map(String::from),
            required,
        }
    }
}

/// Overall doctor report
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Configuration issues found
    pub config_issues: Vec<String>,
}

impl DoctorReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a check result
    pub fn add_check(&mut self, result: CheckResult) {
        self.checks.push(result);
    }

    /// Add a configuration issue
    pub fn add_config_issue(&mut self, issue: String) {
        self.config_issues.push(issue);
    }

    /// Check if all checks passed (including optional)
    pub fn all_passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed) && self.config_issues.is_empty()
    }

    /// Count passed checks
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Get all failed required checks
    pub fn failed_required(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| c.required && !c.passed)
            .collect()
    }
}

/// Check if a command runs, returning its version when one can be parsed
pub fn check_command_available(command: &str) -> Option<String> {
    std::process::Command::new(command)
        .arg("--version")
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let combined = format!("{stdout}{stderr}");
                extract_version(&combined)
            } else {
                None
            }
        })
}

/// Extract version string from command output
fn extract_version(output: &str) -> Option<String> {
    let version_regex = regex::Regex::new(r"v?(\d+\.\d+(?:\.\d+)?(?:-\w+)?)").ok()?;
    version_regex
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Check Git availability (tag checkout shells out to git)
pub fn check_git() -> CheckResult {
    match check_command_available("git") {
        Some(version) => CheckResult::pass("Git", Some(format!("v{version}")), true),
        None => CheckResult::fail(
            "Git",
            "Git not found in PATH",
            Some("Install Git from https://git-scm.com/ or use your package manager"),
            true,
        ),
    }
}

/// Check for a system-installed toolchain (used outside CI)
pub fn check_system_toolchain<E: EnvironmentProbe>(probe: &E, name: &str) -> CheckResult {
    if probe.command_exists_on_path(name) {
        CheckResult::pass(
            "System vcpkg",
            Some("found in PATH, used outside CI".to_string()),
            false,
        )
    } else {
        CheckResult::fail(
            "System vcpkg",
            "vcpkg not found in PATH",
            Some("A pinned local checkout will be provisioned instead"),
            false,
        )
    }
}

/// Check the local checkout and whether it sits at the pinned tag
fn check_checkout<V, P, E>(
    provisioner: &ToolchainProvisioner<V, P, E>,
    git: &GixClient,
) -> CheckResult
where
    V: VersionControlClient,
    P: ProcessRunner,
    E: EnvironmentProbe,
{
    const NAME: &str = "Local checkout";
    let checkout = provisioner.checkout_path();
    let tag = &provisioner.settings().pinned_tag;

    if !checkout.exists() {
        return CheckResult::fail(
            NAME,
            &format!("{} does not exist", checkout.display()),
            Some("Run 'vcpkg-bootstrap ensure --ci' to clone it"),
            false,
        );
    }

    let head = match git.head_sha(&checkout) {
        Ok(head) => head,
        Err(e) => {
            return CheckResult::fail(
                NAME,
                &e.to_string(),
                Some("Delete the directory and run 'vcpkg-bootstrap ensure --ci'"),
                false,
            )
        }
    };

    match git.resolve_tag_to_sha(&checkout, tag) {
        Ok(pinned) if pinned == head => {
            CheckResult::pass(NAME, Some(format!("at tag {tag}")), false)
        }
        Ok(_) => CheckResult::fail(
            NAME,
            &format!("HEAD is not at tag {tag}"),
            Some("Run 'vcpkg-bootstrap ensure --ci' to re-pin it"),
            false,
        ),
        Err(e) => CheckResult::fail(
            NAME,
            &e.to_string(),
            Some("Run 'vcpkg-bootstrap ensure --ci' to fetch the tag"),
            false,
        ),
    }
}

/// Check that the bootstrapped binary exists in the checkout
fn check_binary<V, P, E>(provisioner: &ToolchainProvisioner<V, P, E>) -> CheckResult
where
    V: VersionControlClient,
    P: ProcessRunner,
    E: EnvironmentProbe,
{
    let binary = provisioner.binary_path();
    if binary.exists() {
        CheckResult::pass("Bootstrapped binary", Some(binary.display().to_string()), false)
    } else {
        // Updating an existing checkout never re-runs the bootstrap script.
        CheckResult::fail(
            "Bootstrapped binary",
            &format!("{} not found", binary.display()),
            Some("Delete the checkout directory so the next run clones and bootstraps it"),
            false,
        )
    }
}

/// Run all doctor checks
pub fn run_doctor<V, P, E>(
    provisioner: &ToolchainProvisioner<V, P, E>,
    probe: &E,
    git: &GixClient,
) -> DoctorReport
where
    V: VersionControlClient,
    P: ProcessRunner,
    E: EnvironmentProbe,
{
    let mut report = DoctorReport::new();

    report.add_check(check_git());
    report.add_check(check_system_toolchain(probe, &provisioner.settings().binary_name));
    report.add_check(check_checkout(provisioner, git));
    report.add_check(check_binary(provisioner));

    report
}
