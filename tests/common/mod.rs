//! Common test utilities and helpers
//!
//! This module provides shared utilities for integration tests.

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Test project context
///
/// A temporary project directory plus an isolated config directory, so
/// tests never read the developer's real configuration.
pub struct TestProject {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary config directory
    pub config_dir: TempDir,
}

impl TestProject {
    /// Create a new test project in a temporary directory
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
            config_dir: TempDir::new().expect("Failed to create config directory"),
        }
    }

    /// Get the path to the test project directory
    pub fn path(&self) -> PathBuf {
        self.dir.path().to_path_buf()
    }

    /// Create a file in the test project
    pub fn create_file(&self, name: &str, content: &str) {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(path, content).expect("Failed to write file");
    }

    /// Create a directory in the test project
    pub fn create_dir(&self, name: &str) {
        let path = self.dir.path().join(name);
        std::fs::create_dir_all(path).expect("Failed to create directory");
    }

    /// Check if a file exists in the test project
    pub fn file_exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Read a file from the test project
    #[allow(dead_code)]
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).expect("Failed to read file")
    }

    /// Write the global config file
    #[allow(dead_code)]
    pub fn write_config(&self, content: &str) {
        std::fs::write(self.config_dir.path().join("config.toml"), content)
            .expect("Failed to write config");
    }

    /// Install a fake `vcpkg` shell script into `bin/` and return that dir
    ///
    /// The script prints a progress line to stdout, appends its arguments to
    /// `invocations.txt` in its working directory and exits with `exit_code`.
    #[cfg(unix)]
    #[allow(dead_code)]
    pub fn install_fake_vcpkg(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.dir.path().join("bin");
        std::fs::create_dir_all(&bin).expect("Failed to create bin directory");
        let script = bin.join("vcpkg");
        std::fs::write(
            &script,
            format!(
                "#!/bin/sh\necho 'Computing installation plan...'\n\
                 echo \"$@\" >> invocations.txt\nexit {exit_code}\n"
            ),
        )
        .expect("Failed to write fake vcpkg");
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755))
            .expect("Failed to make fake vcpkg executable");
        bin
    }

    /// Base command for the CLI, isolated from CI and user config
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_vcpkg-bootstrap"));
        cmd.current_dir(self.path());
        cmd.env("VCPKG_BOOTSTRAP_CONFIG_DIR", self.config_dir.path());
        cmd.env_remove("CI");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run the CLI with `args`
    pub fn run(&self, args: &[&str]) -> Output {
        self.command()
            .args(args)
            .output()
            .expect("Failed to execute vcpkg-bootstrap")
    }

    /// Run the CLI with `PATH` prefixed by `dir`
    #[allow(dead_code)]
    pub fn run_with_path(&self, dir: &std::path::Path, args: &[&str]) -> Output {
        let mut path = OsString::from(dir.as_os_str());
        if let Some(existing) = std::env::var_os("PATH") {
            path.push(if cfg!(windows) { ";" } else { ":" });
            path.push(existing);
        }
        self.command()
            .env("PATH", path)
            .args(args)
            .output()
            .expect("Failed to execute vcpkg-bootstrap")
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined stdout and stderr of a run
#[allow(dead_code)]
pub fn combined_output(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}
