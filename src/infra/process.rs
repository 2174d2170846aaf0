//! External process execution
//!
//! Runs bootstrap scripts and the toolchain binary. Every command carries
//! its own working directory, so the process-wide current directory is
//! never changed.

use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::process::Command;
use thiserror::Error;

/// Process execution errors
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The command could not be started
    #[error("Failed to run '{command}': {error}")]
    SpawnFailed { command: String, error: String },

    /// The command ran and exited unsuccessfully
    #[error("Command '{command}' failed with {}", exit_description(.code))]
    NonZeroExit { command: String, code: Option<i32> },
}

fn exit_description(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// A command to execute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    /// Program to run, or the command line when `shell` is set
    pub program: OsString,
    /// Arguments passed after the program
    pub args: Vec<String>,
    /// Run through the platform shell (`cmd /C` or `sh -c`)
    pub shell: bool,
    /// Print the command before running it
    pub echo: bool,
    /// Working directory for the child process
    pub current_dir: Option<PathBuf>,
}

impl ProcessCommand {
    /// Create a command that runs `program` directly
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            shell: false,
            echo: false,
            current_dir: None,
        }
    }

    /// Create a command that runs `command_line` through the shell
    pub fn shell(command_line: impl Into<String>) -> Self {
        let command_line: String = command_line.into();
        Self {
            shell: true,
            ..Self::new(command_line)
        }
    }

    /// Append an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Print the command before running it
    pub fn echo(mut self) -> Self {
        self.echo = true;
        self
    }

    /// Set the child's working directory
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The full command line as a single string
    ///
    /// Lossy for non-UTF-8 program paths; only used for display and shell mode.
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.to_string_lossy())
            .chain(self.args.iter().map(|arg| arg.as_str().into()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Runs external commands
pub trait ProcessRunner {
    /// Run `command` to completion; a non-zero exit is an error
    fn run(&self, command: &ProcessCommand) -> Result<(), ProcessError>;
}

/// Runs commands as real child processes, inheriting stdio
///
/// With [`SystemProcessRunner::stdout_to_stderr`] set, the child's stdout is
/// sent to this process's stderr so machine-readable output on stdout stays
/// clean.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemProcessRunner {
    stdout_to_stderr: bool,
}

impl SystemProcessRunner {
    /// Create a new runner
    pub fn new() -> Self {
        Self::default()
    }

    /// Send child stdout to stderr instead of inheriting it
    pub fn stdout_to_stderr(mut self, enabled: bool) -> Self {
        self.stdout_to_stderr = enabled;
        self
    }

    fn build(&self, command: &ProcessCommand) -> Command {
        let mut cmd = if command.shell {
            let mut cmd = if cfg!(windows) {
                let mut cmd = Command::new("cmd");
                cmd.arg("/C");
                cmd
            } else {
                let mut cmd = Command::new("sh");
                cmd.arg("-c");
                cmd
            };
            cmd.arg(command.command_line());
            cmd
        } else {
            let mut cmd = Command::new(&command.program);
            cmd.args(&command.args);
            cmd
        };

        if let Some(dir) = &command.current_dir {
            cmd.current_dir(dir);
        }
        if self.stdout_to_stderr {
            cmd.stdout(std::io::stderr());
        }
        cmd
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, command: &ProcessCommand) -> Result<(), ProcessError> {
        let line = command.command_line();
        if command.echo {
            tracing::info!("Running: {line}");
        } else {
            tracing::debug!("Running: {line}");
        }

        let status = self
            .build(command)
            .status()
            .map_err(|e| ProcessError::SpawnFailed {
                command: line.clone(),
                error: e.to_string(),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ProcessError::NonZeroExit {
                command: line,
                code: status.code(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[cfg(unix)]
    use tempfile::TempDir;

    #[test]
    fn test_command_line_joins_args() {
        let command = ProcessCommand::new("vcpkg").args(["install", "--triplet", "x64-windows"]);
        assert_eq!(command.command_line(), "vcpkg install --triplet x64-windows");
        assert_eq!(command.to_string(), command.command_line());
    }

    #[test]
    fn test_shell_builder_sets_flag() {
        let command = ProcessCommand::shell("./bootstrap-vcpkg.sh").echo();
        assert!(command.shell);
        assert!(command.echo);
        assert!(command.args.is_empty());
        assert!(command.current_dir.is_none());
    }

    #[test]
    fn test_non_zero_exit_message() {
        let err = ProcessError::NonZeroExit {
            command: "vcpkg install".to_string(),
            code: Some(2),
        };
        assert_eq!(err.to_string(), "Command 'vcpkg install' failed with exit code 2");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_program_path_is_preserved() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let program = OsStr::from_bytes(b"/opt/v\xffcpkg/vcpkg");
        let command = ProcessCommand::new(program).arg("install");

        assert_eq!(command.program.as_os_str(), program);
        assert_eq!(SystemProcessRunner::new().build(&command).get_program(), program);
        assert!(command.command_line().ends_with("vcpkg install"));
    }

    #[test]
    fn test_stdout_to_stderr_builder() {
        assert_eq!(SystemProcessRunner::new(), SystemProcessRunner::default());
        assert_ne!(
            SystemProcessRunner::new().stdout_to_stderr(true),
            SystemProcessRunner::new()
        );
    }

    #[test]
    fn test_spawn_failure() {
        let result = SystemProcessRunner::new()
            .run(&ProcessCommand::new("definitely-not-a-real-command-xyz"));
        assert!(matches!(result, Err(ProcessError::SpawnFailed { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_runs_in_current_dir() {
        let temp = TempDir::new().unwrap();
        let before = std::env::current_dir().unwrap();

        SystemProcessRunner::new()
            .run(&ProcessCommand::shell("touch marker").current_dir(temp.path()))
            .unwrap();

        assert!(temp.path().join("marker").exists());
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[cfg(unix)]
    #[test]
    fn test_shell_command_failure_reports_code() {
        let temp = TempDir::new().unwrap();
        let result = SystemProcessRunner::new()
            .run(&ProcessCommand::shell("exit 3").current_dir(temp.path()));

        match result {
            Err(ProcessError::NonZeroExit { code, command }) => {
                assert_eq!(code, Some(3));
                assert_eq!(command, "exit 3");
            }
            other => panic!("Expected NonZeroExit, got: {other:?}"),
        }
    }
}
