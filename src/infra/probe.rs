//! Host environment probing

/// Answers questions about the host the tool runs on
pub trait EnvironmentProbe {
    /// Whether the host is Windows
    fn is_windows_host(&self) -> bool;

    /// Whether `name` resolves to an executable on `PATH`
    fn command_exists_on_path(&self, name: &str) -> bool;
}

/// Probe backed by the real host
#[derive(Debug, Default, Clone, Copy)]
pub struct HostProbe;

impl HostProbe {
    /// Create a new probe
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentProbe for HostProbe {
    fn is_windows_host(&self) -> bool {
        cfg!(windows)
    }

    fn command_exists_on_path(&self, name: &str) -> bool {
        which::which(name).is_ok()
    }
}
