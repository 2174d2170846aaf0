//! Global configuration management
//!
//! Reads `config.toml` from the config directory. It can override the
//! toolchain coordinates and supply default arguments for `vcpkg install`.

use crate::core::provision::ToolchainSettings;
use crate::infra::dirs::AppDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Global configuration error types
#[derive(Error, Debug)]
pub enum GlobalConfigError {
    /// Failed to read config file
    #[error("Failed to read config file '{path}': {error}")]
    ReadError { path: String, error: String },

    /// Failed to parse config file
    #[error("Failed to parse config file '{path}': {error}")]
    ParseError { path: String, error: String },
}

/// Global configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Toolchain overrides
    #[serde(default)]
    pub toolchain: ToolchainConfig,

    /// Install defaults
    #[serde(default)]
    pub install: InstallConfig,
}

/// Toolchain overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolchainConfig {
    /// Repository to clone
    pub repo_url: Option<String>,

    /// Pinned tag
    pub tag: Option<String>,

    /// Checkout directory, relative to the working directory
    pub checkout_dir: Option<String>,
}

/// Install defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Arguments appended to `vcpkg install`
    #[serde(default)]
    pub args: Vec<String>,
}

impl GlobalConfig {
    /// Load global configuration from the config directory
    ///
    /// A missing file yields the default configuration; an unparsable one
    /// is an error.
    pub fn load(dirs: &AppDirs) -> Result<Self, GlobalConfigError> {
        Self::load_from_path(&dirs.global_config_path())
    }

    /// Load global configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, GlobalConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| GlobalConfigError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| GlobalConfigError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Effective toolchain settings: overrides applied over the defaults
    #[must_use]
    pub fn toolchain_settings(&self) -> ToolchainSettings {
        let defaults = ToolchainSettings::default();
        ToolchainSettings {
            repo_url: self.toolchain.repo_url.clone().unwrap_or(defaults.repo_url),
            pinned_tag: self.toolchain.tag.clone().unwrap_or(defaults.pinned_tag),
            checkout_dir: self
                .toolchain
                .checkout_dir
                .clone()
                .unwrap_or(defaults.checkout_dir),
            binary_name: defaults.binary_name,
        }
    }
}
