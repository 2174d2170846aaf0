//! vcpkg-bootstrap - provision a pinned vcpkg toolchain
//!
//! This library makes sure a vcpkg toolchain is available for a build:
//! a system install outside CI, otherwise a local checkout cloned at a
//! pinned tag and bootstrapped, then updated and re-pinned on later runs.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and output formatting
//! - [`core`] - Provisioning protocol, dependency install and diagnostics
//! - [`infra`] - Infrastructure layer (git, processes, host probing, files)
//! - [`config`] - Configuration and constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
