//! Core business logic module
//!
//! Side effects go through the collaborator traits in [`crate::infra`].
//!
//! # Submodules
//!
//! - [`provision`] - Pinned toolchain acquisition and update protocol
//! - [`install`] - Dependency installation with the provisioned toolchain
//! - [`doctor`] - Host and checkout diagnostics
//! - [`global_config`] - Global configuration management

pub mod doctor;
pub mod global_config;
pub mod install;
pub mod provision;
