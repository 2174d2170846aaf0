//! Infrastructure layer
//!
//! Handles all I/O operations: git, filesystem, and external processes.
//! This module is the only place where side effects occur.

pub mod dirs;
pub mod git;
pub mod lock_file;
pub mod probe;
pub mod process;
