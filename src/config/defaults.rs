//! Default configuration values

/// Pinned vcpkg release tag
pub const VCPKG_TAG: &str = "2024.12.16";

/// Checkout directory, relative to the working directory
pub const CHECKOUT_DIR: &str = "vcpkg";

/// Toolchain binary name, without executable suffix
pub const BINARY_NAME: &str = "vcpkg";

/// Executable suffix appended on Windows hosts
pub const WINDOWS_EXE_SUFFIX: &str = ".exe";

/// Bootstrap script run through the shell on Windows
pub const BOOTSTRAP_SCRIPT_WINDOWS: &str = "bootstrap-vcpkg.bat";

/// Bootstrap script run through the shell elsewhere
pub const BOOTSTRAP_SCRIPT_UNIX: &str = "./bootstrap-vcpkg.sh";

/// Subcommand that installs the project's declared dependencies
pub const INSTALL_SUBCOMMAND: &str = "install";

/// Minimum proptest iterations
pub const MIN_PROPTEST_ITERATIONS: u32 = 100;
