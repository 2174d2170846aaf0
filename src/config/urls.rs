//! Toolchain repository URLs

/// vcpkg source repository
pub const VCPKG_REPOSITORY: &str = "https://github.com/microsoft/vcpkg.git";
