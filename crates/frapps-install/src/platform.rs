//! Platform detection and release target lookup.
//!
//! Maps the host operating system and CPU architecture to the target triple
//! of a published release and the name of the binary inside its archive.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{InstallError, Result};

/// The only CPU architecture releases are built for.
pub const SUPPORTED_ARCH: &str = "x86_64";

/// Host operating system family.
///
/// Unknown systems are carried verbatim in [`PlatformType::Other`] so that the
/// lookup in [`platform_spec`] is the single place rejecting them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlatformType {
    /// Microsoft Windows.
    Windows,
    /// Linux.
    Linux,
    /// macOS / Darwin.
    Darwin,
    /// Any other operating system, by its reported name.
    Other(String),
}

impl PlatformType {
    /// Parses an OS name as reported by Rust (`std::env::consts::OS`) or by
    /// `uname`-style APIs (`Linux`, `Darwin`, `Windows_NT`).
    #[must_use]
    pub fn from_os_name(name: &str) -> Self {
        match name {
            "windows" | "Windows_NT" => Self::Windows,
            "linux" | "Linux" => Self::Linux,
            "macos" | "Darwin" => Self::Darwin,
            other => Self::Other(other.to_string()),
        }
    }

    /// Platform of the running host, without any validation.
    #[must_use]
    pub fn host() -> Self {
        Self::from_os_name(std::env::consts::OS)
    }

    /// Name used in messages and logs.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Windows => "Windows_NT",
            Self::Linux => "Linux",
            Self::Darwin => "Darwin",
            Self::Other(name) => name,
        }
    }

    /// Release information for this platform.
    pub fn spec(&self) -> Result<&'static PlatformSpec> {
        platform_spec(self)
    }
}

impl fmt::Display for PlatformType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Release target and binary name for a supported platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSpec {
    /// Target triple used in the release archive name.
    pub target: &'static str,
    /// File name of the executable inside the archive.
    pub binary_name: &'static str,
}

const WINDOWS_SPEC: PlatformSpec = PlatformSpec {
    target: "x86_64-pc-windows-msvc",
    binary_name: "frapps.exe",
};

const LINUX_SPEC: PlatformSpec = PlatformSpec {
    target: "x86_64-unknown-linux-musl",
    binary_name: "frapps",
};

const DARWIN_SPEC: PlatformSpec = PlatformSpec {
    target: "x86_64-apple-darwin",
    binary_name: "frapps",
};

/// Determines the platform from an OS name and an architecture name.
///
/// Fails with [`InstallError::UnsupportedArchitecture`] for anything but
/// [`SUPPORTED_ARCH`]. The OS is not validated here.
pub fn detect_platform(os: &str, arch: &str) -> Result<PlatformType> {
    if arch != SUPPORTED_ARCH {
        return Err(InstallError::UnsupportedArchitecture(arch.to_string()));
    }
    Ok(PlatformType::from_os_name(os))
}

/// Determines the platform of the running host.
pub fn current_platform() -> Result<PlatformType> {
    detect_platform(std::env::consts::OS, std::env::consts::ARCH)
}

/// Looks up the release target and binary name for `platform`.
pub fn platform_spec(platform: &PlatformType) -> Result<&'static PlatformSpec> {
    match platform {
        PlatformType::Windows => Ok(&WINDOWS_SPEC),
        PlatformType::Linux => Ok(&LINUX_SPEC),
        PlatformType::Darwin => Ok(&DARWIN_SPEC),
        PlatformType::Other(name) => Err(InstallError::UnsupportedPlatform(name.clone())),
    }
}
