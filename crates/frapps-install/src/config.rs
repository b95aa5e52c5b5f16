//! Settings for an install run.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::platform::PlatformSpec;
use crate::version::version_file;
use crate::{ARCHIVE_PREFIX, REPOSITORY_URL, VERSION};

/// Where releases come from, which one to install, and where to put it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallSettings {
    /// Base URL of the repository hosting the releases.
    #[serde(default = "default_repository_url")]
    pub repository_url: String,

    /// Release version to install. Also the content of the version marker.
    #[serde(default = "default_version")]
    pub version: String,

    /// Directory receiving the binary and the version marker.
    pub install_dir: PathBuf,
}

fn default_repository_url() -> String {
    REPOSITORY_URL.to_string()
}

fn default_version() -> String {
    VERSION.to_string()
}

impl InstallSettings {
    /// Settings for the current package version and repository.
    #[must_use]
    pub fn new(install_dir: impl Into<PathBuf>) -> Self {
        Self {
            repository_url: default_repository_url(),
            version: default_version(),
            install_dir: install_dir.into(),
        }
    }

    /// Use a different release repository.
    #[must_use]
    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = url.into();
        self
    }

    /// Install a different release version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Download URL of the release archive for `target`.
    ///
    /// `<repository>/releases/download/<version>/frapps_<version>_<target>.tar.gz`
    #[must_use]
    pub fn release_url(&self, target: &str) -> String {
        format!(
            "{repo}/releases/download/{version}/{ARCHIVE_PREFIX}_{version}_{target}.tar.gz",
            repo = self.repository_url.trim_end_matches('/'),
            version = self.version,
        )
    }

    /// Path of the version marker.
    #[must_use]
    pub fn version_file(&self) -> PathBuf {
        version_file(&self.install_dir)
    }

    /// Path the binary described by `spec` is extracted to.
    #[must_use]
    pub fn binary_path(&self, spec: &PlatformSpec) -> PathBuf {
        self.install_dir.join(spec.binary_name)
    }

    /// The install directory.
    #[must_use]
    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }
}
