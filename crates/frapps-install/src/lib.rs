//! Download and installation of the prebuilt frapps binary.
//!
//! This crate fetches the release archive matching the host platform from the
//! project's release page and unpacks it into an install directory, next to a
//! plain-text version marker. The launcher uses the marker to decide whether a
//! download is needed at all.
//!
//! # Overview
//!
//! - [`platform`] maps the host OS and architecture to a release target triple
//!   and binary name.
//! - [`version`] reads and writes the version marker (`<install_dir>/version`).
//! - [`Installer`] downloads `frapps_<version>_<target>.tar.gz` and streams it
//!   straight into a gzip/tar extractor.
//!
//! # Example
//!
//! ```no_run
//! use frapps_install::{InstallSettings, Installer, current_platform};
//!
//! async fn ensure_installed() -> frapps_install::Result<()> {
//!     let installer = Installer::new(InstallSettings::new("/opt/frapps"))?;
//!     if installer.needs_install() {
//!         installer.install(&current_platform()?).await?;
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod config;
pub mod error;
pub mod platform;
pub mod version;

// Individual steps
pub mod steps;

// Re-export main types for convenience
pub use config::InstallSettings;
pub use error::{InstallError, Result};
pub use platform::{PlatformSpec, PlatformType, current_platform, detect_platform, platform_spec};
pub use steps::download::{DownloadProgress, format_bytes};
pub use steps::extract::ArchiveExtractor;
pub use steps::install::{Installer, install};
pub use version::{installed_version, needs_install, needs_install_for, write_version};

/// Version of this package, and the release version it installs.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository hosting the releases.
pub const REPOSITORY_URL: &str = env!("CARGO_PKG_REPOSITORY");

/// File name prefix of release archives.
pub const ARCHIVE_PREFIX: &str = "frapps";
