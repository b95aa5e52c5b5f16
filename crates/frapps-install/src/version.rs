//! Version marker handling for the install directory.
//!
//! The marker is a plain text file holding the exact version string of the
//! installed release. Staleness is plain string inequality: any difference,
//! including whitespace or pre-release suffixes, means a reinstall.

use std::fs;
use std::path::{Path, PathBuf};

use crate::VERSION;
use crate::error::{InstallError, Result};

/// File name of the version marker inside the install directory.
pub const VERSION_FILE_NAME: &str = "version";

/// Path of the version marker inside `install_dir`.
#[must_use]
pub fn version_file(install_dir: &Path) -> PathBuf {
    install_dir.join(VERSION_FILE_NAME)
}

/// Reads the installed version, if the marker exists and is readable.
#[must_use]
pub fn installed_version(install_dir: &Path) -> Option<String> {
    fs::read_to_string(version_file(install_dir)).ok()
}

/// Returns whether the current package version must be installed into `install_dir`.
#[must_use]
pub fn needs_install(install_dir: &Path) -> bool {
    needs_install_for(install_dir, VERSION)
}

/// Returns whether `version` must be installed into `install_dir`.
///
/// A marker that cannot be read counts as "not installed".
#[must_use]
pub fn needs_install_for(install_dir: &Path, version: &str) -> bool {
    let path = version_file(install_dir);
    match fs::read_to_string(&path) {
        Ok(installed) => {
            let stale = installed != version;
            if stale {
                tracing::debug!(installed = %installed, wanted = version, "Installed version differs");
            }
            stale
        }
        Err(err) => {
            tracing::debug!("No readable version marker at {}: {}", path.display(), err);
            true
        }
    }
}

/// Records `version` as installed, overwriting any previous marker.
pub fn write_version(install_dir: &Path, version: &str) -> Result<()> {
    let path = version_file(install_dir);
    fs::write(&path, version)
        .map_err(|e| InstallError::io("failed to write version marker", &path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_marker_needs_install() {
        let dir = tempfile::tempdir().unwrap();
        assert!(needs_install(dir.path()));
        assert!(installed_version(dir.path()).is_none());
    }

    #[test]
    fn test_missing_directory_needs_install() {
        let dir = tempfile::tempdir().unwrap();
        assert!(needs_install(&dir.path().join("does/not/exist")));
    }

    #[test]
    fn test_current_version_skips_install() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), VERSION).unwrap();
        assert!(!needs_install(dir.path()));
    }

    #[test]
    fn test_other_version_needs_install() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), "0.0.0").unwrap();
        assert!(needs_install(dir.path()));
    }

    #[test]
    fn test_comparison_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        for content in [
            format!("{VERSION}\n"),
            format!(" {VERSION}"),
            format!("v{VERSION}"),
            format!("{VERSION}-beta.1"),
            String::new(),
        ] {
            fs::write(dir.path().join("version"), &content).unwrap();
            assert!(needs_install(dir.path()), "{content:?} should be stale");
        }
    }

    #[test]
    fn test_unreadable_marker_needs_install() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the marker file should be cannot be read as text.
        fs::create_dir(dir.path().join("version")).unwrap();
        assert!(needs_install(dir.path()));

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), [0xff, 0xfe, 0x00]).unwrap();
        assert!(needs_install(dir.path()));
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("version"), "0.0.1").unwrap();

        write_version(dir.path(), "2.3.4").unwrap();

        assert_eq!(installed_version(dir.path()).as_deref(), Some("2.3.4"));
        assert!(!needs_install_for(dir.path(), "2.3.4"));
        assert!(needs_install_for(dir.path(), "2.3.5"));
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_version(&dir.path().join("missing"), "1.0.0");
        assert!(matches!(result, Err(InstallError::Io { .. })));
    }
}
