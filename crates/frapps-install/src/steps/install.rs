//! Installation of a release into the install directory.

use std::fs;
use std::path::Path;

use crate::config::InstallSettings;
use crate::error::{InstallError, Result};
use crate::platform::{PlatformType, platform_spec};
use crate::steps::download::{build_client, format_bytes, pipe_response, request_archive};
use crate::steps::extract::ArchiveExtractor;
use crate::version;

/// Downloads and installs releases according to [`InstallSettings`].
#[derive(Debug, Clone)]
pub struct Installer {
    settings: InstallSettings,
    client: reqwest::Client,
}

impl Installer {
    /// Creates an installer with its own HTTP client.
    pub fn new(settings: InstallSettings) -> Result<Self> {
        Ok(Self::with_client(settings, build_client()?))
    }

    /// Creates an installer reusing an existing HTTP client.
    #[must_use]
    pub fn with_client(settings: InstallSettings, client: reqwest::Client) -> Self {
        Self { settings, client }
    }

    /// The settings this installer uses.
    #[must_use]
    pub fn settings(&self) -> &InstallSettings {
        &self.settings
    }

    /// Whether the configured version is missing from the install directory.
    #[must_use]
    pub fn needs_install(&self) -> bool {
        version::needs_install_for(&self.settings.install_dir, &self.settings.version)
    }

    /// Downloads the release for `platform` and installs it.
    ///
    /// The steps run strictly in order: request, status check, directory
    /// creation, extraction, version marker. A failure at any step leaves the
    /// previous marker untouched.
    pub async fn install(&self, platform: &PlatformType) -> Result<()> {
        let spec = platform_spec(platform)?;
        let install_dir = self.settings.install_dir();
        let url = self.settings.release_url(spec.target);

        tracing::info!(
            version = %self.settings.version,
            target = spec.target,
            "Installing into {}",
            install_dir.display()
        );

        let response = request_archive(&self.client, &url).await?;

        fs::create_dir_all(install_dir).map_err(|e| {
            InstallError::io("failed to create install directory", install_dir, e)
        })?;

        let extractor = ArchiveExtractor::spawn(install_dir);
        let progress = match pipe_response(response, &extractor).await {
            Ok(progress) => progress,
            Err(err) => {
                // Let the extractor see end of input before giving up on the install.
                if let Err(extract_err) = extractor.finish().await {
                    tracing::debug!("Extractor stopped after transfer error: {}", extract_err);
                }
                return Err(err);
            }
        };
        extractor.finish().await?;

        tracing::debug!(
            "Extracted {} into {}",
            format_bytes(progress.downloaded),
            install_dir.display()
        );

        ensure_executable(&self.settings.binary_path(spec))?;
        version::write_version(install_dir, &self.settings.version)?;

        tracing::info!("Installed frapps {}", self.settings.version);
        Ok(())
    }
}

/// Installs the current package version for `platform` into `install_dir`.
pub async fn install(install_dir: &Path, platform: &PlatformType) -> Result<()> {
    Installer::new(InstallSettings::new(install_dir))?
        .install(platform)
        .await
}

/// Checks the archive delivered the binary and marks it executable if needed.
#[cfg(unix)]
fn ensure_executable(binary: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = fs::metadata(binary).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InstallError::MissingBinary(binary.to_path_buf()),
        _ => InstallError::io("failed to inspect", binary, e),
    })?;

    let mut perms = metadata.permissions();
    if perms.mode() & 0o111 == 0 {
        perms.set_mode(0o755);
        fs::set_permissions(binary, perms)
            .map_err(|e| InstallError::io("failed to set permissions on", binary, e))?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn ensure_executable(binary: &Path) -> Result<()> {
    if !binary.is_file() {
        return Err(InstallError::MissingBinary(binary.to_path_buf()));
    }
    Ok(())
}
