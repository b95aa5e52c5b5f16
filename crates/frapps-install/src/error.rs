//! Error types for installing the frapps binary.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while resolving, downloading or installing a release.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum InstallError {
    /// The host CPU architecture has no prebuilt release.
    #[error("Unsupported architecture {0}")]
    UnsupportedArchitecture(String),

    /// The host operating system has no prebuilt release.
    #[error("Unsupported platform type {0}")]
    UnsupportedPlatform(String),

    /// The HTTP request failed before or while streaming the body.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The release server answered with something other than `200 OK`.
    #[error("Unable to download package: {status} {status_text}.")]
    DownloadFailed {
        /// HTTP status code.
        status: u16,
        /// Reason phrase for the status code.
        status_text: String,
    },

    /// The gzip/tar extractor failed.
    #[error("archive extraction error: {0}")]
    Extraction(#[source] io::Error),

    /// The archive unpacked without the binary for this platform.
    #[error("release archive did not contain {}", .0.display())]
    MissingBinary(PathBuf),

    /// A file system operation on the install directory failed.
    #[error("{context} {}: {source}", .path.display())]
    Io {
        /// What was being attempted.
        context: &'static str,
        /// The path involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl InstallError {
    /// Builds an [`InstallError::Io`] for `path`.
    pub(crate) fn io(context: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            context,
            path: path.into(),
            source,
        }
    }

    /// Returns a short message suitable for printing to a terminal user.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::UnsupportedArchitecture(_) | Self::UnsupportedPlatform(_) => {
                "No prebuilt frapps binary exists for this machine."
            }
            Self::Network(_) => {
                "Could not reach the release server. Please check your internet connection."
            }
            Self::DownloadFailed { .. } => "The release archive could not be downloaded.",
            Self::Extraction(_) | Self::MissingBinary(_) => {
                "The downloaded archive could not be extracted."
            }
            Self::Io { .. } => "Could not write to the install directory.",
        }
    }

    /// Returns whether running the launcher again may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Io { .. } => true,
            Self::DownloadFailed { status, .. } => *status >= 500,
            Self::UnsupportedArchitecture(_)
            | Self::UnsupportedPlatform(_)
            | Self::Extraction(_)
            | Self::MissingBinary(_) => false,
        }
    }
}

/// Result type alias for install operations.
pub type Result<T> = std::result::Result<T, InstallError>;
