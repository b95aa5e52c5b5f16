//! Launcher configuration read from the environment.
//!
//! Every command line argument is forwarded to the installed binary, so the
//! launcher takes its own settings from `FRAPPS_*` environment variables.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use directories::ProjectDirs;
use frapps_install::{InstallSettings, REPOSITORY_URL};
use tracing::Level;

use crate::logging::{LogConfig, LogFormat};

/// Install directory override.
pub const ENV_INSTALL_DIR: &str = "FRAPPS_INSTALL_DIR";
/// Release repository override.
pub const ENV_REPOSITORY_URL: &str = "FRAPPS_REPOSITORY_URL";
/// Log level (`error`, `warn`, `info`, `debug`, `trace`).
pub const ENV_LOG_LEVEL: &str = "FRAPPS_LOG_LEVEL";
/// Log format (`pretty`, `compact`, `json`).
pub const ENV_LOG_FORMAT: &str = "FRAPPS_LOG_FORMAT";
/// Log file path. Logs go to stderr when unset.
pub const ENV_LOG_FILE: &str = "FRAPPS_LOG_FILE";

/// Name of the fallback install directory next to the launcher executable.
const LOCAL_INSTALL_DIR: &str = ".frapps";

/// Settings for one launcher run.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Directory holding the installed binary and its version marker.
    pub install_dir: PathBuf,
    /// Repository the release archives are downloaded from.
    pub repository_url: String,
    /// Logging setup.
    pub log: LogConfig,
    /// Problems found while reading the environment, reported once logging is up.
    pub warnings: Vec<String>,
}

impl LauncherConfig {
    /// Reads the configuration from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Reads the configuration through `lookup`, which maps a variable name to its value.
    ///
    /// Paths are taken as given. Other values must be UTF-8 or they are
    /// ignored with a warning.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let mut warnings = Vec::new();
        let raw = |key: &str| lookup(key).filter(|v| !is_blank(v));
        let mut text = |key: &str| {
            raw(key).and_then(|v| match v.into_string() {
                Ok(s) => Some(s),
                Err(v) => {
                    warnings.push(format!("Ignoring {key}={}: not valid UTF-8", v.to_string_lossy()));
                    None
                }
            })
        };

        let repository_url = text(ENV_REPOSITORY_URL).unwrap_or_else(|| REPOSITORY_URL.to_string());
        let log_level = text(ENV_LOG_LEVEL);
        let log_format = text(ENV_LOG_FORMAT);

        let install_dir = raw(ENV_INSTALL_DIR)
            .map(PathBuf::from)
            .unwrap_or_else(default_install_dir);

        let mut log = LogConfig::default().with_log_file(raw(ENV_LOG_FILE).map(PathBuf::from));

        if let Some(value) = log_level {
            match value.parse::<Level>() {
                Ok(level) => log = log.with_level(level),
                Err(_) => warnings.push(format!(
                    "Ignoring {ENV_LOG_LEVEL}={value}: expected error, warn, info, debug or trace"
                )),
            }
        }

        if let Some(value) = log_format {
            match value.parse::<LogFormat>() {
                Ok(format) => log = log.with_format(format),
                Err(e) => warnings.push(format!("Ignoring {ENV_LOG_FORMAT}: {e}")),
            }
        }

        // No colors in a file.
        if log.log_file.is_some() {
            log = log.with_ansi(false);
        }

        Self {
            install_dir,
            repository_url,
            log,
            warnings,
        }
    }

    /// Install settings for the release matching this launcher's version.
    #[must_use]
    pub fn install_settings(&self) -> InstallSettings {
        InstallSettings::new(&self.install_dir).with_repository_url(&self.repository_url)
    }
}

fn is_blank(value: &OsStr) -> bool {
    value.to_str().is_some_and(|s| s.trim().is_empty())
}

/// Per-user data directory (`<data_local_dir>/bin`), or `.frapps` next to the
/// launcher executable when the platform reports no home directory.
#[must_use]
pub fn default_install_dir() -> PathBuf {
    if let Some(dirs) = ProjectDirs::from("", "", "frapps") {
        return dirs.data_local_dir().join("bin");
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(LOCAL_INSTALL_DIR)))
        .unwrap_or_else(|| PathBuf::from(LOCAL_INSTALL_DIR))
}
