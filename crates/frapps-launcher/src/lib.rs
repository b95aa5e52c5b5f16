//! Launcher for the prebuilt frapps binary.
//!
//! On every invocation the launcher checks the version marker in the install
//! directory, downloads the matching release when it is missing or stale, and
//! then runs the installed binary with the same arguments.

pub mod config;
pub mod launch;
pub mod logging;

use std::ffi::OsString;

use anyhow::{Context, Result};
use frapps_install::{InstallError, Installer, current_platform, needs_install_for, platform_spec};

pub use config::LauncherConfig;
pub use launch::{ExitOutcome, FAILURE_EXIT_CODE, run_binary};

/// Installs the binary if needed, runs it with `args` and returns the exit
/// code the launcher should terminate with.
///
/// # Errors
///
/// Fails when the host platform is unsupported, the install fails, or the
/// binary cannot be started.
pub async fn run(config: &LauncherConfig, args: &[OsString]) -> Result<i32> {
    let platform = current_platform()?;
    let settings = config.install_settings();

    if needs_install_for(settings.install_dir(), &settings.version) {
        tracing::info!("Downloading current binary...");
        Installer::new(settings.clone())
            .context("failed to set up the release download client")?
            .install(&platform)
            .await
            .with_context(|| format!("failed to install into {}", config.install_dir.display()))?;
        tracing::info!("Done installing.");
    } else {
        tracing::debug!(
            "frapps {} already installed in {}",
            settings.version,
            config.install_dir.display()
        );
    }

    let binary = settings.binary_path(platform_spec(&platform)?);
    tracing::info!("Running {}", binary.display());

    let outcome = run_binary(&binary, args)
        .await
        .with_context(|| format!("failed to run {}", binary.display()))?;

    if outcome == ExitOutcome::Signaled {
        tracing::error!("Null return code from binary. (SEGFAULT?)");
    }
    Ok(outcome.exit_code())
}

/// Short advice for a failed run, when the failure came from installing.
#[must_use]
pub fn failure_hint(error: &anyhow::Error) -> Option<String> {
    let install_error = error.downcast_ref::<InstallError>()?;
    let mut hint = install_error.user_message().to_string();
    if install_error.is_retryable() {
        hint.push_str(" Running frapps again may succeed.");
    }
    Some(hint)
}
