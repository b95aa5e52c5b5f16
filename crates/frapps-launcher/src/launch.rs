//! Running the installed binary as a child process.

use std::ffi::OsString;
use std::io;
use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::process::Command;

/// Exit code used when the child reports none or could not be started.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// How the child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// The child exited with a code.
    Exited(i32),
    /// The child ended without an exit code, usually killed by a signal.
    Signaled,
}

impl ExitOutcome {
    /// Exit code the launcher should terminate with.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Exited(code) => code,
            Self::Signaled => FAILURE_EXIT_CODE,
        }
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        status.code().map_or(Self::Signaled, Self::Exited)
    }
}

/// Spawns `binary` with `args` and waits for it to finish.
///
/// The arguments are passed through as given and the child shares the
/// launcher's stdin, stdout and stderr.
///
/// # Errors
///
/// Returns the spawn or wait error.
pub async fn run_binary(binary: &Path, args: &[OsString]) -> io::Result<ExitOutcome> {
    let status = Command::new(binary)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    tracing::debug!(?status, "Binary exited");
    Ok(status.into())
}
