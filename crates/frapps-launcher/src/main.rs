//! frapps launcher.

use std::io::{self, IsTerminal};

use frapps_launcher::logging::init_logging;
use frapps_launcher::{FAILURE_EXIT_CODE, LauncherConfig, failure_hint, run};

fn main() {
    let mut config = LauncherConfig::from_env();
    if config.log.log_file.is_none() {
        config.log.with_ansi = io::stderr().is_terminal();
    }
    if let Err(error) = init_logging(&config.log) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(FAILURE_EXIT_CODE);
    }
    for warning in &config.warnings {
        tracing::warn!("{warning}");
    }

    let args: Vec<_> = std::env::args_os().skip(1).collect();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(error) => {
            tracing::error!("failed to start async runtime: {error}");
            std::process::exit(FAILURE_EXIT_CODE);
        }
    };

    let exit_code = match runtime.block_on(run(&config, &args)) {
        Ok(code) => code,
        Err(error) => {
            tracing::error!("{error:#}");
            if let Some(hint) = failure_hint(&error) {
                tracing::error!("{hint}");
            }
            FAILURE_EXIT_CODE
        }
    };

    drop(runtime);
    std::process::exit(exit_code);
}
