//! `tracing` subscriber setup.
//!
//! While the TUI runs it owns stdout/stderr, so events go to an append-only log
//! file instead. One-shot CLI commands log compact lines to stderr.
//! `RUST_LOG` overrides the default filter in both modes.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_IO};

fn env_filter(verbose: bool) -> EnvFilter {
    let default = if verbose {
        "health_guard=debug,info"
    } else {
        "health_guard=info"
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_file_logger(path: &Path) -> Result<(), AppError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to open log file '{}': {e}", path.display())))?;

    tracing_subscriber::registry()
        .with(env_filter(false))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(|e| AppError::new(EXIT_IO, format!("Failed to initialize logging: {e}")))
}
