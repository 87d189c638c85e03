//! Diagnostic log initialisation
//!
//! Events go to an append-only file, never to the operator's terminal.
//! `RUST_LOG` overrides the default `info` filter.

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Errors raised while initialising logging
#[derive(Debug, Error)]
pub enum LoggingError {
    /// The log file could not be opened for appending
    #[error("failed to open log file: {0}")]
    Open(#[from] std::io::Error),

    /// A global subscriber was already installed
    #[error("failed to initialise tracing subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

fn open_log(path: &Path) -> Result<File, std::io::Error> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn build_env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber writing to `log_file`
pub fn init(log_file: &Path) -> Result<(), LoggingError> {
    let file = open_log(log_file)?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .with(build_env_filter())
        .try_init()?;

    Ok(())
}
