//! Tracing subscriber initialization.
//!
//! The terminal belongs to the reveal animation, so logs go to a file.
//! Follow them with `tail -f` from a second terminal.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Build the file-backed subscriber without installing it.
///
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// [`LoggingError::InvalidPath`] for a path without a file name, or
/// [`LoggingError::DirectoryCreation`].
pub fn file_subscriber(
    log_path: &Path,
    filter: EnvFilter,
) -> Result<impl tracing::Subscriber + Send + Sync + 'static, LoggingError> {
    let file_name = log_path
        .file_name()
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    // A bare file name logs next to the working directory
    let directory = match log_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&directory).map_err(|source| LoggingError::DirectoryCreation {
        path: directory.clone(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(&directory, file_name);

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file_appender)
        .with_ansi(false)
        .finish())
}

/// Initialize the global tracing subscriber with file-based logging.
///
/// Respects `RUST_LOG`, defaults to `info`.
///
/// # Errors
///
/// Fails if the log directory cannot be created or a subscriber is already set.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let subscriber = file_subscriber(log_path, env_filter)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
