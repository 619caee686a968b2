//! Error handling utilities for the moodpet application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when reading or writing the mood file.
///
/// # Examples
///
/// ```
/// use moodpet::errors::StoreError;
/// use std::path::PathBuf;
///
/// let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
/// let error = StoreError::Malformed {
///     path: PathBuf::from("/data/mood_log.json"),
///     source,
/// };
///
/// assert!(format!("{}", error).contains("not valid mood data"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The mood file exists but does not hold a JSON object of dates to moods.
    #[error("Mood file {path} is not valid mood data: {source}. Fix or move the file aside to start a fresh log.")]
    Malformed {
        /// The path of the unreadable mood file
        path: PathBuf,
        /// The underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// The mood log could not be serialized.
    #[error("Failed to serialize mood log: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Represents errors that can occur when attempting to lock the mood file.
///
/// # Examples
///
/// ```
/// use moodpet::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/data/mood_log.json.lock"),
/// };
///
/// assert!(format!("{}", error).contains("being written"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the file stays locked by another process.
    #[error("Mood file is currently being written by another process: {path}. Please try again in a moment.")]
    FileBusy {
        /// The path to the lock file
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock for mood file {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents errors raised while writing an export file.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The export file could not be created or written.
    #[error("Failed to export mood data to {path}: {source}")]
    WriteFailed {
        /// The export file path
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in the moodpet application.
///
/// Note: This type does not implement `Clone` to avoid losing error context when
/// cloning `std::io::Error` values.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use moodpet::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use moodpet::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem or terminal operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors reading or writing the mood file.
    #[error("Mood store error: {0}")]
    Store(#[from] StoreError),

    /// Errors related to file locking.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors writing an export.
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// Invalid user input such as an unparseable date.
    #[error("Invalid input: {0}")]
    Input(String),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use moodpet::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Input("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
