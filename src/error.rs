//! Error types for installer operations.
//!
//! This module defines [`SetupError`], the primary error type used throughout
//! the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - A missing prerequisite or a failed scaffold is an *outcome* of the
//!   workflow, reported to the user and returned as
//!   [`InstallOutcome`](crate::runner::InstallOutcome), not an error
//! - Use `SetupError` for conditions that abort the run with a non-zero exit
//! - Use `anyhow::Error` (via `SetupError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for installer operations.
#[derive(Debug, Error)]
pub enum SetupError {
    /// Configuration file not found at the given location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// Shell command could not be run at all.
    #[error("Failed to run command: {command}")]
    CommandFailed { command: String },

    /// The scaffold step reported success but left no project directory behind.
    #[error("Project directory not found after scaffolding: {path}")]
    ProjectDirectoryMissing { path: PathBuf },

    /// A dependency install exited non-zero while running in strict mode.
    #[error("Dependency install '{command}' failed with exit code {code}")]
    DependencyInstallFailed { command: String, code: i32 },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias for installer operations.
pub type Result<T> = std::result::Result<T, SetupError>;
