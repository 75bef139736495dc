//! neuro-setup - Project installer for the NeuroComposer web app.
//!
//! Checks that Node.js is available, scaffolds a Vite + React project,
//! installs its dependencies with live output, and prints the remaining
//! manual steps.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, interpolation, and validation
//! - [`error`] - Error types and result aliases
//! - [`requirements`] - Prerequisite probing
//! - [`runner`] - Install workflow orchestration
//! - [`shell`] - Shell command execution with streamed output
//! - [`ui`] - Terminal output, spinners, and the exit prompt
//!
//! # Example
//!
//! ```
//! use neuro_setup::config::InstallerConfig;
//!
//! let config = InstallerConfig::default();
//! assert_eq!(
//!     config.resolved_scaffold_command().unwrap(),
//!     "npm create vite@latest neuro-composer -- --template react"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod requirements;
pub mod runner;
pub mod shell;
pub mod ui;

pub use error::{Result, SetupError};
