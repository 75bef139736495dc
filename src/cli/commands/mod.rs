//! Command implementations.

pub mod install;

pub use install::{CommandResult, InstallCommand};
