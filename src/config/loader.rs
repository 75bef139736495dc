//! Configuration file discovery and loading.
//!
//! Lookup order:
//! 1. An explicit path (`--config`), which must exist
//! 2. `.neuro-setup.yml` in the parent directory of the project
//! 3. Built-in defaults

use crate::config::schema::InstallerConfig;
use crate::config::validator::validate_config;
use crate::error::{Result, SetupError};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked for in the parent directory.
pub const CONFIG_FILE_NAME: &str = ".neuro-setup.yml";

/// Find the config file in `parent_dir`, if there is one.
pub fn discover_config(parent_dir: &Path) -> Option<PathBuf> {
    let path = parent_dir.join(CONFIG_FILE_NAME);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load the effective configuration and validate it.
///
/// # Errors
///
/// Returns `ConfigNotFound` if `explicit` is given but missing.
/// Returns `ConfigParseError` if the YAML is invalid.
/// Returns `ConfigValidationError` if values are unusable.
pub fn load_config(parent_dir: &Path, explicit: Option<&Path>) -> Result<InstallerConfig> {
    let path = match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(parent_dir),
    };

    let config = match path {
        Some(path) => {
            tracing::debug!("Loading config from {}", path.display());
            load_config_file(&path)?
        }
        None => {
            tracing::debug!("No config file found, using defaults");
            InstallerConfig::default()
        }
    };

    validate_config(&config)?;
    Ok(config)
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<InstallerConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SetupError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SetupError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into an `InstallerConfig`.
///
/// An empty document yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<InstallerConfig> {
    if content.trim().is_empty() {
        return Ok(InstallerConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| SetupError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
