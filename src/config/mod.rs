//! Configuration loading, parsing, and validation.
//!
//! # Modules
//!
//! - [`schema`] - Configuration types and their defaults
//! - [`loader`] - File discovery and loading
//! - [`interpolation`] - `${var}` substitution in command templates
//! - [`validator`] - Validation rules

pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validator;

pub use interpolation::{parse_interpolation, resolve_string, Segment};
pub use loader::{discover_config, load_config, load_config_file, parse_config, CONFIG_FILE_NAME};
pub use schema::{InstallerConfig, PrerequisiteConfig};
pub use validator::validate_config;
