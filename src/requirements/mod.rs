//! Prerequisite detection.
//!
//! The installer has a single prerequisite: an external runtime that must be
//! launchable before anything touches the filesystem.

pub mod probe;
pub mod status;

pub use probe::{extract_version, probe_prerequisite, resolve_tool_path};
pub use status::PrerequisiteStatus;
