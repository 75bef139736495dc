//! Prerequisite probing.
//!
//! A prerequisite is checked by launching its version query directly, without
//! a shell in between. Only a spawn failure of kind `NotFound` counts as
//! absence: a binary that exists but exits non-zero, or fails for any other
//! reason, is reported as present.
//!
//! # Example
//!
//! ```no_run
//! use neuro_setup::requirements::probe_prerequisite;
//!
//! let status = probe_prerequisite("node", &["-v".to_string()]);
//! if let Some(version) = status.version() {
//!     println!("node {}", version);
//! }
//! ```

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;

use regex::Regex;

use super::status::PrerequisiteStatus;

/// Matches `v20.11.1`, `20.11.1`, `10.2` and the like.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"v?(\d+\.\d+(?:\.\d+)?)").expect("version pattern is valid")
});

/// Launch `binary version_args...` and classify the outcome.
pub fn probe_prerequisite(binary: &str, version_args: &[String]) -> PrerequisiteStatus {
    if let Some(path) = resolve_tool_path(binary, &parse_system_path()) {
        tracing::debug!("Resolved {} to {}", binary, path.display());
    }

    let output = Command::new(binary)
        .args(version_args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();

    match output {
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("{} not found: {}", binary, e);
            PrerequisiteStatus::Absent
        }
        Err(e) => {
            tracing::debug!("{} exists but could not be queried: {}", binary, e);
            PrerequisiteStatus::Present { version: None }
        }
        Ok(out) => {
            tracing::debug!("{} version query exited with {}", binary, out.status);
            let text = String::from_utf8_lossy(&out.stdout);
            let version = extract_version(&text).or_else(|| {
                let stderr = String::from_utf8_lossy(&out.stderr);
                extract_version(&stderr)
            });
            PrerequisiteStatus::Present { version }
        }
    }
}

/// Extract the first dotted version number from tool output, as `vX.Y[.Z]`.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION_REGEX
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("v{}", m.as_str()))
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    for dir in path_entries {
        let candidate = dir.join(tool);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_binary_is_absent() {
        let status = probe_prerequisite("neuro-setup-no-such-binary-x9", &["-v".to_string()]);
        assert_eq!(status, PrerequisiteStatus::Absent);
    }

    #[test]
    #[cfg(unix)]
    fn nonzero_exit_still_counts_as_present() {
        let status = probe_prerequisite("sh", &["-c".to_string(), "exit 3".to_string()]);
        assert!(status.is_present());
        assert_eq!(status.version(), None);
    }

    #[test]
    #[cfg(unix)]
    fn version_is_read_from_stdout() {
        let status = probe_prerequisite("sh", &["-c".to_string(), "echo v18.19.0".to_string()]);
        assert_eq!(status.version(), Some("v18.19.0"));
    }

    #[test]
    #[cfg(unix)]
    fn version_falls_back_to_stderr() {
        let status = probe_prerequisite("sh", &["-c".to_string(), "echo 3.12.1 >&2".to_string()]);
        assert_eq!(status.version(), Some("v3.12.1"));
    }

    #[test]
    fn extract_version_variants() {
        assert_eq!(extract_version("v20.11.1\n"), Some("v20.11.1".to_string()));
        assert_eq!(extract_version("10.2.4"), Some("v10.2.4".to_string()));
        assert_eq!(
            extract_version("Python 3.12"),
            Some("v3.12".to_string())
        );
        assert_eq!(extract_version("no digits here"), None);
    }

    #[test]
    #[cfg(unix)]
    fn resolve_tool_path_finds_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("mytool");
        fs::write(&tool, "#!/bin/sh\n").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let found = resolve_tool_path("mytool", &[temp.path().to_path_buf()]);
        assert_eq!(found, Some(tool));
    }

    #[test]
    #[cfg(unix)]
    fn resolve_tool_path_skips_non_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("plainfile");
        fs::write(&tool, "data").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o644)).unwrap();

        assert_eq!(resolve_tool_path("plainfile", &[temp.path().to_path_buf()]), None);
    }

    #[test]
    fn resolve_tool_path_returns_none_for_empty_path() {
        assert_eq!(resolve_tool_path("node", &[]), None);
    }
}
