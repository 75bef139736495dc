//! Configuration validation rules.
//!
//! - `project_name` must be a single, non-empty path component
//! - The prerequisite binary must be named
//! - Command templates may only reference known variables

use crate::config::interpolation::resolve_string;
use crate::config::schema::InstallerConfig;
use crate::error::{Result, SetupError};
use std::path::{Component, Path};

/// Validate a configuration, reporting every problem at once.
pub fn validate_config(config: &InstallerConfig) -> Result<()> {
    let errors = collect_errors(config);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SetupError::ConfigValidationError {
            message: errors.join("; "),
        })
    }
}

fn collect_errors(config: &InstallerConfig) -> Vec<String> {
    let mut errors = Vec::new();

    if config.project_name.trim().is_empty() {
        errors.push("'project_name' must not be empty".to_string());
    } else if !is_single_component(&config.project_name) {
        errors.push(format!(
            "'project_name' must be a plain directory name, got '{}'",
            config.project_name
        ));
    }

    if config.prerequisite.binary.trim().is_empty() {
        errors.push("'prerequisite.binary' must not be empty".to_string());
    }

    let vars = config.variables();
    for (field, template) in [
        ("scaffold_command", &config.scaffold_command),
        ("install_command", &config.install_command),
        ("extra_install_command", &config.extra_install_command),
    ] {
        if template.trim().is_empty() {
            errors.push(format!("'{}' must not be empty", field));
        } else if let Err(e) = resolve_string(template, &vars) {
            errors.push(format!("'{}': {}", field, e));
        }
    }

    errors
}

fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&InstallerConfig::default()).is_ok());
    }

    #[test]
    fn empty_project_name_is_rejected() {
        let config = InstallerConfig {
            project_name: "  ".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("project_name"));
    }

    #[test]
    fn nested_or_parent_project_names_are_rejected() {
        for name in ["a/b", "..", "../up", "/abs"] {
            let config = InstallerConfig {
                project_name: name.to_string(),
                ..Default::default()
            };
            assert!(validate_config(&config).is_err(), "accepted {}", name);
        }
    }

    #[test]
    fn empty_binary_is_rejected() {
        let mut config = InstallerConfig::default();
        config.prerequisite.binary = String::new();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("prerequisite.binary"));
    }

    #[test]
    fn unknown_template_variable_is_rejected() {
        let config = InstallerConfig {
            install_command: "npm install ${registry}".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("install_command"));
        assert!(msg.contains("registry"));
    }

    #[test]
    fn all_errors_are_reported_together() {
        let mut config = InstallerConfig {
            project_name: String::new(),
            scaffold_command: String::new(),
            ..Default::default()
        };
        config.prerequisite.binary = String::new();

        let msg = validate_config(&config).unwrap_err().to_string();
        assert!(msg.contains("project_name"));
        assert!(msg.contains("prerequisite.binary"));
        assert!(msg.contains("scaffold_command"));
    }
}
