//! Installer configuration schema.
//!
//! Every field has a default, so an empty file (or no file) describes the
//! stock NeuroComposer install:
//!
//! ```yaml
//! project_name: neuro-composer
//! template: react
//! prerequisite:
//!   name: Node.js
//!   binary: node
//!   version_args: ["-v"]
//!   install_url: https://nodejs.org/
//! scaffold_command: npm create vite@latest ${project_name} -- --template ${template}
//! install_command: npm install
//! extra_packages: [tone, lucide-react]
//! extra_install_command: npm install ${packages}
//! strict: false
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::interpolation::resolve_string;
use crate::error::Result;

/// Root configuration for an install run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Display name shown in the header.
    pub app_name: String,

    /// Directory the scaffolding tool creates, relative to the parent dir.
    pub project_name: String,

    /// Template passed to the scaffolding tool.
    pub template: String,

    /// Runtime that must be installed before anything else happens.
    pub prerequisite: PrerequisiteConfig,

    /// Scaffolding command. Supports `${project_name}` and `${template}`.
    pub scaffold_command: String,

    /// Installs every dependency declared by the scaffolded project.
    pub install_command: String,

    /// Packages added on top of the scaffolded project.
    pub extra_packages: Vec<String>,

    /// Installs `extra_packages`. Supports `${packages}`.
    pub extra_install_command: String,

    /// File the user replaces by hand, relative to the project directory.
    pub app_entry: String,

    /// Command the user runs once setup is done.
    pub run_command: String,

    /// Treat a failed dependency install as fatal.
    pub strict: bool,
}

impl Default for InstallerConfig {
    fn default() -> Self {
        Self {
            app_name: "NeuroComposer v12".to_string(),
            project_name: "neuro-composer".to_string(),
            template: "react".to_string(),
            prerequisite: PrerequisiteConfig::default(),
            scaffold_command: "npm create vite@latest ${project_name} -- --template ${template}"
                .to_string(),
            install_command: "npm install".to_string(),
            extra_packages: vec!["tone".to_string(), "lucide-react".to_string()],
            extra_install_command: "npm install ${packages}".to_string(),
            app_entry: "src/App.jsx".to_string(),
            run_command: "npm run dev".to_string(),
            strict: false,
        }
    }
}

impl InstallerConfig {
    /// Variables available to command templates.
    pub fn variables(&self) -> HashMap<String, String> {
        let mut vars = HashMap::new();
        vars.insert("project_name".to_string(), self.project_name.clone());
        vars.insert("template".to_string(), self.template.clone());
        vars.insert("packages".to_string(), self.extra_packages.join(" "));
        vars
    }

    /// The scaffold command with variables substituted.
    pub fn resolved_scaffold_command(&self) -> Result<String> {
        resolve_string(&self.scaffold_command, &self.variables())
    }

    /// The base install command with variables substituted.
    pub fn resolved_install_command(&self) -> Result<String> {
        resolve_string(&self.install_command, &self.variables())
    }

    /// The extra-packages install command with variables substituted.
    pub fn resolved_extra_install_command(&self) -> Result<String> {
        resolve_string(&self.extra_install_command, &self.variables())
    }
}

/// The external runtime checked before any project mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrerequisiteConfig {
    /// Human-readable name (e.g., "Node.js").
    pub name: String,

    /// Executable looked up on PATH.
    pub binary: String,

    /// Arguments of the version query.
    pub version_args: Vec<String>,

    /// Where to get it when missing.
    pub install_url: String,
}

impl Default for PrerequisiteConfig {
    fn default() -> Self {
        Self {
            name: "Node.js".to_string(),
            binary: "node".to_string(),
            version_args: vec!["-v".to_string()],
            install_url: "https://nodejs.org/".to_string(),
        }
    }
}
