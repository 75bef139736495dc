//! Install command implementation.
//!
//! Loads the configuration, applies CLI overrides, and runs the install
//! workflow against real processes.

use std::path::{Path, PathBuf};

use crate::cli::args::Cli;
use crate::config::{load_config, InstallerConfig};
use crate::error::Result;
use crate::runner::{InstallWorkflow, WorkflowOptions};
use crate::shell::{CommandRunner, SystemRunner};
use crate::ui::UserInterface;

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// The install command implementation.
pub struct InstallCommand {
    project_dir: PathBuf,
    args: Cli,
}

impl InstallCommand {
    /// Create a new install command that creates the project in `project_dir`.
    pub fn new(project_dir: &Path, args: Cli) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            args,
        }
    }

    /// Load the configuration with CLI overrides applied.
    pub fn resolve_config(&self) -> Result<InstallerConfig> {
        let mut config = load_config(&self.project_dir, self.args.config.as_deref())?;
        if self.args.strict {
            config.strict = true;
        }
        Ok(config)
    }

    /// Run the install against the given runner.
    pub fn execute_with(
        &self,
        runner: &mut dyn CommandRunner,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let config = self.resolve_config()?;
        tracing::debug!(
            "Installing '{}' into {} (strict: {}, dry run: {})",
            config.project_name,
            self.project_dir.display(),
            config.strict,
            self.args.dry_run
        );

        let options = WorkflowOptions {
            parent_dir: self.project_dir.clone(),
            dry_run: self.args.dry_run,
            pause: !self.args.no_pause,
        };

        let outcome = InstallWorkflow::new(&config, options).run(runner, ui)?;
        tracing::debug!("Install finished: {:?}", outcome);

        if outcome.is_success() {
            Ok(CommandResult::success())
        } else {
            Ok(CommandResult::failure(outcome.exit_code()))
        }
    }

    /// Run the install against real processes.
    pub fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.execute_with(&mut SystemRunner, ui)
    }
}
