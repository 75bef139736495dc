//! Scripted command runner for testing.
//!
//! `ScriptedRunner` implements [`CommandRunner`] without spawning anything.
//! Each command string can be given a canned exit code, output lines, and a
//! directory to create (standing in for a scaffolding tool). Unscripted
//! commands succeed silently.
//!
//! # Example
//!
//! ```
//! use neuro_setup::shell::{CommandOptions, CommandRunner, ScriptedCommand, ScriptedRunner};
//!
//! let mut runner = ScriptedRunner::new();
//! runner.on_command("npm install", ScriptedCommand::exit(1).with_output(&["ERR!"]));
//!
//! let mut seen = Vec::new();
//! let result = runner
//!     .run_streaming("npm install", &CommandOptions::default(), &mut |line| {
//!         seen.push(line.text().to_string())
//!     })
//!     .unwrap();
//!
//! assert_eq!(result.exit_code, Some(1));
//! assert_eq!(seen, vec!["ERR!"]);
//! assert_eq!(runner.commands(), vec!["npm install"]);
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Result;
use crate::requirements::PrerequisiteStatus;

use super::command::{CommandOptions, CommandResult, OutputLine};
use super::runner::CommandRunner;

/// Canned response for one command.
#[derive(Debug, Clone, Default)]
pub struct ScriptedCommand {
    exit_code: i32,
    output: Vec<String>,
    creates_dir: Option<PathBuf>,
}

impl ScriptedCommand {
    /// A command that exits with `code` and prints nothing.
    pub fn exit(code: i32) -> Self {
        Self {
            exit_code: code,
            ..Default::default()
        }
    }

    /// Lines written to stdout before exiting.
    pub fn with_output(mut self, lines: &[&str]) -> Self {
        self.output = lines.iter().map(|s| s.to_string()).collect();
        self
    }

    /// Directory created when the command runs.
    pub fn creating_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.creates_dir = Some(path.into());
        self
    }
}

/// A command the runner was asked to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedCommand {
    pub command: String,
    pub cwd: Option<PathBuf>,
}

/// In-memory [`CommandRunner`].
#[derive(Debug)]
pub struct ScriptedRunner {
    prerequisite: PrerequisiteStatus,
    responses: HashMap<String, ScriptedCommand>,
    executed: Vec<ExecutedCommand>,
    probes: Vec<String>,
}

impl Default for ScriptedRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedRunner {
    /// Create a runner whose prerequisite is present.
    pub fn new() -> Self {
        Self {
            prerequisite: PrerequisiteStatus::Present { version: None },
            responses: HashMap::new(),
            executed: Vec::new(),
            probes: Vec::new(),
        }
    }

    /// Set what [`CommandRunner::probe`] reports.
    pub fn set_prerequisite(&mut self, status: PrerequisiteStatus) {
        self.prerequisite = status;
    }

    /// Script the response for an exact command string.
    pub fn on_command(&mut self, command: &str, response: ScriptedCommand) {
        self.responses.insert(command.to_string(), response);
    }

    /// Every command run so far, in order.
    pub fn executed(&self) -> &[ExecutedCommand] {
        &self.executed
    }

    /// Command strings run so far, in order.
    pub fn commands(&self) -> Vec<&str> {
        self.executed.iter().map(|e| e.command.as_str()).collect()
    }

    /// Binaries probed so far.
    pub fn probes(&self) -> &[String] {
        &self.probes
    }

    /// Working directory the given command ran in, if it ran.
    pub fn cwd_of(&self, command: &str) -> Option<&Path> {
        self.executed
            .iter()
            .find(|e| e.command == command)
            .and_then(|e| e.cwd.as_deref())
    }
}

impl CommandRunner for ScriptedRunner {
    fn run_streaming(
        &mut self,
        command: &str,
        options: &CommandOptions,
        on_line: &mut dyn FnMut(OutputLine),
    ) -> Result<CommandResult> {
        self.executed.push(ExecutedCommand {
            command: command.to_string(),
            cwd: options.cwd.clone(),
        });

        let response = self.responses.get(command).cloned().unwrap_or_default();

        if let Some(dir) = &response.creates_dir {
            std::fs::create_dir_all(dir)?;
        }

        let mut stdout = String::new();
        for line in &response.output {
            stdout.push_str(line);
            stdout.push('\n');
            on_line(OutputLine::Stdout(line.clone()));
        }

        if response.exit_code == 0 {
            Ok(CommandResult::success(stdout, String::new(), Duration::ZERO))
        } else {
            Ok(CommandResult::failure(
                Some(response.exit_code),
                stdout,
                String::new(),
                Duration::ZERO,
            ))
        }
    }

    fn probe(&mut self, binary: &str, _version_args: &[String]) -> PrerequisiteStatus {
        self.probes.push(binary.to_string());
        self.prerequisite.clone()
    }
}
