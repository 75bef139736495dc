//! Boundary between the install workflow and the operating system.

use crate::error::Result;
use crate::requirements::{probe_prerequisite, PrerequisiteStatus};

use super::command::{execute_streaming, CommandOptions, CommandResult, OutputLine};

/// Runs the external processes the install workflow depends on.
///
/// [`SystemRunner`] talks to the real OS; tests substitute
/// [`ScriptedRunner`](super::ScriptedRunner).
pub trait CommandRunner {
    /// Run a shell command, streaming each output line to `on_line`.
    fn run_streaming(
        &mut self,
        command: &str,
        options: &CommandOptions,
        on_line: &mut dyn FnMut(OutputLine),
    ) -> Result<CommandResult>;

    /// Query a prerequisite binary for presence.
    fn probe(&mut self, binary: &str, version_args: &[String]) -> PrerequisiteStatus;
}

/// [`CommandRunner`] backed by real child processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run_streaming(
        &mut self,
        command: &str,
        options: &CommandOptions,
        on_line: &mut dyn FnMut(OutputLine),
    ) -> Result<CommandResult> {
        execute_streaming(command, options, on_line)
    }

    fn probe(&mut self, binary: &str, version_args: &[String]) -> PrerequisiteStatus {
        probe_prerequisite(binary, version_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn system_runner_streams_real_output() {
        let mut runner = SystemRunner;
        let mut lines = Vec::new();
        let result = runner
            .run_streaming("echo via-runner", &CommandOptions::default(), &mut |l| {
                lines.push(l.text().to_string())
            })
            .unwrap();

        assert!(result.success);
        assert_eq!(lines, vec!["via-runner"]);
    }

    #[test]
    fn system_runner_reports_missing_binary() {
        let mut runner = SystemRunner;
        let status = runner.probe("neuro-setup-no-such-binary-x9", &["-v".to_string()]);
        assert_eq!(status, PrerequisiteStatus::Absent);
    }
}
