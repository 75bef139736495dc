//! Non-interactive UI for CI/headless environments.

use std::io::Write;

use crate::error::Result;

use super::{OutputMode, ProgressSpinner, SetupTheme, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Output is never colored and spinners are never drawn. The final prompt
/// is printed but not waited on, so piped or CI runs never block.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: SetupTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: SetupTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", msg);
        }
    }

    fn notice(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_success(msg));
        }
    }

    fn info(&mut self, msg: &str) {
        println!("{}", self.theme.format_info(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            println!("{}", self.theme.format_header(title));
        }
    }

    fn show_command(&mut self, command: &str) {
        println!("{}", self.theme.format_command(command));
    }

    fn command_output(&mut self, line: &str) {
        if self.mode.shows_command_output() {
            println!("{}", line);
            let _ = std::io::stdout().flush();
        }
    }

    fn start_spinner(&mut self, _message: &str) -> Box<dyn SpinnerHandle> {
        Box::new(ProgressSpinner::hidden())
    }

    fn pause(&mut self, prompt: &str) -> Result<()> {
        println!("{}", prompt);
        Ok(())
    }
}
