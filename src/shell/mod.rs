//! Shell command execution.

pub mod command;
pub mod mock;
pub mod platform;
pub mod runner;

pub use command::{decode_line, execute_streaming, CommandOptions, CommandResult, OutputLine};
pub use mock::{ExecutedCommand, ScriptedCommand, ScriptedRunner};
pub use platform::{is_ci, shell_executable, shell_flag};
pub use runner::{CommandRunner, SystemRunner};
