//! Shell command execution.

use crate::error::{Result, SetupError};
use std::collections::HashMap;
use std::io::{ErrorKind, Read};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use super::platform::{shell_executable, shell_flag};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Exit code as an integer, with `-1` standing in for a signal kill.
    pub fn code(&self) -> i32 {
        self.exit_code.unwrap_or(-1)
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: HashMap<String, String>,
}

/// Output line from command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLine {
    Stdout(String),
    Stderr(String),
}

impl OutputLine {
    /// The decoded line text, without its line terminator.
    pub fn text(&self) -> &str {
        match self {
            Self::Stdout(s) | Self::Stderr(s) => s,
        }
    }
}

fn shell_command(command: &str, options: &CommandOptions) -> Command {
    let mut cmd = Command::new(shell_executable());
    cmd.arg(shell_flag());
    cmd.arg(command);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd
}

/// Execute a command with streaming output.
///
/// Each line of stdout and stderr is decoded (invalid UTF-8 becomes U+FFFD)
/// and handed to `on_line` as soon as the child writes it. `\n`, `\r` and
/// `\r\n` all end a line. Lines of one
/// stream arrive in the order they were written. Returns once both streams
/// are closed and the child has exited; a non-zero exit is not an error.
pub fn execute_streaming(
    command: &str,
    options: &CommandOptions,
    on_line: &mut dyn FnMut(OutputLine),
) -> Result<CommandResult> {
    let start = Instant::now();
    let mut cmd = shell_command(command, options);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());

    let mut child = cmd.spawn().map_err(|e| {
        tracing::debug!("Failed to spawn '{}': {}", command, e);
        SetupError::CommandFailed {
            command: command.to_string(),
        }
    })?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow::anyhow!("stdout of '{}' was not captured", command))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow::anyhow!("stderr of '{}' was not captured", command))?;

    let (tx, rx) = mpsc::channel();
    let stdout_handle = spawn_reader(stdout, tx.clone(), OutputLine::Stdout);
    let stderr_handle = spawn_reader(stderr, tx, OutputLine::Stderr);

    // Ends once both readers hit EOF and drop their senders.
    for line in rx {
        on_line(line);
    }

    let stdout_output = stdout_handle
        .join()
        .map_err(|_| anyhow::anyhow!("stdout reader for '{}' panicked", command))?;
    let stderr_output = stderr_handle
        .join()
        .map_err(|_| anyhow::anyhow!("stderr reader for '{}' panicked", command))?;

    let status = child.wait().map_err(|_| SetupError::CommandFailed {
        command: command.to_string(),
    })?;

    let duration = start.elapsed();

    if status.success() {
        Ok(CommandResult::success(
            stdout_output,
            stderr_output,
            duration,
        ))
    } else {
        Ok(CommandResult::failure(
            status.code(),
            stdout_output,
            stderr_output,
            duration,
        ))
    }
}

/// Decode one raw line of child output, dropping its terminator.
pub fn decode_line(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

fn spawn_reader<R>(
    mut stream: R,
    tx: mpsc::Sender<OutputLine>,
    wrap: fn(String) -> OutputLine,
) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut splitter = LineSplitter::default();
        let mut output = String::new();
        let mut chunk = [0u8; 8192];
        let mut emit = |line: String| {
            output.push_str(&line);
            output.push('\n');
            let _ = tx.send(wrap(line));
        };
        loop {
            match stream.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => splitter.feed(&chunk[..n], &mut emit),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        splitter.finish(&mut emit);
        output
    })
}

/// Splits a byte stream into lines ended by `\n`, `\r` or `\r\n`.
///
/// A `\r` ends its line right away, so progress output that only
/// rewrites the current line is delivered without waiting for a `\n`.
#[derive(Debug, Default)]
struct LineSplitter {
    pending: Vec<u8>,
    after_cr: bool,
}

impl LineSplitter {
    fn feed(&mut self, bytes: &[u8], emit: &mut dyn FnMut(String)) {
        for &byte in bytes {
            match byte {
                b'\n' if self.after_cr => self.after_cr = false,
                b'\n' | b'\r' => {
                    self.after_cr = byte == b'\r';
                    emit(decode_line(&self.pending));
                    self.pending.clear();
                }
                _ => {
                    self.after_cr = false;
                    self.pending.push(byte);
                }
            }
        }
    }

    fn finish(&mut self, emit: &mut dyn FnMut(String)) {
        if !self.pending.is_empty() {
            emit(decode_line(&self.pending));
            self.pending.clear();
        }
    }
}
