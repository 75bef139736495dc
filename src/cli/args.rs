//! CLI argument definitions.
//!
//! Running with no arguments performs the stock install in the current
//! directory. Every flag is optional.

use clap::Parser;
use std::path::PathBuf;

const EXIT_STATUS_HELP: &str = "\
Exit status:
  0  the project is ready
  1  Node.js is missing, scaffolding failed, or an error occurred

Errors and warnings are written to stderr.";

/// Set up a NeuroComposer project: check Node.js, scaffold with Vite, install dependencies.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "neuro-setup")]
#[command(author, version, about, long_about = None)]
#[command(after_help = EXIT_STATUS_HELP)]
pub struct Cli {
    /// Path to config file (overrides <project-dir>/.neuro-setup.yml)
    #[arg(short, long, env = "NEURO_SETUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory to create the project in (defaults to current directory)
    #[arg(short = 'd', long)]
    pub project_dir: Option<PathBuf>,

    /// Fail if a dependency install exits non-zero
    #[arg(long)]
    pub strict: bool,

    /// Preview commands without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Exit without waiting for Enter at the end
    #[arg(long)]
    pub no_pause: bool,

    /// Show verbose output
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}
