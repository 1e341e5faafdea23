//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Certificate-store drift detector
///
/// Enumerates every certificate store with sigcheck, compares the inventory
/// byte-for-byte against the approved baseline (ref.csv), and raises an
/// alert when anything changed.
#[derive(Parser, Debug)]
#[command(name = "certdrift")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding ref.csv, results.csv and the logs
    #[arg(short = 'C', long, env = "CERTDRIFT_WORKDIR", global = true)]
    pub working_dir: Option<PathBuf>,

    /// Config file (default: <working dir>/certdrift.toml, then the user config)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Increase verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the enumeration tool and compare against the baseline
    Check(CheckArgs),

    /// Print the SHA-256 fingerprint of files
    Fingerprint(FingerprintArgs),

    /// Show the effective configuration
    Config(ConfigArgs),
}

// ============================================================================
// Check command
// ============================================================================

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Do not show the interactive alert on drift (exit code only)
    #[arg(long)]
    pub headless: bool,

    /// Enumeration tool to run instead of the configured one
    #[arg(long, env = "CERTDRIFT_TOOL")]
    pub tool: Option<PathBuf>,

    /// Kill the tool after this many seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

// ============================================================================
// Fingerprint command
// ============================================================================

#[derive(Args, Debug)]
pub struct FingerprintArgs {
    /// Files to fingerprint
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

// ============================================================================
// Config command
// ============================================================================

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Print which config file is in use
    Path,
}
