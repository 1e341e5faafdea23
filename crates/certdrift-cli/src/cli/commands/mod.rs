//! Command implementations.

pub mod check;
pub mod config;
pub mod fingerprint;

use certdrift_core::DriftConfig;
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: DriftConfig,

    /// File the configuration was loaded from, if any
    pub config_source: Option<PathBuf>,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}
