//! Error types for the drift detection pipeline.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for drift detection operations
pub type Result<T> = std::result::Result<T, DriftError>;

/// Errors that abort a detection run.
///
/// Every variant is fatal for the run that produced it. None of them is ever
/// reported as drift.
#[derive(Error, Debug)]
pub enum DriftError {
    /// The enumeration tool exited with a non-zero status, or was killed
    #[error("enumeration tool exited abnormally ({})", describe_exit(.code))]
    SubprocessAbnormalExit {
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// The enumeration tool did not finish within the configured bound
    #[error("enumeration tool {program} timed out after {secs} seconds")]
    TimedOut {
        /// Program that was running
        program: String,
        /// Configured bound
        secs: u64,
    },

    /// The enumeration tool could not be started
    #[error("failed to launch enumeration tool {program}: {source}")]
    ToolLaunch {
        /// Program that failed to start
        program: String,
        /// Underlying spawn error
        #[source]
        source: std::io::Error,
    },

    /// The operator-approved baseline does not exist
    #[error("baseline artifact not found: {}", .path.display())]
    MissingBaseline {
        /// Expected baseline location
        path: PathBuf,
    },

    /// A log, results, or baseline file operation failed
    #[error("filesystem error on {}: {source}", .path.display())]
    Filesystem {
        /// File the operation targeted
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// The alert surface failed
    #[error("notification failed: {0}")]
    Notify(String),
}

impl DriftError {
    /// Wrap an I/O error with the path it happened on.
    pub fn fs(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Returns true if the operator has to fix the setup before runs can succeed
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingBaseline { .. } | Self::Config(_))
    }
}

fn describe_exit(code: &Option<i32>) -> String {
    code.map_or_else(|| "terminated by signal".to_string(), |c| format!("exit code {c}"))
}
