//! Summary of a completed detection run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::fingerprint::{Comparison, Fingerprint, Verdict};

/// What a finished run observed and decided.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Working directory the artifacts live in
    pub working_dir: PathBuf,
    /// Enumeration tool exit code (always 0 for a completed run)
    pub exit_code: i32,
    /// Number of records written to the results artifact
    pub records: usize,
    /// Whether the tool wrote anything to stderr
    pub stderr_warning: bool,
    /// Fingerprint of the results artifact
    pub results_fingerprint: Fingerprint,
    /// Fingerprint of the baseline artifact
    pub baseline_fingerprint: Fingerprint,
    /// Match or drift
    pub verdict: Verdict,
    /// Whether the alert surface was raised
    pub alerted: bool,
    /// Why raising the alert failed, if it did
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_error: Option<String>,
}

impl RunReport {
    /// Fingerprints and verdict as a [`Comparison`].
    #[must_use]
    pub const fn comparison(&self) -> Comparison {
        Comparison {
            results: self.results_fingerprint,
            baseline: self.baseline_fingerprint,
            verdict: self.verdict,
        }
    }
}
