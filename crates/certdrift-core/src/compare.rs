//! Results vs. baseline comparison.
//!
//! Strict byte equality via SHA-256. No whitespace, line-order or
//! certificate-order tolerance is applied: any change trips drift.

use std::path::Path;
use tracing::debug;

use crate::error::{DriftError, Result};
use crate::hash::sha256_file;
use crate::types::layout::is_file;
use crate::types::Comparison;

/// Fingerprint both artifacts and derive the verdict.
///
/// # Errors
///
/// - `DriftError::MissingBaseline` if the baseline does not exist. Absence
///   is a configuration problem, never drift.
/// - `DriftError::Filesystem` if either file cannot be read.
pub async fn compare(results: &Path, baseline: &Path) -> Result<Comparison> {
    if !is_file(baseline).await {
        return Err(DriftError::MissingBaseline {
            path: baseline.to_path_buf(),
        });
    }

    let results_fp = sha256_file(results).await?;
    let baseline_fp = sha256_file(baseline).await?;
    let comparison = Comparison::new(results_fp, baseline_fp);

    debug!(
        results = %comparison.results,
        baseline = %comparison.baseline,
        verdict = %comparison.verdict,
        "compared fingerprints"
    );
    Ok(comparison)
}
