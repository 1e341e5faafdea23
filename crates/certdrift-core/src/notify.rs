//! Alert capability invoked on drift.
//!
//! The pipeline only decides *that* an alert is due. Rendering (tray icon,
//! terminal banner, menu handling) belongs to whoever implements
//! [`Notifier`].

use std::path::PathBuf;

use crate::error::Result;
use crate::types::{ArtifactLayout, Comparison};

/// Tooltip text shown on the alert surface.
pub const ALERT_MESSAGE: &str =
    "certdrift has found a discrepancy with your computer certificates!";

/// Context handed to the alert surface.
#[derive(Debug, Clone)]
pub struct DriftAlert {
    /// Human-readable summary
    pub message: String,
    /// Directory to reveal in the file browser
    pub working_dir: PathBuf,
    /// Freshly written results artifact
    pub results_path: PathBuf,
    /// Baseline it was compared against
    pub baseline_path: PathBuf,
    /// Fingerprints and verdict
    pub comparison: Comparison,
}

impl DriftAlert {
    #[must_use]
    pub fn new(layout: &ArtifactLayout, comparison: Comparison) -> Self {
        Self {
            message: ALERT_MESSAGE.to_string(),
            working_dir: layout.working_dir().to_path_buf(),
            results_path: layout.results(),
            baseline_path: layout.baseline(),
            comparison,
        }
    }
}

/// Something that can raise a user-visible drift alert.
///
/// Implementations may block until the operator dismisses the alert; the
/// run's file-side work is already finished when this is called.
pub trait Notifier {
    fn notify(&self, alert: &DriftAlert) -> Result<()>;
}

impl<T: Notifier + ?Sized> Notifier for &T {
    fn notify(&self, alert: &DriftAlert) -> Result<()> {
        (**self).notify(alert)
    }
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&self, alert: &DriftAlert) -> Result<()> {
        (**self).notify(alert)
    }
}

/// Notifier for headless and scheduled runs.
///
/// The verdict is already in the run log and the report; nothing is shown.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _alert: &DriftAlert) -> Result<()> {
        Ok(())
    }
}
