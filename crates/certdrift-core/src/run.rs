//! Run orchestration.
//!
//! ```text
//! Init -> LoggingReady -> Collecting -> Aborted
//!                                    -> Collected -> Comparing -> Match -> Done
//!                                                              -> Drift -> (notify) -> Done
//! ```
//!
//! The log is closed exactly once on every path. The notifier is only
//! reached on drift, after the log has recorded the verdict and been closed.
//! A failing notifier does not change the verdict: the report comes back
//! with `alerted == false` and the failure in `alert_error`.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::collect::{write_results, InventoryCollector};
use crate::compare::compare;
use crate::config::{DriftConfig, ToolConfig};
use crate::error::{DriftError, Result};
use crate::log::{LogManager, LogSession};
use crate::notify::{DriftAlert, Notifier};
use crate::types::{ArtifactLayout, RunReport};

/// Pipeline states, in the order a run moves through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    LoggingReady,
    Collecting,
    Aborted,
    Collected,
    Comparing,
    Match,
    Drift,
    Done,
}

/// Sequences one detection run against a working directory.
///
/// Runs against the same directory must never overlap: log rotation and
/// results replacement assume a single writer.
#[derive(Debug)]
pub struct Orchestrator<N> {
    layout: ArtifactLayout,
    collector: InventoryCollector,
    notifier: N,
}

impl<N: Notifier> Orchestrator<N> {
    #[must_use]
    pub const fn new(layout: ArtifactLayout, tool: ToolConfig, notifier: N) -> Self {
        Self {
            layout,
            collector: InventoryCollector::new(tool),
            notifier,
        }
    }

    #[must_use]
    pub fn from_config(config: &DriftConfig, notifier: N) -> Self {
        Self::new(
            ArtifactLayout::new(config.working_dir()),
            config.tool.clone(),
            notifier,
        )
    }

    #[must_use]
    pub const fn layout(&self) -> &ArtifactLayout {
        &self.layout
    }

    /// Execute one run.
    ///
    /// # Errors
    ///
    /// Any [`DriftError`] from logging, collection or comparison is fatal
    /// for the run, and no alert is raised for it. If the log itself cannot
    /// be prepared, the error carries no log entry and the caller must
    /// report it. Notifier failures are not errors here.
    pub async fn run(&self) -> Result<RunReport> {
        let mut state = RunState::Init;

        let mut log = LogManager::for_layout(&self.layout).prepare().await?;
        let started_at = log.started_at();
        transition(&mut state, RunState::LoggingReady);

        let outcome = self.detect(&mut log, &mut state, started_at).await;
        let mut report = match outcome {
            Ok(report) => {
                log.info("Job completed, closing files...").await?;
                log.close().await?;
                report
            }
            Err(err) => {
                if let Err(log_err) = log.error(&format!("Run aborted: {err}")).await {
                    warn!(error = %log_err, "could not record run failure in log");
                }
                if let Err(close_err) = log.close().await {
                    warn!(error = %close_err, "could not close log after failure");
                }
                return Err(err);
            }
        };

        if report.verdict.is_drift() {
            let alert = DriftAlert::new(&self.layout, report.comparison());
            match self.notifier.notify(&alert) {
                Ok(()) => report.alerted = true,
                Err(err) => {
                    warn!(error = %err, "drift detected but the alert could not be raised");
                    report.alert_error = Some(err.to_string());
                }
            }
        }
        transition(&mut state, RunState::Done);
        Ok(report)
    }

    async fn detect(
        &self,
        log: &mut LogSession,
        state: &mut RunState,
        started_at: DateTime<Utc>,
    ) -> Result<RunReport> {
        transition(state, RunState::Collecting);
        log.info(&format!(
            "Running {} on all certificate stores",
            self.collector.tool().program.display()
        ))
        .await?;

        let collection = match self.collector.collect().await {
            Ok(c) => c,
            Err(e) => {
                transition(state, RunState::Aborted);
                return Err(e);
            }
        };

        // Checked before the prior results are touched: an abnormal capture
        // must not replace the last good artifact.
        if !collection.exited_normally() {
            transition(state, RunState::Aborted);
            return Err(DriftError::SubprocessAbnormalExit {
                code: collection.exit_code,
            });
        }

        let stderr_warning = collection.has_stderr();
        if stderr_warning {
            log.warn("The enumeration tool reported an error").await?;
            log.warn(collection.stderr.trim()).await?;
        }
        transition(state, RunState::Collected);

        write_results(&self.layout.results(), &collection.snapshot, log).await?;

        transition(state, RunState::Comparing);
        let comparison = compare(&self.layout.results(), &self.layout.baseline()).await?;

        if comparison.verdict.is_drift() {
            log.info(&format!(
                "The files don't match (results {}, baseline {}), raising the drift alert",
                comparison.results, comparison.baseline
            ))
            .await?;
            transition(state, RunState::Drift);
        } else {
            log.info(&format!("The files have the same hash {}", comparison.results))
                .await?;
            transition(state, RunState::Match);
        }

        Ok(RunReport {
            started_at,
            working_dir: self.layout.working_dir().to_path_buf(),
            exit_code: 0,
            records: collection.snapshot.len(),
            stderr_warning,
            results_fingerprint: comparison.results,
            baseline_fingerprint: comparison.baseline,
            verdict: comparison.verdict,
            alerted: false,
            alert_error: None,
        })
    }
}

fn transition(state: &mut RunState, next: RunState) {
    debug!(from = ?*state, to = ?next, "run state");
    *state = next;
}
