//! Enumeration tool invocation and results persistence.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::config::ToolConfig;
use crate::error::{DriftError, Result};
use crate::log::LogSession;
use crate::types::layout::is_file;
use crate::types::InventorySnapshot;

/// Everything the tool produced for one invocation.
#[derive(Debug, Clone)]
pub struct Collection {
    /// Stdout split into records, bytes untouched
    pub snapshot: InventorySnapshot,
    /// Exit code, `None` when terminated by a signal
    pub exit_code: Option<i32>,
    /// Stderr text, lossily decoded
    pub stderr: String,
}

impl Collection {
    /// Exit code 0 is the only normal outcome.
    #[must_use]
    pub const fn exited_normally(&self) -> bool {
        matches!(self.exit_code, Some(0))
    }

    #[must_use]
    pub fn has_stderr(&self) -> bool {
        !self.stderr.trim().is_empty()
    }
}

/// Runs the enumeration tool as a bounded subprocess.
#[derive(Debug, Clone)]
pub struct InventoryCollector {
    tool: ToolConfig,
}

impl InventoryCollector {
    #[must_use]
    pub const fn new(tool: ToolConfig) -> Self {
        Self { tool }
    }

    #[must_use]
    pub const fn tool(&self) -> &ToolConfig {
        &self.tool
    }

    /// Spawn the tool, capture both streams fully, and wait for exit.
    ///
    /// The child is killed if it outlives the configured timeout.
    ///
    /// # Errors
    ///
    /// - `DriftError::ToolLaunch` if the program cannot be started
    /// - `DriftError::TimedOut` if it does not exit in time
    pub async fn collect(&self) -> Result<Collection> {
        let program = self.tool.program.display().to_string();
        let timeout = self.tool.timeout();
        debug!(program = %program, args = ?self.tool.args, timeout_secs = timeout.as_secs(), "spawning enumeration tool");

        let child = Command::new(&self.tool.program)
            .args(&self.tool.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DriftError::ToolLaunch {
                program: program.clone(),
                source,
            })?;

        // Dropping the pending future drops the child, which kills it.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| DriftError::ToolLaunch {
                program: program.clone(),
                source,
            })?,
            Err(_) => {
                return Err(DriftError::TimedOut {
                    program,
                    secs: round_up_secs(timeout),
                })
            }
        };

        let collection = Collection {
            snapshot: InventorySnapshot::from_bytes(&output.stdout),
            exit_code: output.status.code(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };
        debug!(
            exit_code = ?collection.exit_code,
            records = collection.snapshot.len(),
            stderr_bytes = output.stderr.len(),
            "enumeration tool finished"
        );
        Ok(collection)
    }
}

fn round_up_secs(d: Duration) -> u64 {
    d.as_secs() + u64::from(d.subsec_nanos() > 0)
}

/// Replace the results artifact with a freshly captured snapshot.
///
/// Only call this after the capture has been accepted: the prior artifact
/// is deleted first, so an aborted write leaves no results at all.
///
/// # Errors
///
/// Returns `DriftError::Filesystem` if deletion, creation, or writing fails.
pub async fn write_results(
    path: &Path,
    snapshot: &InventorySnapshot,
    log: &mut LogSession,
) -> Result<()> {
    log.info("Checking for previous instance of the results file").await?;
    if is_file(path).await {
        log.info("Deleting the old results file").await?;
        tokio::fs::remove_file(path)
            .await
            .map_err(|e| DriftError::fs(path, e))?;
    }

    log.info("Opening file to save current results to").await?;
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| DriftError::fs(path, e))?;
    file.write_all(&snapshot.to_artifact_bytes())
        .await
        .map_err(|e| DriftError::fs(path, e))?;
    file.sync_all().await.map_err(|e| DriftError::fs(path, e))?;
    log.info(&format!("Wrote {} records to the results file", snapshot.len()))
        .await
}
