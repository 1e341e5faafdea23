//! Run log with single-generation rotation.
//!
//! Each run owns one [`LogSession`]. Preparing a session moves the previous
//! log aside to the backup name, replacing any older backup, so at most two
//! log files ever exist in the working directory.

use chrono::{DateTime, Local, Utc};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{error, info, warn};

use crate::error::{DriftError, Result};
use crate::types::layout::is_file;
use crate::types::ArtifactLayout;

/// Timestamp format for log entries.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

/// Owns the current and backup log paths.
#[derive(Debug, Clone)]
pub struct LogManager {
    current: PathBuf,
    backup: PathBuf,
}

impl LogManager {
    #[must_use]
    pub fn new(current: impl Into<PathBuf>, backup: impl Into<PathBuf>) -> Self {
        Self {
            current: current.into(),
            backup: backup.into(),
        }
    }

    /// Log manager for the fixed layout of a working directory.
    #[must_use]
    pub fn for_layout(layout: &ArtifactLayout) -> Self {
        Self::new(layout.log(), layout.log_backup())
    }

    #[must_use]
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    #[must_use]
    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Rotate any existing log and open a fresh session.
    ///
    /// # Errors
    ///
    /// Returns `DriftError::Filesystem` if rotation, creation, or the first
    /// write fails. The run cannot continue without a log.
    pub async fn prepare(&self) -> Result<LogSession> {
        self.rotate().await?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.current)
            .await
            .map_err(|e| DriftError::fs(&self.current, e))?;

        let mut session = LogSession {
            file,
            path: self.current.clone(),
            created_at: Local::now(),
        };
        session.info("Initialized the log file").await?;
        Ok(session)
    }

    async fn rotate(&self) -> Result<()> {
        if !is_file(&self.current).await {
            return Ok(());
        }
        if is_file(&self.backup).await {
            tokio::fs::remove_file(&self.backup)
                .await
                .map_err(|e| DriftError::fs(&self.backup, e))?;
        }
        tokio::fs::rename(&self.current, &self.backup)
            .await
            .map_err(|e| DriftError::fs(&self.current, e))
    }
}

/// Append-only log for one run.
///
/// The handle is closed exactly once, either by [`LogSession::close`] or
/// when the session is dropped on an early return.
#[derive(Debug)]
pub struct LogSession {
    file: File,
    path: PathBuf,
    created_at: DateTime<Local>,
}

impl LogSession {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// When the session opened, which is when the run started.
    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.created_at.with_timezone(&Utc)
    }

    pub async fn info(&mut self, message: &str) -> Result<()> {
        self.write(Level::Info, message).await
    }

    pub async fn warn(&mut self, message: &str) -> Result<()> {
        self.write(Level::Warn, message).await
    }

    pub async fn error(&mut self, message: &str) -> Result<()> {
        self.write(Level::Error, message).await
    }

    /// Append one timestamped entry and flush it to disk.
    pub async fn write(&mut self, level: Level, message: &str) -> Result<()> {
        match level {
            Level::Info => info!(target: "certdrift_core::log", "{message}"),
            Level::Warn => warn!(target: "certdrift_core::log", "{message}"),
            Level::Error => error!(target: "certdrift_core::log", "{message}"),
        }

        let line = format!(
            "{} [{}] {}\n",
            Local::now().format(TIMESTAMP_FORMAT),
            level.as_str(),
            message
        );
        self.file
            .write_all(line.as_bytes())
            .await
            .map_err(|e| DriftError::fs(&self.path, e))?;
        self.file
            .flush()
            .await
            .map_err(|e| DriftError::fs(&self.path, e))
    }

    /// Sync and close the log.
    pub async fn close(self) -> Result<()> {
        self.file
            .sync_all()
            .await
            .map_err(|e| DriftError::fs(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn manager(dir: &TempDir) -> LogManager {
        LogManager::for_layout(&ArtifactLayout::new(dir.path()))
    }

    fn log_files(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn first_prepare_creates_log_without_backup() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);

        let session = mgr.prepare().await.unwrap();
        session.close().await.unwrap();

        assert!(mgr.current_path().is_file());
        assert!(!mgr.backup_path().exists());
        let content = std::fs::read_to_string(mgr.current_path()).unwrap();
        assert!(content.contains("[INFO] Initialized the log file"));
    }

    #[tokio::test]
    async fn rotation_keeps_a_single_backup_generation() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);

        let mut first = mgr.prepare().await.unwrap();
        first.info("first run").await.unwrap();
        first.close().await.unwrap();

        let mut second = mgr.prepare().await.unwrap();
        second.info("second run").await.unwrap();
        second.close().await.unwrap();

        let third = mgr.prepare().await.unwrap();
        third.close().await.unwrap();

        assert_eq!(
            log_files(&dir),
            ["sigcheckWrapper.log", "sigcheckWrapper.log.bak"]
        );
        let backup = std::fs::read_to_string(mgr.backup_path()).unwrap();
        assert!(backup.contains("second run"));
        assert!(!backup.contains("first run"));
        let current = std::fs::read_to_string(mgr.current_path()).unwrap();
        assert!(!current.contains("second run"));
    }

    #[tokio::test]
    async fn entries_are_timestamped_and_leveled() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = manager(&dir);

        let mut session = mgr.prepare().await.unwrap();
        session.warn("tool wrote to stderr").await.unwrap();
        session.error("tool exited with 3").await.unwrap();
        session.close().await.unwrap();

        let content = std::fs::read_to_string(mgr.current_path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].ends_with("[WARN] tool wrote to stderr"));
        assert!(lines[2].ends_with("[ERROR] tool exited with 3"));

        // Timestamps are fixed-width, so lexical order is chronological.
        let stamps: Vec<&str> = lines.iter().map(|l| &l[..26]).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
    }

    #[tokio::test]
    async fn session_start_is_reported_in_utc() {
        let dir = tempfile::tempdir().unwrap();
        let before = Utc::now();
        let session = manager(&dir).prepare().await.unwrap();
        let started = session.started_at();
        session.close().await.unwrap();

        assert!(started >= before);
        assert!(started <= Utc::now());
    }

    #[tokio::test]
    async fn unwritable_location_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mgr = LogManager::new(
            dir.path().join("missing").join("run.log"),
            dir.path().join("missing").join("run.log.bak"),
        );
        assert!(matches!(mgr.prepare().await, Err(DriftError::Filesystem { .. })));
    }
}
