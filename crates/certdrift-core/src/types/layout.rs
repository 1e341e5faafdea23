//! Fixed file layout inside the working directory.

use std::path::{Path, PathBuf};

/// Operator-provided baseline inventory.
pub const BASELINE_FILE: &str = "ref.csv";
/// Results of the most recent run.
pub const RESULTS_FILE: &str = "results.csv";
/// Current run log.
pub const LOG_FILE: &str = "sigcheckWrapper.log";
/// Previous run log, the only retained generation.
pub const LOG_BACKUP_FILE: &str = "sigcheckWrapper.log.bak";

/// Artifact paths resolved against one working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactLayout {
    working_dir: PathBuf,
}

impl ArtifactLayout {
    /// Resolve the layout under `working_dir`.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
        }
    }

    /// Directory holding every artifact.
    #[must_use]
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    #[must_use]
    pub fn baseline(&self) -> PathBuf {
        self.working_dir.join(BASELINE_FILE)
    }

    #[must_use]
    pub fn results(&self) -> PathBuf {
        self.working_dir.join(RESULTS_FILE)
    }

    #[must_use]
    pub fn log(&self) -> PathBuf {
        self.working_dir.join(LOG_FILE)
    }

    #[must_use]
    pub fn log_backup(&self) -> PathBuf {
        self.working_dir.join(LOG_BACKUP_FILE)
    }
}

/// Whether `path` exists and is a regular file. Errors read as absent.
pub(crate) async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file())
}
