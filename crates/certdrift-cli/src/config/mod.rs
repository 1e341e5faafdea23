//! Configuration lookup.
//!
//! The first file found wins:
//!
//! 1. `--config <path>` (must exist)
//! 2. `<working dir>/certdrift.toml`
//! 3. `<platform config dir>/certdrift/config.toml`
//!
//! With no file at all, built-in defaults apply.

use anyhow::{Context as _, Result};
use certdrift_core::DriftConfig;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up inside the working directory.
pub const WORKDIR_CONFIG_FILE: &str = "certdrift.toml";

/// Effective configuration and the file it came from.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DriftConfig,
    pub source: Option<PathBuf>,
}

/// Per-user config file path.
pub fn user_config_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("io", "certdrift", "certdrift")
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

    Ok(dirs.config_dir().join("config.toml"))
}

/// Candidate files in lookup order.
fn candidates(working_dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![working_dir.join(WORKDIR_CONFIG_FILE)];
    if let Ok(user) = user_config_path() {
        paths.push(user);
    }
    paths
}

/// Resolve and load the configuration.
///
/// `working_dir` from the command line overrides the file's `working_dir`.
pub fn load(explicit: Option<&Path>, working_dir: Option<&Path>) -> Result<LoadedConfig> {
    let lookup_dir = working_dir.map_or_else(|| PathBuf::from("."), Path::to_path_buf);

    let source = if let Some(path) = explicit {
        if !path.is_file() {
            anyhow::bail!("Config file not found: {}", path.display());
        }
        Some(path.to_path_buf())
    } else {
        candidates(&lookup_dir).into_iter().find(|p| p.is_file())
    };

    let mut config = match &source {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            DriftConfig::load(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?
        }
        None => DriftConfig::default(),
    };

    if let Some(dir) = working_dir {
        config.working_dir = Some(dir.to_path_buf());
    }

    Ok(LoadedConfig { config, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn working_dir_file_is_found() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(WORKDIR_CONFIG_FILE),
            "[tool]\nprogram = \"/opt/sigcheck\"\n",
        )
        .unwrap();

        let loaded = load(None, Some(dir.path())).unwrap();
        assert_eq!(loaded.source, Some(dir.path().join(WORKDIR_CONFIG_FILE)));
        assert_eq!(loaded.config.tool.program, PathBuf::from("/opt/sigcheck"));
        assert_eq!(loaded.config.working_dir(), dir.path());
    }

    #[test]
    fn command_line_working_dir_wins() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("custom.toml");
        std::fs::write(&cfg, "working_dir = \"/elsewhere\"\n").unwrap();

        let loaded = load(Some(cfg.as_path()), Some(dir.path())).unwrap();
        assert_eq!(loaded.config.working_dir(), dir.path());

        let loaded = load(Some(cfg.as_path()), None).unwrap();
        assert_eq!(loaded.config.working_dir(), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(dir.path().join("absent.toml").as_path()), None).is_err());
    }
}
