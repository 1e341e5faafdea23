//! Run configuration: where artifacts live and how the tool is invoked.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{DriftError, Result};

/// Default enumeration tool program name.
#[cfg(windows)]
pub const DEFAULT_TOOL: &str = "sigcheck.exe";
/// Default enumeration tool program name.
#[cfg(not(windows))]
pub const DEFAULT_TOOL: &str = "sigcheck";

/// Arguments meaning "all certificate stores, with cryptographic summary".
pub const DEFAULT_TOOL_ARGS: &[&str] = &["-t", "*", "-c"];

/// Configuration for a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftConfig {
    /// Directory holding the baseline, results and logs (default: current dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<PathBuf>,

    /// Enumeration tool invocation.
    #[serde(default)]
    pub tool: ToolConfig,
}

/// How to invoke the enumeration tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Program path or name resolved through `PATH`.
    #[serde(default = "default_program")]
    pub program: PathBuf,

    /// Arguments passed verbatim.
    #[serde(default = "default_args")]
    pub args: Vec<String>,

    /// Upper bound on the tool's runtime (seconds).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: default_program(),
            args: default_args(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ToolConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl DriftConfig {
    /// Load config from a TOML file, falling back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| DriftError::fs(path, e))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| DriftError::Config(format!("{}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no run could succeed with.
    pub fn validate(&self) -> Result<()> {
        if self.tool.program.as_os_str().is_empty() {
            return Err(DriftError::Config("tool.program must not be empty".into()));
        }
        if self.tool.timeout_secs == 0 {
            return Err(DriftError::Config("tool.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Effective working directory.
    #[must_use]
    pub fn working_dir(&self) -> PathBuf {
        self.working_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

// Default value functions for serde.
fn default_program() -> PathBuf {
    PathBuf::from(DEFAULT_TOOL)
}

fn default_args() -> Vec<String> {
    DEFAULT_TOOL_ARGS.iter().map(ToString::to_string).collect()
}

const fn default_timeout_secs() -> u64 {
    300
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DriftConfig::default();
        assert_eq!(config.tool.program, PathBuf::from(DEFAULT_TOOL));
        assert_eq!(config.tool.args, ["-t", "*", "-c"]);
        assert_eq!(config.tool.timeout(), Duration::from_secs(300));
        assert_eq!(config.working_dir(), PathBuf::from("."));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DriftConfig::load(&dir.path().join("certdrift.toml")).unwrap();
        assert_eq!(config, DriftConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certdrift.toml");
        std::fs::write(&path, "working_dir = \"/var/lib/certdrift\"\n[tool]\ntimeout_secs = 30\n")
            .unwrap();

        let config = DriftConfig::load(&path).unwrap();
        assert_eq!(config.working_dir(), PathBuf::from("/var/lib/certdrift"));
        assert_eq!(config.tool.timeout_secs, 30);
        assert_eq!(config.tool.args, ["-t", "*", "-c"]);
    }

    #[test]
    fn malformed_or_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certdrift.toml");

        std::fs::write(&path, "[tool\n").unwrap();
        assert!(matches!(DriftConfig::load(&path), Err(DriftError::Config(_))));

        std::fs::write(&path, "[tool]\ntimeout_secs = 0\n").unwrap();
        assert!(matches!(DriftConfig::load(&path), Err(DriftError::Config(_))));
    }

    #[test]
    fn test_config_serialization() {
        let config = DriftConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: DriftConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
