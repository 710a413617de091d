use crate::scratch;
use crate::stability::{PollPolicy, DEFAULT_IN_PROGRESS_SUFFIXES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global configuration loaded from `~/.config/dlcheck/config.toml`.
///
/// Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DlcheckConfig {
    /// Sleep between poll iterations, in milliseconds.
    pub poll_interval_ms: u64,
    /// Gap between the two size samples, in milliseconds.
    pub settle_window_ms: u64,
    /// Timeout used when the caller gives none.
    pub default_timeout_secs: u64,
    /// File name suffixes that mark an unfinished download.
    pub in_progress_suffixes: Vec<String>,
    /// Name prefix for scratch directories.
    pub scratch_prefix: String,
    /// Where scratch directories are created (None = system temp dir).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scratch_parent: Option<PathBuf>,
}

impl Default for DlcheckConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 500,
            settle_window_ms: 1000,
            default_timeout_secs: 10,
            in_progress_suffixes: DEFAULT_IN_PROGRESS_SUFFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            scratch_prefix: scratch::DEFAULT_PREFIX.to_string(),
            scratch_parent: None,
        }
    }
}

impl DlcheckConfig {
    /// Poll policy built from these settings, validated.
    pub fn poll_policy(&self) -> crate::error::Result<PollPolicy> {
        let policy = PollPolicy {
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            settle_window: Duration::from_millis(self.settle_window_ms),
            in_progress_suffixes: self.in_progress_suffixes.clone(),
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("dlcheck")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DlcheckConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = DlcheckConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit path; the file must exist.
pub fn load_from(path: &Path) -> Result<DlcheckConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: DlcheckConfig = toml::from_str(&data)
        .with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn default_config_values() {
        let cfg = DlcheckConfig::default();
        assert_eq!(cfg.poll_interval_ms, 500);
        assert_eq!(cfg.settle_window_ms, 1000);
        assert_eq!(cfg.default_timeout_secs, 10);
        assert_eq!(cfg.in_progress_suffixes, vec![".crdownload", ".part", ".tmp"]);
        assert_eq!(cfg.scratch_prefix, "dlcheck_downloads_");
        assert!(cfg.scratch_parent.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = DlcheckConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: DlcheckConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r#"
            settle_window_ms = 250
            in_progress_suffixes = [".crdownload", ".download"]
            scratch_parent = "/var/tmp/dl"
        "#;
        let cfg: DlcheckConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.settle_window_ms, 250);
        assert_eq!(cfg.poll_interval_ms, 500);
        assert_eq!(cfg.in_progress_suffixes, vec![".crdownload", ".download"]);
        assert_eq!(cfg.scratch_parent, Some(PathBuf::from("/var/tmp/dl")));

        let policy = cfg.poll_policy().unwrap();
        assert_eq!(policy.settle_window, Duration::from_millis(250));
        assert_eq!(policy.poll_interval, Duration::from_millis(500));
    }

    #[test]
    fn zero_interval_is_invalid() {
        let cfg = DlcheckConfig {
            poll_interval_ms: 0,
            ..DlcheckConfig::default()
        };
        assert!(matches!(cfg.poll_policy(), Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn load_from_file_and_report_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("config.toml");
        fs::write(&good, "default_timeout_secs = 3\n").unwrap();
        assert_eq!(load_from(&good).unwrap().default_timeout(), Duration::from_secs(3));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "default_timeout_secs = \"soon\"\n").unwrap();
        let err = load_from(&bad).unwrap_err().to_string();
        assert!(err.contains("bad.toml"), "got {err}");
    }
}
