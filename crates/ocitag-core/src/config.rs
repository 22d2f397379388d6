use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry tuning (optional `[retry]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first. 0 = unbounded.
    pub attempts: u32,
    /// Wait before the second attempt, in seconds.
    pub wait_initial_secs: f64,
    /// Upper bound on any single wait, in seconds.
    pub wait_max_secs: f64,
    /// Random jitter added to each wait, in seconds.
    pub wait_jitter_secs: f64,
    /// Exponential growth factor.
    pub wait_exp_base: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            attempts: 10,
            wait_initial_secs: 1.0,
            wait_max_secs: 120.0,
            wait_jitter_secs: 1.0,
            wait_exp_base: 2.0,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            attempts: (self.attempts > 0).then_some(self.attempts),
            timeout: None,
            wait_initial: Duration::from_secs_f64(self.wait_initial_secs),
            wait_max: Duration::from_secs_f64(self.wait_max_secs),
            wait_jitter: Duration::from_secs_f64(self.wait_jitter_secs),
            wait_exp_base: self.wait_exp_base,
        }
    }
}

/// Global configuration loaded from `~/.config/ocitag/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OcitagConfig {
    /// Explicit path to skopeo; when missing, PATH is searched.
    #[serde(default)]
    pub skopeo_path: Option<PathBuf>,
    /// Explicit path to oras; when missing, PATH is searched.
    #[serde(default)]
    pub oras_path: Option<PathBuf>,
    /// Optional retry tuning; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl OcitagConfig {
    /// The retry policy used for registry-facing tool invocations.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("ocitag")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OcitagConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = OcitagConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: OcitagConfig = toml::from_str(&data)?;
    Ok(cfg)
}
