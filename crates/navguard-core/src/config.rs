use crate::page::Readiness;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Retry parameters for resilient navigation (`[navigation]` in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Maximum number of navigation attempts (including the first).
    pub max_attempts: u32,
    /// Base delay in milliseconds; the wait after attempt `n` is `n * base_delay_ms`.
    pub base_delay_ms: u64,
    /// Per-attempt timeout in milliseconds (None = transport default).
    pub timeout_ms: Option<u64>,
    /// When a navigation counts as loaded.
    pub readiness: Readiness,
    /// Status codes that trigger another attempt.
    pub retryable_statuses: Vec<u16>,
    /// Case-insensitive text that marks a soft-failure page.
    pub failure_patterns: Vec<String>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_ms: 500,
            timeout_ms: None,
            readiness: Readiness::DomContentLoaded,
            retryable_statuses: vec![502, 503, 504],
            failure_patterns: vec!["502 Bad Gateway".to_string()],
        }
    }
}

/// HTTP transport settings for the curl-backed page (`[transport]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    pub connect_timeout_secs: u64,
    /// Navigation timeout used when a request carries no per-attempt timeout.
    pub navigation_timeout_ms: u64,
    pub max_redirections: u32,
    pub user_agent: String,
    /// Refuse navigation to known ad/tracker hosts.
    pub ad_block: bool,
    /// Custom blocklist; None = built-in ad/tracker hosts.
    pub blocked_hosts: Option<Vec<String>>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            navigation_timeout_ms: 20_000,
            max_redirections: 10,
            user_agent: concat!("navguard/", env!("CARGO_PKG_VERSION")).to_string(),
            ad_block: true,
            blocked_hosts: None,
        }
    }
}

/// Global configuration loaded from `~/.config/navguard/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavguardConfig {
    /// Base URL that relative targets are resolved against.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub transport: TransportConfig,
}

impl NavguardConfig {
    /// Resolves `target` against `base_url`. Absolute URLs pass through.
    pub fn resolve_target(&self, target: &str) -> Result<String> {
        if let Ok(abs) = url::Url::parse(target) {
            return Ok(abs.to_string());
        }
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("relative target {target} needs base_url in config"))?;
        let base =
            url::Url::parse(base).with_context(|| format!("invalid base_url in config: {base}"))?;
        let joined = base
            .join(target)
            .with_context(|| format!("cannot resolve {target} against {base}"))?;
        Ok(joined.to_string())
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("navguard")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<NavguardConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = NavguardConfig::default();
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

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<NavguardConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: NavguardConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
