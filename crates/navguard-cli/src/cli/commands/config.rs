//! `navguard config` – show the effective configuration or its path.

use anyhow::Result;
use navguard_core::config::{self, NavguardConfig};
use std::path::{Path, PathBuf};

/// Config file in use: the `--config` path, else the XDG default.
fn shown_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(p) => Ok(p.to_path_buf()),
        None => config::config_path(),
    }
}

/// Text printed by `navguard config`.
pub fn render_config(
    cfg: &NavguardConfig,
    explicit: Option<&Path>,
    path_only: bool,
) -> Result<String> {
    if path_only {
        return Ok(format!("{}\n", shown_path(explicit)?.display()));
    }
    Ok(toml::to_string_pretty(cfg)?)
}

pub fn run_config(cfg: &NavguardConfig, explicit: Option<&Path>, path_only: bool) -> Result<()> {
    print!("{}", render_config(cfg, explicit, path_only)?);
    Ok(())
}
