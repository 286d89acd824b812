//! `navguard classify <path>` – offline soft-failure check of a saved page.

use anyhow::{Context, Result};
use navguard_core::config::NavguardConfig;
use navguard_core::retry::{detect_soft_failure_in_html, FailurePatterns, SoftFailure};
use std::fs;
use std::path::Path;

/// Checks a saved page for failure text. Bytes that are not UTF-8 are
/// replaced, so pages saved in legacy encodings still classify.
pub fn classify_file(
    cfg: &NavguardConfig,
    path: &Path,
    overrides: &[String],
) -> Result<Option<SoftFailure>> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let document = String::from_utf8_lossy(&bytes);
    let patterns = if overrides.is_empty() {
        FailurePatterns::new(&cfg.navigation.failure_patterns)
    } else {
        FailurePatterns::new(overrides)
    };
    Ok(detect_soft_failure_in_html(&document, &patterns))
}

pub fn run_classify(cfg: &NavguardConfig, path: &Path, overrides: &[String]) -> Result<()> {
    match classify_file(cfg, path, overrides)? {
        Some(hit) => println!(
            "soft-failure  {}  matched \"{}\" in {}",
            path.display(),
            hit.pattern,
            hit.source
        ),
        None => println!("clean  {}", path.display()),
    }
    Ok(())
}
