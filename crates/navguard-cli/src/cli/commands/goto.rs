//! `navguard goto <url>` – resilient navigation over HTTP.

use anyhow::{Context, Result};
use clap::Args;
use navguard_core::config::NavguardConfig;
use navguard_core::page::{CurlPage, Readiness};
use navguard_core::retry::{FailureKind, NavigationOutcome, NavigationRequest, ResilientNavigator};
use serde::Serialize;

/// Flags for `goto`; each one overrides the matching config value.
#[derive(Debug, Clone, Args)]
pub struct GotoArgs {
    /// Absolute URL, or a path resolved against `base_url` from the config.
    pub url: String,

    /// Maximum number of navigation attempts.
    #[arg(long, value_name = "N")]
    pub attempts: Option<u32>,

    /// Backoff unit in ms; the wait after attempt n is n * this.
    #[arg(long, value_name = "MS")]
    pub base_delay_ms: Option<u64>,

    /// Per-attempt timeout in ms.
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Readiness condition: commit, domcontentloaded, load or networkidle.
    #[arg(long, value_name = "CONDITION")]
    pub wait_until: Option<Readiness>,

    /// Status code to retry (repeatable; replaces configured codes).
    #[arg(long = "retry-status", value_name = "CODE")]
    pub retry_status: Vec<u16>,

    /// Failure-page text (repeatable; replaces configured patterns).
    #[arg(long = "failure-pattern", value_name = "TEXT")]
    pub failure_pattern: Vec<String>,

    /// Allow navigation to ad/tracker hosts.
    #[arg(long)]
    pub no_ad_block: bool,

    /// Print the outcome as JSON.
    #[arg(long)]
    pub json: bool,
}

impl GotoArgs {
    /// Copy of `cfg` with command-line overrides applied.
    pub fn apply(&self, cfg: &NavguardConfig) -> NavguardConfig {
        let mut cfg = cfg.clone();
        let nav = &mut cfg.navigation;
        if let Some(n) = self.attempts {
            nav.max_attempts = n;
        }
        if let Some(ms) = self.base_delay_ms {
            nav.base_delay_ms = ms;
        }
        if self.timeout_ms.is_some() {
            nav.timeout_ms = self.timeout_ms;
        }
        if let Some(r) = self.wait_until {
            nav.readiness = r;
        }
        if !self.retry_status.is_empty() {
            nav.retryable_statuses = self.retry_status.clone();
        }
        if !self.failure_pattern.is_empty() {
            nav.failure_patterns = self.failure_pattern.clone();
        }
        if self.no_ad_block {
            cfg.transport.ad_block = false;
        }
        cfg
    }
}

/// Outcome of `goto`, as printed with `--json`.
#[derive(Debug, Serialize)]
pub struct GotoReport {
    pub target: String,
    pub landed: bool,
    pub status: Option<u16>,
    pub final_url: Option<String>,
    pub failure: Option<FailureKind>,
    pub attempts: Option<u32>,
    pub matched_pattern: Option<String>,
    pub error: Option<String>,
}

impl GotoReport {
    pub fn from_outcome(target: &str, outcome: &NavigationOutcome) -> Self {
        match outcome {
            Ok(landed) => Self {
                target: target.to_string(),
                landed: true,
                status: landed.status,
                final_url: Some(landed.final_url.clone()),
                failure: None,
                attempts: None,
                matched_pattern: None,
                error: None,
            },
            Err(failure) => Self {
                target: target.to_string(),
                landed: false,
                status: failure.last_status,
                final_url: None,
                failure: Some(failure.kind),
                attempts: Some(failure.attempts),
                matched_pattern: failure.matched_pattern.clone(),
                error: Some(failure.to_string()),
            },
        }
    }
}

pub async fn run_goto(cfg: &NavguardConfig, args: &GotoArgs) -> Result<()> {
    let cfg = args.apply(cfg);
    let target = cfg.resolve_target(&args.url)?;
    let request = NavigationRequest::from_config(target.clone(), &cfg.navigation);
    tracing::info!(
        "goto url={} max_attempts={} base_delay_ms={}",
        target,
        cfg.navigation.max_attempts,
        cfg.navigation.base_delay_ms
    );

    let transport = cfg.transport.clone();
    let outcome = tokio::task::spawn_blocking(move || {
        let mut navigator = ResilientNavigator::new(CurlPage::from_config(&transport));
        navigator.navigate(&request)
    })
    .await
    .context("navigation task join")?;

    let report = GotoReport::from_outcome(&target, &outcome);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Ok(landed) = &outcome {
        let status = landed
            .status
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("landed  {}  {}", status, landed.final_url);
    }

    outcome.map(|_| ()).map_err(anyhow::Error::from)
}
