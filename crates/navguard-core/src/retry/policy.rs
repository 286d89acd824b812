use super::classify::FailurePatterns;
use crate::config::NavigationConfig;
use crate::page::Readiness;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Gateway errors that are usually gone on the next try.
pub const DEFAULT_RETRYABLE_STATUSES: [u16; 3] = [502, 503, 504];

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Attempt budget spent.
    NoRetry,
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// One resilient navigation: target plus retry policy.
///
/// Built per call and discarded afterwards.
#[derive(Debug, Clone)]
pub struct NavigationRequest {
    pub target: String,
    pub readiness: Readiness,
    /// Maximum number of attempts (including the first). Zero is treated as one.
    pub max_attempts: u32,
    /// Backoff unit; the wait after attempt `n` is `base_delay * n`.
    pub base_delay: Duration,
    /// Per-attempt timeout handed to the navigation handle.
    pub timeout: Option<Duration>,
    pub retryable_statuses: BTreeSet<u16>,
    pub failure_patterns: FailurePatterns,
    /// When set to true, the loop stops before the next attempt.
    pub abort: Option<Arc<AtomicBool>>,
}

impl NavigationRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            readiness: Readiness::default(),
            max_attempts: 5,
            base_delay: Duration::from_millis(500),
            timeout: None,
            retryable_statuses: DEFAULT_RETRYABLE_STATUSES.into_iter().collect(),
            failure_patterns: FailurePatterns::default(),
            abort: None,
        }
    }

    /// Request for `target` using the `[navigation]` config section.
    pub fn from_config(target: impl Into<String>, cfg: &NavigationConfig) -> Self {
        Self {
            target: target.into(),
            readiness: cfg.readiness,
            max_attempts: cfg.max_attempts,
            base_delay: Duration::from_millis(cfg.base_delay_ms),
            timeout: cfg.timeout_ms.map(Duration::from_millis),
            retryable_statuses: cfg.retryable_statuses.iter().copied().collect(),
            failure_patterns: FailurePatterns::new(&cfg.failure_patterns),
            abort: None,
        }
    }

    pub fn with_readiness(mut self, readiness: Readiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retryable_statuses<I: IntoIterator<Item = u16>>(mut self, statuses: I) -> Self {
        self.retryable_statuses = statuses.into_iter().collect();
        self
    }

    pub fn with_failure_patterns(mut self, patterns: FailurePatterns) -> Self {
        self.failure_patterns = patterns;
        self
    }

    pub fn with_abort(mut self, abort: Arc<AtomicBool>) -> Self {
        self.abort = Some(abort);
        self
    }

    /// Number of attempts the loop may make (at least one).
    pub fn attempt_budget(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay before the attempt following `attempt` (1-based): linear in the
    /// attempt number.
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Whether another attempt may follow `attempt` (1-based), and after how long.
    pub fn decide(&self, attempt: u32) -> RetryDecision {
        if attempt >= self.attempt_budget() {
            return RetryDecision::NoRetry;
        }
        RetryDecision::RetryAfter(self.backoff(attempt))
    }

    pub fn abort_requested(&self) -> bool {
        self.abort
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
