//! Retry loop: navigate until the page lands or the attempt budget is spent.

use super::classify::{classify_status, detect_soft_failure, SoftFailure};
use super::error::{FailureKind, NavigationFailure};
use super::policy::{NavigationRequest, RetryDecision};
use crate::page::{NavigationHandle, TransportError};

/// A navigation that landed on a usable page.
///
/// Carries no attempt count: a first-try success and a retried one look the same.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Landed {
    /// Status of the final response, if there was one.
    pub status: Option<u16>,
    /// URL after redirects.
    pub final_url: String,
}

pub type NavigationOutcome = Result<Landed, NavigationFailure>;

/// Why a single attempt did not land.
#[derive(Debug)]
enum AttemptFailure {
    RetryableStatus(u16),
    SoftFailure {
        status: Option<u16>,
        hit: SoftFailure,
    },
    Transport(TransportError),
}

impl AttemptFailure {
    fn status(&self) -> Option<u16> {
        match self {
            AttemptFailure::RetryableStatus(code) => Some(*code),
            AttemptFailure::SoftFailure { status, .. } => *status,
            AttemptFailure::Transport(_) => None,
        }
    }

    fn into_failure(
        self,
        target: &str,
        attempts: u32,
        last_status: Option<u16>,
    ) -> NavigationFailure {
        let kind = match &self {
            AttemptFailure::RetryableStatus(_) => FailureKind::RetryableStatus,
            AttemptFailure::SoftFailure { .. } => FailureKind::SoftFailurePage,
            AttemptFailure::Transport(_) => FailureKind::TransportError,
        };
        let mut failure = NavigationFailure::new(kind, target, attempts);
        failure.last_status = last_status;
        match self {
            AttemptFailure::RetryableStatus(_) => {}
            AttemptFailure::SoftFailure { hit, .. } => failure.matched_pattern = Some(hit.pattern),
            AttemptFailure::Transport(e) => failure.cause = Some(e),
        }
        failure
    }
}

/// Navigates a page with bounded, linearly backed-off retries.
///
/// Owns its handle; one navigator per page/tab. The loop is strictly
/// sequential and only suspends through [`NavigationHandle::sleep`].
#[derive(Debug)]
pub struct ResilientNavigator<H> {
    handle: H,
}

impl<H: NavigationHandle> ResilientNavigator<H> {
    pub fn new(handle: H) -> Self {
        Self { handle }
    }

    pub fn handle(&self) -> &H {
        &self.handle
    }

    pub fn handle_mut(&mut self) -> &mut H {
        &mut self.handle
    }

    pub fn into_inner(self) -> H {
        self.handle
    }

    /// Navigates to `request.target`, retrying retryable statuses, soft-failure
    /// pages and transport errors. Fails only once the attempt budget is spent
    /// or the abort token is set.
    pub fn navigate(&mut self, request: &NavigationRequest) -> NavigationOutcome {
        let budget = request.attempt_budget();
        let mut attempt = 1u32;
        let mut last_status = None;
        loop {
            if request.abort_requested() {
                tracing::info!(
                    "navigation to {} aborted before attempt {}",
                    request.target,
                    attempt
                );
                let mut failure =
                    NavigationFailure::new(FailureKind::Cancelled, &request.target, attempt - 1);
                failure.last_status = last_status;
                return Err(failure);
            }

            tracing::debug!(
                "navigate attempt {}/{} url={} wait_until={}",
                attempt,
                budget,
                request.target,
                request.readiness
            );
            let failure = match self.attempt(request) {
                Ok(landed) => {
                    if attempt > 1 {
                        tracing::info!(
                            "navigation to {} landed on attempt {} (status {:?})",
                            request.target,
                            attempt,
                            landed.status
                        );
                    }
                    return Ok(landed);
                }
                Err(f) => f,
            };
            if let Some(code) = failure.status() {
                last_status = Some(code);
            }

            match request.decide(attempt) {
                RetryDecision::NoRetry => {
                    let failure = failure.into_failure(&request.target, attempt, last_status);
                    tracing::warn!("{}", failure);
                    return Err(failure);
                }
                RetryDecision::RetryAfter(delay) => {
                    tracing::debug!(
                        "attempt {} for {} did not land, retrying in {:?}",
                        attempt,
                        request.target,
                        delay
                    );
                    self.handle.sleep(delay);
                    if let AttemptFailure::SoftFailure { .. } = failure {
                        if let Err(e) = self.handle.reload(request.readiness) {
                            tracing::debug!("reload of {} failed (ignored): {}", request.target, e);
                        }
                    }
                    attempt += 1;
                }
            }
        }
    }

    fn attempt(&mut self, request: &NavigationRequest) -> Result<Landed, AttemptFailure> {
        let response = self
            .handle
            .navigate_and_wait(&request.target, request.readiness, request.timeout)
            .map_err(|e| {
                tracing::warn!("navigation to {} failed: {}", request.target, e);
                AttemptFailure::Transport(e)
            })?;

        if let Some(code) = classify_status(response.status, &request.retryable_statuses) {
            tracing::warn!("navigation to {} returned HTTP {}", request.target, code);
            return Err(AttemptFailure::RetryableStatus(code));
        }

        if let Some(hit) = detect_soft_failure(&mut self.handle, &request.failure_patterns) {
            tracing::warn!(
                "page {} rendered \"{}\" in its {} (status {:?})",
                response.url,
                hit.pattern,
                hit.source,
                response.status
            );
            return Err(AttemptFailure::SoftFailure {
                status: response.status,
                hit,
            });
        }

        Ok(Landed {
            status: response.status,
            final_url: response.url,
        })
    }
}
