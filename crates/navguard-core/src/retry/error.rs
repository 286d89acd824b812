//! Terminal navigation failure.

use crate::page::TransportError;
use serde::Serialize;
use std::fmt;

/// Why a resilient navigation gave up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Every attempt ended with a retryable status (e.g. 502/503/504).
    RetryableStatus,
    /// The page kept rendering a failure page (e.g. "502 Bad Gateway" served with 200).
    SoftFailurePage,
    /// The navigation itself failed (DNS, connect, reset, timeout).
    TransportError,
    /// The abort token was set before an attempt.
    Cancelled,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureKind::RetryableStatus => "retryable_status",
            FailureKind::SoftFailurePage => "soft_failure_page",
            FailureKind::TransportError => "transport_error",
            FailureKind::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned once the attempt budget is spent (or the navigation was aborted).
#[derive(Debug)]
pub struct NavigationFailure {
    pub kind: FailureKind,
    pub target: String,
    /// Attempts actually made.
    pub attempts: u32,
    /// Status seen on the last attempt that produced one.
    pub last_status: Option<u16>,
    /// Pattern that matched on the last soft-failure page.
    pub matched_pattern: Option<String>,
    /// Last transport error, for [`FailureKind::TransportError`].
    pub cause: Option<TransportError>,
}

impl NavigationFailure {
    pub fn new(kind: FailureKind, target: &str, attempts: u32) -> Self {
        Self {
            kind,
            target: target.to_string(),
            attempts,
            last_status: None,
            matched_pattern: None,
            cause: None,
        }
    }
}

impl fmt::Display for NavigationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == FailureKind::Cancelled {
            return write!(
                f,
                "navigation to {} cancelled after {} attempt(s)",
                self.target, self.attempts
            );
        }
        write!(
            f,
            "navigation to {} failed after {} attempt(s): ",
            self.target, self.attempts
        )?;
        match self.kind {
            FailureKind::RetryableStatus => match self.last_status {
                Some(code) => write!(f, "HTTP {}", code),
                None => write!(f, "retryable status"),
            },
            FailureKind::SoftFailurePage => match &self.matched_pattern {
                Some(p) => write!(f, "page rendered \"{}\"", p),
                None => write!(f, "page rendered a failure page"),
            },
            FailureKind::TransportError => match &self.cause {
                Some(e) => write!(f, "{}", e),
                None => write!(f, "transport error"),
            },
            FailureKind::Cancelled => Ok(()),
        }
    }
}

impl std::error::Error for NavigationFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}
