//! Resilient navigation: retry policy, outcome classification and the retry loop.
//!
//! A navigation attempt ends in one of four ways: the page landed, the server
//! answered with a retryable status, the page rendered a recognisable failure
//! page despite a good status (soft failure), or the transport failed. All
//! three failure kinds are retried with linear backoff (`base_delay * attempt`)
//! until the attempt budget is spent.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{
    classify_status, detect_soft_failure, detect_soft_failure_in_html, EvidenceSource,
    FailurePatterns, SoftFailure, DEFAULT_FAILURE_PATTERN, EVIDENCE_ORDER,
};
pub use error::{FailureKind, NavigationFailure};
pub use policy::{NavigationRequest, RetryDecision, DEFAULT_RETRYABLE_STATUSES};
pub use run::{Landed, NavigationOutcome, ResilientNavigator};
