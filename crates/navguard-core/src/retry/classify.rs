//! Classify a landed navigation: retryable status, soft-failure page, or fine.

use crate::html;
use crate::page::NavigationHandle;
use std::collections::BTreeSet;
use std::fmt;

/// Text of the gateway error page that triggered soft-failure detection in
/// the first place.
pub const DEFAULT_FAILURE_PATTERN: &str = "502 Bad Gateway";

/// Returns the status if it is one of `retryable`.
pub fn classify_status(status: Option<u16>, retryable: &BTreeSet<u16>) -> Option<u16> {
    status.filter(|code| retryable.contains(code))
}

/// Case-insensitive literal patterns that mark a soft-failure page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailurePatterns {
    /// (original, lowercased)
    patterns: Vec<(String, String)>,
}

impl Default for FailurePatterns {
    fn default() -> Self {
        Self::new([DEFAULT_FAILURE_PATTERN])
    }
}

impl FailurePatterns {
    /// Blank patterns are dropped; they would match every page.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .map(|p| {
                let lower = p.to_lowercase();
                (p, lower)
            })
            .collect();
        Self { patterns }
    }

    /// No patterns: soft-failure detection is off.
    pub fn none() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|(p, _)| p.as_str())
    }

    /// First pattern contained in `text`, ignoring case.
    pub fn find(&self, text: &str) -> Option<&str> {
        if self.patterns.is_empty() || text.is_empty() {
            return None;
        }
        let haystack = text.to_lowercase();
        self.patterns
            .iter()
            .find(|(_, lower)| haystack.contains(lower.as_str()))
            .map(|(p, _)| p.as_str())
    }
}

/// Where soft-failure evidence was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvidenceSource {
    Title,
    Body,
}

/// Sources consulted in order; the body is only read when the title is clean.
pub const EVIDENCE_ORDER: [EvidenceSource; 2] = [EvidenceSource::Title, EvidenceSource::Body];

impl fmt::Display for EvidenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceSource::Title => f.write_str("title"),
            EvidenceSource::Body => f.write_str("body"),
        }
    }
}

/// A failure pattern matched on the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftFailure {
    pub source: EvidenceSource,
    pub pattern: String,
}

/// Looks for failure patterns in the current page's title, then its body.
///
/// A source that cannot be read counts as clean; read errors never escape.
pub fn detect_soft_failure<H>(handle: &mut H, patterns: &FailurePatterns) -> Option<SoftFailure>
where
    H: NavigationHandle + ?Sized,
{
    if patterns.is_empty() {
        return None;
    }
    for source in EVIDENCE_ORDER {
        let text = match source {
            EvidenceSource::Title => handle.title(),
            EvidenceSource::Body => handle.body_text(),
        };
        let text = match text {
            Ok(t) => t,
            Err(e) => {
                tracing::debug!("could not read page {} (treated as clean): {}", source, e);
                continue;
            }
        };
        if let Some(pattern) = patterns.find(&text) {
            return Some(SoftFailure {
                source,
                pattern: pattern.to_string(),
            });
        }
    }
    None
}

/// Same check as [`detect_soft_failure`], on a saved HTML document.
pub fn detect_soft_failure_in_html(
    document: &str,
    patterns: &FailurePatterns,
) -> Option<SoftFailure> {
    if patterns.is_empty() {
        return None;
    }
    EVIDENCE_ORDER.into_iter().find_map(|source| {
        let text = match source {
            EvidenceSource::Title => html::extract_title(document).unwrap_or_default(),
            EvidenceSource::Body => html::visible_text(document),
        };
        patterns.find(&text).map(|pattern| SoftFailure {
            source,
            pattern: pattern.to_string(),
        })
    })
}
