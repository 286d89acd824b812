use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a navigation counts as "loaded".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Readiness {
    /// Response headers received; the document itself is not kept.
    Commit,
    /// HTML parsed.
    #[default]
    DomContentLoaded,
    /// Document and its subresources loaded.
    Load,
    /// No network activity for a short while.
    NetworkIdle,
}

impl Readiness {
    pub fn as_str(self) -> &'static str {
        match self {
            Readiness::Commit => "commit",
            Readiness::DomContentLoaded => "domcontentloaded",
            Readiness::Load => "load",
            Readiness::NetworkIdle => "networkidle",
        }
    }

    /// True if the handle has to keep the response body for this condition.
    pub fn needs_document(self) -> bool {
        !matches!(self, Readiness::Commit)
    }
}

impl fmt::Display for Readiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Readiness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "commit" => Ok(Readiness::Commit),
            "domcontentloaded" => Ok(Readiness::DomContentLoaded),
            "load" => Ok(Readiness::Load),
            "networkidle" => Ok(Readiness::NetworkIdle),
            other => Err(format!(
                "unknown readiness '{other}' (expected commit, domcontentloaded, load or networkidle)"
            )),
        }
    }
}
