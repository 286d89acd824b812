//! Ad/tracker host blocklist.
//!
//! Ads and trackers on the target sites add overlays and noise, so navigation
//! handles refuse to load anything on these hosts.

use crate::config::TransportConfig;

/// Hosts blocked when `ad_block` is on and no custom list is configured.
pub const DEFAULT_BLOCKED_HOSTS: [&str; 9] = [
    "googlesyndication.com",
    "doubleclick.net",
    "adservice.google.com",
    "googletagmanager.com",
    "google-analytics.com",
    "pubmatic.com",
    "rubiconproject.com",
    "adnxs.com",
    "criteo.com",
];

/// Set of blocked host suffixes. A host is blocked when it equals an entry or
/// is a subdomain of one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBlocklist {
    hosts: Vec<String>,
}

impl HostBlocklist {
    /// Empty blocklist (blocks nothing).
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocklist with [`DEFAULT_BLOCKED_HOSTS`].
    pub fn ad_hosts() -> Self {
        Self::from_hosts(DEFAULT_BLOCKED_HOSTS)
    }

    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hosts = hosts
            .into_iter()
            .map(|h| normalize_host(h.as_ref()))
            .filter(|h| !h.is_empty())
            .collect();
        Self { hosts }
    }

    /// Builds the list from the `[transport]` config section.
    pub fn from_config(cfg: &TransportConfig) -> Self {
        if !cfg.ad_block {
            return Self::new();
        }
        match &cfg.blocked_hosts {
            Some(custom) => Self::from_hosts(custom),
            None => Self::ad_hosts(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn blocks_host(&self, host: &str) -> bool {
        let host = normalize_host(host);
        self.hosts.iter().any(|entry| {
            host == *entry
                || host
                    .strip_suffix(entry.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    /// Host of `url` if it is blocked.
    pub fn blocked_host<'u>(&self, url: &'u url::Url) -> Option<&'u str> {
        url.host_str().filter(|host| self.blocks_host(host))
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('.').to_ascii_lowercase()
}
