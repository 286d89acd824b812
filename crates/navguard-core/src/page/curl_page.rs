//! Navigation handle backed by libcurl.
//!
//! Each navigation is a single GET (redirects followed). The response body is
//! kept so title and body text can be inspected for soft-failure pages; no
//! scripts run, so `Load` and `NetworkIdle` behave like `DomContentLoaded`.

use super::{NavigationHandle, PageResponse, Readiness, TransportError};
use crate::blocklist::HostBlocklist;
use crate::config::TransportConfig;
use crate::html;
use std::time::Duration;

/// Transfer settings for [`CurlPage`].
#[derive(Debug, Clone)]
pub struct CurlPageOptions {
    pub connect_timeout: Duration,
    /// Used when a navigation does not carry its own timeout.
    pub navigation_timeout: Duration,
    pub max_redirections: u32,
    pub user_agent: String,
}

impl Default for CurlPageOptions {
    fn default() -> Self {
        Self::from(&TransportConfig::default())
    }
}

impl From<&TransportConfig> for CurlPageOptions {
    fn from(cfg: &TransportConfig) -> Self {
        Self {
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            navigation_timeout: Duration::from_millis(cfg.navigation_timeout_ms),
            max_redirections: cfg.max_redirections,
            user_agent: cfg.user_agent.clone(),
        }
    }
}

/// Last document loaded by the page.
#[derive(Debug, Clone)]
struct LoadedDocument {
    final_url: String,
    /// `None` when loaded with [`Readiness::Commit`].
    html: Option<String>,
}

/// A single "tab" driven over HTTP with curl.
#[derive(Debug)]
pub struct CurlPage {
    options: CurlPageOptions,
    blocklist: HostBlocklist,
    current: Option<LoadedDocument>,
}

impl CurlPage {
    pub fn new(options: CurlPageOptions, blocklist: HostBlocklist) -> Self {
        Self {
            options,
            blocklist,
            current: None,
        }
    }

    /// Builds a page from the `[transport]` config section.
    pub fn from_config(cfg: &TransportConfig) -> Self {
        Self::new(CurlPageOptions::from(cfg), HostBlocklist::from_config(cfg))
    }

    /// URL of the current document, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|d| d.final_url.as_str())
    }

    fn check_blocked(&self, url: &str) -> Result<(), TransportError> {
        let parsed =
            url::Url::parse(url).map_err(|_| TransportError::InvalidUrl(url.to_string()))?;
        match self.blocklist.blocked_host(&parsed) {
            Some(host) => Err(TransportError::Blocked(host.to_string())),
            None => Ok(()),
        }
    }

    fn fetch(
        &mut self,
        url: &str,
        readiness: Readiness,
        timeout: Option<Duration>,
    ) -> Result<PageResponse, TransportError> {
        self.check_blocked(url)?;

        let keep_body = readiness.needs_document();
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.options.max_redirections)?;
        easy.connect_timeout(self.options.connect_timeout)?;
        easy.timeout(timeout.unwrap_or(self.options.navigation_timeout))?;
        easy.useragent(&self.options.user_agent)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if keep_body {
                    body.extend_from_slice(data);
                }
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        let status = u16::try_from(code).ok().filter(|c| *c != 0);
        let final_url = easy
            .effective_url()?
            .map(str::to_string)
            .unwrap_or_else(|| url.to_string());

        tracing::debug!(
            "curl page loaded url={} status={:?} bytes={}",
            final_url,
            status,
            body.len()
        );

        self.current = Some(LoadedDocument {
            final_url: final_url.clone(),
            html: keep_body.then(|| String::from_utf8_lossy(&body).into_owned()),
        });

        Ok(PageResponse {
            status,
            url: final_url,
        })
    }

    fn document(&self) -> Result<&str, TransportError> {
        self.current
            .as_ref()
            .and_then(|d| d.html.as_deref())
            .ok_or(TransportError::NoDocument)
    }
}

impl NavigationHandle for CurlPage {
    fn navigate_and_wait(
        &mut self,
        url: &str,
        readiness: Readiness,
        timeout: Option<Duration>,
    ) -> Result<PageResponse, TransportError> {
        // A failed navigation leaves no document behind.
        self.current = None;
        self.fetch(url, readiness, timeout)
    }

    fn title(&mut self) -> Result<String, TransportError> {
        Ok(html::extract_title(self.document()?).unwrap_or_default())
    }

    fn body_text(&mut self) -> Result<String, TransportError> {
        Ok(html::visible_text(self.document()?))
    }

    fn reload(&mut self, readiness: Readiness) -> Result<(), TransportError> {
        let url = self
            .current_url()
            .map(str::to_string)
            .ok_or(TransportError::NoDocument)?;
        self.fetch(&url, readiness, None).map(|_| ())
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
