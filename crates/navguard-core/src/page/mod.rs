//! Navigation handle abstraction.
//!
//! A handle represents one page/tab: it can load a URL, expose the rendered
//! title and body text, reload, and suspend the caller between attempts. The
//! retry loop only talks to this trait, so tests can script it and the CLI can
//! plug in the curl-backed [`CurlPage`].

mod curl_page;
mod readiness;

pub use curl_page::{CurlPage, CurlPageOptions};
pub use readiness::Readiness;

use std::time::Duration;

/// What a successful navigate-and-wait returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
    /// HTTP status, if the navigation produced one (same-document anchors and
    /// some protocols do not).
    pub status: Option<u16>,
    /// URL after redirects.
    pub url: String,
}

/// Error raised by a navigation handle.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// libcurl failed (DNS, connect, reset, timeout, ...).
    #[error("curl: {0}")]
    Curl(#[from] curl::Error),
    /// Target host is on the blocklist.
    #[error("navigation to blocked host {0}")]
    Blocked(String),
    /// Nothing has been loaded yet, or the document was not kept.
    #[error("no document loaded")]
    NoDocument,
    /// Target could not be parsed as a URL.
    #[error("invalid URL {0}")]
    InvalidUrl(String),
    /// Any other handle-specific failure.
    #[error("{0}")]
    Other(String),
}

/// Capabilities the resilient navigator needs from its host environment.
pub trait NavigationHandle {
    /// Load `url` and wait until `readiness` holds. `timeout` bounds this single
    /// attempt; `None` leaves it to the handle's own default.
    fn navigate_and_wait(
        &mut self,
        url: &str,
        readiness: Readiness,
        timeout: Option<Duration>,
    ) -> Result<PageResponse, TransportError>;

    /// Current page title.
    fn title(&mut self) -> Result<String, TransportError>;

    /// Visible text of the current page body.
    fn body_text(&mut self) -> Result<String, TransportError>;

    /// Reload the current page.
    fn reload(&mut self, readiness: Readiness) -> Result<(), TransportError>;

    /// Suspend the caller for `duration`.
    fn sleep(&mut self, duration: Duration);
}

impl<H: NavigationHandle + ?Sized> NavigationHandle for &mut H {
    fn navigate_and_wait(
        &mut self,
        url: &str,
        readiness: Readiness,
        timeout: Option<Duration>,
    ) -> Result<PageResponse, TransportError> {
        (**self).navigate_and_wait(url, readiness, timeout)
    }

    fn title(&mut self) -> Result<String, TransportError> {
        (**self).title()
    }

    fn body_text(&mut self) -> Result<String, TransportError> {
        (**self).body_text()
    }

    fn reload(&mut self, readiness: Readiness) -> Result<(), TransportError> {
        (**self).reload(readiness)
    }

    fn sleep(&mut self, duration: Duration) {
        (**self).sleep(duration)
    }
}
