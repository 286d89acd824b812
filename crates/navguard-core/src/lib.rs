//! Resilient page navigation.
//!
//! [`retry::ResilientNavigator`] drives a [`page::NavigationHandle`] through
//! bounded, linearly backed-off navigation attempts, classifying each one as a
//! success, a retryable status, a soft-failure page, or a transport error.

pub mod blocklist;
pub mod config;
pub mod html;
pub mod logging;
pub mod page;
pub mod retry;
