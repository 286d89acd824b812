//! Integration test: resilient navigation over real HTTP with the curl page.
//!
//! A local server replays scripted replies (gateway errors, failure pages,
//! redirects) and the navigator is run against it with tiny backoff.

mod common;

use common::page_server::{self, Reply};
use navguard_core::blocklist::HostBlocklist;
use navguard_core::page::{CurlPage, CurlPageOptions, NavigationHandle, Readiness, TransportError};
use navguard_core::retry::{FailureKind, NavigationRequest, ResilientNavigator};
use std::time::Duration;

fn page() -> CurlPage {
    let options = CurlPageOptions {
        connect_timeout: Duration::from_secs(2),
        navigation_timeout: Duration::from_secs(5),
        ..CurlPageOptions::default()
    };
    CurlPage::new(options, HostBlocklist::ad_hosts())
}

fn request(url: &str) -> NavigationRequest {
    NavigationRequest::new(url).with_base_delay(Duration::from_millis(5))
}

#[test]
fn gateway_errors_then_landing() {
    let server = page_server::start(vec![
        Reply::bad_gateway_page(503),
        Reply::bad_gateway_page(502),
        Reply::ok("Elements Forms Widgets"),
    ]);
    let mut nav = ResilientNavigator::new(page());
    let landed = nav.navigate(&request(&server.url)).expect("landed");
    assert_eq!(landed.status, Some(200));
    assert_eq!(server.hits(), 3);

    let page = nav.handle_mut();
    assert_eq!(page.title().unwrap(), "DEMOQA");
    assert_eq!(page.body_text().unwrap(), "Elements Forms Widgets");
}

#[test]
fn bad_gateway_page_served_with_200_is_reloaded_and_retried() {
    let server = page_server::start(vec![
        Reply::bad_gateway_page(200),
        Reply::ok("still warming up"),
        Reply::ok("Elements Forms Widgets"),
    ]);
    let mut nav = ResilientNavigator::new(page());
    let landed = nav.navigate(&request(&server.url)).expect("landed");
    assert_eq!(landed.status, Some(200));
    // navigate, reload, navigate
    assert_eq!(server.hits(), 3);
    assert_eq!(
        nav.handle_mut().body_text().unwrap(),
        "Elements Forms Widgets"
    );
}

#[test]
fn persistent_gateway_errors_fail_with_last_status() {
    let server = page_server::start(vec![Reply::bad_gateway_page(504)]);
    let mut nav = ResilientNavigator::new(page());
    let failure = nav
        .navigate(&request(&server.url).with_max_attempts(3))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::RetryableStatus);
    assert_eq!(failure.attempts, 3);
    assert_eq!(failure.last_status, Some(504));
    assert_eq!(server.hits(), 3);
}

#[test]
fn redirect_reports_final_url() {
    let server = page_server::start(vec![
        Reply::redirect("/landing"),
        Reply::ok("Book Store"),
    ]);
    let mut nav = ResilientNavigator::new(page());
    let landed = nav.navigate(&request(&server.url)).expect("landed");
    assert_eq!(landed.status, Some(200));
    assert!(
        landed.final_url.ends_with("/landing"),
        "final url: {}",
        landed.final_url
    );
    assert_eq!(nav.handle().current_url(), Some(landed.final_url.as_str()));
}

#[test]
fn commit_readiness_skips_document_inspection() {
    let server = page_server::start(vec![Reply::bad_gateway_page(200)]);
    let mut nav = ResilientNavigator::new(page());
    let req = request(&server.url).with_readiness(Readiness::Commit);
    nav.navigate(&req)
        .expect("no document kept, so no soft-failure evidence");
    assert_eq!(server.hits(), 1);
    assert!(matches!(
        nav.handle_mut().title(),
        Err(TransportError::NoDocument)
    ));
}

#[test]
fn unreachable_host_fails_with_transport_cause() {
    let url = page_server::closed_port_url();
    let mut nav = ResilientNavigator::new(page());
    let failure = nav
        .navigate(&request(&url).with_max_attempts(2))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::TransportError);
    assert_eq!(failure.attempts, 2);
    assert!(matches!(failure.cause, Some(TransportError::Curl(_))));
}

#[test]
fn blocked_host_is_a_transport_failure() {
    let mut nav = ResilientNavigator::new(page());
    let failure = nav
        .navigate(&request("https://ad.doubleclick.net/").with_max_attempts(2))
        .unwrap_err();
    assert_eq!(failure.kind, FailureKind::TransportError);
    assert!(matches!(failure.cause, Some(TransportError::Blocked(_))));
}
