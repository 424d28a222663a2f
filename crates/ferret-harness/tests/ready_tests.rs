//! Integration tests for framework readiness polling and the idle
//! notification, driven on a paused clock so timings are exact.

use std::cell::Cell;
use std::time::Duration;

use ferret_harness::{
    await_framework, notify_when_idle, FrameworkPresence, LoadedPage, ProbeOutcome, RETRY_DELAY,
};
use tokio::time::{sleep, Instant};

/// Helper producing a probe that reports `early` until `flips` calls have
/// happened, then reports `late`. The counter records every call.
fn flipping_probe(
    calls: &Cell<u32>,
    flips: u32,
    early: FrameworkPresence,
    late: FrameworkPresence,
) -> impl FnMut() -> FrameworkPresence + '_ {
    move || {
        calls.set(calls.get() + 1);
        if calls.get() > flips {
            late
        } else {
            early
        }
    }
}

// ========== polling for the framework ==========

#[tokio::test(start_paused = true)]
async fn test_ready_on_first_probe_returns_without_waiting() {
    let calls = Cell::new(0);
    let start = Instant::now();

    let outcome = await_framework(
        flipping_probe(&calls, 0, FrameworkPresence::Ready, FrameworkPresence::Ready),
        5,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Ready);
    assert_eq!(calls.get(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_framework_appearing_mid_budget_succeeds() {
    let calls = Cell::new(0);
    let start = Instant::now();

    let outcome = await_framework(
        flipping_probe(&calls, 3, FrameworkPresence::Missing, FrameworkPresence::Ready),
        5,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Ready);
    assert_eq!(calls.get(), 4);
    assert_eq!(start.elapsed(), 3 * RETRY_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_budget_allows_one_more_probe_than_sleeps() {
    let calls = Cell::new(0);
    let start = Instant::now();

    let outcome = await_framework(
        flipping_probe(&calls, u32::MAX, FrameworkPresence::Missing, FrameworkPresence::Missing),
        2,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Missing);
    assert_eq!(calls.get(), 3);
    assert_eq!(start.elapsed(), 2 * RETRY_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_zero_attempts_probe_exactly_once() {
    let calls = Cell::new(0);
    let start = Instant::now();

    let outcome = await_framework(
        flipping_probe(&calls, u32::MAX, FrameworkPresence::Missing, FrameworkPresence::Missing),
        0,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Missing);
    assert_eq!(calls.get(), 1);
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_stalled_bootstrap_exhausts_into_its_own_outcome() {
    let calls = Cell::new(0);

    let outcome = await_framework(
        flipping_probe(
            &calls,
            u32::MAX,
            FrameworkPresence::BootstrapPending,
            FrameworkPresence::BootstrapPending,
        ),
        0,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::BootstrapIncomplete);
    assert_eq!(calls.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_bootstrap_finishing_on_the_last_probe_still_succeeds() {
    let calls = Cell::new(0);

    let outcome = await_framework(
        flipping_probe(
            &calls,
            2,
            FrameworkPresence::BootstrapPending,
            FrameworkPresence::Ready,
        ),
        2,
    )
    .await;

    assert_eq!(outcome, ProbeOutcome::Ready);
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_failure_outcomes_carry_their_reason() {
    assert_eq!(ProbeOutcome::Ready.reason(), None);
    assert_eq!(
        ProbeOutcome::Missing.reason(),
        Some("retries looking for angular exceeded")
    );
    assert_eq!(
        ProbeOutcome::BootstrapIncomplete.reason(),
        Some("angular never provided resumeBootstrap")
    );
}

#[test]
fn test_only_the_ready_outcome_is_ready() {
    assert!(ProbeOutcome::Ready.is_ready());
    assert!(!ProbeOutcome::Missing.is_ready());
    assert!(!ProbeOutcome::BootstrapIncomplete.is_ready());
}

// ========== idle notification ==========

#[tokio::test(start_paused = true)]
async fn test_idle_page_notifies_immediately() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);
    let start = Instant::now();

    notify_when_idle(&page).await.unwrap();
    assert_eq!(start.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn test_notification_waits_for_requests_to_drain() {
    let page = LoadedPage::from_html(r#"<html ng-app="store"><body></body></html>"#);
    page.begin_request();
    page.begin_request();
    let start = Instant::now();

    let drain = async {
        sleep(Duration::from_millis(250)).await;
        page.complete_request();
        page.complete_request();
    };
    let (notified, ()) = tokio::join!(notify_when_idle(&page), drain);

    notified.unwrap();
    assert_eq!(page.outstanding_requests(), 0);
    assert_eq!(start.elapsed(), 3 * RETRY_DELAY);
}

#[tokio::test(start_paused = true)]
async fn test_notification_requires_a_framework() {
    let page = LoadedPage::from_html("<html><body></body></html>");

    let error = notify_when_idle(&page).await.unwrap_err();
    assert_eq!(error.message(), "angular could not be found on the window");
}
