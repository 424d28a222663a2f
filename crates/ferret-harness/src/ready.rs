//! Readiness polling and idle notification.
//!
//! A page under automation is not usable until the framework global shows
//! up and finishes bootstrapping. The poll here probes on a fixed timer
//! with a caller-supplied attempt budget and resolves to exactly one
//! outcome. Idle notification waits for the tracked-request counter to
//! drain, the condition the framework itself uses to signal quiescence.

use std::time::Duration;

use strum_macros::Display;
use tokio::time::sleep;

use crate::error::ScriptError;
use crate::page::LoadedPage;

/// Delay between consecutive probes of the framework global, and between
/// idle-notification checks.
pub const RETRY_DELAY: Duration = Duration::from_millis(100);

/// What one probe of the framework global observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FrameworkPresence {
    /// No framework global on the page.
    Missing,
    /// The global exists but has not offered its bootstrap resume hook.
    BootstrapPending,
    /// The global and its resume hook are both present.
    Ready,
}

/// The single outcome a readiness poll resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ProbeOutcome {
    /// The page is ready for locator scripts.
    Ready,
    /// The retry budget ran out without the global ever appearing.
    Missing,
    /// The global appeared but the resume hook never did.
    BootstrapIncomplete,
}

impl ProbeOutcome {
    /// Whether the poll ended in readiness.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    /// The failure reason carried across the boundary, if any.
    #[must_use]
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            Self::Ready => None,
            Self::Missing => Some("retries looking for angular exceeded"),
            Self::BootstrapIncomplete => Some("angular never provided resumeBootstrap"),
        }
    }
}

/// Poll `probe` until it reports readiness or the budget runs out.
///
/// The probe runs immediately, then once more after each [`RETRY_DELAY`]
/// until `attempts` delays have been spent, so it runs `attempts + 1`
/// times in the worst case. The outcome distinguishes a global that never
/// appeared from one that appeared without its resume hook, judged by the
/// final probe.
pub async fn await_framework<F>(mut probe: F, attempts: u32) -> ProbeOutcome
where
    F: FnMut() -> FrameworkPresence,
{
    let mut remaining = attempts;
    loop {
        match probe() {
            FrameworkPresence::Ready => return ProbeOutcome::Ready,
            FrameworkPresence::Missing if remaining == 0 => return ProbeOutcome::Missing,
            FrameworkPresence::BootstrapPending if remaining == 0 => {
                return ProbeOutcome::BootstrapIncomplete;
            }
            FrameworkPresence::Missing | FrameworkPresence::BootstrapPending => {}
        }
        remaining -= 1;
        sleep(RETRY_DELAY).await;
    }
}

/// Resolve once the page has no outstanding tracked requests.
///
/// Returns immediately on an idle page; otherwise checks again after each
/// [`RETRY_DELAY`] until the counter reaches zero. There is no budget: a
/// page that never drains keeps the caller waiting, matching the
/// framework's own quiescence notification.
///
/// # Errors
/// [`ScriptError`] when the page has no framework to consult.
pub async fn notify_when_idle(page: &LoadedPage) -> Result<(), ScriptError> {
    if page.framework().is_none() {
        return Err(ScriptError::framework_missing());
    }
    while page.outstanding_requests() > 0 {
        sleep(RETRY_DELAY).await;
    }
    Ok(())
}
