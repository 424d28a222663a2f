//! Location helpers: absolute-URL reporting and in-page navigation.

use crate::error::ScriptError;
use crate::page::{FrameworkState, LoadedPage};

/// The absolute URL the page's location service reports.
///
/// # Errors
/// [`ScriptError`] when the page has no framework.
pub fn get_location_abs_url(page: &LoadedPage) -> Result<String, ScriptError> {
    page.framework()
        .map(FrameworkState::abs_url)
        .ok_or_else(ScriptError::framework_missing)
}

/// Navigate in-page to `url`.
///
/// A digest cycle runs only when `url` differs from the current location;
/// re-setting the current URL is a no-op, so callers can invoke this
/// idempotently.
///
/// # Errors
/// [`ScriptError`] when the page has no framework.
pub fn set_location(page: &mut LoadedPage, url: &str) -> Result<(), ScriptError> {
    let framework = page
        .framework_mut()
        .ok_or_else(ScriptError::framework_missing)?;
    if framework.url() != url {
        framework.navigate(url);
    }
    Ok(())
}
