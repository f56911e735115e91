//! Identity resolution for raw handle-like strings.

use std::time::Duration;

use gramlens_browser::{BrowserDriver, BrowserError, BrowserPage};
use gramlens_core::{InaccessibleReason, TargetResolution};
use regex::Regex;

/// Normalize a raw handle-like string to a canonical bare handle.
///
/// Accepts a leading `@`, a full profile URL, or surrounding whitespace:
/// `"@nightpulse"`, `"https://www.instagram.com/nightpulse/"` and
/// `"  nightpulse "` all normalize to `"nightpulse"`.
#[must_use]
pub fn normalize_handle(raw: &str) -> String {
    let re = Regex::new(r"^(?:@|https?://(?:www\.)?instagram\.com/)").expect("valid prefix regex");
    let stripped = re.replace(raw.trim(), "");
    stripped.trim_end_matches('/').trim().to_string()
}

/// Canonical profile location for a bare handle.
#[must_use]
pub fn profile_url(handle: &str) -> String {
    format!("https://www.instagram.com/{handle}/")
}

/// Resolve a target account: normalize the handle and probe whether its
/// profile is currently reachable.
///
/// Performs exactly one bounded page load, no retries. A settled location
/// indicating a not-found state reports [`InaccessibleReason::NotFound`];
/// any lower-level failure (network, timeout, render) reports
/// [`InaccessibleReason::ErrorAccessing`]. The probe page is released on
/// every exit path.
pub async fn resolve_target(
    driver: &dyn BrowserDriver,
    raw_handle: &str,
    timeout: Duration,
) -> TargetResolution {
    let handle = normalize_handle(raw_handle);

    match probe_profile(driver, &handle, timeout).await {
        Ok(true) => TargetResolution {
            handle,
            accessible: true,
            reason: None,
        },
        Ok(false) => TargetResolution {
            handle,
            accessible: false,
            reason: Some(InaccessibleReason::NotFound),
        },
        Err(e) => {
            tracing::warn!(handle = %handle, error = %e, "profile probe failed");
            TargetResolution {
                handle,
                accessible: false,
                reason: Some(InaccessibleReason::ErrorAccessing),
            }
        }
    }
}

/// Load the profile once and report whether it resolved somewhere real.
async fn probe_profile(
    driver: &dyn BrowserDriver,
    handle: &str,
    timeout: Duration,
) -> Result<bool, BrowserError> {
    let mut page = driver.open_page().await?;
    let outcome = settled_location(page.as_mut(), &profile_url(handle), timeout).await;
    if let Err(e) = page.close().await {
        tracing::debug!(error = %e, "probe page close failed");
    }

    let settled = outcome?;
    Ok(!settled.contains("404"))
}

async fn settled_location(
    page: &mut dyn BrowserPage,
    url: &str,
    timeout: Duration,
) -> Result<String, BrowserError> {
    page.navigate(url, timeout).await?;
    page.current_url().await
}
