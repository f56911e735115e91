//! Bounded-window artifact collection from an account's content listing.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use gramlens_browser::{BrowserDriver, BrowserError, BrowserPage};
use gramlens_core::{
    truncate_chars, Artifact, CollectedBatch, IdGenerator, MediaType, CAPTION_MAX_CHARS,
};

use crate::parse::{parse_metric, post_id_from_url};
use crate::resolve::profile_url;

/// Links to individual items on the content listing.
const LISTING_LINK_SELECTOR: &str = "article a";
/// Caption element on an item page; the first non-empty match wins.
const CAPTION_SELECTOR: &str = r#"h1, [data-testid="caption"]"#;
/// Region of an item page carrying visible engagement counts.
const ENGAGEMENT_SELECTOR: &str = "section";
/// Timestamp element on an item page.
const TIMESTAMP_SELECTOR: &str = "time";

/// Pacing knobs for the scroll-driven listing walk.
#[derive(Debug, Clone)]
pub struct CollectorTuning {
    pub navigation_timeout: Duration,
    /// Fixed number of incremental scroll steps. A heuristic substitute for
    /// true pagination; under-collecting is acceptable.
    pub scroll_steps: u32,
    pub scroll_step_delay: Duration,
    pub scroll_amount_px: i64,
}

impl Default for CollectorTuning {
    fn default() -> Self {
        Self {
            navigation_timeout: Duration::from_secs(10),
            scroll_steps: 3,
            scroll_step_delay: Duration::from_secs(1),
            scroll_amount_px: 1_080,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CollectParams {
    /// Normalized bare handle.
    pub handle: String,
    /// Eligibility window; artifacts with an observable posting time older
    /// than this are discarded. `0` disables the bound.
    pub recency_window_days: u32,
    pub max_recent_posts: usize,
}

/// Collects recent artifacts for resolved identities.
///
/// One browser page is open at a time: the listing page is released before
/// the first item visit, and each item page is opened and closed around its
/// own extraction.
pub struct Collector {
    driver: Arc<dyn BrowserDriver>,
    ids: Arc<dyn IdGenerator>,
    tuning: CollectorTuning,
}

impl Collector {
    pub fn new(driver: Arc<dyn BrowserDriver>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            driver,
            ids,
            tuning: CollectorTuning::default(),
        }
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: CollectorTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Collect up to `max_recent_posts` artifacts for `handle`.
    ///
    /// Never fails: collection-level errors are logged for operators and the
    /// artifacts gathered so far (possibly none) are returned.
    /// `like_comment_visible` is true iff at least one artifact was
    /// collected.
    pub async fn collect_recent_artifacts(&self, params: &CollectParams) -> CollectedBatch {
        let mut artifacts = Vec::new();
        if let Err(e) = self.collect_into(params, &mut artifacts).await {
            tracing::warn!(
                handle = %params.handle,
                collected = artifacts.len(),
                error = %e,
                "artifact collection failed; returning partial batch"
            );
        }

        let like_comment_visible = !artifacts.is_empty();
        CollectedBatch {
            artifacts,
            like_comment_visible,
        }
    }

    async fn collect_into(
        &self,
        params: &CollectParams,
        out: &mut Vec<Artifact>,
    ) -> Result<(), BrowserError> {
        let item_urls = self.list_recent_items(params).await?;
        tracing::debug!(handle = %params.handle, items = item_urls.len(), "listing walked");

        let cutoff = recency_cutoff(params.recency_window_days);

        for url in item_urls {
            match self.capture_item(&params.handle, &url, cutoff).await {
                Ok(Some(artifact)) => out.push(artifact),
                Ok(None) => {
                    tracing::debug!(url = %url, "item outside recency window; discarded");
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "item capture failed; skipping");
                }
            }
        }

        Ok(())
    }

    /// Walk the listing page and return up to `max_recent_posts` item URLs.
    async fn list_recent_items(&self, params: &CollectParams) -> Result<Vec<String>, BrowserError> {
        let mut page = self.driver.open_page().await?;
        let outcome = self.list_on_page(page.as_mut(), params).await;
        if let Err(e) = page.close().await {
            tracing::debug!(error = %e, "listing page close failed");
        }
        outcome
    }

    async fn list_on_page(
        &self,
        page: &mut dyn BrowserPage,
        params: &CollectParams,
    ) -> Result<Vec<String>, BrowserError> {
        page.navigate(&profile_url(&params.handle), self.tuning.navigation_timeout)
            .await?;

        for _ in 0..self.tuning.scroll_steps {
            page.scroll_by(self.tuning.scroll_amount_px).await?;
            tokio::time::sleep(self.tuning.scroll_step_delay).await;
        }

        let hrefs = page.extract_attrs(LISTING_LINK_SELECTOR, "href").await?;
        Ok(hrefs
            .into_iter()
            .filter(|href| !href.is_empty())
            .take(params.max_recent_posts)
            .collect())
    }

    /// Visit one item and build its artifact.
    ///
    /// Returns `Ok(None)` when the item's observable posting time falls
    /// outside the recency window.
    async fn capture_item(
        &self,
        handle: &str,
        url: &str,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Option<Artifact>, BrowserError> {
        let mut page = self.driver.open_page().await?;
        let outcome = self.capture_on_page(page.as_mut(), handle, url, cutoff).await;
        if let Err(e) = page.close().await {
            tracing::debug!(error = %e, "item page close failed");
        }
        outcome
    }

    async fn capture_on_page(
        &self,
        page: &mut dyn BrowserPage,
        handle: &str,
        url: &str,
        cutoff: Option<DateTime<Utc>>,
    ) -> Result<Option<Artifact>, BrowserError> {
        page.navigate(url, self.tuning.navigation_timeout).await?;

        let caption = page
            .extract_texts(CAPTION_SELECTOR)
            .await?
            .into_iter()
            .find(|t| !t.trim().is_empty())
            .unwrap_or_default();
        let caption_text = truncate_chars(caption.trim(), CAPTION_MAX_CHARS);

        let engagement = page.extract_texts(ENGAGEMENT_SELECTOR).await?.join(" ");
        let like_count = parse_metric(&engagement, "like");
        let comment_count = parse_metric(&engagement, "comment");

        let posted_at = page
            .extract_attrs(TIMESTAMP_SELECTOR, "datetime")
            .await?
            .into_iter()
            .find_map(|v| DateTime::parse_from_rfc3339(&v).ok())
            .map(|dt| dt.with_timezone(&Utc));

        if let (Some(posted), Some(cutoff)) = (posted_at, cutoff) {
            if posted < cutoff {
                return Ok(None);
            }
        }

        Ok(Some(Artifact {
            artifact_id: self.ids.artifact_id(),
            source_url: url.to_string(),
            captured_at: Utc::now(),
            account_handle: handle.to_string(),
            post_id: post_id_from_url(url),
            caption_text,
            media_type: classify_media_type(url),
            posted_at,
            like_count,
            comment_count,
        }))
    }
}

fn recency_cutoff(window_days: u32) -> Option<DateTime<Utc>> {
    (window_days > 0).then(|| Utc::now() - chrono::Duration::days(i64::from(window_days)))
}

/// Reels are identifiable from the URL path; stills and carousels share the
/// `/p/` namespace and stay unclassified.
fn classify_media_type(url: &str) -> MediaType {
    if url.contains("/reel/") {
        MediaType::Reel
    } else {
        MediaType::Unknown
    }
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
