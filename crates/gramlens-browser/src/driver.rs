//! Headless-browser automation boundary.
//!
//! The collector and resolver only ever talk to these traits, so the single
//! environment dependency of the pipeline stays substitutable: production
//! backs them with [`crate::BrowserlessDriver`], tests with
//! [`crate::fixture::FixtureDriver`].

use std::time::Duration;

use async_trait::async_trait;

use crate::error::BrowserError;

/// Capability to open fresh rendering contexts.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Open a new page. Callers own the page and must call
    /// [`BrowserPage::close`] on every exit path, including failures.
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError>;
}

/// One rendering context: load a URL, wait for settling, scroll, read
/// rendered text and attributes.
#[async_trait]
pub trait BrowserPage: Send {
    /// Load `url` and wait for DOM content, bounded by `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError>;

    /// URL the page settled on after any redirects.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::MissingNavigation`] before the first
    /// successful [`Self::navigate`].
    async fn current_url(&self) -> Result<String, BrowserError>;

    /// Scroll the viewport down by `pixels` to trigger lazy-loaded content.
    async fn scroll_by(&mut self, pixels: i64) -> Result<(), BrowserError>;

    /// Text content of every element matching the CSS `selector`, in
    /// document order.
    async fn extract_texts(&mut self, selector: &str) -> Result<Vec<String>, BrowserError>;

    /// Value of `attr` for every element matching `selector`, in document
    /// order; elements without the attribute contribute an empty string.
    async fn extract_attrs(&mut self, selector: &str, attr: &str)
        -> Result<Vec<String>, BrowserError>;

    /// Release the page.
    async fn close(self: Box<Self>) -> Result<(), BrowserError>;
}
