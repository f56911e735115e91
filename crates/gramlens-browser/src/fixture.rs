//! Fixture-backed fake driver for tests.
//!
//! Pages are canned selector/attribute maps keyed by URL. Unknown URLs
//! render as empty pages; per-URL failures are scripted with
//! [`FixturePageData::failing`]. The driver counts page opens and closes so
//! tests can assert scoped acquisition (every opened page gets closed, on
//! failure paths too).

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::driver::{BrowserDriver, BrowserPage};
use crate::error::BrowserError;

/// Canned content for one URL.
#[derive(Debug, Clone, Default)]
pub struct FixturePageData {
    final_url: Option<String>,
    texts: HashMap<String, Vec<String>>,
    attrs: HashMap<(String, String), Vec<String>>,
    fail_navigation: bool,
}

impl FixturePageData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// URL the page settles on; defaults to the navigated URL.
    #[must_use]
    pub fn with_final_url(mut self, url: impl Into<String>) -> Self {
        self.final_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_texts<I, S>(mut self, selector: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts.insert(
            selector.to_string(),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_attrs<I, S>(mut self, selector: &str, attr: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attrs.insert(
            (selector.to_string(), attr.to_string()),
            values.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Navigating to this page fails with a service error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fail_navigation = true;
        self
    }
}

/// Fake [`BrowserDriver`] serving canned pages.
#[derive(Clone, Default)]
pub struct FixtureDriver {
    pages: Arc<HashMap<String, FixturePageData>>,
    fail_open: bool,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl FixtureDriver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_page(mut self, url: impl Into<String>, data: FixturePageData) -> Self {
        Arc::make_mut(&mut self.pages).insert(url.into(), data);
        self
    }

    /// Every `open_page` call fails, as if the service were down.
    #[must_use]
    pub fn with_failing_open(mut self) -> Self {
        self.fail_open = true;
        self
    }

    #[must_use]
    pub fn open_count(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn close_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserDriver for FixtureDriver {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        if self.fail_open {
            return Err(BrowserError::Api {
                status: 503,
                message: "fixture: browser service unavailable".to_string(),
            });
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FixturePage {
            pages: Arc::clone(&self.pages),
            closed: Arc::clone(&self.closed),
            current: None,
        }))
    }
}

struct FixturePage {
    pages: Arc<HashMap<String, FixturePageData>>,
    closed: Arc<AtomicUsize>,
    current: Option<(String, FixturePageData)>,
}

impl FixturePage {
    fn current(&self) -> Result<&(String, FixturePageData), BrowserError> {
        self.current.as_ref().ok_or(BrowserError::MissingNavigation)
    }
}

#[async_trait]
impl BrowserPage for FixturePage {
    async fn navigate(&mut self, url: &str, _timeout: Duration) -> Result<(), BrowserError> {
        let data = self.pages.get(url).cloned().unwrap_or_default();
        if data.fail_navigation {
            return Err(BrowserError::Api {
                status: 500,
                message: format!("fixture: navigation to {url} failed"),
            });
        }
        self.current = Some((url.to_string(), data));
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        let (url, data) = self.current()?;
        Ok(data.final_url.clone().unwrap_or_else(|| url.clone()))
    }

    async fn scroll_by(&mut self, _pixels: i64) -> Result<(), BrowserError> {
        self.current().map(|_| ())
    }

    async fn extract_texts(&mut self, selector: &str) -> Result<Vec<String>, BrowserError> {
        let (_, data) = self.current()?;
        Ok(data.texts.get(selector).cloned().unwrap_or_default())
    }

    async fn extract_attrs(
        &mut self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<String>, BrowserError> {
        let (_, data) = self.current()?;
        Ok(data
            .attrs
            .get(&(selector.to_string(), attr.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
