//! Production driver backed by a Browserless/Chrome service.
//!
//! The service renders pages on demand over HTTP: each call to its
//! `/function` endpoint runs a short script in a fresh browser context and
//! returns the script's result as JSON. The service holds no session between
//! calls, so a [`BrowserlessPage`] records its navigation and scroll state
//! client-side and replays it on every extraction — extraction therefore
//! observes the same lazy-loaded content a live session would have.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::driver::{BrowserDriver, BrowserPage};
use crate::error::BrowserError;

/// Settle wait applied after each replayed scroll step, in milliseconds.
const SCROLL_SETTLE_MS: u64 = 1_000;

const NAVIGATE_CODE: &str = r#"
module.exports = async ({ page, context }) => {
  await page.goto(context.url, { waitUntil: "domcontentloaded", timeout: context.timeoutMs });
  return { url: page.url() };
};
"#;

const EXTRACT_TEXTS_CODE: &str = r#"
module.exports = async ({ page, context }) => {
  await page.goto(context.url, { waitUntil: "domcontentloaded", timeout: context.timeoutMs });
  for (const px of context.scrolls) {
    await page.evaluate((amount) => window.scrollBy(0, amount), px);
    await new Promise((resolve) => setTimeout(resolve, context.settleMs));
  }
  const values = await page.$$eval(context.selector, (els) =>
    els.map((el) => el.textContent || "")
  );
  return { values };
};
"#;

const EXTRACT_ATTRS_CODE: &str = r#"
module.exports = async ({ page, context }) => {
  await page.goto(context.url, { waitUntil: "domcontentloaded", timeout: context.timeoutMs });
  for (const px of context.scrolls) {
    await page.evaluate((amount) => window.scrollBy(0, amount), px);
    await new Promise((resolve) => setTimeout(resolve, context.settleMs));
  }
  const values = await page.$$eval(
    context.selector,
    (els, attr) => els.map((el) => el.getAttribute(attr) || ""),
    context.attr
  );
  return { values };
};
"#;

/// HTTP client for the Browserless `/function` endpoint.
#[derive(Clone)]
pub struct BrowserlessDriver {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UrlPayload {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ValuesPayload {
    values: Vec<String>,
}

impl BrowserlessDriver {
    /// Creates a driver with the configured request timeout.
    ///
    /// `request_timeout` bounds the whole HTTP round-trip and should exceed
    /// the navigation timeout passed to [`BrowserPage::navigate`], since the
    /// service's render time is included.
    ///
    /// # Errors
    ///
    /// Returns [`BrowserError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        request_timeout: Duration,
    ) -> Result<Self, BrowserError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    fn function_endpoint(&self) -> String {
        let mut endpoint = format!("{}/function", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }
        endpoint
    }

    /// Run a script in a fresh browser context and return its JSON result.
    async fn run_function(
        &self,
        code: &str,
        context: serde_json::Value,
    ) -> Result<serde_json::Value, BrowserError> {
        let response = self
            .client
            .post(self.function_endpoint())
            .json(&json!({ "code": code, "context": context }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(BrowserError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BrowserDriver for BrowserlessDriver {
    async fn open_page(&self) -> Result<Box<dyn BrowserPage>, BrowserError> {
        Ok(Box::new(BrowserlessPage {
            service: self.clone(),
            nav: None,
            scrolls: Vec::new(),
        }))
    }
}

#[derive(Debug, Clone)]
struct NavState {
    url: String,
    timeout_ms: u64,
    settled_url: String,
}

/// One logical page against the sessionless service.
pub struct BrowserlessPage {
    service: BrowserlessDriver,
    nav: Option<NavState>,
    scrolls: Vec<i64>,
}

impl BrowserlessPage {
    fn nav(&self) -> Result<&NavState, BrowserError> {
        self.nav.as_ref().ok_or(BrowserError::MissingNavigation)
    }

    fn extraction_context(&self, nav: &NavState) -> serde_json::Value {
        json!({
            "url": nav.url,
            "timeoutMs": nav.timeout_ms,
            "scrolls": self.scrolls,
            "settleMs": SCROLL_SETTLE_MS,
        })
    }

    async fn extract(
        &self,
        code: &str,
        selector: &str,
        attr: Option<&str>,
    ) -> Result<Vec<String>, BrowserError> {
        let nav = self.nav()?;
        let mut context = self.extraction_context(nav);
        context["selector"] = json!(selector);
        if let Some(attr) = attr {
            context["attr"] = json!(attr);
        }

        let value = self.service.run_function(code, context).await?;
        let payload: ValuesPayload = serde_json::from_value(value)
            .map_err(|e| BrowserError::UnexpectedResponse(e.to_string()))?;
        Ok(payload.values)
    }
}

/// Maps service-side navigation timeouts onto the typed timeout error.
fn classify_navigation_error(err: BrowserError, url: &str) -> BrowserError {
    match err {
        BrowserError::Api { ref message, .. } if message.to_lowercase().contains("timeout") => {
            BrowserError::Timeout {
                url: url.to_string(),
            }
        }
        BrowserError::Http(ref e) if e.is_timeout() => BrowserError::Timeout {
            url: url.to_string(),
        },
        other => other,
    }
}

#[async_trait]
impl BrowserPage for BrowserlessPage {
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), BrowserError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let context = json!({ "url": url, "timeoutMs": timeout_ms });

        let value = self
            .service
            .run_function(NAVIGATE_CODE, context)
            .await
            .map_err(|e| classify_navigation_error(e, url))?;
        let payload: UrlPayload = serde_json::from_value(value)
            .map_err(|e| BrowserError::UnexpectedResponse(e.to_string()))?;

        tracing::debug!(url, settled = %payload.url, "navigation committed");
        self.nav = Some(NavState {
            url: url.to_string(),
            timeout_ms,
            settled_url: payload.url,
        });
        self.scrolls.clear();
        Ok(())
    }

    async fn current_url(&self) -> Result<String, BrowserError> {
        Ok(self.nav()?.settled_url.clone())
    }

    async fn scroll_by(&mut self, pixels: i64) -> Result<(), BrowserError> {
        // Recorded and replayed by the next extraction; see module docs.
        self.scrolls.push(pixels);
        Ok(())
    }

    async fn extract_texts(&mut self, selector: &str) -> Result<Vec<String>, BrowserError> {
        self.extract(EXTRACT_TEXTS_CODE, selector, None).await
    }

    async fn extract_attrs(
        &mut self,
        selector: &str,
        attr: &str,
    ) -> Result<Vec<String>, BrowserError> {
        self.extract(EXTRACT_ATTRS_CODE, selector, Some(attr)).await
    }

    async fn close(self: Box<Self>) -> Result<(), BrowserError> {
        // Nothing held remotely; each call ran in its own context.
        tracing::debug!("browserless page released");
        Ok(())
    }
}

#[cfg(test)]
#[path = "browserless_test.rs"]
mod tests;
