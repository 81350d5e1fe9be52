//! Page rendering: headless-browser backends and the infallible
//! [`render`] operation that turns one URL into a [`ScrapeOutcome`].
//!
//! Backends only produce rendered HTML and may fail however they like.
//! [`render`] wraps a backend call in the per-page time budget, extracts
//! text from the result, and collapses every failure mode into
//! [`ScrapeOutcome::Failure`]. Nothing past this boundary sees an error.

pub mod browserless;
pub mod chrome;

pub use browserless::BrowserlessRenderer;
pub use chrome::ChromeRenderer;

use std::time::Duration;

use url::Url;

use crate::content::extract_text;
use crate::error::GatherError;
use crate::types::{FailureReason, ScrapeOutcome};

/// A backend that produces the fully rendered HTML of a page.
///
/// Implementations must execute client-side script so dynamically
/// populated content is present in the returned document. Any per-call
/// browser resource must be owned by the returned future, so that dropping
/// the future (as the timeout does) releases it.
pub trait PageRenderer: Send + Sync {
    /// Render `url` and return the serialised DOM.
    ///
    /// `timeout` is a hint for backends that can enforce it natively;
    /// [`render`] enforces it regardless.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError`] if the page cannot be acquired.
    fn fetch_html(
        &self,
        url: &str,
        timeout: Duration,
    ) -> impl std::future::Future<Output = Result<String, GatherError>> + Send;

    /// Human-readable backend name, used in log fields.
    fn name(&self) -> &'static str;
}

/// Render one URL within `timeout` and extract its text.
///
/// Never fails: timeouts become [`FailureReason::Timeout`], backend errors
/// become [`FailureReason::Fetch`], and a page with no extractable text
/// becomes [`FailureReason::EmptyContent`].
pub async fn render<R: PageRenderer>(
    renderer: &R,
    url: &str,
    timeout: Duration,
    max_text_chars: usize,
) -> ScrapeOutcome {
    if let Err(err) = ensure_web_url(url) {
        tracing::warn!(url, error = %err, "refusing to render");
        return ScrapeOutcome::failure(url, FailureReason::Fetch(err.to_string()));
    }

    let html = match tokio::time::timeout(timeout, renderer.fetch_html(url, timeout)).await {
        Ok(Ok(html)) => html,
        Ok(Err(err)) => {
            tracing::warn!(url, renderer = renderer.name(), error = %err, "render failed");
            return ScrapeOutcome::failure(url, FailureReason::Fetch(err.to_string()));
        }
        Err(_) => {
            tracing::warn!(url, renderer = renderer.name(), ?timeout, "render timed out");
            return ScrapeOutcome::failure(url, FailureReason::Timeout);
        }
    };

    let text = extract_text(&html, max_text_chars);
    if text.is_empty() {
        tracing::debug!(url, bytes = html.len(), "rendered page had no extractable text");
    } else {
        tracing::debug!(url, chars = text.len(), "page rendered");
    }
    ScrapeOutcome::from_text(url, text)
}

/// Only `http` and `https` URLs are handed to a browser.
pub(crate) fn ensure_web_url(url: &str) -> Result<Url, GatherError> {
    let parsed = Url::parse(url).map_err(|e| GatherError::Render(format!("invalid URL: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(GatherError::Render(format!(
            "only http/https URLs can be rendered, got: {other}"
        ))),
    }
}
