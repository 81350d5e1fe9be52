//! DuckDuckGo search provider.
//!
//! Uses the HTML-only endpoint at `https://html.duckduckgo.com/html/`,
//! which needs no JavaScript and tolerates automated requests.

use std::time::Duration;

use crate::error::GatherError;
use crate::http;
use crate::provider::SearchProvider;
use crate::types::SearchHit;
use scraper::{Html, Selector};
use url::Url;

/// Default DuckDuckGo HTML endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// DuckDuckGo HTML search scraper.
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    endpoint: String,
    timeout: Duration,
    user_agent: Option<String>,
}

impl DuckDuckGoProvider {
    /// Create a provider against the public endpoint.
    pub fn new(timeout: Duration) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout,
            user_agent: None,
        }
    }

    /// Point the provider at a different endpoint (mirrors, test servers).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Send a fixed User-Agent instead of a rotated one.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: Option<String>) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Extract the real URL from DuckDuckGo's redirect wrapper.
    ///
    /// DDG wraps URLs like: `//duckduckgo.com/l/?uddg=https%3A%2F%2Fexample.com&rut=...`
    fn extract_url(href: &str) -> Option<String> {
        let full_href = if href.starts_with("//") {
            format!("https:{href}")
        } else {
            href.to_string()
        };

        let parsed = Url::parse(&full_href).ok()?;

        if parsed.host_str() == Some("duckduckgo.com") && parsed.path().starts_with("/l/") {
            parsed
                .query_pairs()
                .find(|(key, _)| key == "uddg")
                .map(|(_, value)| value.into_owned())
        } else {
            Some(full_href)
        }
    }
}

impl SearchProvider for DuckDuckGoProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, GatherError> {
        tracing::trace!(query, "DuckDuckGo search");

        let client = http::build_client(self.timeout, self.user_agent.as_deref())?;

        let response = client
            .post(&self.endpoint)
            .form(&[("q", query)])
            .header("Accept-Language", "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| GatherError::Http(format!("DuckDuckGo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| GatherError::Http(format!("DuckDuckGo HTTP error: {e}")))?;

        let html = response
            .text()
            .await
            .map_err(|e| GatherError::Http(format!("DuckDuckGo response read failed: {e}")))?;

        tracing::trace!(bytes = html.len(), "DuckDuckGo response received");

        parse_duckduckgo_html(&html, limit)
    }

    fn name(&self) -> &'static str {
        "DuckDuckGo"
    }
}

/// Parse a DuckDuckGo HTML results page into hits, in rank order.
pub(crate) fn parse_duckduckgo_html(html: &str, limit: usize) -> Result<Vec<SearchHit>, GatherError> {
    let document = Html::parse_document(html);

    let result_sel = Selector::parse(
        ".result.results_links.results_links_deep:not(.result--ad), .web-result:not(.result--ad)",
    )
    .map_err(|e| GatherError::Parse(format!("invalid result selector: {e:?}")))?;
    let title_sel = Selector::parse(".result__a")
        .map_err(|e| GatherError::Parse(format!("invalid title selector: {e:?}")))?;
    let snippet_sel = Selector::parse(".result__snippet")
        .map_err(|e| GatherError::Parse(format!("invalid snippet selector: {e:?}")))?;

    let mut hits = Vec::new();

    for element in document.select(&result_sel) {
        if hits.len() >= limit {
            break;
        }

        let Some(title_el) = element.select(&title_sel).next() else {
            continue;
        };

        let title = title_el.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let Some(url) = title_el
            .value()
            .attr("href")
            .and_then(DuckDuckGoProvider::extract_url)
        else {
            continue;
        };

        let snippet = element
            .select(&snippet_sel)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        hits.push(SearchHit { title, url, snippet });
    }

    tracing::debug!(count = hits.len(), "DuckDuckGo results parsed");
    Ok(hits)
}
