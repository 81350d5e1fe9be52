//! Renderer backed by a Browserless `/content` endpoint.
//!
//! Browserless runs the browser; each request gets its own page session on
//! the server, which is torn down when the request completes or the
//! connection is dropped. Only the HTTP client is reused across calls.

use std::time::Duration;

use super::PageRenderer;
use crate::error::GatherError;
use crate::http;

/// Renders pages through a remote Browserless instance.
#[derive(Debug, Clone)]
pub struct BrowserlessRenderer {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl BrowserlessRenderer {
    /// Create a renderer for the Browserless instance at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<&str>,
        user_agent: Option<&str>,
        request_timeout: Duration,
    ) -> Result<Self, GatherError> {
        Ok(Self {
            client: http::build_client(request_timeout, user_agent)?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/content", self.base_url)
    }
}

impl PageRenderer for BrowserlessRenderer {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> Result<String, GatherError> {
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        let body = serde_json::json!({
            "url": url,
            "gotoOptions": {
                "waitUntil": "networkidle2",
                "timeout": timeout_ms,
            },
        });

        tracing::debug!(url, base_url = %self.base_url, "requesting rendered content");

        let mut request = self.client.post(self.endpoint());
        if let Some(ref token) = self.token {
            request = request.query(&[("token", token)]);
        }

        // Errors must not echo the request URL: it carries the token.
        let resp = request
            .json(&body)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                GatherError::Http(format!("Browserless request failed: {}", e.without_url()))
            })?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GatherError::Render(format!(
                "Browserless returned {}: {}",
                status.as_u16(),
                message.trim()
            )));
        }

        resp.text()
            .await
            .map_err(|e| {
                GatherError::Http(format!(
                    "Browserless response read failed: {}",
                    e.without_url()
                ))
            })
    }

    fn name(&self) -> &'static str {
        "browserless"
    }
}
