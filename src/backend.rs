//! Runtime selection of the page renderer from configuration.

use std::time::Duration;

use dossier_gather::{BrowserlessRenderer, ChromeRenderer, GatherError, PageRenderer};

use crate::config::{DossierConfig, RendererBackend};
use crate::error::Result;

/// The renderer chosen by `[renderer] backend`.
#[derive(Debug, Clone)]
pub enum Renderer {
    /// Local headless Chromium.
    Chrome(ChromeRenderer),
    /// Remote Browserless service.
    Browserless(BrowserlessRenderer),
}

impl Renderer {
    /// Build the configured renderer.
    ///
    /// # Errors
    ///
    /// Returns an error if the Browserless HTTP client cannot be built.
    pub fn from_config(config: &DossierConfig) -> Result<Self> {
        let user_agent = config.search.user_agent.clone();
        match config.renderer.backend {
            RendererBackend::Chrome => Ok(Self::Chrome(
                ChromeRenderer::new(&config.renderer.chrome_bin).with_user_agent(user_agent),
            )),
            RendererBackend::Browserless => {
                // Give the HTTP layer headroom; the pipeline enforces the page budget.
                let request_timeout = Duration::from_secs(config.search.scrape_timeout * 2);
                let renderer = BrowserlessRenderer::new(
                    &config.renderer.browserless_url,
                    config.renderer.browserless_token.as_deref(),
                    user_agent.as_deref(),
                    request_timeout,
                )?;
                Ok(Self::Browserless(renderer))
            }
        }
    }
}

impl PageRenderer for Renderer {
    async fn fetch_html(&self, url: &str, timeout: Duration) -> std::result::Result<String, GatherError> {
        match self {
            Self::Chrome(chrome) => chrome.fetch_html(url, timeout).await,
            Self::Browserless(browserless) => browserless.fetch_html(url, timeout).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Chrome(chrome) => chrome.name(),
            Self::Browserless(browserless) => browserless.name(),
        }
    }
}
