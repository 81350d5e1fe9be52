//! Configuration types for the dossier tool.
//!
//! Loaded from TOML. Every section has defaults, so an absent file or an
//! empty one yields a working configuration. Secrets are read from the
//! environment rather than stored in the file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use dossier_gather::GatherConfig;

use crate::error::{DossierError, Result};

/// Environment variable holding the Browserless API token.
pub const BROWSERLESS_TOKEN_ENV: &str = "BROWSERLESS_TOKEN";
/// Environment variable overriding the Chromium executable.
pub const CHROME_BIN_ENV: &str = "CHROME_BIN";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DossierConfig {
    /// Search and scrape limits.
    pub search: SearchConfig,
    /// Headless browser backend.
    pub renderer: RendererConfig,
    /// Dossier file output.
    pub output: OutputConfig,
}

/// Search and scrape limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of unique URLs scraped per gather.
    pub max_queries: usize,
    /// Per-page render timeout in seconds (also bounds each search call).
    pub scrape_timeout: u64,
    /// Hits requested per search query.
    pub results_per_query: usize,
    /// Maximum concurrent page renders.
    pub concurrency: usize,
    /// Fixed User-Agent (None = rotate).
    pub user_agent: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_queries: 10,
            scrape_timeout: 15,
            results_per_query: 5,
            concurrency: 3,
            user_agent: None,
        }
    }
}

/// Which headless browser backend renders pages.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererBackend {
    /// A local Chromium process per page.
    #[default]
    Chrome,
    /// A remote Browserless service.
    Browserless,
}

/// Renderer backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Backend selection.
    pub backend: RendererBackend,
    /// Chromium executable for the `chrome` backend.
    pub chrome_bin: String,
    /// Base URL of the Browserless service.
    pub browserless_url: String,
    /// Browserless token. Falls back to `BROWSERLESS_TOKEN`.
    pub browserless_token: Option<String>,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            backend: RendererBackend::Chrome,
            chrome_bin: dossier_gather::render::chrome::DEFAULT_CHROME_BIN.to_owned(),
            browserless_url: "http://localhost:3000".to_owned(),
            browserless_token: None,
        }
    }
}

/// Dossier output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory that receives dossier files.
    pub dir: PathBuf,
    /// Characters of page text embedded per source.
    pub source_char_budget: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./reports"),
            source_char_budget: 2000,
        }
    }
}

/// Per-run overrides, usually from command-line flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// Replaces `search.max_queries`.
    pub max_urls: Option<usize>,
    /// Replaces `search.concurrency`.
    pub concurrency: Option<usize>,
    /// Replaces `search.scrape_timeout`.
    pub scrape_timeout: Option<u64>,
    /// Replaces `output.dir`.
    pub output_dir: Option<PathBuf>,
}

impl DossierConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DossierError::Config(format!("cannot read {}: {e}", path.display()))
        })?;
        toml::from_str(&content).map_err(|e| DossierError::Config(e.to_string()))
    }

    /// Load configuration for a run.
    ///
    /// An explicit `path` must exist. Without one, the default path is used
    /// when present and built-in defaults otherwise. Environment overrides
    /// are applied afterwards. The result is not validated; see
    /// [`DossierConfig::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`DossierError::Config`] for unreadable or malformed files.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load, apply per-run overrides, then validate once.
    ///
    /// # Errors
    ///
    /// Returns [`DossierError::Config`] for unreadable, malformed, or
    /// invalid configuration.
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_overrides(overrides);
        config.validate()?;
        Ok(config)
    }

    /// Replace the fields set in `overrides`.
    pub fn apply_overrides(&mut self, overrides: Overrides) {
        if let Some(max_urls) = overrides.max_urls {
            self.search.max_queries = max_urls;
        }
        if let Some(concurrency) = overrides.concurrency {
            self.search.concurrency = concurrency;
        }
        if let Some(timeout) = overrides.scrape_timeout {
            self.search.scrape_timeout = timeout;
        }
        if let Some(dir) = overrides.output_dir {
            self.output.dir = dir;
        }
    }

    /// Fill secrets and overrides from the environment.
    ///
    /// `lookup` is `std::env::var` in production and a map in tests.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.renderer.browserless_token.is_none() {
            self.renderer.browserless_token =
                lookup(BROWSERLESS_TOKEN_ENV).filter(|t| !t.trim().is_empty());
        }
        if let Some(bin) = lookup(CHROME_BIN_ENV).filter(|b| !b.trim().is_empty()) {
            self.renderer.chrome_bin = bin;
        }
    }

    /// Check the limits before any gathering starts.
    ///
    /// # Errors
    ///
    /// Returns [`DossierError::Config`] naming the first invalid field.
    pub fn validate(&self) -> Result<()> {
        self.gather_config()
            .validate()
            .map_err(|e| DossierError::Config(e.to_string()))?;
        if self.output.source_char_budget == 0 {
            return Err(DossierError::Config(
                "source_char_budget must be greater than 0".into(),
            ));
        }
        if self.renderer.backend == RendererBackend::Browserless
            && self.renderer.browserless_url.trim().is_empty()
        {
            return Err(DossierError::Config(
                "browserless_url is required for the browserless backend".into(),
            ));
        }
        Ok(())
    }

    /// Map the search section onto the gather pipeline's configuration.
    pub fn gather_config(&self) -> GatherConfig {
        GatherConfig {
            results_per_query: self.search.results_per_query,
            max_urls: self.search.max_queries,
            concurrency: self.search.concurrency,
            timeout_seconds: self.search.scrape_timeout,
            user_agent: self.search.user_agent.clone(),
            ..GatherConfig::default()
        }
    }

    /// Returns the default config file path: `~/.config/dossier/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("dossier").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("dossier")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/dossier-config/config.toml")
        }
    }
}
