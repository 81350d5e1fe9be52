//! Gather configuration.
//!
//! [`GatherConfig`] carries every resource limit the pipeline uses. It is
//! passed explicitly into [`GatherPipeline::new`](crate::pipeline::GatherPipeline::new);
//! nothing in the crate falls back to a process-wide default.

use std::time::Duration;

use crate::error::GatherError;

/// Configuration for one gather run.
///
/// Use [`Default::default()`] for the stock limits, or construct with field
/// overrides.
#[derive(Debug, Clone)]
pub struct GatherConfig {
    /// Hits requested from the search provider for each query.
    pub results_per_query: usize,
    /// Maximum number of unique URLs kept after deduplication.
    pub max_urls: usize,
    /// Maximum number of page renders in flight at once.
    pub concurrency: usize,
    /// Time budget in seconds for a single search call or page render.
    pub timeout_seconds: u64,
    /// Upper bound on the characters of text kept per page.
    pub max_text_chars: usize,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
}

impl Default for GatherConfig {
    fn default() -> Self {
        Self {
            results_per_query: 5,
            max_urls: 10,
            concurrency: 3,
            timeout_seconds: 15,
            max_text_chars: crate::content::DEFAULT_MAX_CHARS,
            user_agent: None,
        }
    }
}

impl GatherConfig {
    /// The per-operation timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `results_per_query` must be greater than 0
    /// - `concurrency` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    /// - `max_text_chars` must be greater than 0
    ///
    /// `max_urls` may be 0, in which case nothing is scraped.
    pub fn validate(&self) -> Result<(), GatherError> {
        if self.results_per_query == 0 {
            return Err(GatherError::Config(
                "results_per_query must be greater than 0".into(),
            ));
        }
        if self.concurrency == 0 {
            return Err(GatherError::Config(
                "concurrency must be greater than 0".into(),
            ));
        }
        if self.timeout_seconds == 0 {
            return Err(GatherError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_text_chars == 0 {
            return Err(GatherError::Config(
                "max_text_chars must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
