//! # dossier-gather
//!
//! The concurrent data-gathering core of the research dossier tool.
//!
//! Given a set of search queries, this crate searches each one
//! concurrently, merges the hits into an ordered list of unique URLs,
//! renders every page in a headless browser under a fixed concurrency
//! ceiling, and returns one [`ScrapeOutcome`] per URL.
//!
//! ## Design
//!
//! - [`dispatch::search_all`] fans out one provider call per query and
//!   returns index-aligned hit lists; a failed query becomes an empty list
//! - [`dedup::dedup`] keeps the first occurrence of each exact URL string
//! - [`render::render`] wraps a [`PageRenderer`] in a per-page timeout and
//!   extracts flat text; every failure becomes a `Failure` outcome
//! - [`pool::scrape_bounded`] limits in-flight renders with a semaphore
//! - [`GatherPipeline`] runs the stages in sequence
//!
//! Nothing in the pipeline returns an error once it is constructed: partial
//! results are always available to the caller.

pub mod config;
pub mod content;
pub mod dedup;
pub mod dispatch;
pub mod error;
pub mod http;
pub mod pipeline;
pub mod pool;
pub mod provider;
pub mod providers;
pub mod render;
pub mod types;

pub use config::GatherConfig;
pub use error::{GatherError, Result};
pub use pipeline::{gather, GatherPipeline, GatherReport};
pub use provider::SearchProvider;
pub use providers::DuckDuckGoProvider;
pub use render::{BrowserlessRenderer, ChromeRenderer, PageRenderer};
pub use types::{FailureReason, ScrapeOutcome, ScrapeStatus, SearchHit};

/// Gather sources for `queries` with DuckDuckGo search and local headless
/// Chromium rendering.
///
/// Convenience wrapper around [`GatherPipeline`].
///
/// # Errors
///
/// Returns [`GatherError::Config`] if `config` is invalid. Search and
/// render failures never surface here; they are recorded in the outcomes.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> dossier_gather::Result<()> {
/// let config = dossier_gather::GatherConfig::default();
/// let outcomes = dossier_gather::gather_default(&["fed rate cut 2026"], config).await?;
/// for outcome in &outcomes {
///     println!("{} {}", outcome.status(), outcome.url());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn gather_default<Q: AsRef<str>>(
    queries: &[Q],
    config: GatherConfig,
) -> Result<Vec<ScrapeOutcome>> {
    let provider =
        DuckDuckGoProvider::new(config.timeout()).with_user_agent(config.user_agent.clone());
    let renderer = ChromeRenderer::default().with_user_agent(config.user_agent.clone());
    let pipeline = GatherPipeline::new(provider, renderer, config)?;
    Ok(pipeline.gather(queries).await)
}
