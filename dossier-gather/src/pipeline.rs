//! The gather pipeline: search fan-out → URL dedup → bounded scrape.
//!
//! Each stage runs to completion before the next one starts. The pipeline
//! has no failure state of its own; an empty search result simply yields
//! an empty outcome set.

use std::time::Duration;

use crate::config::GatherConfig;
use crate::dedup::dedup;
use crate::dispatch::search_all;
use crate::error::Result;
use crate::pool::scrape_bounded;
use crate::provider::SearchProvider;
use crate::render::PageRenderer;
use crate::types::ScrapeOutcome;

/// Composes a search provider and a page renderer under one configuration.
#[derive(Debug)]
pub struct GatherPipeline<P, R> {
    provider: P,
    renderer: R,
    config: GatherConfig,
}

impl<P: SearchProvider, R: PageRenderer> GatherPipeline<P, R> {
    /// Build a pipeline, validating `config` first.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError::Config`](crate::GatherError::Config) if the
    /// configuration is invalid.
    pub fn new(provider: P, renderer: R, config: GatherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            provider,
            renderer,
            config,
        })
    }

    /// The configuration this pipeline runs with.
    pub fn config(&self) -> &GatherConfig {
        &self.config
    }

    /// Search every query, dedupe the URLs, and scrape what survives.
    ///
    /// Returns one outcome per unique URL (at most `config.max_urls`), in
    /// first-seen order.
    pub async fn gather<Q: AsRef<str>>(&self, queries: &[Q]) -> Vec<ScrapeOutcome> {
        let timeout = self.config.timeout();

        let hit_lists = search_all(
            &self.provider,
            queries,
            self.config.results_per_query,
            timeout,
        )
        .await;
        let total_hits: usize = hit_lists.iter().map(Vec::len).sum();

        let urls = dedup(&hit_lists, self.config.max_urls);
        tracing::debug!(
            queries = queries.len(),
            total_hits,
            unique_urls = urls.len(),
            "search stage complete"
        );

        let outcomes = scrape_bounded(
            &self.renderer,
            &urls,
            self.config.concurrency,
            timeout,
            self.config.max_text_chars,
        )
        .await;

        let report = GatherReport::from_outcomes(&outcomes);
        tracing::info!(
            queries = queries.len(),
            unique_urls = urls.len(),
            successes = report.successes,
            failures = report.failures,
            provider = self.provider.name(),
            renderer = self.renderer.name(),
            "gather complete"
        );

        outcomes
    }
}

/// Run the full pipeline with explicit limits.
///
/// Equivalent to building a [`GatherPipeline`] from these limits; a
/// `concurrency` of 0 is treated as 1 and no validation error is possible.
pub async fn gather<P, R, Q>(
    provider: &P,
    renderer: &R,
    queries: &[Q],
    per_query_limit: usize,
    max_urls: usize,
    concurrency: usize,
    timeout: Duration,
) -> Vec<ScrapeOutcome>
where
    P: SearchProvider,
    R: PageRenderer,
    Q: AsRef<str>,
{
    let hit_lists = search_all(provider, queries, per_query_limit, timeout).await;
    let urls = dedup(&hit_lists, max_urls);
    scrape_bounded(
        renderer,
        &urls,
        concurrency,
        timeout,
        crate::content::DEFAULT_MAX_CHARS,
    )
    .await
}

/// Success/failure counts over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GatherReport {
    /// Outcomes with extracted text.
    pub successes: usize,
    /// Outcomes without usable text.
    pub failures: usize,
}

impl GatherReport {
    /// Count the outcomes by status.
    pub fn from_outcomes(outcomes: &[ScrapeOutcome]) -> Self {
        let successes = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            successes,
            failures: outcomes.len() - successes,
        }
    }

    /// Total outcomes counted.
    pub fn total(&self) -> usize {
        self.successes + self.failures
    }

    /// True when nothing usable was gathered; callers should treat this as
    /// insufficient evidence rather than an error.
    pub fn is_insufficient(&self) -> bool {
        self.successes == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatherError;
    use crate::types::{FailureReason, SearchHit};

    #[derive(Debug)]
    struct NoHits;

    impl SearchProvider for NoHits {
        async fn search(&self, _query: &str, _limit: usize) -> std::result::Result<Vec<SearchHit>, GatherError> {
            Ok(Vec::new())
        }

        fn name(&self) -> &'static str {
            "none"
        }
    }

    #[derive(Debug)]
    struct Unreachable;

    impl PageRenderer for Unreachable {
        async fn fetch_html(&self, url: &str, _timeout: Duration) -> std::result::Result<String, GatherError> {
            panic!("nothing should be rendered, got {url}");
        }

        fn name(&self) -> &'static str {
            "unreachable"
        }
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GatherConfig {
            concurrency: 0,
            ..Default::default()
        };
        let err = GatherPipeline::new(NoHits, Unreachable, config).unwrap_err();
        assert!(err.to_string().contains("concurrency"));
    }

    #[tokio::test]
    async fn empty_search_yields_empty_outcomes() {
        let pipeline =
            GatherPipeline::new(NoHits, Unreachable, GatherConfig::default()).expect("valid");
        let outcomes = pipeline.gather(&["anything"]).await;
        assert!(outcomes.is_empty());
    }

    #[test]
    fn report_counts_by_status() {
        let outcomes = vec![
            ScrapeOutcome::from_text("https://a.com", "text".into()),
            ScrapeOutcome::failure("https://b.com", FailureReason::Timeout),
            ScrapeOutcome::from_text("https://c.com", String::new()),
        ];
        let report = GatherReport::from_outcomes(&outcomes);
        assert_eq!(report.successes, 1);
        assert_eq!(report.failures, 2);
        assert_eq!(report.total(), 3);
        assert!(!report.is_insufficient());
        assert!(GatherReport::from_outcomes(&[]).is_insufficient());
    }
}
