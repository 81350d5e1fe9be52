//! Bounded-concurrency scrape pool.
//!
//! Every URL gets its own future that waits for a semaphore permit and then
//! renders. The semaphore is the only admission control: at most
//! `concurrency` renders run at once, and a released permit admits the next
//! waiting URL immediately. Outcomes come back in input order.

use std::time::Duration;

use tokio::sync::Semaphore;

use crate::render::{render, PageRenderer};
use crate::types::{FailureReason, ScrapeOutcome};

/// Render every URL with at most `concurrency` renders in flight.
///
/// Returns exactly one outcome per input URL, index-aligned with `urls`.
/// Each render is bounded by `timeout`, so the worst-case wall time is
/// `ceil(urls.len() / concurrency) * timeout`. A `concurrency` of 0 is
/// treated as 1.
pub async fn scrape_bounded<R: PageRenderer>(
    renderer: &R,
    urls: &[String],
    concurrency: usize,
    timeout: Duration,
    max_text_chars: usize,
) -> Vec<ScrapeOutcome> {
    let semaphore = Semaphore::new(concurrency.max(1));

    let futures: Vec<_> = urls
        .iter()
        .map(|url| {
            let semaphore = &semaphore;
            async move {
                // The semaphore is never closed while this function is running.
                let Ok(_permit) = semaphore.acquire().await else {
                    return ScrapeOutcome::failure(
                        url.as_str(),
                        FailureReason::Fetch("scrape pool closed".into()),
                    );
                };
                render(renderer, url, timeout, max_text_chars).await
            }
        })
        .collect();

    let outcomes = futures::future::join_all(futures).await;

    let successes = outcomes.iter().filter(|o| o.is_success()).count();
    tracing::debug!(
        urls = urls.len(),
        successes,
        failures = outcomes.len() - successes,
        "scrape pool finished"
    );

    outcomes
}
