//! Search fan-out: one concurrent provider call per query.
//!
//! Results come back index-aligned with the input queries regardless of
//! completion order. A failing query degrades to an empty list; it never
//! fails the batch.

use std::time::Duration;

use crate::provider::SearchProvider;
use crate::types::SearchHit;

/// Run every query concurrently and collect one hit list per query.
///
/// Each provider call is bounded by `timeout` and truncated to
/// `per_query_limit` hits. Errors and timeouts are logged and become an
/// empty list for that query only. No call is retried.
pub async fn search_all<P, Q>(
    provider: &P,
    queries: &[Q],
    per_query_limit: usize,
    timeout: Duration,
) -> Vec<Vec<SearchHit>>
where
    P: SearchProvider,
    Q: AsRef<str>,
{
    let futures: Vec<_> = queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let query = query.as_ref();
            async move {
                match tokio::time::timeout(timeout, provider.search(query, per_query_limit)).await {
                    Ok(Ok(mut hits)) => {
                        hits.truncate(per_query_limit);
                        tracing::debug!(index, count = hits.len(), provider = provider.name(), "query returned hits");
                        hits
                    }
                    Ok(Err(err)) => {
                        tracing::warn!(index, provider = provider.name(), error = %err, "search query failed");
                        Vec::new()
                    }
                    Err(_) => {
                        tracing::warn!(index, provider = provider.name(), ?timeout, "search query timed out");
                        Vec::new()
                    }
                }
            }
        })
        .collect();

    futures::future::join_all(futures).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatherError;

    /// Returns one hit per query whose URL echoes the query, failing on "fail".
    struct EchoProvider;

    impl SearchProvider for EchoProvider {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, GatherError> {
            if query == "fail" {
                return Err(GatherError::Http("connection reset".into()));
            }
            if query == "slow" {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            // Deliberately ignores `limit` to exercise truncation.
            let _ = limit;
            Ok((0..3)
                .map(|i| SearchHit::new(query, format!("https://{query}.example/{i}"), ""))
                .collect())
        }

        fn name(&self) -> &'static str {
            "echo"
        }
    }

    const BUDGET: Duration = Duration::from_secs(15);

    #[tokio::test]
    async fn results_are_index_aligned_with_queries() {
        let queries = ["alpha", "beta", "gamma"];
        let lists = search_all(&EchoProvider, &queries, 5, BUDGET).await;
        assert_eq!(lists.len(), 3);
        for (query, hits) in queries.iter().zip(&lists) {
            assert!(hits.iter().all(|h| h.title == *query));
        }
    }

    #[tokio::test]
    async fn failing_query_degrades_to_empty_list() {
        let queries = vec!["alpha".to_string(), "fail".to_string(), "gamma".to_string()];
        let lists = search_all(&EchoProvider, &queries, 5, BUDGET).await;
        assert_eq!(lists.len(), 3);
        assert_eq!(lists[0].len(), 3);
        assert!(lists[1].is_empty());
        assert_eq!(lists[2].len(), 3);
    }

    #[tokio::test]
    async fn every_query_failing_still_returns_one_list_each() {
        let lists = search_all(&EchoProvider, &["fail", "fail"], 5, BUDGET).await;
        assert_eq!(lists.len(), 2);
        assert!(lists.iter().all(Vec::is_empty));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_query_times_out_to_empty_list() {
        let lists = search_all(&EchoProvider, &["slow", "beta"], 5, BUDGET).await;
        assert!(lists[0].is_empty());
        assert_eq!(lists[1].len(), 3);
    }

    #[tokio::test]
    async fn hits_truncated_to_per_query_limit() {
        let lists = search_all(&EchoProvider, &["alpha"], 2, BUDGET).await;
        assert_eq!(lists[0].len(), 2);
        assert_eq!(lists[0][1].url, "https://alpha.example/1");
    }

    #[tokio::test]
    async fn no_queries_yields_no_lists() {
        let queries: [&str; 0] = [];
        assert!(search_all(&EchoProvider, &queries, 5, BUDGET).await.is_empty());
    }
}
