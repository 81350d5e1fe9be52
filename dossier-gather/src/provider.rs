//! Trait definition for pluggable search backends.
//!
//! The dispatcher only ever talks to a [`SearchProvider`], so tests and
//! alternative backends can stand in for [`DuckDuckGoProvider`](crate::providers::DuckDuckGoProvider).

use crate::error::GatherError;
use crate::types::SearchHit;

/// A search backend that turns one text query into ranked hits.
///
/// Implementations handle their own URL construction, HTTP requests and
/// response parsing. They may fail freely; the dispatcher degrades any
/// error to an empty hit list for that query.
///
/// All implementations must be `Send + Sync` so queries can run concurrently.
pub trait SearchProvider: Send + Sync {
    /// Run one query and return up to `limit` hits in rank order.
    ///
    /// # Errors
    ///
    /// Returns [`GatherError`] if the request fails or the response cannot
    /// be parsed.
    fn search(
        &self,
        query: &str,
        limit: usize,
    ) -> impl std::future::Future<Output = Result<Vec<SearchHit>, GatherError>> + Send;

    /// Human-readable backend name, used in log fields.
    fn name(&self) -> &'static str;
}
