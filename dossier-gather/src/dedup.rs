//! URL deduplication across per-query hit lists.
//!
//! Flattens hit lists in query order, then rank order, and keeps the first
//! occurrence of each URL. URLs are compared as exact strings; no scheme,
//! host, trailing-slash or query normalisation is applied.

use std::collections::HashSet;

use crate::types::SearchHit;

/// Flatten `hit_lists` into an ordered, duplicate-free URL list of at most
/// `limit` entries.
///
/// Empty URLs are discarded. Truncation is positional: the first `limit`
/// distinct URLs in traversal order win.
pub fn dedup(hit_lists: &[Vec<SearchHit>], limit: usize) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut urls = Vec::new();

    for hit in hit_lists.iter().flatten() {
        if urls.len() >= limit {
            break;
        }
        let url = hit.url.as_str();
        if url.is_empty() || !seen.insert(url) {
            continue;
        }
        urls.push(url.to_owned());
    }

    urls
}
