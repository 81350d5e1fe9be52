//! Shared HTTP client with User-Agent rotation.
//!
//! Used by the search provider and the Browserless renderer. The client
//! has browser-like headers, cookie support, and a rotating User-Agent.

use crate::error::GatherError;
use rand::seq::SliceRandom;
use std::time::Duration;

/// Realistic browser User-Agent strings, rotated per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Build a [`reqwest::Client`] with the given request timeout.
///
/// The client has:
/// - Cookie store enabled (consent pages)
/// - Random User-Agent from the rotation list, unless `user_agent` is set
/// - Brotli and gzip decompression
/// - At most 10 redirects
///
/// # Errors
///
/// Returns [`GatherError::Http`] if the client cannot be constructed.
pub fn build_client(
    timeout: Duration,
    user_agent: Option<&str>,
) -> Result<reqwest::Client, GatherError> {
    let ua = match user_agent {
        Some(custom) => custom.to_owned(),
        None => random_user_agent().to_owned(),
    };

    reqwest::Client::builder()
        .cookie_store(true)
        .timeout(timeout)
        .user_agent(ua)
        .redirect(reqwest::redirect::Policy::limited(10))
        .build()
        .map_err(|e| GatherError::Http(format!("failed to build HTTP client: {e}")))
}

/// Select a random User-Agent string from the rotation list.
pub fn random_user_agent() -> &'static str {
    let mut rng = rand::thread_rng();
    USER_AGENTS
        .choose(&mut rng)
        .copied()
        // USER_AGENTS is a non-empty const array
        .unwrap_or(USER_AGENTS[0])
}
