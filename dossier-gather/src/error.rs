//! Error types for the dossier-gather crate.
//!
//! These errors never cross the gather pipeline boundary: search failures
//! degrade to empty hit lists and render failures to
//! [`ScrapeOutcome::Failure`](crate::types::ScrapeOutcome). They surface
//! only from configuration validation and from the individual provider and
//! renderer backends.

/// Errors that can occur inside search providers, renderers, or config checks.
#[derive(Debug, thiserror::Error)]
pub enum GatherError {
    /// An HTTP request to a search backend or render service failed.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a search backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// An operation did not finish within its time budget.
    #[error("timed out: {0}")]
    Timeout(String),

    /// The headless browser could not produce a rendered document.
    #[error("render error: {0}")]
    Render(String),

    /// Invalid gather configuration.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for dossier-gather results.
pub type Result<T> = std::result::Result<T, GatherError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_http() {
        let err = GatherError::Http("connection refused".into());
        assert_eq!(err.to_string(), "HTTP error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = GatherError::Parse("unexpected HTML structure".into());
        assert_eq!(err.to_string(), "parse error: unexpected HTML structure");
    }

    #[test]
    fn display_timeout() {
        let err = GatherError::Timeout("exceeded 15s".into());
        assert_eq!(err.to_string(), "timed out: exceeded 15s");
    }

    #[test]
    fn display_render() {
        let err = GatherError::Render("chromium exited with status 1".into());
        assert_eq!(err.to_string(), "render error: chromium exited with status 1");
    }

    #[test]
    fn display_config() {
        let err = GatherError::Config("concurrency must be greater than 0".into());
        assert_eq!(
            err.to_string(),
            "config error: concurrency must be greater than 0"
        );
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GatherError>();
    }
}
