//! Core types for search hits and per-source scrape outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single ranked hit returned by a search provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    /// The title of the result page.
    pub title: String,
    /// The URL of the result, exactly as the provider returned it.
    pub url: String,
    /// A text snippet summarising the page content.
    pub snippet: String,
}

impl SearchHit {
    /// Build a hit from its three parts.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
        }
    }
}

/// Why a page produced no usable text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum FailureReason {
    /// The render did not finish within its time budget.
    Timeout,
    /// The page could not be acquired (network, HTTP status, browser crash).
    Fetch(String),
    /// The page rendered, but no text survived extraction.
    EmptyContent,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::Fetch(message) => write!(f, "fetch failed: {message}"),
            Self::EmptyContent => f.write_str("no extractable text"),
        }
    }
}

/// Coarse status of a [`ScrapeOutcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeStatus {
    /// Text was extracted.
    Success,
    /// Nothing usable was extracted.
    Failure,
}

impl fmt::Display for ScrapeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Failure => f.write_str("failure"),
        }
    }
}

/// The result of acquiring one source URL.
///
/// Exactly one outcome is produced per URL handed to the scrape pool. A
/// `Success` always carries non-empty text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ScrapeOutcome {
    /// The page rendered and yielded normalised text.
    Success {
        /// The source URL.
        url: String,
        /// Flat, whitespace-collapsed page text. Never empty.
        text: String,
    },
    /// The page could not be turned into text.
    Failure {
        /// The source URL.
        url: String,
        /// What went wrong.
        reason: FailureReason,
    },
}

impl ScrapeOutcome {
    /// Build an outcome from extracted text, downgrading empty text to
    /// [`FailureReason::EmptyContent`].
    pub fn from_text(url: impl Into<String>, text: String) -> Self {
        let url = url.into();
        if text.is_empty() {
            Self::Failure {
                url,
                reason: FailureReason::EmptyContent,
            }
        } else {
            Self::Success { url, text }
        }
    }

    /// Build a failed outcome.
    pub fn failure(url: impl Into<String>, reason: FailureReason) -> Self {
        Self::Failure {
            url: url.into(),
            reason,
        }
    }

    /// The source URL.
    pub fn url(&self) -> &str {
        match self {
            Self::Success { url, .. } | Self::Failure { url, .. } => url,
        }
    }

    /// The extracted text, or `""` for a failure.
    pub fn text(&self) -> &str {
        match self {
            Self::Success { text, .. } => text,
            Self::Failure { .. } => "",
        }
    }

    /// Coarse status of this outcome.
    pub fn status(&self) -> ScrapeStatus {
        match self {
            Self::Success { .. } => ScrapeStatus::Success,
            Self::Failure { .. } => ScrapeStatus::Failure,
        }
    }

    /// Whether text was extracted.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The failure reason, if any.
    pub fn failure_reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { reason, .. } => Some(reason),
        }
    }
}
