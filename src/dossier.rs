//! Dossier writer: turns gathered outcomes into a cited Markdown document
//! and persists it.
//!
//! Only `Success` outcomes with text are embedded as sources. Each source
//! is truncated to a character budget and numbered so the References list
//! matches the in-text numbering.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use dossier_gather::{GatherReport, ScrapeOutcome};
use url::Url;

use crate::error::Result;

/// Placeholder used when no source produced usable text.
pub const NO_SOURCES: &str = "No sources were successfully scraped.";

/// What was asked and which queries were run.
#[derive(Debug, Clone, Default)]
pub struct PlanInfo {
    /// The research question.
    pub question: String,
    /// Queries gathered for current evidence.
    pub search_queries: Vec<String>,
    /// Queries gathered for historical / base-rate evidence.
    pub historical_queries: Vec<String>,
}

/// A usable source, ready for embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry<'a> {
    /// Source URL.
    pub url: &'a str,
    /// Extracted page text.
    pub text: &'a str,
}

/// Keep only outcomes that carry text, in their original order.
pub fn usable_sources(outcomes: &[ScrapeOutcome]) -> Vec<SourceEntry<'_>> {
    outcomes
        .iter()
        .filter(|o| o.is_success() && !o.text().is_empty())
        .map(|o| SourceEntry {
            url: o.url(),
            text: o.text(),
        })
        .collect()
}

/// Host (and explicit port) of `url` without a leading `www.`; the raw
/// string if unparsable.
pub fn extract_domain(url: &str) -> String {
    let host = Url::parse(url)
        .ok()
        .and_then(|u| {
            let host = u.host_str()?;
            Some(match u.port() {
                Some(port) => format!("{host}:{port}"),
                None => host.to_owned(),
            })
        })
        .unwrap_or_else(|| url.to_owned());
    host.strip_prefix("www.").map(str::to_owned).unwrap_or(host)
}

/// Cut `text` to at most `budget` characters, marking the cut.
pub fn truncate_source(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => format!("{}... [truncated]", &text[..byte_idx]),
        None => text.to_owned(),
    }
}

/// Format sources as numbered blocks starting at `first_number`.
pub fn format_sources(sources: &[SourceEntry<'_>], budget: usize, first_number: usize) -> String {
    if sources.is_empty() {
        return NO_SOURCES.to_owned();
    }

    sources
        .iter()
        .enumerate()
        .map(|(i, source)| {
            format!(
                "[{n}] Source: {url}\nDomain: {domain}\nContent:\n{text}\n",
                n = first_number + i,
                url = source.url,
                domain = extract_domain(source.url),
                text = truncate_source(source.text, budget),
            )
        })
        .collect::<Vec<_>>()
        .join("\n---\n")
}

/// Render the full Markdown dossier.
pub fn render_dossier(
    plan: &PlanInfo,
    outcomes: &[ScrapeOutcome],
    historical: &[ScrapeOutcome],
    budget: usize,
    date: NaiveDate,
) -> String {
    let sources = usable_sources(outcomes);
    let historical_sources = usable_sources(historical);
    let report = GatherReport::from_outcomes(outcomes);
    let historical_report = GatherReport::from_outcomes(historical);

    let mut doc = String::new();
    doc.push_str(&format!("# Research Dossier: {}\n", plan.question));
    doc.push_str(&format!("**Date:** {}\n\n", date.format("%Y-%m-%d")));

    doc.push_str("## Research Parameters\n");
    doc.push_str(&format!(
        "- Search queries: {}\n",
        join_or_none(&plan.search_queries)
    ));
    doc.push_str(&format!(
        "- Historical queries: {}\n\n",
        join_or_none(&plan.historical_queries)
    ));

    doc.push_str("## Summary\n");
    doc.push_str(&format!(
        "- Sources gathered: {} ({} usable, {} failed)\n",
        report.total(),
        report.successes,
        report.failures
    ));
    if !plan.historical_queries.is_empty() {
        doc.push_str(&format!(
            "- Historical sources gathered: {} ({} usable, {} failed)\n",
            historical_report.total(),
            historical_report.successes,
            historical_report.failures
        ));
    }
    if report.is_insufficient() {
        doc.push_str("\n> Insufficient evidence: no source yielded usable text.\n");
    }
    doc.push('\n');

    doc.push_str(&format!("## Sources ({} total)\n\n", sources.len()));
    doc.push_str(&format_sources(&sources, budget, 1));
    doc.push_str("\n\n");

    if !plan.historical_queries.is_empty() {
        doc.push_str(&format!(
            "## Historical Sources ({} total)\n\n",
            historical_sources.len()
        ));
        doc.push_str(&format_sources(
            &historical_sources,
            budget,
            sources.len() + 1,
        ));
        doc.push_str("\n\n");
    }

    let failed: Vec<&ScrapeOutcome> = outcomes
        .iter()
        .chain(historical)
        .filter(|o| !o.is_success())
        .collect();
    if !failed.is_empty() {
        doc.push_str("## Unavailable Sources\n");
        for outcome in failed {
            let reason = outcome
                .failure_reason()
                .map(ToString::to_string)
                .unwrap_or_default();
            doc.push_str(&format!("- {} ({reason})\n", outcome.url()));
        }
        doc.push('\n');
    }

    doc.push_str("## References\n");
    let all_sources = sources.iter().chain(&historical_sources);
    let mut any = false;
    for (i, source) in all_sources.enumerate() {
        any = true;
        doc.push_str(&format!(
            "{}. [{}]({})\n",
            i + 1,
            extract_domain(source.url),
            source.url
        ));
    }
    if !any {
        doc.push_str("None.\n");
    }

    doc
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none".to_owned()
    } else {
        items.join(", ")
    }
}

/// File name for a dossier: date plus the first six words of the question.
pub fn brief_filename(question: &str, date: NaiveDate) -> String {
    let cleaned: String = question
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();
    let slug = cleaned.split_whitespace().take(6).collect::<Vec<_>>().join("_");
    format!("{}_{slug}.md", date.format("%Y-%m-%d"))
}

/// Write `content` into `dir`, creating it if needed. Returns the file path.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn save_dossier(content: &str, question: &str, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(brief_filename(question, date));
    std::fs::write(&path, content)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "dossier written");
    Ok(path)
}
