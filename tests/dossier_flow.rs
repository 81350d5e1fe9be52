//! End-to-end: gather with in-process fakes, then render and save a dossier.

use std::time::Duration;

use chrono::NaiveDate;
use dossier::dossier::{NO_SOURCES, PlanInfo};
use dossier::{render_dossier, save_dossier};
use dossier_gather::{
    GatherConfig, GatherError, GatherPipeline, PageRenderer, SearchHit, SearchProvider,
};

struct FixedProvider;

impl SearchProvider for FixedProvider {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchHit>, GatherError> {
        let urls: &[&str] = match query {
            "fed rate cut 2026" => &[
                "https://www.reuters.com/markets/fed",
                "https://blank.example.com/",
            ],
            "fed cutting cycles history" => &[
                "https://www.federalreserve.gov/history",
                "https://www.reuters.com/markets/fed",
            ],
            _ => return Err(GatherError::Http("search unavailable".into())),
        };
        Ok(urls
            .iter()
            .take(limit)
            .map(|u| SearchHit::new("title", *u, "snippet"))
            .collect())
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

struct FixtureRenderer;

impl PageRenderer for FixtureRenderer {
    async fn fetch_html(&self, url: &str, _timeout: Duration) -> Result<String, GatherError> {
        match url {
            "https://blank.example.com/" => Ok("<html><body><nav>Home</nav></body></html>".into()),
            "https://www.federalreserve.gov/history" => {
                Ok("<main><p>Past easing cycles began after inflation cooled.</p></main>".into())
            }
            _ => Ok("<article><h1>Fed holds</h1><p>Rates were left unchanged.</p></article>".into()),
        }
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 15).expect("valid date")
}

#[tokio::test]
async fn gathered_outcomes_become_a_saved_dossier() {
    let pipeline = GatherPipeline::new(FixedProvider, FixtureRenderer, GatherConfig::default())
        .expect("valid config");

    let plan = PlanInfo {
        question: "Will the Fed cut rates in Q1 2026?".into(),
        search_queries: vec!["fed rate cut 2026".into()],
        historical_queries: vec!["fed cutting cycles history".into()],
    };
    let outcomes = pipeline.gather(&plan.search_queries).await;
    let historical = pipeline.gather(&plan.historical_queries).await;

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_success());
    assert!(!outcomes[1].is_success(), "nav-only page has no usable text");
    assert_eq!(historical.len(), 2);

    let doc = render_dossier(&plan, &outcomes, &historical, 2000, date());
    assert!(doc.contains("[1] Source: https://www.reuters.com/markets/fed"));
    assert!(doc.contains("Fed holds Rates were left unchanged."));
    assert!(doc.contains("[2] Source: https://www.federalreserve.gov/history"));
    assert!(doc.contains("- https://blank.example.com/ (no extractable text)"));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = save_dossier(&doc, &plan.question, dir.path(), date()).expect("save");
    assert!(path.ends_with("2026-01-15_Will_the_Fed_cut_rates_in.md"));
    assert_eq!(std::fs::read_to_string(path).expect("read"), doc);
}

#[tokio::test]
async fn failed_search_yields_insufficient_evidence_dossier() {
    let pipeline = GatherPipeline::new(FixedProvider, FixtureRenderer, GatherConfig::default())
        .expect("valid config");

    let plan = PlanInfo {
        question: "Will anything happen?".into(),
        search_queries: vec!["unknown query".into()],
        historical_queries: vec![],
    };
    let outcomes = pipeline.gather(&plan.search_queries).await;
    assert!(outcomes.is_empty());

    let doc = render_dossier(&plan, &outcomes, &[], 2000, date());
    assert!(doc.contains("Insufficient evidence"));
    assert!(doc.contains(NO_SOURCES));
}
