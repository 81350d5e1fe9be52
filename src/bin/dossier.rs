//! CLI binary for dossier.

use clap::Parser;
use dossier::config::Overrides;
use dossier::dossier::PlanInfo;
use dossier::{DossierConfig, Renderer, render_dossier, save_dossier};
use dossier_gather::{
    DuckDuckGoProvider, GatherPipeline, GatherReport, PageRenderer, ScrapeOutcome,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Dossier: gather web evidence for a research question.
#[derive(Parser)]
#[command(name = "dossier", version, about)]
struct Cli {
    /// Path to TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// The research question.
    question: String,

    /// Search query to run (repeatable). Defaults to the question itself.
    #[arg(short = 'q', long = "query")]
    queries: Vec<String>,

    /// Historical / base-rate query to run as a second gather (repeatable).
    #[arg(long = "historical")]
    historical: Vec<String>,

    /// Maximum unique URLs rendered per gather.
    #[arg(long)]
    max_urls: Option<usize>,

    /// Maximum concurrent page renders.
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-page timeout in seconds.
    #[arg(long)]
    timeout: Option<u64>,

    /// Print outcomes as JSON instead of writing a dossier.
    #[arg(long)]
    json: bool,

    /// Directory for the dossier file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    question: &'a str,
    queries: &'a [String],
    outcomes: &'a [ScrapeOutcome],
    historical_queries: &'a [String],
    historical: &'a [ScrapeOutcome],
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("dossier=info,dossier_gather=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let overrides = Overrides {
        max_urls: cli.max_urls,
        concurrency: cli.concurrency,
        scrape_timeout: cli.timeout,
        output_dir: cli.output,
    };
    let config = DossierConfig::resolve(cli.config.as_deref(), overrides)?;

    let queries = if cli.queries.is_empty() {
        vec![cli.question.clone()]
    } else {
        cli.queries
    };

    let gather_config = config.gather_config();
    let provider = DuckDuckGoProvider::new(gather_config.timeout())
        .with_user_agent(gather_config.user_agent.clone());
    let renderer = Renderer::from_config(&config)?;
    info!(backend = renderer.name(), "renderer ready");
    let pipeline = GatherPipeline::new(provider, renderer, gather_config)?;

    eprintln!("Gathering sources for {} queries...", queries.len());
    let outcomes = pipeline.gather(&queries).await;
    print_summary("Sources", &outcomes);

    let historical = if cli.historical.is_empty() {
        Vec::new()
    } else {
        eprintln!(
            "Gathering historical sources for {} queries...",
            cli.historical.len()
        );
        let historical = pipeline.gather(&cli.historical).await;
        print_summary("Historical sources", &historical);
        historical
    };

    if GatherReport::from_outcomes(&outcomes).is_insufficient() {
        warn!("no source yielded usable text; dossier will report insufficient evidence");
    }

    if cli.json {
        let report = JsonReport {
            question: &cli.question,
            queries: &queries,
            outcomes: &outcomes,
            historical_queries: &cli.historical,
            historical: &historical,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let plan = PlanInfo {
        question: cli.question.clone(),
        search_queries: queries,
        historical_queries: cli.historical,
    };
    let date = chrono::Local::now().date_naive();
    let content = render_dossier(
        &plan,
        &outcomes,
        &historical,
        config.output.source_char_budget,
        date,
    );
    let path = save_dossier(&content, &cli.question, &config.output.dir, date)?;
    println!("Dossier saved to {}", path.display());

    Ok(())
}

fn print_summary(label: &str, outcomes: &[ScrapeOutcome]) {
    let report = GatherReport::from_outcomes(outcomes);
    eprintln!(
        "{label}: {} gathered, {} usable, {} failed",
        report.total(),
        report.successes,
        report.failures
    );
    for outcome in outcomes {
        eprintln!("  [{}] {}", outcome.status(), outcome.url());
    }
}
