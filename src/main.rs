use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

mod aggregate;
mod coerce;
mod config;
mod db;
mod error;
mod models;
mod report;
mod rollup;
mod scope;
mod source;
mod summary;
mod table;
mod trend;

use aggregate::AggregationRequest;
use error::AggregateError;
use models::{AggregationResult, ScopeSelector};
use source::MemorySource;

#[derive(Parser)]
#[command(name = "campaign-insights")]
#[command(about = "Campaign performance aggregation for daily advertising records", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate campaign facets as JSON
    Aggregate {
        #[command(flatten)]
        query: QueryArgs,
        /// Write the JSON to this file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate a markdown report
    Report {
        #[command(flatten)]
        query: QueryArgs,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[derive(Args)]
struct QueryArgs {
    /// Campaign id, or "All"; unknown ids fall back to all campaigns
    #[arg(long)]
    campaign_id: Option<String>,
    /// First day of the trend window (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<String>,
    /// Last day of the trend window (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<String>,
    /// Read daily campaign rows from CSV instead of Postgres
    #[arg(long, requires = "scores_csv")]
    daily_csv: Option<PathBuf>,
    /// Read score rows from CSV instead of Postgres
    #[arg(long, requires = "daily_csv")]
    scores_csv: Option<PathBuf>,
}

impl QueryArgs {
    fn request(&self) -> AggregationRequest {
        AggregationRequest {
            campaign_id: self.campaign_id.clone(),
            start_date: self.start_date.clone(),
            end_date: self.end_date.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing();
    let cli = Cli::parse();
    let config = config::Config::from_env()?;

    match cli.command {
        Commands::Aggregate { query, out } => {
            let (_, result) = execute(&config, &query).await?;
            let json = serde_json::to_string_pretty(&result)?;

            match out {
                Some(path) => {
                    std::fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("Aggregation written to {}.", path.display());
                }
                None => println!("{json}"),
            }
        }
        Commands::Report { query, out } => {
            let (scope, result) = execute(&config, &query).await?;
            let window = query.request().window()?;
            let report = report::build_report(&scope, &window, &result);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

async fn execute(
    config: &config::Config,
    query: &QueryArgs,
) -> anyhow::Result<(ScopeSelector, AggregationResult)> {
    let request = query.request();

    let outcome = match (&query.daily_csv, &query.scores_csv) {
        (Some(daily), Some(scores)) => {
            let mut source = MemorySource::from_csv(daily, scores)?;
            aggregate::run(&mut source, &request).await
        }
        _ => {
            let pool = db::connect(config).await?;
            let mut source = db::PgSource::acquire(&pool).await?;
            aggregate::run(&mut source, &request).await
        }
    };

    outcome.map_err(|error| match error {
        AggregateError::NotFound { campaign_id } => {
            anyhow::anyhow!("Campaign not found: {campaign_id}")
        }
        AggregateError::MissingParameter(name) => {
            anyhow::anyhow!("Missing required parameter --{}", name.replace('_', "-"))
        }
        other => anyhow::Error::new(other).context("aggregation failed"),
    })
}
