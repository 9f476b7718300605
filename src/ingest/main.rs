//! Overpass ingest batch.
//!
//! Fetches each activity category from the Overpass API, normalizes and
//! deduplicates the results, and writes the canonical places dataset.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use redbud::categories::Category;
use redbud::config::Config;
use redbud::dedupe::dedupe;
use redbud::overpass::OverpassClient;
use redbud::pipeline::{ingest, CategoryStatus};

#[derive(Parser, Debug)]
#[command(name = "ingest")]
#[command(about = "Fetch and normalize places from the Overpass API")]
struct Args {
    /// Config file (TOML); defaults apply when absent
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output dataset path
    #[arg(short, long, default_value = "places.json")]
    output: PathBuf,

    /// Categories to fetch (defaults to all)
    #[arg(long, value_delimiter = ',')]
    categories: Option<Vec<Category>>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    let categories = args.categories.unwrap_or_else(|| Category::ALL.to_vec());

    info!("Redbud Ingest");
    info!(
        "Fetching {} categories for bbox ({}, {}) - ({}, {})",
        categories.len(),
        config.region.bbox.south,
        config.region.bbox.west,
        config.region.bbox.north,
        config.region.bbox.east
    );

    let client = OverpassClient::new(&config.overpass.endpoint)?;

    let (places, outcomes) = ingest(&client, &categories, &config).await;
    info!("Ingested {} places before dedup", places.len());

    let places = dedupe(places);
    info!("{} places after dedup", places.len());

    for outcome in &outcomes {
        match outcome.status {
            CategoryStatus::Done(count) => info!("  {}: {} places", outcome.category, count),
            CategoryStatus::Failed => warn!("  {}: failed, no results", outcome.category),
            _ => {}
        }
    }

    let json = serde_json::to_string_pretty(&places)?;
    tokio::fs::write(&args.output, json)
        .await
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Dataset written to {}", args.output.display());

    Ok(())
}
