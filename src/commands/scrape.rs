use anyhow::{Context, Result};

use concursos::config::Config;
use concursos::crawler::RegionFetcher;
use concursos::parser::TableExtractor;
use concursos::server::RegionBody;
use concursos::utils::error::UnknownRegion;
use concursos::{RegionRegistry, RegionSnapshot};

/// Fetch, extract and classify a single region, printing the API body
pub async fn scrape(config: &Config, uf: &str) -> Result<()> {
    let region = RegionRegistry::brazil()
        .get(uf)
        .ok_or_else(|| UnknownRegion::new(uf))?;

    let fetcher =
        RegionFetcher::from_config(&config.refresh).context("Failed to create HTTP client")?;

    let html = fetcher
        .fetch_listing(region.code)
        .await
        .with_context(|| format!("Failed to fetch listing for {}", region.code))?;

    let records = TableExtractor::new()
        .extract(&html)
        .with_context(|| format!("Failed to extract listing for {}", region.code))?;

    tracing::info!(uf = %region.code, records = records.len(), "Scraped region");

    let snapshot = RegionSnapshot::refreshed(region.code, records);
    let body = RegionBody::new(&config.server.developer, region, &snapshot);
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
