use chrono::Local;

use crate::aggregate::{aggregate, Administrative, Vehicle};
use crate::model::{ModelEntry, TreeEntry};
use crate::request::{Fetcher, HttpTransport, Transport};
use crate::store::{self, CrawlReport, CrawlSummary};
use crate::{info_time, warn_time, Config, Result};

/// Provinces -> districts and wards, written to `config.admin_output`.
pub async fn harvest_admin(config: &Config) -> Result<()> {
    let seeds = store::load_seeds(&config.province_seed_file).await?;
    info_time!("Loaded {} provinces from {}", seeds.len(), config.province_seed_file.display());

    let fetcher = Fetcher::new(HttpTransport::new(config)?, config.delay);
    let start_time = Local::now();
    let tree = aggregate(&fetcher, &Administrative, &seeds).await;
    info_time!(start_time, "Finished walking all provinces.");

    store::write_tree(&config.admin_output, &tree).await
}

/// Brands -> models -> {body styles, years}, written to `config.vehicle_output`.
pub async fn harvest_vehicles(config: &Config) -> Result<()> {
    let seeds = store::load_seeds(&config.brand_seed_file).await?;
    info_time!("Loaded {} brands from {}", seeds.len(), config.brand_seed_file.display());

    let fetcher = Fetcher::new(HttpTransport::new(config)?, config.delay);
    let start_time = Local::now();
    let tree = aggregate(&fetcher, &Vehicle, &seeds).await;
    info_time!(start_time, "Finished walking all brands.");

    store::write_tree(&config.vehicle_output, &tree).await
}

/// Re-crawls only the named brands and refreshes their files in `config.brand_dir`.
///
/// Names missing from the seed file are reported in `not_found`; the rest are still crawled.
pub async fn crawl_brands<T: Transport>(
    config: &Config,
    fetcher: &Fetcher<T>,
    names: &[&str],
) -> Result<CrawlSummary> {
    let all = store::load_seeds(&config.brand_seed_file).await?;
    let selection = store::select_seeds(&all, names);
    for name in &selection.unknown {
        warn_time!("Brand not found: {}", name);
    }

    let tree = aggregate(fetcher, &Vehicle, &selection.found).await;
    let reports = store::write_brand_files(&config.brand_dir, &tree).await?;
    Ok(CrawlSummary {
        reports,
        not_found: selection.unknown,
    })
}

/// Splits an existing `config.vehicle_output` into per-brand files.
pub async fn split_brands(config: &Config) -> Result<Vec<CrawlReport>> {
    let tree: Vec<TreeEntry<ModelEntry>> = store::load_tree(&config.vehicle_output).await?;
    let reports = store::write_brand_files(&config.brand_dir, &tree).await?;
    info_time!(
        "Done! Created {} brand files in {}",
        reports.len(),
        config.brand_dir.display()
    );
    Ok(reports)
}
