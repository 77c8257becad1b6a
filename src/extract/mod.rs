pub mod allocations;
pub mod catalog;
pub mod holdings;
pub mod values;

use anyhow::{Context, Result};
use scraper::Html;

pub use allocations::{extract_allocation, AllocationKind};
pub use holdings::extract_top_holdings;
pub use values::{extract_single_values, FundRecord};

/// Everything scraped from one fund detail page.
pub struct ExtractedData {
    pub values: FundRecord,
    pub asset_allocations: Vec<String>,
    pub sector_allocations: Vec<String>,
    pub geo_allocations: Vec<String>,
    pub holdings: Vec<Vec<String>>,
}

/// Run every extractor against one parsed detail page.
///
/// Fails on the first missing element; a page either yields all groups or
/// nothing.
pub fn extract_all(document: &Html) -> Result<ExtractedData> {
    let values = extract_single_values(document).context("single-value fields")?;
    let asset_allocations =
        extract_allocation(document, AllocationKind::Asset).context("asset allocation")?;
    let sector_allocations =
        extract_allocation(document, AllocationKind::Sector).context("sector allocation")?;
    let geo_allocations =
        extract_allocation(document, AllocationKind::Geo).context("geo allocation")?;
    let holdings = extract_top_holdings(document).context("top ten holdings")?;

    Ok(ExtractedData {
        values,
        asset_allocations,
        sector_allocations,
        geo_allocations,
        holdings,
    })
}


// ── Tests ──
