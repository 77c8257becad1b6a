use anyhow::{Context, Result};
use scraper::{Html, Selector};

use super::catalog::{ASSET_ALLOCATION_MAP, GEO_ALLOCATION_MAP, SECTOR_ALLOCATION_MAP};

/// Which allocation chart to read. Each is an image map whose `area`
/// titles carry the category labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationKind {
    Asset,
    Sector,
    Geo,
}

impl AllocationKind {
    pub fn map_id(self) -> &'static str {
        match self {
            AllocationKind::Asset => ASSET_ALLOCATION_MAP,
            AllocationKind::Sector => SECTOR_ALLOCATION_MAP,
            AllocationKind::Geo => GEO_ALLOCATION_MAP,
        }
    }
}

/// Title of every `area` element in the named image map, in document order.
pub fn extract_allocation(document: &Html, kind: AllocationKind) -> Result<Vec<String>> {
    let map_id = kind.map_id();
    let map_selector = Selector::parse(&format!(r#"map[id="{}"]"#, map_id)).unwrap();
    let map = document
        .select(&map_selector)
        .next()
        .with_context(|| format!("allocation map '{}' not found", map_id))?;

    let area_selector = Selector::parse("area").unwrap();
    let mut labels = Vec::new();
    for area in map.select(&area_selector) {
        let title = area
            .value()
            .attr("title")
            .with_context(|| format!("area without title in map '{}'", map_id))?;
        labels.push(title.to_string());
    }
    Ok(labels)
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_fixture;

    #[test]
    fn asset_labels_in_document_order() {
        let document = test_fixture::fund_page();
        let labels = extract_allocation(&document, AllocationKind::Asset).unwrap();
        assert_eq!(
            labels,
            vec![
                "Canadian Equity 45.2%",
                "Foreign Equity 30.1%",
                "Fixed Income 18.4%",
                "Cash 6.3%",
            ]
        );
    }

    #[test]
    fn sector_and_geo_maps_are_independent() {
        let document = test_fixture::fund_page();
        let sector = extract_allocation(&document, AllocationKind::Sector).unwrap();
        let geo = extract_allocation(&document, AllocationKind::Geo).unwrap();
        assert_eq!(sector.len(), 3);
        assert_eq!(geo, vec!["Canada 62.0%", "United States 28.5%", "International 9.5%"]);
    }

    #[test]
    fn missing_map_is_an_error() {
        let html = test_fixture::fund_page_html()
            .replace("chrtGeoAllocationImageMap", "chrtGeoAllocationGone");
        let document = Html::parse_document(&html);
        let err = extract_allocation(&document, AllocationKind::Geo).unwrap_err();
        assert!(format!("{:#}", err).contains("chrtGeoAllocationImageMap"));
    }

    #[test]
    fn order_preserved_from_markup() {
        let document = Html::parse_document(
            r#"<map id="ctl00$MainContent$chrtAssetAllocationImageMap">
                 <area title="Equity">
                 <area title="Fixed Income">
               </map>"#,
        );
        let labels = extract_allocation(&document, AllocationKind::Asset).unwrap();
        assert_eq!(labels, vec!["Equity", "Fixed Income"]);
    }
}
