use anyhow::{Context, Result};
use scraper::{Html, Selector};

use super::catalog::SINGLE_VALUE_FIELDS;

/// One fund's flat set of single-valued metrics, in catalog order.
///
/// Values are the raw text content of the page elements; percentages,
/// currency amounts, and ranks all pass through as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundRecord {
    pub fields: Vec<(&'static str, String)>,
}

impl FundRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Text content of the element with the given id.
///
/// Fails if the element is absent; the site's markup ids are the contract.
pub fn element_text(document: &Html, id: &str) -> Result<String> {
    let selector = Selector::parse(&format!(r#"[id="{}"]"#, id)).unwrap();
    let element = document
        .select(&selector)
        .next()
        .with_context(|| format!("element '{}' not found", id))?;
    Ok(element.text().collect::<String>())
}

/// Look up every catalog field and map it to its element text.
///
/// All-or-nothing: a single missing element aborts the whole record.
pub fn extract_single_values(document: &Html) -> Result<FundRecord> {
    let mut fields = Vec::with_capacity(SINGLE_VALUE_FIELDS.len());
    for (name, id) in SINGLE_VALUE_FIELDS {
        let value =
            element_text(document, id).with_context(|| format!("field '{}'", name))?;
        fields.push((*name, value));
    }
    Ok(FundRecord { fields })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::test_fixture;

    #[test]
    fn full_page_yields_exact_field_set() {
        let document = test_fixture::fund_page();
        let record = extract_single_values(&document).unwrap();
        assert_eq!(record.len(), SINGLE_VALUE_FIELDS.len());
        let names: Vec<&str> = record.fields.iter().map(|(n, _)| *n).collect();
        let expected: Vec<&str> = SINGLE_VALUE_FIELDS.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn values_are_literal_element_text() {
        let document = test_fixture::fund_page();
        let record = extract_single_values(&document).unwrap();
        assert_eq!(record.get("inception_return"), Some("12.3%"));
        assert_eq!(record.get("navps"), Some("$24.56"));
        assert_eq!(record.get("mer"), Some("2.35%"));
        assert_eq!(record.get("sales_status"), Some("Open"));
        assert_eq!(record.get("fund_1month_return"), Some("0.8%"));
        assert_eq!(record.get("quartile_rank_ytd_return"), Some("2"));
        assert_eq!(record.get("benchmark_calendar_return_year_10"), Some("4.1%"));
    }

    #[test]
    fn missing_element_fails_whole_record() {
        let html = test_fixture::fund_page_html()
            .replace("ctl00_MainContent_txtMER", "ctl00_MainContent_txtGone");
        let document = Html::parse_document(&html);
        let err = extract_single_values(&document).unwrap_err();
        let msg = format!("{:#}", err);
        assert!(msg.contains("mer"), "error should name the field: {}", msg);
        assert!(msg.contains("ctl00_MainContent_txtMER"));
    }

    #[test]
    fn reextraction_is_identical() {
        let document = test_fixture::fund_page();
        let first = extract_single_values(&document).unwrap();
        let second = extract_single_values(&document).unwrap();
        assert_eq!(first, second);
    }
}
