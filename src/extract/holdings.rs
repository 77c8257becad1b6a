use anyhow::{Context, Result};
use scraper::{Html, Selector};

use super::catalog::TOP_HOLDINGS_TABLE;

/// Cell text of every row in the top-ten holdings table.
///
/// Rows come back verbatim in table order, the header row included when the
/// site renders it with `td` cells. No column schema is enforced beyond
/// whatever the table carries.
pub fn extract_top_holdings(document: &Html) -> Result<Vec<Vec<String>>> {
    let table_selector =
        Selector::parse(&format!(r#"table[id="{}"]"#, TOP_HOLDINGS_TABLE)).unwrap();
    let table = document
        .select(&table_selector)
        .next()
        .with_context(|| format!("holdings table '{}' not found", TOP_HOLDINGS_TABLE))?;

    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let mut rows = Vec::new();
    for tr in table.select(&row_selector) {
        let cells: Vec<String> = tr
            .select(&cell_selector)
            .map(|td| td.text().collect::<String>())
            .collect();
        rows.push(cells);
    }
    Ok(rows)
}

// ── Tests ──
