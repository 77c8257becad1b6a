use anyhow::Result;
use rusqlite::Connection;

use crate::extract::{AllocationKind, ExtractedData};

const DB_PATH: &str = "data/fundata.sqlite";

pub fn connect() -> Result<Connection> {
    std::fs::create_dir_all("data")?;
    let conn = Connection::open(DB_PATH)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS pages (
            id         INTEGER PRIMARY KEY,
            href       TEXT UNIQUE NOT NULL,
            visited    BOOLEAN NOT NULL DEFAULT 0,
            visited_at TEXT,
            created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_pages_visited ON pages(visited);

        CREATE TABLE IF NOT EXISTS page_data (
            id         INTEGER PRIMARY KEY,
            page_id    INTEGER NOT NULL REFERENCES pages(id),
            href       TEXT NOT NULL,
            url        TEXT NOT NULL,
            html       TEXT,
            status     INTEGER,
            latency_ms INTEGER,
            scraped_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_page_data_href ON page_data(href);

        -- Extracted single-value metrics, long format: one row per catalog field
        CREATE TABLE IF NOT EXISTS fund_values (
            id    INTEGER PRIMARY KEY,
            href  TEXT NOT NULL,
            field TEXT NOT NULL,
            value TEXT NOT NULL,
            UNIQUE(href, field)
        );
        CREATE INDEX IF NOT EXISTS idx_fund_values_href ON fund_values(href);

        CREATE TABLE IF NOT EXISTS asset_allocations (
            id    INTEGER PRIMARY KEY,
            href  TEXT NOT NULL,
            label TEXT NOT NULL,
            UNIQUE(href, label)
        );
        CREATE INDEX IF NOT EXISTS idx_asset_allocations_href ON asset_allocations(href);

        CREATE TABLE IF NOT EXISTS sector_allocations (
            id    INTEGER PRIMARY KEY,
            href  TEXT NOT NULL,
            label TEXT NOT NULL,
            UNIQUE(href, label)
        );
        CREATE INDEX IF NOT EXISTS idx_sector_allocations_href ON sector_allocations(href);

        CREATE TABLE IF NOT EXISTS geo_allocations (
            id    INTEGER PRIMARY KEY,
            href  TEXT NOT NULL,
            label TEXT NOT NULL,
            UNIQUE(href, label)
        );
        CREATE INDEX IF NOT EXISTS idx_geo_allocations_href ON geo_allocations(href);

        -- One row per holdings-table row; cells is a JSON array of cell text
        CREATE TABLE IF NOT EXISTS top_holdings (
            id      INTEGER PRIMARY KEY,
            href    TEXT NOT NULL,
            row_idx INTEGER NOT NULL,
            cells   TEXT NOT NULL,
            UNIQUE(href, row_idx)
        );
        CREATE INDEX IF NOT EXISTS idx_top_holdings_href ON top_holdings(href);
        ",
    )?;
    Ok(())
}

// ── Crawl queue ──

pub fn insert_pages(conn: &Connection, hrefs: &[String]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare("INSERT OR IGNORE INTO pages (href) VALUES (?1)")?;
        for href in hrefs {
            count += stmt.execute(rusqlite::params![href])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_unvisited(conn: &Connection, limit: Option<usize>) -> Result<Vec<(i64, String)>> {
    let sql = match limit {
        Some(n) => format!(
            "SELECT id, href FROM pages WHERE visited = 0 ORDER BY id LIMIT {}",
            n
        ),
        None => "SELECT id, href FROM pages WHERE visited = 0 ORDER BY id".to_string(),
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Scraped pages ──

pub fn save_page(
    conn: &Connection,
    page_id: i64,
    href: &str,
    url: &str,
    html: &str,
    status: i32,
    latency_ms: i64,
) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    tx.execute(
        "INSERT INTO page_data (page_id, href, url, html, status, latency_ms)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        rusqlite::params![page_id, href, url, html, status, latency_ms],
    )?;
    tx.execute(
        "UPDATE pages SET visited = 1, visited_at = datetime('now') WHERE id = ?1",
        rusqlite::params![page_id],
    )?;
    tx.commit()?;
    Ok(())
}

// ── Extracted data ──

fn allocation_table(kind: AllocationKind) -> &'static str {
    match kind {
        AllocationKind::Asset => "asset_allocations",
        AllocationKind::Sector => "sector_allocations",
        AllocationKind::Geo => "geo_allocations",
    }
}

/// Persist one page's extracted groups in a single transaction.
pub fn save_extracted(conn: &Connection, href: &str, data: &ExtractedData) -> Result<()> {
    let tx = conn.unchecked_transaction()?;
    {
        let mut v_stmt = tx.prepare(
            "INSERT OR REPLACE INTO fund_values (href, field, value) VALUES (?1, ?2, ?3)",
        )?;
        for (field, value) in &data.values.fields {
            v_stmt.execute(rusqlite::params![href, field, value])?;
        }

        for (kind, labels) in [
            (AllocationKind::Asset, &data.asset_allocations),
            (AllocationKind::Sector, &data.sector_allocations),
            (AllocationKind::Geo, &data.geo_allocations),
        ] {
            let mut a_stmt = tx.prepare(&format!(
                "INSERT OR IGNORE INTO {} (href, label) VALUES (?1, ?2)",
                allocation_table(kind)
            ))?;
            for label in labels {
                a_stmt.execute(rusqlite::params![href, label])?;
            }
        }

        let mut h_stmt = tx.prepare(
            "INSERT OR REPLACE INTO top_holdings (href, row_idx, cells) VALUES (?1, ?2, ?3)",
        )?;
        for (row_idx, cells) in data.holdings.iter().enumerate() {
            let cells_json = serde_json::to_string(cells)?;
            h_stmt.execute(rusqlite::params![href, row_idx as i64, cells_json])?;
        }
    }
    tx.commit()?;
    Ok(())
}

// ── Export queries ──

/// Hrefs with extracted values, in first-extraction order.
pub fn fetch_fund_hrefs(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT href, MIN(id) AS first_id FROM fund_values GROUP BY href ORDER BY first_id",
    )?;
    let rows = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_values(conn: &Connection, href: &str) -> Result<Vec<(String, String)>> {
    let mut stmt =
        conn.prepare("SELECT field, value FROM fund_values WHERE href = ?1 ORDER BY id")?;
    let rows = stmt
        .query_map(rusqlite::params![href], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_allocations(conn: &Connection, kind: AllocationKind) -> Result<Vec<(String, String)>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT href, label FROM {} ORDER BY id",
        allocation_table(kind)
    ))?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn fetch_holdings(conn: &Connection) -> Result<Vec<(String, i64, String)>> {
    let mut stmt = conn.prepare("SELECT href, row_idx, cells FROM top_holdings ORDER BY id")?;
    let rows = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Overview ──

pub struct OverviewRow {
    pub href: String,
    pub navps: String,
    pub change: String,
    pub ytd_return: String,
    pub mer: String,
    pub assets: String,
    pub sales_status: String,
}

pub fn fetch_overview(conn: &Connection, limit: usize) -> Result<Vec<OverviewRow>> {
    let sql = format!(
        "SELECT href,
                COALESCE(MAX(CASE WHEN field = 'navps' THEN value END), ''),
                COALESCE(MAX(CASE WHEN field = 'change' THEN value END), ''),
                COALESCE(MAX(CASE WHEN field = 'ytd_return' THEN value END), ''),
                COALESCE(MAX(CASE WHEN field = 'mer' THEN value END), ''),
                COALESCE(MAX(CASE WHEN field = 'assets' THEN value END), ''),
                COALESCE(MAX(CASE WHEN field = 'sales_status' THEN value END), '')
         FROM fund_values
         GROUP BY href
         ORDER BY MIN(id)
         LIMIT {}",
        limit
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(OverviewRow {
                href: row.get(0)?,
                navps: row.get(1)?,
                change: row.get(2)?,
                ytd_return: row.get(3)?,
                mer: row.get(4)?,
                assets: row.get(5)?,
                sales_status: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub visited: usize,
    pub unvisited: usize,
    pub scraped: usize,
    pub funds: usize,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM pages", [], |r| r.get(0))?;
    let visited: usize =
        conn.query_row("SELECT COUNT(*) FROM pages WHERE visited = 1", [], |r| r.get(0))?;
    let scraped: usize = conn.query_row("SELECT COUNT(*) FROM page_data", [], |r| r.get(0))?;
    let funds: usize = conn.query_row(
        "SELECT COUNT(DISTINCT href) FROM fund_values",
        [],
        |r| r.get(0),
    )?;
    Ok(Stats {
        total,
        visited,
        unvisited: total - visited,
        scraped,
        funds,
    })
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::FundRecord;

    fn memory_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    fn sample_data() -> ExtractedData {
        ExtractedData {
            values: FundRecord {
                fields: vec![("navps", "$10.00".to_string()), ("mer", "1.5%".to_string())],
            },
            asset_allocations: vec!["Equity 60%".to_string(), "Bonds 40%".to_string()],
            sector_allocations: vec!["Energy 100%".to_string()],
            geo_allocations: vec!["Canada 100%".to_string()],
            holdings: vec![
                vec!["Security".to_string(), "%".to_string()],
                vec!["RBC".to_string(), "6.2%".to_string()],
            ],
        }
    }

    #[test]
    fn insert_pages_ignores_duplicates() {
        let conn = memory_db();
        let hrefs = vec!["/f/1".to_string(), "/f/2".to_string(), "/f/1".to_string()];
        assert_eq!(insert_pages(&conn, &hrefs).unwrap(), 2);
        assert_eq!(insert_pages(&conn, &hrefs).unwrap(), 0);
    }

    #[test]
    fn save_page_marks_visited() {
        let conn = memory_db();
        insert_pages(&conn, &["/f/1".to_string(), "/f/2".to_string()]).unwrap();
        let unvisited = fetch_unvisited(&conn, None).unwrap();
        assert_eq!(unvisited.len(), 2);

        let (id, href) = &unvisited[0];
        save_page(&conn, *id, href, "http://x/f/1", "<html></html>", 200, 42).unwrap();

        let remaining = fetch_unvisited(&conn, None).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].1, "/f/2");
    }

    #[test]
    fn extracted_rows_accumulate_across_pages() {
        let conn = memory_db();
        save_extracted(&conn, "/f/1", &sample_data()).unwrap();
        save_extracted(&conn, "/f/2", &sample_data()).unwrap();

        assert_eq!(fetch_fund_hrefs(&conn).unwrap(), vec!["/f/1", "/f/2"]);
        let assets = fetch_allocations(&conn, AllocationKind::Asset).unwrap();
        assert_eq!(assets.len(), 4);
        assert_eq!(fetch_holdings(&conn).unwrap().len(), 4);
    }

    #[test]
    fn rescrape_replaces_values() {
        let conn = memory_db();
        save_extracted(&conn, "/f/1", &sample_data()).unwrap();
        let mut updated = sample_data();
        updated.values.fields[0].1 = "$11.00".to_string();
        save_extracted(&conn, "/f/1", &updated).unwrap();

        let values = fetch_values(&conn, "/f/1").unwrap();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&("navps".to_string(), "$11.00".to_string())));
    }

    #[test]
    fn overview_pivots_headline_fields() {
        let conn = memory_db();
        save_extracted(&conn, "/f/1", &sample_data()).unwrap();
        let rows = fetch_overview(&conn, 10).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].navps, "$10.00");
        assert_eq!(rows[0].mer, "1.5%");
        assert_eq!(rows[0].ytd_return, "");
    }
}
