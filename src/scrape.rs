use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rusqlite::Connection;
use scraper::Html;
use tracing::info;

use crate::{db, extract};

const BASE_URL: &str = "http://idata.fundata.com";

/// Scrape summary returned after a batch completes.
pub struct ScrapeStats {
    pub pages: usize,
}

/// Fetch and extract each queued detail page in order, saving as we go.
///
/// Strictly sequential: one fetch, one extraction, one save, then a 1-5s
/// pause. Any fetch or extraction failure aborts the batch; pages already
/// saved stay saved and stay marked visited.
pub async fn scrape_pages(
    conn: &Connection,
    pages: Vec<(i64, String)>,
) -> Result<ScrapeStats> {
    let client = reqwest::Client::new();
    let total = pages.len();

    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    for (page_id, href) in pages {
        let url = format!("{}{}", BASE_URL, href);

        let start = Instant::now();
        let response = client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fetch failed for {}", url))?
            .error_for_status()
            .with_context(|| format!("bad status for {}", url))?;
        let status = response.status().as_u16() as i32;
        let html = response.text().await?;
        let latency_ms = start.elapsed().as_millis() as i64;

        let data = {
            let document = Html::parse_document(&html);
            extract::extract_all(&document).with_context(|| format!("extraction failed for {}", url))?
        };

        db::save_page(conn, page_id, &href, &url, &html, status, latency_ms)?;
        db::save_extracted(conn, &href, &data)?;
        pb.inc(1);

        let delay = rand::thread_rng().gen_range(1..=5);
        tokio::time::sleep(Duration::from_secs(delay)).await;
    }

    pb.finish_and_clear();
    info!("Scraped {} fund pages", total);

    Ok(ScrapeStats { pages: total })
}
