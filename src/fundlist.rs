use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use rand::Rng;
use scraper::{Html, Selector};
use tracing::info;

const SEARCH_URL: &str = "http://idata.fundata.com/mutualfunds/Search.aspx";
const FUND_LINK_TITLE: &str =
    "Click here to view summary information about this mutual fund";
const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One paginated listing session. `html` returns the current rendered page,
/// `goto` moves to the numbered page and reports whether its navigation
/// control existed. Implemented by the real browser session and by fakes in
/// tests, so the crawl loop never touches browser I/O directly.
#[async_trait]
pub trait ListingPager {
    async fn html(&mut self) -> Result<String>;
    async fn goto(&mut self, page: u32) -> Result<bool>;
}

/// Walk every listing page and collect fund detail hrefs in page order.
///
/// Duplicates are kept as encountered. The loop ends cleanly when the next
/// page number has no navigation control; every other failure propagates.
pub async fn collect_fund_links<P: ListingPager>(pager: &mut P) -> Result<Vec<String>> {
    let mut hrefs = Vec::new();
    let mut page = 1u32;

    loop {
        let html = pager.html().await?;
        let links = parse_fund_links(&html);
        info!("Page {}: {} fund links", page, links.len());
        hrefs.extend(links);

        page += 1;
        if !pager.goto(page).await? {
            break;
        }
    }

    Ok(hrefs)
}

/// Hrefs of all fund summary links on one listing page, in document order.
pub fn parse_fund_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(&format!(r#"a[title="{}"]"#, FUND_LINK_TITLE)).unwrap();
    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        .map(str::to_string)
        .collect()
}

/// Launch a headless browser, crawl the full listing, and tear down.
pub async fn fetch_fund_links() -> Result<Vec<String>> {
    let config = BrowserConfig::builder().build().map_err(|e| anyhow!(e))?;
    let (mut browser, mut handler) = Browser::launch(config)
        .await
        .context("failed to launch browser")?;
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    let mut pager = BrowserPager::open(&browser).await?;
    let hrefs = collect_fund_links(&mut pager).await;

    browser.close().await?;
    browser.wait().await?;
    let _ = handler_task.await;

    hrefs
}

pub struct BrowserPager {
    page: Page,
}

impl BrowserPager {
    pub async fn open(browser: &Browser) -> Result<Self> {
        let page = browser
            .new_page(SEARCH_URL)
            .await
            .with_context(|| format!("failed to open {}", SEARCH_URL))?;
        page.wait_for_navigation().await?;
        Ok(Self { page })
    }

    /// Poll until the pager renders the given page number as the current
    /// page (a plain span), bounded by the navigation timeout.
    async fn wait_for_page(&self, page_no: u32) -> Result<()> {
        let probe = format!(
            "(function() {{ \
               var spans = Array.from(document.querySelectorAll('span')); \
               return spans.some(function(s) {{ return s.textContent.trim() === '{}'; }}); \
             }})()",
            page_no
        );
        let deadline = tokio::time::Instant::now() + PAGE_LOAD_TIMEOUT;
        loop {
            let rendered: bool = self.page.evaluate(probe.as_str()).await?.into_value()?;
            if rendered {
                return Ok(());
            }
            if tokio::time::Instant::now() >= deadline {
                bail!(
                    "page {} did not render within {:?}",
                    page_no,
                    PAGE_LOAD_TIMEOUT
                );
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl ListingPager for BrowserPager {
    async fn html(&mut self) -> Result<String> {
        Ok(self.page.content().await?)
    }

    async fn goto(&mut self, page_no: u32) -> Result<bool> {
        // Fixed 1-5s throttle before every page transition.
        let delay = rand::thread_rng().gen_range(1..=5);
        tokio::time::sleep(Duration::from_secs(delay)).await;

        let click = format!(
            "(function() {{ \
               var links = Array.from(document.querySelectorAll('a')); \
               var target = links.find(function(a) {{ return a.textContent.trim() === '{}'; }}); \
               if (!target) {{ return false; }} \
               target.click(); \
               return true; \
             }})()",
            page_no
        );
        let clicked: bool = self.page.evaluate(click.as_str()).await?.into_value()?;
        if !clicked {
            // No control for this page number: end of pagination.
            return Ok(false);
        }

        self.wait_for_page(page_no).await?;
        Ok(true)
    }
}

// ── Tests ──
