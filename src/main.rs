mod db;
mod export;
mod extract;
mod fundlist;
mod scrape;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "fundata_scraper", about = "Mutual fund detail scraper for fundata")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl the paginated fund search listing and populate the URL queue
    Init,
    /// Fetch and extract unvisited fund pages
    Scrape {
        /// Max pages to scrape (default: all unvisited)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Write the five result tables as Parquet snapshots
    Export {
        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
    /// Scrape + export in one pipeline
    Run {
        /// Max pages to scrape
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Show scraping statistics
    Stats,
    /// Funds overview table
    Overview {
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "50")]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let hrefs = fundlist::fetch_fund_links().await?;
            let inserted = db::insert_pages(&conn, &hrefs)?;
            println!(
                "Inserted {} new fund pages ({} links found)",
                inserted,
                hrefs.len()
            );
            Ok(())
        }
        Commands::Scrape { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let pages = db::fetch_unvisited(&conn, limit)?;
            if pages.is_empty() {
                println!("No unvisited pages. Run 'init' first or all pages are scraped.");
                return Ok(());
            }
            println!("Scraping {} fund pages...", pages.len());
            let stats = scrape::scrape_pages(&conn, pages).await?;
            println!("Done: {} pages scraped.", stats.pages);
            Ok(())
        }
        Commands::Export { out } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let written = export::write_snapshots(&conn, &out)?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Run { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let pages = db::fetch_unvisited(&conn, limit)?;
            if pages.is_empty() {
                println!("No unvisited pages. Run 'init' first.");
                return Ok(());
            }

            let t_scrape = Instant::now();
            println!("Pipeline: scraping {} fund pages...", pages.len());
            let stats = scrape::scrape_pages(&conn, pages).await?;
            println!(
                "Scraped {} pages in {:.1}s",
                stats.pages,
                t_scrape.elapsed().as_secs_f64()
            );

            let written = export::write_snapshots(&conn, std::path::Path::new("."))?;
            for path in &written {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
        Commands::Overview { limit } => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let rows = db::fetch_overview(&conn, limit)?;
            if rows.is_empty() {
                println!("No funds extracted yet.");
                return Ok(());
            }

            println!(
                "{:>3} | {:<40} | {:>9} | {:>7} | {:>7} | {:>6} | {:>10} | {:<8}",
                "#", "Fund", "NAVPS", "Change", "YTD", "MER", "Assets", "Status"
            );
            println!("{}", "-".repeat(110));

            for (i, r) in rows.iter().enumerate() {
                println!(
                    "{:>3} | {:<40} | {:>9} | {:>7} | {:>7} | {:>6} | {:>10} | {:<8}",
                    i + 1,
                    truncate(&r.href, 40),
                    r.navps,
                    r.change,
                    r.ytd_return,
                    r.mer,
                    truncate(&r.assets, 10),
                    r.sales_status,
                );
            }

            println!("\n{} funds", rows.len());
            Ok(())
        }
        Commands::Stats => {
            let conn = db::connect()?;
            db::init_schema(&conn)?;
            let s = db::get_stats(&conn)?;
            println!("Total:     {}", s.total);
            println!("Visited:   {}", s.visited);
            println!("Unvisited: {}", s.unvisited);
            println!("Scraped:   {}", s.scraped);
            println!("Extracted: {}", s.funds);
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
