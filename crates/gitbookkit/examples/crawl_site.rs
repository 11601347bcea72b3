//! Example: Crawl a GitBook site and print a summary of every page
//!
//! Run with: cargo run -p gitbookkit --example crawl_site -- https://docs.gitbook.com/

use gitbookkit::{CrawlStatus, GitbookCrawler};

#[tokio::main]
async fn main() {
    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://docs.gitbook.com/".to_string());

    println!("GitbookKit crawl: {}", url);
    println!("=====================\n");

    let crawler = match GitbookCrawler::builder(url.as_str())
        .load_all_paths(true)
        .max_workers(4)
        .build()
    {
        Ok(crawler) => crawler,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let report = crawler
        .crawl_with_status(|status: CrawlStatus| {
            if let (Some(message), Some(percent)) = (&status.message, status.percent_complete) {
                println!("[{:>5.1}%] {} {}", percent, status.phase, message);
            }
        })
        .await;

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            println!("Error: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    for page in &report.pages {
        let preview = page.content.chars().take(80).collect::<String>();
        println!("{}", page.metadata.source);
        println!("   Title: {}", page.metadata.title);
        println!("   Preview: {}", preview.replace('\n', " "));
    }

    println!("=====================");
    println!(
        "Results: {} pages, {} failed",
        report.pages.len(),
        report.failures.len()
    );
}
