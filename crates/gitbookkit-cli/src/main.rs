//! GitbookKit CLI - Command-line interface for crawling GitBook sites

use clap::{Parser, Subcommand, ValueEnum};
use gitbookkit::{CrawlReport, GitbookCrawler, PageResult, DEFAULT_CONTENT_SELECTOR};
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Output format for load subcommand
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    /// Plain text with metadata frontmatter per page
    #[default]
    Md,
    /// JSON crawl report
    Json,
}

/// GitbookKit - turn GitBook documentation into plain-text documents
#[derive(Parser, Debug)]
#[command(name = "gitbookkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch one page, or every sitemap page with --all, and print the documents
    Load {
        /// Entry page URL
        url: String,

        /// Crawl every page listed in {base-url}/sitemap.xml
        #[arg(long)]
        all: bool,

        /// Base URL sitemap paths are resolved against (defaults to URL)
        #[arg(long)]
        base_url: Option<String>,

        /// CSS selector of the content region
        #[arg(long, default_value = DEFAULT_CONTENT_SELECTOR)]
        selector: String,

        /// Maximum number of concurrent page fetches
        #[arg(long, short, default_value_t = 1)]
        workers: usize,

        /// Custom User-Agent
        #[arg(long)]
        user_agent: Option<String>,

        /// Per-request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout: u64,

        /// Output format
        #[arg(long, short, default_value = "md")]
        output: OutputFormat,
    },
    /// Print the page URLs listed in the site's sitemap
    Sitemap {
        /// Site URL
        url: String,

        /// Base URL sitemap paths are resolved against (defaults to URL)
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Load {
            url,
            all,
            base_url,
            selector,
            workers,
            user_agent,
            timeout,
            output,
        }) => {
            let mut builder = GitbookCrawler::builder(url)
                .load_all_paths(all)
                .content_selector(selector)
                .max_workers(workers)
                .timeout(Duration::from_secs(timeout));
            if let Some(base) = base_url {
                builder = builder.base_url(base);
            }
            if let Some(ua) = user_agent {
                builder = builder.user_agent(ua);
            }
            let crawler = builder.build().unwrap_or_else(|e| fail(&e));
            run_load(&crawler, output).await;
        }
        Some(Commands::Sitemap { url, base_url }) => {
            let mut builder = GitbookCrawler::builder(url).load_all_paths(true);
            if let Some(base) = base_url {
                builder = builder.base_url(base);
            }
            let crawler = builder.build().unwrap_or_else(|e| fail(&e));
            run_sitemap(&crawler).await;
        }
        None => {
            eprintln!("Usage: gitbookkit load <URL> [--all]");
            eprintln!("   or: gitbookkit sitemap <URL>");
            eprintln!("   or: gitbookkit --help");
            std::process::exit(1);
        }
    }
}

async fn run_load(crawler: &GitbookCrawler, output: OutputFormat) {
    let report = crawler.crawl().await.unwrap_or_else(|e| fail(&e));

    for failure in &report.failures {
        eprintln!("Failed: {}: {}", failure.url, failure.error);
    }

    match output {
        OutputFormat::Md => writeln_safe(&format_report_md(&report)),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).unwrap_or_else(|e| {
                eprintln!("Error serializing report: {}", e);
                std::process::exit(1);
            });
            writeln_safe(&json);
        }
    }
}

async fn run_sitemap(crawler: &GitbookCrawler) {
    let urls = crawler.discover_urls().await.unwrap_or_else(|e| fail(&e));
    writeln_safe(&urls.join("\n"));
}

/// Format every page of a report, separated by blank lines
fn format_report_md(report: &CrawlReport) -> String {
    report
        .pages
        .iter()
        .map(format_page_md)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Format a page as its content under a metadata frontmatter
fn format_page_md(page: &PageResult) -> String {
    let mut output = String::new();

    output.push_str("---\n");
    output.push_str(&format!("source: {}\n", page.metadata.source));
    // Frontmatter is line-based; JSON output keeps the exact title
    let title = page.metadata.title.trim();
    if !title.is_empty() {
        output.push_str(&format!("title: {}\n", title));
    }
    output.push_str("---\n");
    output.push_str(&page.content);

    output
}

fn fail(err: &gitbookkit::CrawlError) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}
