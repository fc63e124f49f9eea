//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with an optional concurrency cap
//! - HTML scanning and link/static extraction
//! - Completion tracking across all spawned tasks
//! - Recursive crawl orchestration and tree assembly

mod coordinator;
mod fetcher;
mod page;
mod parser;
mod tracker;

pub use coordinator::Crawler;
pub use fetcher::{build_http_client, is_html_content_type, FetchResult, Fetcher};
pub use page::{CrawlReport, PageNode};
pub use parser::{collect_references, extract_references, Reference, ReferenceKind};
pub use tracker::{CompletionTracker, WorkGuard};

use crate::config::Config;
use crate::WebmapError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client
/// 2. Parse and claim the seed URL
/// 3. Crawl recursively until every spawned task has finished
/// 4. Return the page tree and run totals
///
/// # Example
///
/// ```no_run
/// use webmap::config::Config;
/// use webmap::crawler::crawl;
///
/// # async fn example() -> Result<(), webmap::WebmapError> {
/// let mut config = Config::default();
/// config.crawler.seed_url = "https://example.com/".to_string();
/// config.crawler.max_depth = 2;
/// let report = crawl(&config).await?;
/// println!("{} pages", report.root.page_count());
/// # Ok(())
/// # }
/// ```
pub async fn crawl(config: &Config) -> Result<CrawlReport, WebmapError> {
    Crawler::new(config)?.run().await
}
