//! Crawler coordinator - recursive crawl orchestration
//!
//! Every page is crawled by its own task. A page task fetches the page, scans
//! it for references, and spawns one resolution task per unique reference.
//! Link tasks claim same-host URLs in the global seen-set and spawn a nested
//! page crawl one level shallower; static tasks only resolve.
//!
//! Completion is tracked at two levels:
//! - Page-local: every resolution task owns a clone of the page's result
//!   senders. The page's collector loops end once the last clone is dropped,
//!   which can only happen after tokenization finished and every task it
//!   spawned has reported in.
//! - Global: every spawned unit holds a [`WorkGuard`] on the shared
//!   [`CompletionTracker`], taken before the spawn. The crawl is over when the
//!   tracker drains to zero.
//!
//! Fetch and reference errors are absorbed by the task that hits them and only
//! logged; they never reach siblings, ancestors, or the caller.

use crate::config::{Config, CrawlerConfig};
use crate::crawler::fetcher::{FetchResult, Fetcher};
use crate::crawler::page::{CrawlReport, PageNode};
use crate::crawler::parser::{extract_references, Reference, ReferenceKind};
use crate::crawler::tracker::{CompletionTracker, WorkGuard};
use crate::state::{PageState, SeenSet};
use crate::url::{canonicalize, resolve, same_host};
use crate::WebmapError;
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use url::Url;

/// State shared by every task of one crawl run
struct CrawlContext {
    fetcher: Fetcher,
    seen: SeenSet,
    tracker: CompletionTracker,
}

/// Crawl entry point
///
/// A `Crawler` can run any number of crawls; each run gets a fresh seen-set and
/// completion tracker.
#[derive(Debug, Clone)]
pub struct Crawler {
    config: CrawlerConfig,
    fetcher: Fetcher,
}

impl Crawler {
    /// Creates a crawler from configuration
    pub fn new(config: &Config) -> Result<Self, WebmapError> {
        let fetcher = Fetcher::new(&config.crawler, &config.user_agent)?;
        Ok(Self::with_fetcher(config.crawler.clone(), fetcher))
    }

    /// Creates a crawler around an existing fetcher
    pub fn with_fetcher(config: CrawlerConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    /// Crawls from the configured seed URL to the configured depth
    pub async fn run(&self) -> Result<CrawlReport, WebmapError> {
        self.crawl(&self.config.seed_url, self.config.max_depth)
            .await
    }

    /// Crawls from `seed` to at most `max_depth` hops
    ///
    /// The seed is always claimed and becomes the root. With `max_depth == 0`
    /// it is not even fetched.
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran to global completion
    /// * `Err(WebmapError::SeedParse | WebmapError::InvalidSeed)` - No valid root;
    ///   nothing was fetched
    pub async fn crawl(&self, seed: &str, max_depth: u32) -> Result<CrawlReport, WebmapError> {
        let root_url = parse_seed(seed)?;

        let context = Arc::new(CrawlContext {
            fetcher: self.fetcher.clone(),
            seen: SeenSet::new(),
            tracker: CompletionTracker::new(),
        });
        context.seen.claim(&root_url);

        tracing::info!("Starting crawl of {} (max depth {})", root_url, max_depth);
        let started_at = chrono::Utc::now();
        let start = Instant::now();

        let guard = context.tracker.enter();
        let root_task = tokio::spawn(crawl_page(
            Arc::clone(&context),
            root_url.clone(),
            max_depth,
            guard,
        ));

        // The single blocking point of the crawl
        context.tracker.wait().await;

        let root = match root_task.await {
            Ok(root) => root,
            Err(e) => {
                tracing::error!("Crawl task for {} failed: {}", root_url, e);
                PageNode::new(root_url, PageState::FetchFailed)
            }
        };

        let elapsed = start.elapsed();
        let pages_claimed = context.seen.len();
        tracing::info!("Unique links crawled: {}", pages_claimed);
        tracing::info!("Crawling took {:?}", elapsed);

        Ok(CrawlReport {
            root,
            max_depth,
            pages_claimed,
            started_at,
            finished_at: chrono::Utc::now(),
            elapsed,
        })
    }
}

/// Parses and checks the seed URL
fn parse_seed(seed: &str) -> Result<Url, WebmapError> {
    let url = canonicalize(seed).map_err(|source| WebmapError::SeedParse {
        url: seed.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(WebmapError::InvalidSeed {
            url: seed.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    if url.host_str().is_none() {
        return Err(WebmapError::InvalidSeed {
            url: seed.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}

/// Crawls one page and everything reachable below it
///
/// Boxed because page crawls spawn link tasks which spawn page crawls.
fn crawl_page(
    context: Arc<CrawlContext>,
    url: Url,
    depth: u32,
    guard: WorkGuard,
) -> BoxFuture<'static, PageNode> {
    async move {
        let _guard = guard;

        if depth == 0 {
            tracing::debug!("Depth budget exhausted at {}", url);
            return PageNode::new(url, PageState::DepthExhausted);
        }

        let body = match context.fetcher.fetch(&url).await {
            Ok(FetchResult::Html {
                final_url,
                status_code,
                body,
            }) => {
                tracing::debug!("Fetched {} ({}, final URL {})", url, status_code, final_url);
                body
            }
            Ok(FetchResult::ContentMismatch { content_type }) => {
                let skip = WebmapError::UnsupportedContentType {
                    url: url.to_string(),
                    content_type,
                };
                tracing::debug!("{}", skip);
                return PageNode::new(url, PageState::ContentMismatch);
            }
            Err(e) => {
                tracing::warn!("{}", e);
                return PageNode::new(url, PageState::FetchFailed);
            }
        };

        let (link_tx, link_rx) = unbounded_channel::<PageNode>();
        let (static_tx, static_rx) = unbounded_channel::<Url>();
        let page = Arc::new(url.clone());

        let dispatched = extract_references(&body, |Reference { kind, raw }| {
            let guard = context.tracker.enter();
            match kind {
                ReferenceKind::Link => {
                    tokio::spawn(resolve_link(
                        Arc::clone(&context),
                        Arc::clone(&page),
                        raw,
                        depth - 1,
                        link_tx.clone(),
                        guard,
                    ));
                }
                ReferenceKind::Static => {
                    tokio::spawn(resolve_static(
                        Arc::clone(&page),
                        raw,
                        static_tx.clone(),
                        guard,
                    ));
                }
            }
        });
        tracing::trace!("Dispatched {} references from {}", dispatched, url);

        // Only the spawned tasks hold senders now
        drop(link_tx);
        drop(static_tx);

        let (children, statics) = tokio::join!(collect(link_rx), collect(static_rx));

        PageNode {
            url,
            state: PageState::Crawled,
            statics,
            children,
        }
    }
    .boxed()
}

/// Drains a result channel until every sender is gone
async fn collect<T>(mut rx: UnboundedReceiver<T>) -> Vec<T> {
    let mut items = Vec::new();
    while let Some(item) = rx.recv().await {
        items.push(item);
    }
    items
}

/// Resolves one link reference and, if it is new, crawls it
async fn resolve_link(
    context: Arc<CrawlContext>,
    page: Arc<Url>,
    reference: String,
    depth: u32,
    result: UnboundedSender<PageNode>,
    _guard: WorkGuard,
) {
    let url = match resolve(&page, &reference) {
        Ok(url) => url,
        Err(source) => {
            let e = WebmapError::ReferenceParse {
                reference,
                page: page.to_string(),
                source,
            };
            tracing::debug!("{}", e);
            return;
        }
    };

    if !same_host(&page, &url) {
        tracing::trace!("Ignoring external link {} on {}", url, page);
        return;
    }

    if !context.seen.claim(&url) {
        tracing::trace!("Already claimed {}", url);
        return;
    }
    tracing::trace!("Claimed {} from {}", url, page);

    let guard = context.tracker.enter();
    let child = tokio::spawn(crawl_page(Arc::clone(&context), url.clone(), depth, guard));

    let node = match child.await {
        Ok(node) => node,
        Err(e) => {
            tracing::error!("Crawl task for {} failed: {}", url, e);
            PageNode::new(url, PageState::FetchFailed)
        }
    };

    // The receiver lives until this sender is dropped
    let _ = result.send(node);
}

/// Resolves one static reference
async fn resolve_static(
    page: Arc<Url>,
    reference: String,
    result: UnboundedSender<Url>,
    _guard: WorkGuard,
) {
    match resolve(&page, &reference) {
        Ok(url) => {
            let _ = result.send(url);
        }
        Err(source) => {
            let e = WebmapError::ReferenceParse {
                reference,
                page: page.to_string(),
                source,
            };
            tracing::debug!("{}", e);
        }
    }
}
