//! Crawl output: the page tree and the run report

use crate::state::PageState;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::Duration;
use url::Url;

/// One crawled page, owning its child pages and its static resources
///
/// Children and statics are filled in only by the crawl of this page and are
/// never touched afterwards. Their order is the order the resolution tasks
/// happened to finish in, so treat both as sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageNode {
    /// Canonical URL of the page
    pub url: Url,

    /// How the crawl of this page ended
    pub state: PageState,

    /// Static resources (images, scripts) referenced by the page, any host
    pub statics: Vec<Url>,

    /// Same-host pages first claimed from this page
    pub children: Vec<PageNode>,
}

impl PageNode {
    /// Creates a node with no children or statics
    pub fn new(url: Url, state: PageState) -> Self {
        Self {
            url,
            state,
            statics: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns true if the node has no child pages
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of pages in this subtree, this one included
    pub fn page_count(&self) -> usize {
        1 + self.children.iter().map(PageNode::page_count).sum::<usize>()
    }

    /// Length of the longest path from this node down to a leaf
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Depth-first, pre-order walk yielding each node with its distance from `self`
    pub fn walk(&self) -> Vec<(usize, &PageNode)> {
        let mut out = Vec::new();
        let mut stack = vec![(0, self)];
        while let Some((distance, node)) = stack.pop() {
            out.push((distance, node));
            for child in node.children.iter().rev() {
                stack.push((distance + 1, child));
            }
        }
        out
    }

    /// Finds a node in this subtree by canonical URL
    pub fn find(&self, url: &str) -> Option<&PageNode> {
        self.walk()
            .into_iter()
            .map(|(_, node)| node)
            .find(|node| node.url.as_str() == url)
    }

    /// Child page URLs as a set
    pub fn child_urls(&self) -> HashSet<&str> {
        self.children.iter().map(|c| c.url.as_str()).collect()
    }

    /// Static resource URLs as a set
    pub fn static_urls(&self) -> HashSet<&str> {
        self.statics.iter().map(Url::as_str).collect()
    }

    /// Sorts children and statics by URL, recursively
    ///
    /// The crawl itself gives no ordering guarantee; this makes reports stable.
    pub fn sort(&mut self) {
        self.statics.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        self.children
            .sort_by(|a, b| a.url.as_str().cmp(b.url.as_str()));
        for child in &mut self.children {
            child.sort();
        }
    }
}

/// Everything known once the crawl has globally completed
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Root of the page tree (the seed)
    pub root: PageNode,

    /// Depth the crawl was started with
    pub max_depth: u32,

    /// Number of distinct URLs claimed in the seen-set, seed included
    pub pages_claimed: usize,

    /// Wall-clock start of the crawl
    pub started_at: DateTime<Utc>,

    /// Wall-clock end of the crawl
    pub finished_at: DateTime<Utc>,

    /// Monotonic crawl duration
    pub elapsed: Duration,
}
