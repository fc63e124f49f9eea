use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use url::Url;

/// Process-wide registry of canonical URLs claimed for crawling
///
/// Each URL is crawled at most once per run: `claim` is a single
/// check-and-insert under one lock, so of any number of concurrent claims for
/// the same URL exactly one succeeds. Entries are never removed.
#[derive(Debug, Default)]
pub struct SeenSet {
    urls: Mutex<HashSet<String>>,
}

impl SeenSet {
    /// Creates an empty seen-set
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims a URL for crawling
    ///
    /// Returns true and records the URL iff it was not already present.
    pub fn claim(&self, url: &Url) -> bool {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(url.as_str().to_string())
    }

    /// Returns the number of URLs claimed so far
    pub fn len(&self) -> usize {
        self.urls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns true if nothing has been claimed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the set and returns every claimed URL
    ///
    /// Taking `self` by value means no claim can still be in flight.
    pub fn into_urls(self) -> HashSet<String> {
        self.urls
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
