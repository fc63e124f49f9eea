//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState`: how the crawl of an individual page ended
//! - `SeenSet`: the global dedup registry of URLs claimed for crawling

mod page_state;
mod seen_set;

// Re-export main types
pub use page_state::PageState;
pub use seen_set::SeenSet;
