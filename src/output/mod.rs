//! Output module for presenting crawl results
//!
//! This module handles:
//! - Rendering the page tree as an indented site map
//! - Computing and printing crawl statistics
//! - Writing a markdown summary of the run
//!
//! Everything here reads a finished [`CrawlReport`](crate::crawler::CrawlReport);
//! nothing runs while the crawl is in flight.

mod markdown;
pub mod stats;
pub mod tree;

pub use markdown::{format_markdown_summary, generate_markdown_summary};
pub use stats::{print_statistics, CrawlStatistics};
pub use tree::{format_tree, print_tree};
