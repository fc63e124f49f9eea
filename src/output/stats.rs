//! Statistics derived from a finished crawl
//!
//! Computed from the report after global completion, so the tree is no longer
//! being written to.

use crate::crawler::CrawlReport;
use crate::state::PageState;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// Pages present in the tree, root included
    pub pages_in_tree: u64,

    /// Distinct URLs claimed in the seen-set
    pub pages_claimed: u64,

    /// Count of pages by final state
    pub pages_by_state: HashMap<PageState, u64>,

    /// Static references summed over every page
    pub total_statics: u64,

    /// Distinct static resource URLs across the whole tree
    pub unique_statics: u64,

    /// Distinct static resources served from a host other than the seed's
    pub cross_host_statics: u64,

    /// Largest distance from the root reached by any page
    pub deepest_level: u64,

    /// How long the crawl took
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Computes statistics for a finished crawl
    pub fn from_report(report: &CrawlReport) -> Self {
        let mut pages_by_state = HashMap::new();
        let mut unique = HashSet::new();
        let mut total_statics = 0;
        let mut deepest_level = 0;
        let mut pages_in_tree = 0;

        for (distance, page) in report.root.walk() {
            pages_in_tree += 1;
            deepest_level = deepest_level.max(distance as u64);
            *pages_by_state.entry(page.state).or_insert(0) += 1;

            total_statics += page.statics.len() as u64;
            unique.extend(page.statics.iter());
        }

        let seed_host = report.root.url.host_str();
        let cross_host_statics = unique
            .iter()
            .filter(|url| url.host_str() != seed_host)
            .count() as u64;

        Self {
            pages_in_tree,
            pages_claimed: report.pages_claimed as u64,
            pages_by_state,
            total_statics,
            unique_statics: unique.len() as u64,
            cross_host_statics,
            deepest_level,
            elapsed: report.elapsed,
        }
    }

    /// Number of pages that ended in the given state
    pub fn count(&self, state: PageState) -> u64 {
        self.pages_by_state.get(&state).copied().unwrap_or(0)
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Unique links crawled: {}", stats.pages_claimed);
    println!("  Pages in map: {}", stats.pages_in_tree);
    println!("  Deepest level: {}", stats.deepest_level);
    println!(
        "  Static references: {} ({} unique, {} cross-host)",
        stats.total_statics, stats.unique_statics, stats.cross_host_statics
    );
    println!("  Crawling took {:?}", stats.elapsed);
    println!();

    println!("Pages by State:");
    for state in PageState::all_states() {
        let count = stats.count(state);
        if count == 0 {
            continue;
        }
        let percentage = if stats.pages_in_tree > 0 {
            (count as f64 / stats.pages_in_tree as f64) * 100.0
        } else {
            0.0
        };
        println!("  {}: {} ({:.1}%)", state, count, percentage);
    }
}
