//! Markdown summary generation
//!
//! This module generates a human-readable markdown summary of a crawl,
//! including run metadata, statistics and the full site map.

use crate::crawler::CrawlReport;
use crate::output::stats::CrawlStatistics;
use crate::output::tree::format_tree;
use crate::state::PageState;
use crate::WebmapError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Generates a markdown summary and writes it to `output_path`
///
/// # Arguments
///
/// * `report` - The finished crawl
/// * `config_hash` - Hash of the configuration file, if one was used
/// * `output_path` - Path where the markdown file should be written
pub fn generate_markdown_summary(
    report: &CrawlReport,
    config_hash: Option<&str>,
    output_path: &Path,
) -> Result<(), WebmapError> {
    let markdown = format_markdown_summary(report, config_hash);

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    Ok(())
}

/// Formats a crawl report as markdown
pub fn format_markdown_summary(report: &CrawlReport, config_hash: Option<&str>) -> String {
    let stats = CrawlStatistics::from_report(report);
    let mut md = String::new();

    md.push_str("# Webmap Crawl Summary\n\n");

    // Run metadata
    md.push_str("## Run Information\n\n");
    md.push_str(&format!("- **Seed**: {}\n", report.root.url));
    md.push_str(&format!("- **Max Depth**: {}\n", report.max_depth));
    md.push_str(&format!("- **Started**: {}\n", report.started_at.to_rfc3339()));
    md.push_str(&format!(
        "- **Finished**: {}\n",
        report.finished_at.to_rfc3339()
    ));
    md.push_str(&format!(
        "- **Duration**: {:.2} seconds\n",
        report.elapsed.as_secs_f64()
    ));
    if let Some(hash) = config_hash {
        md.push_str(&format!("- **Config Hash**: {}\n", hash));
    }
    md.push('\n');

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!(
        "- **Unique Links Crawled**: {}\n",
        stats.pages_claimed
    ));
    md.push_str(&format!("- **Pages in Map**: {}\n", stats.pages_in_tree));
    md.push_str(&format!("- **Deepest Level**: {}\n", stats.deepest_level));
    md.push_str(&format!(
        "- **Static References**: {}\n",
        stats.total_statics
    ));
    md.push_str(&format!(
        "- **Unique Statics**: {} ({} cross-host)\n\n",
        stats.unique_statics, stats.cross_host_statics
    ));

    // State breakdown
    md.push_str("## Page State Breakdown\n\n");
    md.push_str("| State | Count |\n");
    md.push_str("|-------|-------|\n");
    for state in PageState::all_states() {
        md.push_str(&format!("| {} | {} |\n", state_label(state), stats.count(state)));
    }
    md.push('\n');

    // Site map
    md.push_str("## Site Map\n\n");
    md.push_str("```text\n");
    md.push_str(&format_tree(&report.root));
    md.push_str("```\n");

    md
}

fn state_label(state: PageState) -> &'static str {
    match state {
        PageState::Crawled => "Crawled",
        PageState::DepthExhausted => "Depth Exhausted",
        PageState::ContentMismatch => "Content Mismatch",
        PageState::FetchFailed => "Fetch Failed",
    }
}
