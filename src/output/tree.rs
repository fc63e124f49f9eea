//! Indented site map rendering
//!
//! Depth-first: each page's URL, then its statics, then its child pages
//! recursively, four spaces per level.

use crate::crawler::PageNode;
use std::fmt::Write;

const INDENT: &str = "    ";

/// Renders a page tree as indented text
pub fn format_tree(root: &PageNode) -> String {
    let mut out = String::new();
    write_page(&mut out, root, 0);
    out
}

/// Prints a page tree to stdout
pub fn print_tree(root: &PageNode) {
    print!("{}", format_tree(root));
}

fn write_page(out: &mut String, page: &PageNode, indent: usize) {
    let _ = writeln!(out, "{}{}", INDENT.repeat(indent), page.url);

    if !page.statics.is_empty() {
        let _ = writeln!(out, "{}Statics:", INDENT.repeat(indent + 1));
        for static_url in &page.statics {
            let _ = writeln!(out, "{}{}", INDENT.repeat(indent + 2), static_url);
        }
    }

    if !page.children.is_empty() {
        let _ = writeln!(out, "{}Links:", INDENT.repeat(indent + 1));
        for child in &page.children {
            write_page(out, child, indent + 2);
        }
    }
}
