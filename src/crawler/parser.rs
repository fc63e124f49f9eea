//! HTML reference extraction
//!
//! This module scans a page's start tags and classifies what it finds:
//! - Links to follow: `<a href>` and `<link href>`
//! - Static resources: `<img src>`, `<image src>` and `<script src>`
//!
//! References are reported raw, exactly as written in the attribute; resolving
//! them against the page URL is the caller's job.

use scraper::{Html, Selector};
use std::collections::HashSet;

/// Every tag/attribute pair we care about, in one pass over the document
const REFERENCE_SELECTOR: &str = "a[href], link[href], img[src], image[src], script[src]";

/// What a reference points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// A page that may be crawled
    Link,
    /// An asset recorded on the page but never fetched
    Static,
}

/// A raw reference found on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub kind: ReferenceKind,
    pub raw: String,
}

impl ReferenceKind {
    /// Classifies a tag name, returning the kind and the attribute to read
    fn for_tag(name: &str) -> Option<(Self, &'static str)> {
        match name {
            "a" | "link" => Some((Self::Link, "href")),
            "img" | "image" | "script" => Some((Self::Static, "src")),
            _ => None,
        }
    }
}

/// Scans a document and hands every unique reference to `dispatch`
///
/// Deduplication is page-local and keyed on the raw attribute string, shared
/// between links and statics: a value seen once on this page is never
/// dispatched again, whichever tag it appears on.
///
/// The HTML5 parser is error-tolerant, so a malformed tail simply ends the tag
/// stream like a clean end of input does.
///
/// # Returns
///
/// The number of references dispatched.
///
/// # Example
///
/// ```
/// use webmap::crawler::{extract_references, ReferenceKind};
///
/// let html = r#"<a href="/about">A</a><a href="/about">B</a><img src="/logo.png">"#;
/// let mut found = Vec::new();
/// let count = extract_references(html, |r| found.push(r));
/// assert_eq!(count, 2);
/// assert_eq!(found[0].kind, ReferenceKind::Link);
/// assert_eq!(found[1].raw, "/logo.png");
/// ```
pub fn extract_references<F>(html: &str, mut dispatch: F) -> usize
where
    F: FnMut(Reference),
{
    let Ok(selector) = Selector::parse(REFERENCE_SELECTOR) else {
        return 0;
    };

    let document = Html::parse_document(html);
    let mut seen_refs: HashSet<&str> = HashSet::new();
    let mut dispatched = 0;

    for element in document.select(&selector) {
        let element = element.value();
        let Some((kind, attribute)) = ReferenceKind::for_tag(element.name()) else {
            continue;
        };

        if let Some(value) = element.attr(attribute) {
            if seen_refs.insert(value) {
                dispatch(Reference {
                    kind,
                    raw: value.to_string(),
                });
                dispatched += 1;
            }
        }
    }

    dispatched
}

/// Convenience function collecting every unique reference on a page
pub fn collect_references(html: &str) -> Vec<Reference> {
    let mut references = Vec::new();
    extract_references(html, |reference| references.push(reference));
    references
}
