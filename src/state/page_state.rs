/// Terminal page states recorded on every crawled page
///
/// A page moves `Pending → Fetching → (Skipped | Extracting) → Aggregating → Done`
/// while it is being crawled. Only the way it ended is kept on the node.
use std::fmt;

/// How the crawl of a single page ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page was fetched as HTML and its references were extracted
    Crawled,

    /// Depth budget was exhausted; the page was claimed but never fetched
    DepthExhausted,

    // ===== Skipped =====
    /// Response advertised a Content-Type other than HTML
    ContentMismatch,

    /// Transport failure while fetching or reading the body
    FetchFailed,
}

impl PageState {
    /// Returns true if a network request was attempted for this page
    pub fn was_fetched(&self) -> bool {
        !matches!(self, Self::DepthExhausted)
    }

    /// Returns true if the page was fetched but contributed no references
    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::ContentMismatch | Self::FetchFailed)
    }

    /// Returns true if this represents a fetch failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::FetchFailed)
    }

    /// Short machine-friendly label used in reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crawled => "crawled",
            Self::DepthExhausted => "depth_exhausted",
            Self::ContentMismatch => "content_mismatch",
            Self::FetchFailed => "fetch_failed",
        }
    }

    /// Returns all states, in report order
    pub fn all_states() -> [PageState; 4] {
        [
            Self::Crawled,
            Self::DepthExhausted,
            Self::ContentMismatch,
            Self::FetchFailed,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
