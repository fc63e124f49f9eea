//! Webmap: a concurrent same-host site mapper
//!
//! This crate crawls a website from a seed URL, following same-host links up to a
//! configurable depth, and records the tree of visited pages together with the
//! static assets (images, scripts) each page references.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Webmap operations
#[derive(Debug, Error)]
pub enum WebmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not parse seed URL '{url}': {source}")]
    SeedParse {
        url: String,
        source: ::url::ParseError,
    },

    #[error("Seed URL '{url}' cannot be crawled: {reason}")]
    InvalidSeed { url: String, reason: String },

    #[error("Failed to fetch {url}: {source}")]
    Fetch { url: String, source: reqwest::Error },

    #[error("Failed to parse reference '{reference}' on page {page}: {source}")]
    ReferenceParse {
        reference: String,
        page: String,
        source: ::url::ParseError,
    },

    #[error("Skipping {url}: unsupported content type '{content_type}'")]
    UnsupportedContentType { url: String, content_type: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Webmap operations
pub type Result<T> = std::result::Result<T, WebmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlReport, Crawler, PageNode};
pub use state::{PageState, SeenSet};
pub use crate::url::{resolve, same_host};
