//! Configuration module for Webmap
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an empty file is valid and
//! the CLI can run without one.
//!
//! # Example
//!
//! ```no_run
//! use webmap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("webmap.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    Config, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_MAX_DEPTH, DEFAULT_SEED_URL,
};

pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
