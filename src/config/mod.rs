//! Configuration module for quotemill
//!
//! Handles loading, parsing, and validating TOML configuration files. All
//! settings carry defaults, so running without a config file is supported.
//!
//! # Example
//!
//! ```no_run
//! use quotemill::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("quotemill.toml")).unwrap();
//! println!("Crawler page ceiling: {}", config.crawler.max_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, RenderConfig, StoreConfig, UserAgentConfig};

// Re-export parser functions
pub use parser::{load_config, load_or_default};

// Re-export validation
pub use validation::validate;
