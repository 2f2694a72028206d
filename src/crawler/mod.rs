//! Crawler module for harvesting quotes from listing pages
//!
//! This module contains the scraping pipeline:
//! - HTTP fetching with a bounded timeout and identifying user agent
//! - Quote extraction via an ordered list of structural strategies
//! - Next-page discovery via an ordered list of resolver strategies
//! - The sequential crawl loop tying them together

mod driver;
mod extractor;
mod fetcher;
mod pagination;

pub use driver::{crawl, CrawlOutcome, StopReason};
pub use extractor::{extract_quotes, Candidate};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchedPage};
pub use pagination::find_next;
