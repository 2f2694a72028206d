//! Crawl driver - the sequential harvest loop
//!
//! Orchestrates fetch → extract → store-dedup → resolve-next for one seed
//! URL. The crawl is bounded by a page ceiling, a visited set, and a
//! same-origin policy; a polite fixed delay separates fetches. Exactly one
//! store writer exists for the duration of the crawl.

use crate::config::CrawlerConfig;
use crate::crawler::extractor::{extract_quotes, Candidate};
use crate::crawler::fetcher::fetch_page;
use crate::crawler::pagination::find_next;
use crate::dates;
use crate::storage::QuoteStore;
use crate::url::{extract_host, normalize_seed, same_host};
use crate::{QuoteError, Result, UrlError};
use reqwest::Client;
use scraper::Html;
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;
use url::Url;

/// Why a crawl ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// The configured page ceiling was reached
    PageLimit,

    /// No strategy found a next-page link
    NoNextLink,

    /// The next link pointed at an already-visited URL
    PageRevisited,

    /// The next link pointed off the seed's host
    LeftOrigin,

    /// A fetch failed; progress up to that page is kept
    FetchFailed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::PageLimit => write!(f, "page limit reached"),
            StopReason::NoNextLink => write!(f, "no next link found"),
            StopReason::PageRevisited => write!(f, "next link already visited"),
            StopReason::LeftOrigin => write!(f, "next link left the seed host"),
            StopReason::FetchFailed(e) => write!(f, "fetch failed: {}", e),
        }
    }
}

/// Totals reported by a finished crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlOutcome {
    /// Pages fetched and processed
    pub pages_visited: u32,

    /// Quotes inserted into the store
    pub added: u32,

    /// Candidates skipped (already stored, or rejected by policy)
    pub skipped: u32,

    /// Why the crawl ended
    pub stopped: StopReason,
}

/// Crawls a quote site starting from `seed`
///
/// The seed is normalized (scheme added when absent) and its host becomes
/// the crawl's origin; pagination never leaves it. Candidates already in
/// the store count as skipped, new ones are inserted with today's date.
///
/// # Arguments
///
/// * `store` - The quote store shared with the rest of the application
/// * `client` - HTTP client built by `build_http_client`
/// * `seed` - Operator-supplied start URL
/// * `config` - Page ceiling and polite delay
///
/// # Returns
///
/// * `Ok(CrawlOutcome)` - Totals and the stop reason; fetch failures after
///   the loop started are reported here, not as errors
/// * `Err(QuoteError::EmptyFirstPage)` - The first page yielded zero
///   candidates; the site does not look scrapable
/// * `Err(_)` - Seed rejected or the store failed
pub async fn crawl<S: QuoteStore>(
    store: &mut S,
    client: &Client,
    seed: &str,
    config: &CrawlerConfig,
) -> Result<CrawlOutcome> {
    let seed_url = normalize_seed(seed)?;
    let origin_host = extract_host(&seed_url).ok_or(UrlError::MissingHost)?;
    let delay = Duration::from_millis(config.request_delay_ms);

    tracing::info!("Starting crawl of {} (origin host {})", seed_url, origin_host);

    let mut visited: HashSet<Url> = HashSet::new();
    let mut outcome = CrawlOutcome {
        pages_visited: 0,
        added: 0,
        skipped: 0,
        stopped: StopReason::NoNextLink,
    };

    let mut next_url = Some(seed_url);

    while let Some(url) = next_url.take() {
        // Polite delay between fetches, never before the first
        if outcome.pages_visited > 0 {
            tokio::time::sleep(delay).await;
        }

        visited.insert(url.clone());

        let page = match fetch_page(client, &url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::error!("Fetch failed, stopping crawl: {}", e);
                outcome.stopped = StopReason::FetchFailed(e.to_string());
                break;
            }
        };

        let (candidates, next) = scrape_page(&page.body, &url);

        if outcome.pages_visited == 0 && candidates.is_empty() {
            return Err(QuoteError::EmptyFirstPage {
                url: url.to_string(),
            });
        }

        outcome.pages_visited += 1;
        tracing::info!(
            "Page {} ({}): {} candidates",
            outcome.pages_visited,
            url,
            candidates.len()
        );

        store_candidates(store, &candidates, &mut outcome)?;

        if outcome.pages_visited >= config.max_pages {
            outcome.stopped = StopReason::PageLimit;
            break;
        }

        match next {
            None => {
                outcome.stopped = StopReason::NoNextLink;
                break;
            }
            Some(candidate_url) => {
                if !same_host(&candidate_url, &origin_host) {
                    tracing::info!(
                        "Next link {} leaves origin host {}, stopping",
                        candidate_url,
                        origin_host
                    );
                    outcome.stopped = StopReason::LeftOrigin;
                    break;
                }
                if visited.contains(&candidate_url) {
                    outcome.stopped = StopReason::PageRevisited;
                    break;
                }
                next_url = Some(candidate_url);
            }
        }
    }

    tracing::info!(
        "Crawl finished: {} pages, {} added, {} skipped ({})",
        outcome.pages_visited,
        outcome.added,
        outcome.skipped,
        outcome.stopped
    );

    Ok(outcome)
}

/// Parses one page and runs extraction and next-link resolution on it
fn scrape_page(body: &str, url: &Url) -> (Vec<Candidate>, Option<Url>) {
    let document = Html::parse_document(body);
    let candidates = extract_quotes(&document);
    let next = find_next(&document, url);
    (candidates, next)
}

/// Runs the store-dedup loop for one page's candidates
///
/// Each insert is its own atomic unit. A candidate rejected by the length
/// policy is recovered locally (logged and counted as skipped); any other
/// store failure propagates and abandons the crawl.
fn store_candidates<S: QuoteStore>(
    store: &mut S,
    candidates: &[Candidate],
    outcome: &mut CrawlOutcome,
) -> Result<()> {
    let visit_date = dates::today();

    for candidate in candidates {
        if store.exists(&candidate.author, &candidate.text)? {
            tracing::debug!("Quote already exists: {}", candidate.text);
            outcome.skipped += 1;
            continue;
        }

        match store.add(&visit_date, &candidate.author, &candidate.text) {
            Ok(_) => {
                tracing::info!("Quote added: {} - {}", candidate.author, candidate.text);
                outcome.added += 1;
            }
            Err(e) if e.is_validation() => {
                tracing::warn!("Quote rejected by policy, skipping: {}", e);
                outcome.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
