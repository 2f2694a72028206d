//! Quotemill main entry point
//!
//! Command-line interface over the quote store, the crawler, and the image
//! composer.

use clap::{Parser, Subcommand};
use quotemill::config::{load_or_default, Config};
use quotemill::crawler::{build_http_client, crawl};
use quotemill::dates;
use quotemill::render::{OutputFormat, QuoteComposer};
use quotemill::storage::{QuoteStore, SqliteStore, DEFAULT_RECENT_LIMIT};
use quotemill::QuoteError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Quotemill: collect quotes and render them as cards
///
/// Stores dated quotes in SQLite, harvests new ones from quote-listing
/// sites by following their pagination, and renders stored quotes onto a
/// background image.
#[derive(Parser, Debug)]
#[command(name = "quotemill")]
#[command(version)]
#[command(about = "Collect quotes and render them as cards", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults to ./quotemill.toml when present)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Store a quote and render its card
    Add {
        /// Quote date (YYYY/MM/DD, YYYY-MM-DD, YYYY.MM.DD or YYYYMMDD)
        date: String,

        /// Author name
        author: String,

        /// Quote text
        quote: String,

        /// Store only, skip rendering
        #[arg(long)]
        no_render: bool,
    },

    /// Show the most recently stored quotes
    List {
        /// Maximum number of quotes to show
        #[arg(long, default_value_t = DEFAULT_RECENT_LIMIT)]
        limit: usize,
    },

    /// Render the card for an already-stored quote
    Render {
        /// Quote id as shown by `list`
        id: i64,
    },

    /// Harvest quotes from a listing site
    Crawl {
        /// Seed URL (scheme optional)
        url: String,

        /// Override the configured page ceiling
        #[arg(long)]
        max_pages: Option<u32>,

        /// Override the configured delay between fetches (milliseconds)
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Report stored quotes exceeding a length ceiling
    Check {
        /// Ceiling to check against (defaults to the configured one, else 25)
        #[arg(long)]
        max_len: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = match load_or_default(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut store = SqliteStore::open(
        Path::new(&config.store.database_path),
        config.store.max_quote_length,
    )?;

    match cli.command {
        Command::Add {
            date,
            author,
            quote,
            no_render,
        } => handle_add(&config, &mut store, &date, &author, &quote, no_render)?,
        Command::List { limit } => handle_list(&store, limit)?,
        Command::Render { id } => handle_render(&config, &store, id)?,
        Command::Crawl {
            url,
            max_pages,
            delay_ms,
        } => handle_crawl(&config, &mut store, &url, max_pages, delay_ms).await?,
        Command::Check { max_len } => handle_check(&config, &store, max_len)?,
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("quotemill=info,warn"),
            1 => EnvFilter::new("quotemill=debug,info"),
            2 => EnvFilter::new("quotemill=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles `add`: validate, store, render
fn handle_add(
    config: &Config,
    store: &mut SqliteStore,
    date: &str,
    author: &str,
    quote: &str,
    no_render: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let author = author.trim();
    let quote = quote.trim();

    if author.is_empty() {
        return Err(QuoteError::Validation("author cannot be empty".to_string()).into());
    }

    let date = dates::canonicalize_date(date)?;
    let record = store.add(&date, author, quote)?;
    println!("Quote added: {} - {}: {}", record.date, record.author, record.quote);

    if !no_render {
        render_card(config, &record.date, &record.author, &record.quote)?;
    }

    Ok(())
}

/// Handles `list`: print the most recent quotes
fn handle_list(store: &SqliteStore, limit: usize) -> Result<(), Box<dyn std::error::Error>> {
    let records = store.list_recent(limit)?;

    if records.is_empty() {
        println!("No quotes stored yet.");
        return Ok(());
    }

    println!("--- Showing latest {} quote(s) ---\n", records.len());
    for record in &records {
        println!(
            "{}. {} - {}\n   \u{201C}{}\u{201D}\n",
            record.id, record.date, record.author, record.quote
        );
    }

    Ok(())
}

/// Handles `render`: compose the card for a stored quote
fn handle_render(
    config: &Config,
    store: &SqliteStore,
    id: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let record = store
        .get(id)?
        .ok_or_else(|| QuoteError::Validation(format!("no quote with id {}", id)))?;

    render_card(config, &record.date, &record.author, &record.quote)
}

/// Handles `crawl`: run the harvest loop and report the outcome
async fn handle_crawl(
    config: &Config,
    store: &mut SqliteStore,
    url: &str,
    max_pages: Option<u32>,
    delay_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut crawler_config = config.crawler.clone();
    if let Some(pages) = max_pages {
        crawler_config.max_pages = pages;
    }
    if let Some(delay) = delay_ms {
        crawler_config.request_delay_ms = delay;
    }

    let client = build_http_client(
        &config.user_agent,
        Duration::from_secs(crawler_config.request_timeout_secs),
    )?;

    match crawl(store, &client, url, &crawler_config).await {
        Ok(outcome) => {
            println!(
                "Crawl finished: {} page(s) visited, {} added, {} skipped ({})",
                outcome.pages_visited, outcome.added, outcome.skipped, outcome.stopped
            );
            Ok(())
        }
        Err(QuoteError::EmptyFirstPage { url }) => {
            println!("No quotes found on {}; site does not look scrapable.", url);
            Err(QuoteError::EmptyFirstPage { url }.into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Handles `check`: report quotes over the length ceiling
fn handle_check(
    config: &Config,
    store: &SqliteStore,
    max_len: Option<usize>,
) -> Result<(), Box<dyn std::error::Error>> {
    let max_len = max_len
        .or(config.store.max_quote_length)
        .unwrap_or(25);

    let violations = store.list_violations(max_len)?;
    if violations.is_empty() {
        println!("All quotes satisfy length <= {}.", max_len);
        return Ok(());
    }

    println!("{} violating row(s):", violations.len());
    for record in &violations {
        println!(
            "- id={}, len={}: {:?}",
            record.id,
            record.quote.chars().count(),
            record.quote
        );
    }

    Ok(())
}

/// Composes a card, reporting where it went
fn render_card(
    config: &Config,
    date: &str,
    author: &str,
    quote: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let composer = QuoteComposer::new(&config.render)?;

    match composer.compose(date, author, quote, OutputFormat::Jpeg)? {
        Some(path) => println!("Card saved to {}", path.display()),
        None => println!("Card skipped (missing background or font)."),
    }

    Ok(())
}
