//! Quote store: persistence of dated quotes
//!
//! A single `quotes` table keyed by an auto-incrementing id. Dedup identity
//! is the exact `(author, quote)` pair; an optional length ceiling can be
//! enforced both before insert and by database triggers.

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, SCHEMA_SQL};
pub use sqlite::SqliteStore;
pub use traits::{QuoteStore, StoreError, StoreResult};

/// Default number of rows returned by `list_recent`
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// A stored quote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Surrogate key, assigned by the store, monotonic, never reused
    pub id: i64,

    /// Quote date in canonical `YYYY.MM.DD` form
    pub date: String,

    /// Author name
    pub author: String,

    /// Quote text
    pub quote: String,
}
