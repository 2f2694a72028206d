//! Store trait and error types

use crate::storage::QuoteRecord;
use thiserror::Error;

/// Errors that can occur during store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("quote text is empty")]
    EmptyQuote,

    #[error("quote too long (len={len}, max={max})")]
    QuoteTooLong { len: usize, max: usize },

    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Whether this error is a local validation failure (bad input) rather
    /// than a storage-layer fault. Validation failures abort only the
    /// operation that triggered them.
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::EmptyQuote | StoreError::QuoteTooLong { .. })
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for quote store backends
///
/// All operations are immediately visible to subsequent calls; each insert
/// is its own atomic unit.
pub trait QuoteStore {
    /// Idempotently ensures the backing table, any missing required
    /// columns, and the configured length-ceiling triggers exist.
    ///
    /// Safe to call any number of times; never destroys existing data.
    fn initialize(&mut self) -> StoreResult<()>;

    /// Exact-match existence check on the `(author, quote)` pair
    fn exists(&self, author: &str, quote: &str) -> StoreResult<bool>;

    /// Inserts a quote and returns the new record
    ///
    /// Fails with a validation error when the text is empty or exceeds the
    /// configured maximum length; violating inserts are rejected, never
    /// truncated.
    fn add(&mut self, date: &str, author: &str, quote: &str) -> StoreResult<QuoteRecord>;

    /// Returns up to `limit` quotes, most recent insertion first
    fn list_recent(&self, limit: usize) -> StoreResult<Vec<QuoteRecord>>;

    /// Looks up a single quote by id
    fn get(&self, id: i64) -> StoreResult<Option<QuoteRecord>>;

    /// Diagnostic: quotes whose text exceeds `max_len`. Never mutates.
    fn list_violations(&self, max_len: usize) -> StoreResult<Vec<QuoteRecord>>;

    /// Total number of stored quotes
    fn count(&self) -> StoreResult<u64>;
}
