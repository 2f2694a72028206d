//! SQLite implementation of the quote store

use crate::storage::schema::initialize_schema;
use crate::storage::traits::{QuoteStore, StoreError, StoreResult};
use crate::storage::QuoteRecord;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension};
use std::path::Path;

/// SQLite storage backend
///
/// Holds the connection and the configured length ceiling; the ceiling is
/// checked before every insert and, as defense-in-depth, enforced again by
/// database triggers installed during initialization.
pub struct SqliteStore {
    conn: Connection,
    max_quote_length: Option<usize>,
}

impl SqliteStore {
    /// Opens (or creates) a quote database at the given path
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    /// * `max_quote_length` - Optional length ceiling for quote text
    pub fn open(path: &Path, max_quote_length: Option<usize>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        let mut store = Self {
            conn,
            max_quote_length,
        };
        store.initialize()?;

        Ok(store)
    }

    /// Creates an in-memory store (for testing)
    #[cfg(test)]
    pub fn open_in_memory(max_quote_length: Option<usize>) -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let mut store = Self {
            conn,
            max_quote_length,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Pre-insert validation against the configured policy
    fn check_quote(&self, quote: &str) -> StoreResult<()> {
        if quote.is_empty() {
            return Err(StoreError::EmptyQuote);
        }

        if let Some(max) = self.max_quote_length {
            let len = quote.chars().count();
            if len > max {
                return Err(StoreError::QuoteTooLong { len, max });
            }
        }

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<QuoteRecord> {
        Ok(QuoteRecord {
            id: row.get(0)?,
            date: row.get(1)?,
            author: row.get(2)?,
            quote: row.get(3)?,
        })
    }
}

/// Maps trigger aborts and other constraint failures to `Constraint`
fn classify_sqlite_error(err: rusqlite::Error) -> StoreError {
    match &err {
        rusqlite::Error::SqliteFailure(e, message) if e.code == ErrorCode::ConstraintViolation => {
            StoreError::Constraint(
                message
                    .clone()
                    .unwrap_or_else(|| "constraint violation".to_string()),
            )
        }
        _ => StoreError::Sqlite(err),
    }
}

impl QuoteStore for SqliteStore {
    fn initialize(&mut self) -> StoreResult<()> {
        initialize_schema(&self.conn, self.max_quote_length)?;
        Ok(())
    }

    fn exists(&self, author: &str, quote: &str) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM quotes WHERE author = ?1 AND quote = ?2 LIMIT 1",
                params![author, quote],
                |row| row.get(0),
            )
            .optional()?;

        Ok(found.is_some())
    }

    fn add(&mut self, date: &str, author: &str, quote: &str) -> StoreResult<QuoteRecord> {
        self.check_quote(quote)?;

        self.conn
            .execute(
                "INSERT INTO quotes (quote_date, author, quote) VALUES (?1, ?2, ?3)",
                params![date, author, quote],
            )
            .map_err(classify_sqlite_error)?;

        let id = self.conn.last_insert_rowid();
        tracing::debug!("Quote added: id={} {} - {}", id, date, author);

        Ok(QuoteRecord {
            id,
            date: date.to_string(),
            author: author.to_string(),
            quote: quote.to_string(),
        })
    }

    fn list_recent(&self, limit: usize) -> StoreResult<Vec<QuoteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, quote_date, author, quote FROM quotes ORDER BY id DESC LIMIT ?1",
        )?;

        let records = stmt
            .query_map(params![limit as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn get(&self, id: i64) -> StoreResult<Option<QuoteRecord>> {
        let record = self
            .conn
            .query_row(
                "SELECT id, quote_date, author, quote FROM quotes WHERE id = ?1",
                params![id],
                Self::row_to_record,
            )
            .optional()?;

        Ok(record)
    }

    fn list_violations(&self, max_len: usize) -> StoreResult<Vec<QuoteRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, quote_date, author, quote FROM quotes WHERE length(quote) > ?1 ORDER BY id",
        )?;

        let records = stmt
            .query_map(params![max_len as i64], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    fn count(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM quotes", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let store = SqliteStore::open_in_memory(None);
        assert!(store.is_ok());
    }

    #[test]
    fn test_add_and_exists() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();

        assert!(!store.exists("Ada", "Think.").unwrap());

        let record = store.add("2025.07.02", "Ada", "Think.").unwrap();
        assert!(record.id > 0);

        assert!(store.exists("Ada", "Think.").unwrap());
    }

    #[test]
    fn test_exists_is_exact() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        store.add("2025.07.02", "Ada", "Think.").unwrap();

        assert!(!store.exists("ada", "Think.").unwrap());
        assert!(!store.exists("Ada", "Think").unwrap());
    }

    #[test]
    fn test_add_rejects_empty_quote() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        let result = store.add("2025.07.02", "Ada", "");
        assert!(matches!(result, Err(StoreError::EmptyQuote)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_rejects_over_ceiling() {
        let mut store = SqliteStore::open_in_memory(Some(25)).unwrap();
        let result = store.add("2025.07.02", "Ada", "This one is twenty-six ch.");
        assert!(matches!(
            result,
            Err(StoreError::QuoteTooLong { len: 26, max: 25 })
        ));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_add_at_ceiling_is_accepted() {
        let mut store = SqliteStore::open_in_memory(Some(6)).unwrap();
        assert!(store.add("2025.07.02", "Ada", "Think.").is_ok());
    }

    #[test]
    fn test_validation_errors_are_flagged() {
        assert!(StoreError::EmptyQuote.is_validation());
        assert!(StoreError::QuoteTooLong { len: 30, max: 25 }.is_validation());
        assert!(!StoreError::Constraint("x".to_string()).is_validation());
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        let a = store.add("2025.07.01", "A", "First quote").unwrap();
        let b = store.add("2025.07.02", "B", "Second quote").unwrap();
        assert!(b.id > a.id);
    }

    #[test]
    fn test_list_recent_orders_by_insertion() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        store.add("2025.07.01", "A", "First quote").unwrap();
        store.add("2025.07.02", "B", "Second quote").unwrap();
        store.add("2025.07.03", "C", "Third quote").unwrap();

        let recent = store.list_recent(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].author, "C");
        assert_eq!(recent[1].author, "B");
    }

    #[test]
    fn test_get_by_id() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        let record = store.add("2025.07.02", "Ada", "Think.").unwrap();

        let fetched = store.get(record.id).unwrap();
        assert_eq!(fetched, Some(record));
        assert_eq!(store.get(9999).unwrap(), None);
    }

    #[test]
    fn test_list_violations() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        store.add("2025.07.01", "A", "short").unwrap();
        store
            .add("2025.07.02", "B", "a quote comfortably over the limit")
            .unwrap();

        let violations = store.list_violations(25).unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].author, "B");
    }

    #[test]
    fn test_initialize_is_idempotent_and_preserves_data() {
        let mut store = SqliteStore::open_in_memory(None).unwrap();
        store.add("2025.07.02", "Ada", "Think.").unwrap();

        store.initialize().unwrap();
        store.initialize().unwrap();

        assert_eq!(store.count().unwrap(), 1);
    }
}
