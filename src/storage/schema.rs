//! Database schema definitions
//!
//! One table. Evolution is strictly additive: a required column missing
//! from an existing database is added on the next initialization; columns
//! are never dropped or renamed.

use rusqlite::Connection;

/// SQL schema for the quotes table
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quote_date TEXT NOT NULL,
    author TEXT NOT NULL,
    quote TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_quotes_author_quote ON quotes(author, quote);
"#;

/// Columns every quotes database must carry, with the definition used when
/// patching them into an older file (ALTER TABLE ADD needs a default for
/// NOT NULL columns)
const REQUIRED_COLUMNS: &[(&str, &str)] = &[
    ("quote_date", "TEXT NOT NULL DEFAULT ''"),
    ("author", "TEXT NOT NULL DEFAULT ''"),
    ("quote", "TEXT NOT NULL DEFAULT ''"),
];

/// Names of the length-enforcement triggers
const LENGTH_TRIGGERS: &[&str] = &["trg_quotes_len_ins", "trg_quotes_len_upd"];

/// Initializes the database schema
///
/// Creates the table and index, patches any missing required column, and
/// installs or removes the length-ceiling triggers so the database always
/// matches the configured policy.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `max_quote_length` - The configured length ceiling, if any
pub fn initialize_schema(
    conn: &Connection,
    max_quote_length: Option<usize>,
) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    ensure_columns(conn)?;
    sync_length_triggers(conn, max_quote_length)?;
    Ok(())
}

/// Adds any required column missing from an existing database
///
/// Never drops or renames; existing data is untouched.
fn ensure_columns(conn: &Connection) -> Result<(), rusqlite::Error> {
    let mut stmt = conn.prepare("PRAGMA table_info(quotes)")?;
    let present: Vec<String> = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<Result<Vec<_>, _>>()?;

    for (name, definition) in REQUIRED_COLUMNS {
        if !present.iter().any(|c| c == name) {
            tracing::warn!("Patching missing column '{}' into quotes table", name);
            conn.execute_batch(&format!(
                "ALTER TABLE quotes ADD COLUMN {} {}",
                name, definition
            ))?;
        }
    }

    Ok(())
}

/// Installs or removes the INSERT/UPDATE length triggers
///
/// The ceiling is baked into the trigger body, so the triggers are dropped
/// and recreated on every initialization to track the configured value.
fn sync_length_triggers(
    conn: &Connection,
    max_quote_length: Option<usize>,
) -> Result<(), rusqlite::Error> {
    for trigger in LENGTH_TRIGGERS {
        conn.execute_batch(&format!("DROP TRIGGER IF EXISTS {}", trigger))?;
    }

    let Some(max) = max_quote_length else {
        return Ok(());
    };

    conn.execute_batch(&format!(
        r#"
CREATE TRIGGER trg_quotes_len_ins
BEFORE INSERT ON quotes
FOR EACH ROW
WHEN length(NEW.quote) > {max}
BEGIN
    SELECT RAISE(ABORT, 'quote too long (max {max})');
END;

CREATE TRIGGER trg_quotes_len_upd
BEFORE UPDATE OF quote ON quotes
FOR EACH ROW
WHEN length(NEW.quote) > {max}
BEGIN
    SELECT RAISE(ABORT, 'quote too long (max {max})');
END;
"#
    ))?;

    Ok(())
}
