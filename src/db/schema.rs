//! DDL for the `entries` table on both backends.
//!
//! All statements are idempotent. The timestamp uniqueness constraint is checked and
//! added separately from table creation because a table written by an older schema
//! may exist without it.

use rusqlite::Connection;

use crate::embedding::EMBEDDING_DIM;
use crate::error::{RecallError, Result};

/// Name of the timestamp index relied on for ordered retrieval.
pub const TIMESTAMP_INDEX: &str = "idx_timestamp";

const SQLITE_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    app TEXT,
    title TEXT,
    text TEXT,
    timestamp INTEGER UNIQUE,
    embedding BLOB,
    filename TEXT,
    ocr_data TEXT
);

CREATE INDEX IF NOT EXISTS idx_timestamp ON entries (timestamp);
"#;

/// Counts unique indexes (including the implicit one behind a `UNIQUE` column) whose
/// only column is `timestamp`.
const SQLITE_UNIQUE_TIMESTAMP_SQL: &str = r#"
SELECT COUNT(*) FROM pragma_index_list('entries') AS il
WHERE il."unique" = 1
  AND (SELECT COUNT(*) FROM pragma_index_info(il.name)) = 1
  AND (SELECT name FROM pragma_index_info(il.name)) = 'timestamp'
"#;

/// Ensure the SQLite schema exists. Idempotent.
pub fn ensure_sqlite_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(SQLITE_SCHEMA_SQL)
        .map_err(RecallError::schema)?;

    if !sqlite_has_unique_timestamp(conn)? {
        tracing::info!("adding missing unique index on entries.timestamp");
        conn.execute_batch(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_entries_timestamp_unique \
             ON entries (timestamp);",
        )
        .map_err(RecallError::schema)?;
    }

    Ok(())
}

/// Whether a unique index covers exactly `entries.timestamp`.
pub fn sqlite_has_unique_timestamp(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(SQLITE_UNIQUE_TIMESTAMP_SQL, [], |row| row.get(0))
        .map_err(RecallError::schema)?;
    Ok(count > 0)
}

fn postgres_table_sql() -> String {
    format!(
        r#"
CREATE TABLE IF NOT EXISTS entries (
    id BIGSERIAL PRIMARY KEY,
    app TEXT,
    title TEXT,
    text TEXT,
    "timestamp" BIGINT UNIQUE,
    embedding vector({EMBEDDING_DIM}),
    filename TEXT,
    ocr_data TEXT
);

CREATE INDEX IF NOT EXISTS idx_timestamp ON entries ("timestamp");
"#
    )
}

const POSTGRES_UNIQUE_TIMESTAMP_SQL: &str = r#"
SELECT EXISTS (
    SELECT 1
    FROM pg_constraint
    WHERE conrelid = 'entries'::regclass
      AND contype = 'u'
      AND conkey = ARRAY(
          SELECT attnum FROM pg_attribute
          WHERE attrelid = 'entries'::regclass
            AND attname = 'timestamp'
      )
)
"#;

/// Ensure the PostgreSQL schema exists: pgvector extension, table, index and the
/// timestamp uniqueness constraint. Runs in one transaction.
pub fn ensure_postgres_schema(client: &mut postgres::Client) -> Result<()> {
    let mut tx = client.transaction().map_err(RecallError::schema)?;

    tx.batch_execute("CREATE EXTENSION IF NOT EXISTS vector;")
        .map_err(RecallError::schema)?;
    tx.batch_execute(&postgres_table_sql())
        .map_err(RecallError::schema)?;

    let has_unique: bool = tx
        .query_one(POSTGRES_UNIQUE_TIMESTAMP_SQL, &[])
        .and_then(|row| row.try_get(0))
        .map_err(RecallError::schema)?;

    if !has_unique {
        tracing::info!("adding missing unique constraint on entries.timestamp");
        tx.batch_execute(
            r#"ALTER TABLE entries ADD CONSTRAINT entries_timestamp_unique UNIQUE ("timestamp");"#,
        )
        .map_err(RecallError::schema)?;
    }

    tx.commit().map_err(RecallError::schema)?;
    Ok(())
}
