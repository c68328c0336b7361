//! SQLite-backed entry store.
//!
//! Embeddings are stored as little-endian f32 BLOBs. Search runs in-process by default;
//! with [`SearchStrategy::NativeIndex`] ranking is pushed into SQL through sqlite-vec's
//! `vec_distance_cosine`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::embedding::{
    check_dimensions, embedding_from_bytes, embedding_to_bytes, EMBEDDING_DIM,
};
use crate::entry::search::{InProcessSearch, SearchStrategy};
use crate::entry::{BackendKind, Entry, EntryStore, HealthReport, NewEntry};
use crate::error::{RecallError, Result};

const SELECT_COLUMNS: &str =
    "SELECT id, app, title, text, timestamp, embedding, filename, ocr_data FROM entries";

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Entry store over a single SQLite database file.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    strategy: SearchStrategy,
}

impl SqliteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            strategy: SearchStrategy::InProcess,
        }
    }

    pub fn with_search_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn search_strategy(&self) -> SearchStrategy {
        self.strategy
    }

    /// Open a connection for the duration of one operation.
    fn connect(&self) -> Result<Connection> {
        super::load_sqlite_vec();

        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        // Enable WAL mode so the timeline can read while captures are written
        let _mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        Ok(conn)
    }

    /// Load every entry and rank in this process.
    pub fn search_in_process(&self, query: &[f32], top_k: usize) -> Result<Vec<Entry>> {
        check_dimensions(query)?;
        let entries = self.list_all()?;
        Ok(InProcessSearch.rank(entries, query, top_k))
    }

    /// Rank inside SQLite with sqlite-vec's cosine distance.
    pub fn search_native(&self, query: &[f32], top_k: usize) -> Result<Vec<Entry>> {
        check_dimensions(query)?;
        let conn = self.connect()?;
        let query_bytes = embedding_to_bytes(query);
        let limit = i64::try_from(top_k).unwrap_or(i64::MAX);

        // vec_distance_cosine yields NULL for a zero-norm side; rank it as similarity 0.
        let mut stmt = conn.prepare(&format!(
            "{SELECT_COLUMNS} \
             ORDER BY COALESCE(vec_distance_cosine(embedding, ?1), 1.0), timestamp DESC \
             LIMIT ?2"
        ))?;
        let rows = stmt
            .query_map(params![query_bytes, limit], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawEntry::into_entry).collect()
    }

    fn query_entries(&self, sql: &str) -> Result<Vec<Entry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map([], read_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(RawEntry::into_entry).collect()
    }
}

impl EntryStore for SqliteStore {
    fn backend(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    fn ensure_schema(&self) -> Result<()> {
        let conn = self.connect()?;
        super::schema::ensure_sqlite_schema(&conn)?;
        tracing::info!(path = %self.path.display(), "sqlite schema ready");
        Ok(())
    }

    fn insert(&self, entry: &NewEntry<'_>) -> Result<Option<i64>> {
        check_dimensions(entry.embedding)?;
        let conn = self.connect()?;
        let embedding_bytes = embedding_to_bytes(entry.embedding);

        // Only the timestamp conflict is absorbed; any other constraint still errors.
        let id: Option<i64> = conn
            .query_row(
                "INSERT INTO entries (text, timestamp, embedding, app, title, filename, ocr_data) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) \
                 ON CONFLICT(timestamp) DO NOTHING RETURNING id",
                params![
                    entry.text,
                    entry.timestamp,
                    embedding_bytes,
                    entry.app,
                    entry.title,
                    entry.filename,
                    entry.ocr_data,
                ],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            Some(id) => tracing::debug!(id, timestamp = entry.timestamp, "entry inserted"),
            None => {
                tracing::debug!(timestamp = entry.timestamp, "duplicate timestamp, insert skipped")
            }
        }
        Ok(id)
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        self.query_entries(&format!("{SELECT_COLUMNS} ORDER BY timestamp DESC"))
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<Entry>> {
        tracing::debug!(top_k, strategy = %self.strategy, "sqlite search");
        match self.strategy {
            SearchStrategy::InProcess => self.search_in_process(query, top_k),
            SearchStrategy::NativeIndex => self.search_native(query, top_k),
        }
    }

    fn timestamps(&self) -> Result<Vec<i64>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT timestamp FROM entries ORDER BY timestamp DESC")?;
        let timestamps = stmt
            .query_map([], |row| row.get(0))?
            .collect::<std::result::Result<Vec<i64>, _>>()?;
        Ok(timestamps)
    }

    fn ocr_data_for(&self, filename: &str) -> Result<Option<String>> {
        let conn = self.connect()?;
        let ocr: Option<Option<String>> = conn
            .query_row(
                "SELECT ocr_data FROM entries WHERE filename = ?1 ORDER BY timestamp DESC LIMIT 1",
                params![filename],
                |row| row.get(0),
            )
            .optional()?;
        Ok(ocr.flatten())
    }

    fn get_by_timestamp(&self, timestamp: i64) -> Result<Option<Entry>> {
        let conn = self.connect()?;
        let raw = conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE timestamp = ?1"),
                params![timestamp],
                read_row,
            )
            .optional()?;
        raw.map(RawEntry::into_entry).transpose()
    }

    fn count(&self) -> Result<u64> {
        let conn = self.connect()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    fn health(&self) -> Result<HealthReport> {
        let conn = self.connect()?;
        let integrity: String = conn.query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        let vec_version: Option<String> = conn
            .query_row("SELECT vec_version()", [], |row| row.get(0))
            .ok();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;

        Ok(HealthReport {
            backend: BackendKind::Sqlite,
            entry_count: count as u64,
            vector_extension: vec_version,
            integrity_ok: integrity == "ok",
            integrity_details: integrity,
        })
    }
}

/// Row as stored; text columns may be NULL in databases written by older tools.
struct RawEntry {
    id: i64,
    app: Option<String>,
    title: Option<String>,
    text: Option<String>,
    timestamp: i64,
    embedding: Option<Vec<u8>>,
    filename: Option<String>,
    ocr_data: Option<String>,
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<RawEntry> {
    Ok(RawEntry {
        id: row.get(0)?,
        app: row.get(1)?,
        title: row.get(2)?,
        text: row.get(3)?,
        timestamp: row.get(4)?,
        embedding: row.get(5)?,
        filename: row.get(6)?,
        ocr_data: row.get(7)?,
    })
}

impl RawEntry {
    fn into_entry(self) -> Result<Entry> {
        let blob = self.embedding.ok_or(RecallError::CorruptEmbedding {
            id: self.id,
            len: 0,
        })?;
        let embedding = embedding_from_bytes(&blob)
            .filter(|v| v.len() == EMBEDDING_DIM)
            .ok_or(RecallError::CorruptEmbedding {
                id: self.id,
                len: blob.len(),
            })?;

        Ok(Entry {
            id: self.id,
            app: self.app.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            text: self.text.unwrap_or_default(),
            timestamp: self.timestamp,
            embedding,
            filename: self.filename.unwrap_or_default(),
            ocr_data: self.ocr_data.unwrap_or_default(),
        })
    }
}
