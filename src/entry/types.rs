//! Entry record definitions.
//!
//! [`Entry`] is a stored capture as read back from a backend, [`NewEntry`] is the
//! borrowed input to an insert, and [`BackendKind`] / [`HealthReport`] describe the
//! store itself.

use serde::{Deserialize, Serialize};

/// One captured and processed screen snapshot, matching the `entries` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Source application name (may be empty).
    pub app: String,
    /// Source window title (may be empty).
    pub title: String,
    /// Recognized text of the snapshot.
    pub text: String,
    /// Seconds since the Unix epoch. Unique across all entries.
    pub timestamp: i64,
    /// Semantic embedding of `text`, always
    /// [`EMBEDDING_DIM`](crate::embedding::EMBEDDING_DIM) long.
    pub embedding: Vec<f32>,
    /// Name of the screenshot asset, owned by the capture subsystem.
    pub filename: String,
    /// Serialized OCR layout (pages, blocks, lines, words). Stored verbatim.
    pub ocr_data: String,
}

/// Fields supplied by the capture pipeline for a new entry.
#[derive(Debug, Clone, Copy)]
pub struct NewEntry<'a> {
    pub text: &'a str,
    pub timestamp: i64,
    pub embedding: &'a [f32],
    pub app: &'a str,
    pub title: &'a str,
    pub filename: &'a str,
    pub ocr_data: &'a str,
}

impl Entry {
    /// Borrow this entry as insert input (used when copying history between stores).
    pub fn as_new(&self) -> NewEntry<'_> {
        NewEntry {
            text: &self.text,
            timestamp: self.timestamp,
            embedding: &self.embedding,
            app: &self.app,
            title: &self.title,
            filename: &self.filename,
            ocr_data: &self.ocr_data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    Sqlite,
    Postgres,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a store health check.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub backend: BackendKind,
    pub entry_count: u64,
    /// sqlite-vec or pgvector version, if the extension is available.
    pub vector_extension: Option<String>,
    pub integrity_ok: bool,
    pub integrity_details: String,
}
