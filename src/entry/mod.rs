//! The entry store contract.
//!
//! [`EntryStore`] is implemented once per backend (see [`crate::db`]). Callers hold a
//! `Box<dyn EntryStore>` chosen at startup and never branch on the backend themselves.

pub mod search;
pub mod stats;
pub mod types;

pub use types::{BackendKind, Entry, HealthReport, NewEntry};

use crate::error::Result;

/// Default number of results returned by [`EntryStore::search`].
pub const DEFAULT_TOP_K: usize = 100;

/// Persistence and retrieval of captured entries.
///
/// Each call acquires its own backend connection and releases it before returning,
/// on success and error paths alike.
pub trait EntryStore: Send + Sync {
    /// Which backend this store talks to.
    fn backend(&self) -> BackendKind;

    /// Create the entries table, its indexes and the timestamp uniqueness constraint
    /// if any are missing. Safe to call on every startup.
    fn ensure_schema(&self) -> Result<()>;

    /// Insert a new entry. Returns the new id, or `None` when an entry with the same
    /// timestamp already exists (the existing row is left untouched).
    fn insert(&self, entry: &NewEntry<'_>) -> Result<Option<i64>>;

    /// Every entry, most recent timestamp first.
    fn list_all(&self) -> Result<Vec<Entry>>;

    /// Up to `top_k` entries ranked by cosine similarity to `query`, most similar first.
    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<Entry>>;

    /// Every stored timestamp, descending.
    fn timestamps(&self) -> Result<Vec<i64>>;

    /// OCR payload of the entry whose asset is `filename`, if any.
    fn ocr_data_for(&self, filename: &str) -> Result<Option<String>>;

    /// Look up a single entry by its timestamp.
    fn get_by_timestamp(&self, timestamp: i64) -> Result<Option<Entry>>;

    fn count(&self) -> Result<u64>;

    fn health(&self) -> Result<HealthReport>;
}
