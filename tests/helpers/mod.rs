#![allow(dead_code)]

use recall::db::SqliteStore;
use recall::embedding::EMBEDDING_DIM;
use recall::entry::search::SearchStrategy;
use recall::entry::{EntryStore, NewEntry};
use tempfile::TempDir;

/// Open a fresh on-disk SQLite store with the schema applied. Keep the `TempDir`
/// alive for as long as the store is used.
pub fn test_store() -> (TempDir, SqliteStore) {
    test_store_with(SearchStrategy::InProcess)
}

pub fn test_store_with(strategy: SearchStrategy) -> (TempDir, SqliteStore) {
    let tmp = TempDir::new().unwrap();
    let store = SqliteStore::new(tmp.path().join("recall.db")).with_search_strategy(strategy);
    store.ensure_schema().unwrap();
    (tmp, store)
}

/// Generate a deterministic 384-dim embedding with a spike at position `seed`.
/// Distinct seeds give orthogonal vectors.
pub fn test_embedding(seed: usize) -> Vec<f32> {
    let mut v = vec![0.0f32; EMBEDDING_DIM];
    v[seed % EMBEDDING_DIM] = 1.0;
    v
}

/// Unit vector at angle `theta` (radians) from dimension 0 within the plane of
/// dimensions 0 and 1. Cosine similarity to `test_embedding(0)` is `cos(theta)`.
pub fn angled_embedding(theta: f32) -> Vec<f32> {
    let mut v = vec![0.0f32; EMBEDDING_DIM];
    v[0] = theta.cos();
    v[1] = theta.sin();
    v
}

/// Insert an entry with placeholder metadata. Returns the new id, if any.
pub fn insert_entry(
    store: &dyn EntryStore,
    text: &str,
    timestamp: i64,
    embedding: &[f32],
) -> Option<i64> {
    let filename = format!("{timestamp}.webp");
    store
        .insert(&NewEntry {
            text,
            timestamp,
            embedding,
            app: "Firefox",
            title: "Recall",
            filename: &filename,
            ocr_data: r#"{"pages":[]}"#,
        })
        .unwrap()
}
