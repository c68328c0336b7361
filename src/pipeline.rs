//! Glue between the capture loop, the embedding model and the entry store.
//!
//! The capture loop hands over a [`Capture`]; [`record_capture`] embeds its text and
//! stores it. [`search_text`] embeds a free-text query and ranks stored entries.

use anyhow::{Context, Result};

use crate::embedding::{check_dimensions, EmbeddingProvider};
use crate::entry::{Entry, EntryStore, NewEntry};

/// One processed screenshot, before embedding.
#[derive(Debug, Clone, Default)]
pub struct Capture {
    pub app: String,
    pub title: String,
    pub text: String,
    pub timestamp: i64,
    pub filename: String,
    pub ocr_data: String,
}

/// Embed `capture.text` and insert it. Returns `None` when an entry already exists
/// for the same timestamp.
pub fn record_capture(
    store: &dyn EntryStore,
    provider: &dyn EmbeddingProvider,
    capture: &Capture,
) -> Result<Option<i64>> {
    let embedding = provider
        .embed(&capture.text)
        .context("failed to embed capture text")?;
    check_dimensions(&embedding)?;

    let id = store.insert(&NewEntry {
        text: &capture.text,
        timestamp: capture.timestamp,
        embedding: &embedding,
        app: &capture.app,
        title: &capture.title,
        filename: &capture.filename,
        ocr_data: &capture.ocr_data,
    })?;
    Ok(id)
}

/// Embed `query` and return the `top_k` most similar entries.
pub fn search_text(
    store: &dyn EntryStore,
    provider: &dyn EmbeddingProvider,
    query: &str,
    top_k: usize,
) -> Result<Vec<Entry>> {
    let embedding = provider.embed(query).context("failed to embed query")?;
    Ok(store.search(&embedding, top_k)?)
}
