//! CLI `search` command: rank entries by similarity to a stored capture.

use anyhow::{bail, Result};

use recall::config::RecallConfig;

/// Rank stored entries by similarity to the entry captured at `timestamp`.
pub fn search_like(config: &RecallConfig, timestamp: i64, top_k: Option<usize>) -> Result<()> {
    let store = super::open_store(config)?;

    let Some(reference) = store.get_by_timestamp(timestamp)? else {
        bail!("no entry captured at timestamp {timestamp}");
    };

    let top_k = top_k.unwrap_or(config.search.top_k);
    let results = store.search(&reference.embedding, top_k)?;

    println!(
        "Entries similar to {} [{}] {}\n",
        super::format_timestamp(reference.timestamp),
        reference.app,
        reference.title
    );

    for (i, entry) in results.iter().enumerate() {
        let similarity =
            recall::embedding::cosine_similarity(&reference.embedding, &entry.embedding);
        println!(
            "  {}. {} [{}] {} (similarity: {:.4})",
            i + 1,
            super::format_timestamp(entry.timestamp),
            entry.app,
            entry.filename,
            similarity,
        );
        println!("     {}", super::truncate_preview(&entry.text, 120));
    }

    Ok(())
}
