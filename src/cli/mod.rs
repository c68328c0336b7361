pub mod doctor;
pub mod export;
pub mod import;
pub mod list;
pub mod search;
pub mod stats;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use recall::config::RecallConfig;
use recall::entry::EntryStore;

/// Select the configured backend and ensure its schema.
pub fn open_store(config: &RecallConfig) -> Result<Box<dyn EntryStore>> {
    recall::db::connect(&config.storage.db_url, config.storage.sqlite_search)
        .context("failed to open entry store")
}

/// Create the schema and report the backend in use.
pub fn init(config: &RecallConfig) -> Result<()> {
    let store = open_store(config)?;
    println!("Entry store ready ({} backend).", store.backend());
    Ok(())
}

/// Local wall-clock rendering of a capture timestamp.
pub fn format_timestamp(timestamp: i64) -> String {
    match DateTime::from_timestamp(timestamp, 0) {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => format!("@{timestamp}"),
    }
}

/// Relative age such as "5 minutes ago", measured against `now`.
pub fn human_readable_age(timestamp: i64, now: i64) -> String {
    let diff = now.saturating_sub(timestamp);
    if diff < 0 {
        return "in the future".to_string();
    }
    let (value, unit) = match diff {
        0..=59 => return "just now".to_string(),
        60..=3_599 => (diff / 60, "minute"),
        3_600..=86_399 => (diff / 3_600, "hour"),
        _ => (diff / 86_400, "day"),
    };
    let plural = if value == 1 { "" } else { "s" };
    format!("{value} {unit}{plural} ago")
}

/// Truncate to at most `max_chars` characters, appending "..." if truncated.
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    let flat = content.replace('\n', " ");
    match flat.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &flat[..end]),
        None => flat,
    }
}
