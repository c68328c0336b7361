//! CLI `list` command: print the timeline, most recent capture first.

use anyhow::Result;

use recall::config::RecallConfig;

/// Print the timeline, most recent capture first.
pub fn list(config: &RecallConfig, limit: Option<usize>) -> Result<()> {
    let store = super::open_store(config)?;
    let entries = store.list_all()?;

    if entries.is_empty() {
        println!("Nothing recorded yet.");
        return Ok(());
    }

    let now = chrono::Utc::now().timestamp();
    let shown = limit.unwrap_or(entries.len()).min(entries.len());

    for entry in entries.iter().take(shown) {
        println!(
            "  {} ({})  [{}] {}",
            super::format_timestamp(entry.timestamp),
            super::human_readable_age(entry.timestamp, now),
            entry.app,
            entry.title,
        );
        println!("     {}", super::truncate_preview(&entry.text, 100));
    }

    if shown < entries.len() {
        println!();
        println!("({} of {} entries shown)", shown, entries.len());
    }

    Ok(())
}
