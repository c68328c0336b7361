//! CLI `stats` command: entry count and capture time range.

use anyhow::Result;

use recall::config::RecallConfig;

/// Display entry statistics in the terminal.
pub fn stats(config: &RecallConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let stats = recall::entry::stats::stats(store.as_ref())?;

    println!("Recall Statistics");
    println!("{}", "=".repeat(40));
    println!("  Backend:             {}", store.backend());
    println!("  Total entries:       {}", stats.total_entries);

    if let Some(oldest) = stats.oldest {
        println!("  Oldest capture:      {}", super::format_timestamp(oldest));
    }
    if let Some(newest) = stats.newest {
        println!("  Newest capture:      {}", super::format_timestamp(newest));
    }

    Ok(())
}
