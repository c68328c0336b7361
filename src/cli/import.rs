//! CLI `import` command: load a JSON export into the configured store.

use anyhow::{Context, Result};
use std::path::Path;

use recall::config::RecallConfig;

use super::export::ExportData;

/// Import entries from a JSON export into the configured store.
///
/// Ids are reassigned by the target backend. Entries whose timestamp is already
/// stored are skipped, so re-running an import is harmless.
pub fn import(config: &RecallConfig, file: &Path) -> Result<()> {
    let json = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read import file: {}", file.display()))?;
    let data: ExportData = serde_json::from_str(&json).context("failed to parse import JSON")?;

    let store = super::open_store(config)?;

    println!("Importing {} entries...", data.entries.len());

    let mut imported = 0u64;
    let mut skipped = 0u64;
    // Oldest first so ids on the target keep capture order.
    for entry in data.entries.iter().rev() {
        match store
            .insert(&entry.as_new())
            .with_context(|| format!("failed to import entry at {}", entry.timestamp))?
        {
            Some(_) => imported += 1,
            None => skipped += 1,
        }
    }

    println!("Import complete:");
    println!("  Entries imported: {imported}");
    println!("  Entries skipped:  {skipped} (timestamp already stored)");
    Ok(())
}
