//! CLI `export` command: dump every entry as JSON to stdout.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use recall::config::RecallConfig;
use recall::entry::Entry;

/// Export format, shared with `import`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportData {
    pub entries: Vec<Entry>,
}

/// Export all entries (embeddings and OCR payloads included) as JSON to stdout.
pub fn export(config: &RecallConfig) -> Result<()> {
    let store = super::open_store(config)?;
    let data = ExportData {
        entries: store.list_all()?,
    };

    let json = serde_json::to_string_pretty(&data)?;
    println!("{json}");

    eprintln!("Exported {} entries.", data.entries.len());
    Ok(())
}
