use serde::Serialize;

use crate::entry::EntryStore;
use crate::error::Result;

/// Summary counts over the stored history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub total_entries: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oldest: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<i64>,
}

/// Compute store statistics from the timestamp column alone.
pub fn stats(store: &dyn EntryStore) -> Result<Stats> {
    let timestamps = store.timestamps()?;
    Ok(Stats {
        total_entries: timestamps.len() as u64,
        // timestamps() is descending
        newest: timestamps.first().copied(),
        oldest: timestamps.last().copied(),
    })
}
