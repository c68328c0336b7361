//! Nearest-neighbor ranking strategies.
//!
//! A store ranks entries either in-process (load everything, score with
//! [`cosine_similarity`], stable sort) or by handing the query to the backend's native
//! vector distance operator. Both return the same order for the same data, up to
//! floating-point ties: the native queries break ties on `timestamp DESC`, which is the
//! order the in-process strategy receives entries in.

use serde::{Deserialize, Serialize};

use crate::embedding::cosine_similarity;
use crate::entry::Entry;

/// How a store executes [`EntryStore::search`](crate::entry::EntryStore::search).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Score every entry in this process.
    #[default]
    InProcess,
    /// Delegate ranking to the backend (pgvector `<=>`, sqlite-vec `vec_distance_cosine`).
    #[serde(alias = "sqlite_vec")]
    NativeIndex,
}

impl SearchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProcess => "in_process",
            Self::NativeIndex => "native_index",
        }
    }
}

impl std::fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SearchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_process" => Ok(Self::InProcess),
            "native_index" | "sqlite_vec" => Ok(Self::NativeIndex),
            _ => Err(format!("unknown search strategy: {s}")),
        }
    }
}

/// Brute-force ranking over fully materialized entries.
#[derive(Debug, Default, Clone, Copy)]
pub struct InProcessSearch;

impl InProcessSearch {
    /// Rank `entries` by similarity to `query` and keep the best `top_k`.
    ///
    /// The sort is stable, so entries with equal similarity keep their input order.
    /// NaN scores sort last.
    pub fn rank(&self, entries: Vec<Entry>, query: &[f32], top_k: usize) -> Vec<Entry> {
        let mut scored: Vec<(f32, Entry)> = entries
            .into_iter()
            .map(|e| {
                let sim = cosine_similarity(query, &e.embedding);
                let sim = if sim.is_nan() { f32::NEG_INFINITY } else { sim };
                (sim, e)
            })
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);
        scored.into_iter().map(|(_, e)| e).collect()
    }
}
