//! Error types for the storage and retrieval core.
//!
//! Every failure is surfaced to the caller. The only silently absorbed case is a
//! duplicate timestamp on insert, which is modeled as `Ok(None)` rather than an error.

use thiserror::Error;

/// Low-level failure from one of the concrete backends.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("postgres: {0}")]
    Postgres(#[from] postgres::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum RecallError {
    /// The connection descriptor names a scheme no backend understands.
    #[error("unsupported database scheme: {0}")]
    UnsupportedBackend(String),

    /// The scheme is known but the descriptor is missing required parts.
    #[error("invalid connection descriptor: {0}")]
    InvalidDescriptor(String),

    /// Table, index, constraint or extension setup failed.
    #[error("schema setup failed: {0}")]
    Schema(#[source] BackendError),

    #[error("storage error: {0}")]
    Storage(#[source] BackendError),

    #[error("embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A stored embedding blob could not be decoded back into floats.
    #[error("entry {id} has a corrupt embedding ({len} bytes)")]
    CorruptEmbedding { id: i64, len: usize },
}

impl RecallError {
    pub(crate) fn schema(err: impl Into<BackendError>) -> Self {
        Self::Schema(err.into())
    }

    /// True for errors that belong to the storage class (anything but startup failures).
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Self::Storage(_) | Self::DimensionMismatch { .. } | Self::CorruptEmbedding { .. }
        )
    }
}

impl From<rusqlite::Error> for RecallError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Storage(err.into())
    }
}

impl From<postgres::Error> for RecallError {
    fn from(err: postgres::Error) -> Self {
        Self::Storage(err.into())
    }
}

pub type Result<T> = std::result::Result<T, RecallError>;
