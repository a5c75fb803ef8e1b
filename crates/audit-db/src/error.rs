//! Errors from the relational audit store.

use audit_core::enums::RecordKind;

#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// A stored value could not be decoded into its field type.
    #[error("cannot decode stored value: {0}")]
    Decode(String),

    /// A before/after payload could not be encoded for storage.
    #[error("cannot encode payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    /// A statement that always yields a row yielded none.
    #[error("statement returned no rows")]
    NoResult,

    /// A listing was handed a query built for another kind.
    #[error("expected a {expected} query, got {actual}")]
    KindMismatch {
        expected: RecordKind,
        actual: RecordKind,
    },

    #[error("cannot create database directory {path}: {source}")]
    Directory {
        path: String,
        source: std::io::Error,
    },

    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
