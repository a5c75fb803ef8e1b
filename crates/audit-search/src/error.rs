//! Search error types for audit-search.

/// Errors from handler calls across the relational and index backends.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Error from the libSQL relational store.
    #[error("database error: {0}")]
    Database(#[from] audit_db::error::DatabaseError),

    /// Error from the search index. Only raised once the index was selected;
    /// an unreachable index falls back to the relational store instead.
    #[error("index error: {0}")]
    Index(#[from] audit_index::IndexError),

    /// Error from scope resolution or validation.
    #[error(transparent)]
    Core(#[from] audit_core::errors::CoreError),

    /// The entry does not exist or is not visible to the viewer.
    #[error("{kind} '{id}' not found")]
    NotFound {
        kind: audit_core::enums::RecordKind,
        id: String,
    },
}
