//! # audit-search
//!
//! Query orchestration for the audit log store.
//!
//! Coordinates between:
//! - the libSQL relational store (every kind)
//! - the optional search index (operate logs only), chosen per request by a
//!   bounded liveness probe with silent fallback
//! - tenant scope resolution and read-time display projection
//!
//! [`AuditApi`] exposes one handler per endpoint; each returns a
//! [`Listing`] or a single view.

pub mod api;
pub mod backend;
pub mod error;
pub mod pagination;
pub mod views;

pub use api::AuditApi;
pub use backend::OperateBackend;
pub use error::SearchError;
pub use pagination::Listing;
