//! Repository modules, one per record kind.
//!
//! Each module adds methods to `AuditService` via `impl AuditService` blocks.

pub mod command;
pub mod login;
pub mod membership;
pub mod operate;
pub mod password_change;
pub mod transfer;
