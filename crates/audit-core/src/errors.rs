//! Errors raised by the core query model and its collaborators.
//!
//! Storage errors (`DatabaseError`, `IndexError`) live in their own crates.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input that cannot name anything, such as an unknown record kind.
    #[error("validation error: {0}")]
    Validation(String),

    /// The membership collaborator could not answer. Never read as "no
    /// restriction".
    #[error("membership lookup failed for org {org_id}: {reason}")]
    Membership { org_id: String, reason: String },
}
