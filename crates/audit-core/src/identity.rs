use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Organization ID of the root (global) tenant. Root viewers see every record.
pub const ROOT_ORG_ID: &str = "00000000-0000-0000-0000-000000000000";

/// The viewer (or writer) a call is made on behalf of.
///
/// Passed explicitly to every query and write; there is no ambient
/// "current organization".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OrgContext {
    /// Organization the caller is acting in.
    pub org_id: String,
    /// Username of the caller, used by "my logs" listings.
    pub username: String,
}

impl OrgContext {
    #[must_use]
    pub fn new(org_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            org_id: org_id.into(),
            username: username.into(),
        }
    }

    /// A caller acting in the root organization.
    #[must_use]
    pub fn root(username: impl Into<String>) -> Self {
        Self::new(ROOT_ORG_ID, username)
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.org_id == ROOT_ORG_ID
    }
}
