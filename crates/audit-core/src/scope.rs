//! Tenant scope resolution.
//!
//! Turns a viewer's [`OrgContext`] and a record kind into a [`TenantScope`]:
//! the restriction every backend intersects with its result set.
//!
//! - Root viewers: [`TenantScope::Unrestricted`].
//! - Tenant-owned kinds: [`TenantScope::Organization`] on the owning column.
//! - Identity-keyed kinds: [`TenantScope::Usernames`] holding the viewer
//!   organization's member set, read at query time. An empty set means
//!   "no visible records", never "no filter".

use std::collections::{BTreeSet, HashMap};
use std::future::Future;

use crate::enums::RecordKind;
use crate::errors::CoreError;
use crate::identity::OrgContext;
use crate::query::ScopeKey;

/// Source of organization membership, keyed by username.
pub trait MembershipSource {
    /// Usernames of every member of `org_id` at the time of the call.
    fn member_usernames(
        &self,
        org_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, CoreError>> + Send;
}

/// Visibility restriction applied to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantScope {
    /// Root viewer: everything is visible.
    Unrestricted,
    /// Only records whose `column` equals `org_id`.
    Organization {
        column: &'static str,
        org_id: String,
    },
    /// Only records whose `column` is one of `usernames`.
    Usernames {
        column: &'static str,
        usernames: BTreeSet<String>,
    },
}

impl TenantScope {
    /// Resolve the scope for `viewer` reading `kind`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the membership source fails. A failing source is
    /// an error, not an unrestricted scope.
    pub async fn resolve<M: MembershipSource + Sync>(
        viewer: &OrgContext,
        kind: RecordKind,
        members: &M,
    ) -> Result<Self, CoreError> {
        if viewer.is_root() {
            return Ok(Self::Unrestricted);
        }
        match kind.spec().scope {
            ScopeKey::Org(column) => Ok(Self::Organization {
                column,
                org_id: viewer.org_id.clone(),
            }),
            ScopeKey::Username(column) => {
                let usernames = members
                    .member_usernames(&viewer.org_id)
                    .await?
                    .into_iter()
                    .collect();
                Ok(Self::Usernames { column, usernames })
            }
        }
    }

    /// Restrict an identity-keyed kind to one username regardless of
    /// organization ("my logs"). Returns `None` for tenant-owned kinds.
    #[must_use]
    pub fn single_user(kind: RecordKind, username: &str) -> Option<Self> {
        let ScopeKey::Username(column) = kind.spec().scope else {
            return None;
        };
        Some(Self::Usernames {
            column,
            usernames: BTreeSet::from([username.to_string()]),
        })
    }

    /// True when nothing can match, so backends can skip the round trip.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Usernames { usernames, .. } if usernames.is_empty())
    }
}

/// In-memory membership, for configuration-provided membership and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticMembership {
    members: HashMap<String, Vec<String>>,
}

impl StaticMembership {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_members<I, S>(mut self, org_id: &str, usernames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members
            .entry(org_id.to_string())
            .or_default()
            .extend(usernames.into_iter().map(Into::into));
        self
    }
}

impl MembershipSource for StaticMembership {
    async fn member_usernames(&self, org_id: &str) -> Result<Vec<String>, CoreError> {
        Ok(self.members.get(org_id).cloned().unwrap_or_default())
    }
}
