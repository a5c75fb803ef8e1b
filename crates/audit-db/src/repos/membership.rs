//! Organization membership, read at query time by the tenant scope resolver.
//!
//! Unlike the log tables, membership is mutable: adding or removing a member
//! changes which identity-keyed entries the organization's viewers see on
//! their next query.

use audit_core::errors::CoreError;
use audit_core::scope::MembershipSource;

use crate::error::DatabaseError;
use crate::service::AuditService;

impl AuditService {
    /// Add `username` to `org_id`. Adding an existing member is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn add_org_member(&self, org_id: &str, username: &str) -> Result<(), DatabaseError> {
        self.db()
            .conn()
            .execute(
                "INSERT OR IGNORE INTO organization_members (org_id, username) VALUES (?1, ?2)",
                [org_id, username],
            )
            .await?;
        Ok(())
    }

    /// Remove `username` from `org_id`. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the DELETE fails.
    pub async fn remove_org_member(
        &self,
        org_id: &str,
        username: &str,
    ) -> Result<bool, DatabaseError> {
        let removed = self
            .db()
            .conn()
            .execute(
                "DELETE FROM organization_members WHERE org_id = ?1 AND username = ?2",
                [org_id, username],
            )
            .await?;
        Ok(removed > 0)
    }

    /// Members of `org_id`, sorted by username.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_org_members(&self, org_id: &str) -> Result<Vec<String>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT username FROM organization_members WHERE org_id = ?1 ORDER BY username",
                [org_id],
            )
            .await?;
        let mut members = Vec::new();
        while let Some(row) = rows.next().await? {
            members.push(row.get::<String>(0)?);
        }
        Ok(members)
    }
}

impl MembershipSource for AuditService {
    async fn member_usernames(&self, org_id: &str) -> Result<Vec<String>, CoreError> {
        self.list_org_members(org_id)
            .await
            .map_err(|e| CoreError::Membership {
                org_id: org_id.to_string(),
                reason: e.to_string(),
            })
    }
}
