//! File-transfer log repository.

use audit_core::entities::{NewTransferLog, TransferLogEntry, non_empty};
use audit_core::enums::RecordKind;
use audit_core::identity::{OrgContext, ROOT_ORG_ID};
use audit_core::ids::PREFIX_TRANSFER;
use audit_core::query::{LogQuery, Page, Paged, storage_now, storage_precision, timestamp_key};
use audit_core::scope::TenantScope;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum};
use crate::service::AuditService;

const COLUMNS: &str =
    "id, org_id, user, remote_addr, asset, account, operate, filename, is_success, date_start";

fn row_to_transfer(row: &libsql::Row) -> Result<TransferLogEntry, DatabaseError> {
    Ok(TransferLogEntry {
        id: row.get::<String>(0)?,
        org_id: row.get::<String>(1)?,
        user: row.get::<String>(2)?,
        remote_addr: get_opt_string(row, 3)?,
        asset: row.get::<String>(4)?,
        account: row.get::<String>(5)?,
        operate: parse_enum(&row.get::<String>(6)?)?,
        filename: row.get::<String>(7)?,
        is_success: get_bool(row, 8)?,
        date_start: parse_datetime(&row.get::<String>(9)?)?,
    })
}

impl AuditService {
    /// Append a transfer entry owned by the writer's organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_transfer_log(
        &self,
        writer: &OrgContext,
        new: NewTransferLog,
    ) -> Result<TransferLogEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_TRANSFER).await?;
        let org_id = if writer.org_id.is_empty() {
            ROOT_ORG_ID.to_string()
        } else {
            writer.org_id.clone()
        };
        let entry = TransferLogEntry {
            id,
            org_id,
            user: new.user,
            remote_addr: non_empty(new.remote_addr),
            asset: new.asset,
            account: new.account,
            operate: new.operate,
            filename: new.filename,
            is_success: new.is_success,
            date_start: new.date_start.map_or_else(storage_now, storage_precision),
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO transfer_logs (id, org_id, user, remote_addr, asset, account, operate, filename, is_success, date_start)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    entry.id.as_str(),
                    entry.org_id.as_str(),
                    entry.user.as_str(),
                    entry.remote_addr.as_deref(),
                    entry.asset.as_str(),
                    entry.account.as_str(),
                    entry.operate.as_str(),
                    entry.filename.as_str(),
                    i64::from(entry.is_success),
                    timestamp_key(&entry.date_start)
                ],
            )
            .await?;

        Ok(entry)
    }

    /// List transfer entries matching `query` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not a
    /// transfer query.
    pub async fn list_transfer_logs(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<TransferLogEntry>, DatabaseError> {
        self.select_page(RecordKind::Transfer, query, scope, page, COLUMNS, row_to_transfer)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use audit_core::enums::TransferOperation;
    use audit_core::query::QueryParams;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn upload(user: &str, filename: &str) -> NewTransferLog {
        NewTransferLog {
            user: user.into(),
            remote_addr: Some("10.0.0.9".into()),
            asset: "web-01".into(),
            account: "root".into(),
            operate: TransferOperation::Upload,
            filename: filename.into(),
            is_success: true,
            date_start: None,
        }
    }

    #[tokio::test]
    async fn record_then_list_roundtrips() {
        let svc = test_service().await;
        let ctx = OrgContext::new("org-a", "alice");
        let written = svc
            .record_transfer_log(&ctx, upload("alice", "/tmp/a.txt"))
            .await
            .unwrap();
        assert!(written.id.starts_with("ftl-"));
        assert_eq!(written.org_id, "org-a");

        let listed = svc
            .list_transfer_logs(
                &LogQuery::new(RecordKind::Transfer),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items, vec![written]);
    }

    #[tokio::test]
    async fn system_user_filter_and_bool_filter() {
        let svc = test_service().await;
        let ctx = OrgContext::new("org-a", "alice");
        svc.record_transfer_log(&ctx, upload("alice", "/tmp/a.txt"))
            .await
            .unwrap();
        let mut failed = upload("alice", "/tmp/b.txt");
        failed.account = "deploy".into();
        failed.is_success = false;
        svc.record_transfer_log(&ctx, failed).await.unwrap();

        let params = QueryParams::new()
            .with("system_user", "deploy")
            .with("is_success", "0");
        let listed = svc
            .list_transfer_logs(
                &LogQuery::from_params(RecordKind::Transfer, &params),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
        assert_eq!(listed.items[0].filename, "/tmp/b.txt");
    }

    #[tokio::test]
    async fn historical_timestamps_order_descending() {
        let svc = test_service().await;
        let ctx = OrgContext::new("org-a", "alice");
        for day in [3, 1, 2] {
            let mut log = upload("alice", &format!("/tmp/{day}"));
            log.date_start = Some(Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap());
            svc.record_transfer_log(&ctx, log).await.unwrap();
        }
        let listed = svc
            .list_transfer_logs(
                &LogQuery::new(RecordKind::Transfer),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        let names: Vec<&str> = listed.items.iter().map(|e| e.filename.as_str()).collect();
        assert_eq!(names, vec!["/tmp/3", "/tmp/2", "/tmp/1"]);
    }

    #[tokio::test]
    async fn wrong_kind_query_is_rejected() {
        let svc = test_service().await;
        let result = svc
            .list_transfer_logs(
                &LogQuery::new(RecordKind::Login),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await;
        assert!(matches!(result, Err(DatabaseError::KindMismatch { .. })));
    }
}
