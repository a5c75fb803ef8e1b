//! Operate log repository (relational backend).

use audit_core::entities::{NewOperateLog, OperateLogEntry};
use audit_core::enums::RecordKind;
use audit_core::identity::OrgContext;
use audit_core::ids::PREFIX_OPERATE;
use audit_core::query::{LogQuery, Page, Paged, storage_now, storage_precision, timestamp_key};
use audit_core::scope::TenantScope;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_payload};
use crate::service::AuditService;

const COLUMNS: &str = "id, org_id, user, action, resource_type, resource, remote_addr, datetime, before_data, after_data";

fn row_to_operate(row: &libsql::Row) -> Result<OperateLogEntry, DatabaseError> {
    Ok(OperateLogEntry {
        id: row.get::<String>(0)?,
        org_id: row.get::<String>(1)?,
        user: row.get::<String>(2)?,
        action: parse_enum(&row.get::<String>(3)?)?,
        resource_type: row.get::<String>(4)?,
        resource: row.get::<String>(5)?,
        remote_addr: get_opt_string(row, 6)?,
        datetime: parse_datetime(&row.get::<String>(7)?)?,
        before: parse_payload(get_opt_string(row, 8)?.as_deref())?,
        after: parse_payload(get_opt_string(row, 9)?.as_deref())?,
    })
}

impl AuditService {
    /// Build the entry for `new` with a fresh id, without storing it.
    ///
    /// Lets another backend persist an entry with the same shape and id
    /// scheme as the relational path.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if id generation fails.
    pub async fn prepare_operate_log(
        &self,
        writer: &OrgContext,
        mut new: NewOperateLog,
    ) -> Result<OperateLogEntry, DatabaseError> {
        let id = self.db().generate_id(PREFIX_OPERATE).await?;
        new.datetime = new.datetime.map(storage_precision);
        Ok(new.into_entry(id, writer, storage_now()))
    }

    /// Append an operate entry.
    ///
    /// The organization is the explicit `org_id`, else the writer's; a root
    /// writer files under the root organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_operate_log(
        &self,
        writer: &OrgContext,
        new: NewOperateLog,
    ) -> Result<OperateLogEntry, DatabaseError> {
        let entry = self.prepare_operate_log(writer, new).await?;
        self.insert_operate_log(&entry).await?;
        Ok(entry)
    }

    /// Insert a fully built operate entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails, including a duplicate id.
    pub async fn insert_operate_log(&self, entry: &OperateLogEntry) -> Result<(), DatabaseError> {
        let before = serde_json::to_string(&entry.before)?;
        let after = serde_json::to_string(&entry.after)?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO operate_logs (id, org_id, user, action, resource_type, resource, remote_addr, datetime, before_data, after_data)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                libsql::params![
                    entry.id.as_str(),
                    entry.org_id.as_str(),
                    entry.user.as_str(),
                    entry.action.as_str(),
                    entry.resource_type.as_str(),
                    entry.resource.as_str(),
                    entry.remote_addr.as_deref(),
                    timestamp_key(&entry.datetime),
                    before,
                    after
                ],
            )
            .await?;
        Ok(())
    }

    /// List operate entries matching `query` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not an
    /// operate query.
    pub async fn list_operate_logs(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<OperateLogEntry>, DatabaseError> {
        self.select_page(RecordKind::Operate, query, scope, page, COLUMNS, row_to_operate)
            .await
    }

    /// Fetch one operate entry. Entries outside `scope` read as absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_operate_log(
        &self,
        id: &str,
        scope: &TenantScope,
    ) -> Result<Option<OperateLogEntry>, DatabaseError> {
        self.select_one(RecordKind::Operate, id, scope, COLUMNS, row_to_operate)
            .await
    }
}
