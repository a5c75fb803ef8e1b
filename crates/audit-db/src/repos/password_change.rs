//! Password change log repository.

use audit_core::entities::{NewPasswordChangeLog, PasswordChangeLogEntry, non_empty};
use audit_core::enums::RecordKind;
use audit_core::ids::PREFIX_PASSWORD_CHANGE;
use audit_core::query::{LogQuery, Page, Paged, storage_now, storage_precision, timestamp_key};
use audit_core::scope::TenantScope;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::AuditService;

const COLUMNS: &str = "id, user, change_by, remote_addr, datetime";

fn row_to_password_change(row: &libsql::Row) -> Result<PasswordChangeLogEntry, DatabaseError> {
    Ok(PasswordChangeLogEntry {
        id: row.get::<String>(0)?,
        user: row.get::<String>(1)?,
        change_by: row.get::<String>(2)?,
        remote_addr: get_opt_string(row, 3)?,
        datetime: parse_datetime(&row.get::<String>(4)?)?,
    })
}

impl AuditService {
    /// Append a password change entry.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_password_change(
        &self,
        new: NewPasswordChangeLog,
    ) -> Result<PasswordChangeLogEntry, DatabaseError> {
        let entry = PasswordChangeLogEntry {
            id: self.db().generate_id(PREFIX_PASSWORD_CHANGE).await?,
            user: new.user,
            change_by: new.change_by,
            remote_addr: non_empty(new.remote_addr),
            datetime: new.datetime.map_or_else(storage_now, storage_precision),
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO password_change_logs (id, user, change_by, remote_addr, datetime)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    entry.id.as_str(),
                    entry.user.as_str(),
                    entry.change_by.as_str(),
                    entry.remote_addr.as_deref(),
                    timestamp_key(&entry.datetime)
                ],
            )
            .await?;

        Ok(entry)
    }

    /// List password change entries matching `query` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not a
    /// password change query.
    pub async fn list_password_change_logs(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<PasswordChangeLogEntry>, DatabaseError> {
        self.select_page(
            RecordKind::PasswordChange,
            query,
            scope,
            page,
            COLUMNS,
            row_to_password_change,
        )
        .await
    }
}
