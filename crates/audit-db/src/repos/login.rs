//! User login log repository.

use audit_core::entities::{NewLoginLog, UserLoginLogEntry, non_empty};
use audit_core::enums::{MfaStatus, RecordKind};
use audit_core::ids::PREFIX_LOGIN;
use audit_core::query::{LogQuery, Page, Paged, storage_now, storage_precision, timestamp_key};
use audit_core::scope::TenantScope;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_enum};
use crate::service::AuditService;

const COLUMNS: &str =
    "id, username, login_type, ip, city, user_agent, mfa, reason, status, datetime, backend";

fn row_to_login(row: &libsql::Row) -> Result<UserLoginLogEntry, DatabaseError> {
    Ok(UserLoginLogEntry {
        id: row.get::<String>(0)?,
        username: row.get::<String>(1)?,
        login_type: parse_enum(&row.get::<String>(2)?)?,
        ip: row.get::<String>(3)?,
        city: get_opt_string(row, 4)?,
        user_agent: get_opt_string(row, 5)?,
        mfa: MfaStatus::from_code(row.get::<i64>(6)?),
        reason: row.get::<String>(7)?,
        status: get_bool(row, 8)?,
        datetime: parse_datetime(&row.get::<String>(9)?)?,
        backend: row.get::<String>(10)?,
    })
}

impl AuditService {
    /// Append a login attempt.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn record_login(&self, new: NewLoginLog) -> Result<UserLoginLogEntry, DatabaseError> {
        let entry = UserLoginLogEntry {
            id: self.db().generate_id(PREFIX_LOGIN).await?,
            username: new.username,
            login_type: new.login_type,
            ip: new.ip,
            city: non_empty(new.city),
            user_agent: non_empty(new.user_agent),
            mfa: new.mfa,
            reason: new.reason,
            status: new.status,
            datetime: new.datetime.map_or_else(storage_now, storage_precision),
            backend: new.backend,
        };

        self.db()
            .conn()
            .execute(
                "INSERT INTO user_login_logs (id, username, login_type, ip, city, user_agent, mfa, reason, status, datetime, backend)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
                libsql::params![
                    entry.id.as_str(),
                    entry.username.as_str(),
                    entry.login_type.as_str(),
                    entry.ip.as_str(),
                    entry.city.as_deref(),
                    entry.user_agent.as_deref(),
                    entry.mfa.code(),
                    entry.reason.as_str(),
                    i64::from(entry.status),
                    timestamp_key(&entry.datetime),
                    entry.backend.as_str()
                ],
            )
            .await?;

        Ok(entry)
    }

    /// List login attempts matching `query` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not a login
    /// query.
    pub async fn list_login_logs(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<UserLoginLogEntry>, DatabaseError> {
        self.select_page(RecordKind::Login, query, scope, page, COLUMNS, row_to_login)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use audit_core::enums::LoginChannel;
    use audit_core::query::QueryParams;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn attempt(username: &str, ip: &str, city: Option<&str>) -> NewLoginLog {
        NewLoginLog {
            username: username.into(),
            login_type: LoginChannel::Web,
            ip: ip.into(),
            city: city.map(String::from),
            user_agent: None,
            mfa: MfaStatus::Disabled,
            reason: String::new(),
            status: true,
            datetime: Some(Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()),
            backend: "password".into(),
        }
    }

    #[tokio::test]
    async fn same_timestamp_orders_by_username() {
        let svc = test_service().await;
        for name in ["carol", "alice", "bob"] {
            svc.record_login(attempt(name, "10.0.0.1", None)).await.unwrap();
        }
        let listed = svc
            .list_login_logs(
                &LogQuery::new(RecordKind::Login),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        let names: Vec<&str> = listed.items.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn channel_mfa_and_status_filters() {
        let svc = test_service().await;
        svc.record_login(attempt("alice", "10.0.0.1", None)).await.unwrap();
        let mut terminal = attempt("bob", "10.0.0.2", None);
        terminal.login_type = LoginChannel::Terminal;
        terminal.mfa = MfaStatus::Enabled;
        terminal.status = false;
        terminal.reason = "mfa_failed".into();
        svc.record_login(terminal).await.unwrap();

        let params = QueryParams::new()
            .with("type", "T")
            .with("mfa", "1")
            .with("status", "0");
        let listed = svc
            .list_login_logs(
                &LogQuery::from_params(RecordKind::Login, &params),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 1);
        let entry = &listed.items[0];
        assert_eq!(entry.username, "bob");
        assert_eq!(entry.mfa, MfaStatus::Enabled);
        assert_eq!(entry.reason, "mfa_failed");
    }

    #[tokio::test]
    async fn null_city_does_not_break_keyword_search() {
        let svc = test_service().await;
        svc.record_login(attempt("alice", "10.0.0.1", None)).await.unwrap();
        svc.record_login(attempt("bob", "10.0.0.2", Some("Tokyo"))).await.unwrap();

        let listed = svc
            .list_login_logs(
                &LogQuery::new(RecordKind::Login).keyword("10.0.0"),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 2);
    }

    #[tokio::test]
    async fn empty_city_and_agent_are_stored_as_absent() {
        let svc = test_service().await;
        let mut blank = attempt("alice", "10.0.0.1", Some(""));
        blank.user_agent = Some(String::new());
        let written = svc.record_login(blank).await.unwrap();
        assert_eq!(written.city, None);
        assert_eq!(written.user_agent, None);

        let listed = svc
            .list_login_logs(
                &LogQuery::new(RecordKind::Login),
                &TenantScope::Unrestricted,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(listed.items, vec![written]);
    }

    #[tokio::test]
    async fn paging_reports_full_total() {
        let svc = test_service().await;
        for i in 0..5 {
            svc.record_login(attempt(&format!("user{i}"), "10.0.0.1", None))
                .await
                .unwrap();
        }
        let listed = svc
            .list_login_logs(
                &LogQuery::new(RecordKind::Login),
                &TenantScope::Unrestricted,
                Page::new(3, 2),
            )
            .await
            .unwrap();
        assert_eq!(listed.total, 5);
        let names: Vec<&str> = listed.items.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, vec!["user3", "user4"]);
    }
}
