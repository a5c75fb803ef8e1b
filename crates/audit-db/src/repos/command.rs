//! Command execution repository and its read-only host relation.

use audit_core::entities::{CommandExecution, CommandExecutionHost, NewCommandExecution};
use audit_core::enums::RecordKind;
use audit_core::ids::{PREFIX_COMMAND, PREFIX_COMMAND_HOST};
use audit_core::query::{LogQuery, Page, Paged, storage_now, storage_precision, timestamp_key};
use audit_core::scope::TenantScope;

use crate::error::DatabaseError;
use crate::helpers::{get_bool, get_opt_string, parse_datetime, parse_optional_datetime};
use crate::service::AuditService;

const EXECUTION_COLUMNS: &str = "id, org_id, command, user_name, user_username, run_as_name, run_as_username, is_finished, date_created, date_start";

const HOST_COLUMNS: &str = "id, command_execution_id, asset_id, hostname, ip";

fn row_to_execution(row: &libsql::Row) -> Result<CommandExecution, DatabaseError> {
    Ok(CommandExecution {
        id: row.get::<String>(0)?,
        org_id: row.get::<String>(1)?,
        command: row.get::<String>(2)?,
        user_name: row.get::<String>(3)?,
        user_username: row.get::<String>(4)?,
        run_as_name: row.get::<String>(5)?,
        run_as_username: row.get::<String>(6)?,
        is_finished: get_bool(row, 7)?,
        date_created: parse_datetime(&row.get::<String>(8)?)?,
        date_start: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
    })
}

fn row_to_host(row: &libsql::Row) -> Result<CommandExecutionHost, DatabaseError> {
    Ok(CommandExecutionHost {
        id: row.get::<String>(0)?,
        command_execution_id: row.get::<String>(1)?,
        asset_id: row.get::<String>(2)?,
        hostname: row.get::<String>(3)?,
        ip: row.get::<String>(4)?,
    })
}

impl AuditService {
    /// Append a command execution and its host relation rows atomically.
    ///
    /// Host rows inherit the execution's organization.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any INSERT fails; nothing is stored then.
    pub async fn record_command_execution(
        &self,
        new: NewCommandExecution,
    ) -> Result<(CommandExecution, Vec<CommandExecutionHost>), DatabaseError> {
        let execution = CommandExecution {
            id: self.db().generate_id(PREFIX_COMMAND).await?,
            org_id: new.org_id,
            command: new.command,
            user_name: new.user_name,
            user_username: new.user_username,
            run_as_name: new.run_as_name,
            run_as_username: new.run_as_username,
            is_finished: new.is_finished,
            date_created: storage_now(),
            date_start: new.date_start.map(storage_precision),
        };
        let mut hosts = Vec::with_capacity(new.hosts.len());
        for host in new.hosts {
            hosts.push(CommandExecutionHost {
                id: self.db().generate_id(PREFIX_COMMAND_HOST).await?,
                command_execution_id: execution.id.clone(),
                asset_id: host.asset_id,
                hostname: host.hostname,
                ip: host.ip,
            });
        }

        let tx = self.db().conn().transaction().await?;
        tx.execute(
            "INSERT INTO command_executions (id, org_id, command, user_name, user_username, run_as_name, run_as_username, is_finished, date_created, date_start)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            libsql::params![
                execution.id.as_str(),
                execution.org_id.as_str(),
                execution.command.as_str(),
                execution.user_name.as_str(),
                execution.user_username.as_str(),
                execution.run_as_name.as_str(),
                execution.run_as_username.as_str(),
                i64::from(execution.is_finished),
                timestamp_key(&execution.date_created),
                execution.date_start.as_ref().map(timestamp_key)
            ],
        )
        .await?;
        for host in &hosts {
            tx.execute(
                "INSERT INTO command_execution_hosts (id, command_execution_id, org_id, asset_id, hostname, ip)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    host.id.as_str(),
                    host.command_execution_id.as_str(),
                    execution.org_id.as_str(),
                    host.asset_id.as_str(),
                    host.hostname.as_str(),
                    host.ip.as_str()
                ],
            )
            .await?;
        }
        tx.commit().await?;

        Ok((execution, hosts))
    }

    /// List command executions matching `query` under `scope`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not a
    /// command execution query.
    pub async fn list_command_executions(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<CommandExecution>, DatabaseError> {
        self.select_page(
            RecordKind::CommandExecution,
            query,
            scope,
            page,
            EXECUTION_COLUMNS,
            row_to_execution,
        )
        .await
    }

    /// List rows of the execution-to-host relation.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or `query` is not a host
    /// relation query.
    pub async fn list_command_execution_hosts(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<CommandExecutionHost>, DatabaseError> {
        self.select_page(
            RecordKind::CommandExecutionHost,
            query,
            scope,
            page,
            HOST_COLUMNS,
            row_to_host,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_service;
    use audit_core::entities::NewExecutionHost;
    use pretty_assertions::assert_eq;

    fn execution(org: &str, command: &str, hosts: &[(&str, &str)]) -> NewCommandExecution {
        NewCommandExecution {
            org_id: org.into(),
            command: command.into(),
            user_name: "Alice".into(),
            user_username: "alice".into(),
            run_as_name: "ops".into(),
            run_as_username: "ops".into(),
            is_finished: true,
            date_start: None,
            hosts: hosts
                .iter()
                .map(|(hostname, ip)| NewExecutionHost {
                    asset_id: format!("ast-{hostname}"),
                    hostname: (*hostname).into(),
                    ip: (*ip).into(),
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn hosts_are_listed_by_hostname_within_execution() {
        let svc = test_service().await;
        let (exec, hosts) = svc
            .record_command_execution(execution(
                "org-a",
                "uptime",
                &[("web-02", "10.0.0.2"), ("db-01", "10.0.0.5")],
            ))
            .await
            .unwrap();
        assert_eq!(hosts.len(), 2);
        svc.record_command_execution(execution("org-a", "df -h", &[("web-03", "10.0.0.3")]))
            .await
            .unwrap();

        let query = LogQuery::new(RecordKind::CommandExecutionHost)
            .filter("command_execution", &exec.id);
        let listed = svc
            .list_command_execution_hosts(&query, &TenantScope::Unrestricted, Page::first(10))
            .await
            .unwrap();
        let display: Vec<String> = listed.items.iter().map(CommandExecutionHost::asset_display).collect();
        assert_eq!(display, vec!["db-01(10.0.0.5)", "web-02(10.0.0.2)"]);
    }

    #[tokio::test]
    async fn host_rows_follow_execution_org() {
        let svc = test_service().await;
        svc.record_command_execution(execution("org-a", "uptime", &[("web-01", "10.0.0.1")]))
            .await
            .unwrap();
        svc.record_command_execution(execution("org-b", "uptime", &[("web-09", "10.0.0.9")]))
            .await
            .unwrap();

        let scope = TenantScope::Organization {
            column: "org_id",
            org_id: "org-b".into(),
        };
        let hosts = svc
            .list_command_execution_hosts(
                &LogQuery::new(RecordKind::CommandExecutionHost),
                &scope,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(hosts.total, 1);
        assert_eq!(hosts.items[0].hostname, "web-09");

        let executions = svc
            .list_command_executions(
                &LogQuery::new(RecordKind::CommandExecution).keyword("upt"),
                &scope,
                Page::first(10),
            )
            .await
            .unwrap();
        assert_eq!(executions.total, 1);
        assert_eq!(executions.items[0].org_id, "org-b");
    }
}
