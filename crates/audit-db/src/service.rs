//! Service layer over the relational store.
//!
//! `AuditService` wraps `AuditDb`. All repo methods are implemented as
//! `impl AuditService` blocks under [`crate::repos`]. The service exposes
//! inserts and reads only; nothing updates or deletes a log entry.

use std::path::Path;

use audit_config::DatabaseConfig;
use audit_core::enums::RecordKind;
use audit_core::query::{LogQuery, Page, Paged};
use audit_core::scope::TenantScope;

use crate::AuditDb;
use crate::error::DatabaseError;
use crate::sql::{Conditions, order_by};

pub struct AuditService {
    db: AuditDb,
}

impl AuditService {
    /// Create a service over a local database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = AuditDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Open the database named by configuration, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the directory cannot be created or the
    /// database cannot be opened.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        if !config.is_in_memory() {
            if let Some(parent) = Path::new(&config.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| {
                        DatabaseError::Directory {
                            path: parent.display().to_string(),
                            source,
                        }
                    })?;
                }
            }
        }
        tracing::debug!(path = %config.path, "opening audit database");
        Self::new_local(&config.path).await
    }

    /// Create from an existing `AuditDb`.
    #[must_use]
    pub const fn from_db(db: AuditDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &AuditDb {
        &self.db
    }

    /// Run `query` under `scope` and return one page plus the filtered total.
    ///
    /// `columns` is the SELECT list `map_row` expects.
    pub(crate) async fn select_page<T>(
        &self,
        expected: RecordKind,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
        columns: &str,
        map_row: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Paged<T>, DatabaseError> {
        if query.kind != expected {
            return Err(DatabaseError::KindMismatch {
                expected,
                actual: query.kind,
            });
        }
        if scope.is_empty() || query.is_trivially_empty() {
            tracing::debug!(kind = %expected, "query cannot match, skipping round trip");
            return Ok(Paged::empty());
        }

        let spec = expected.spec();
        let mut conditions = Conditions::for_query(query, scope);
        let where_sql = conditions.where_sql();

        let count_sql = format!("SELECT COUNT(*) FROM {} {where_sql}", spec.table);
        let mut rows = self
            .db
            .conn()
            .query(&count_sql, libsql::params_from_iter(conditions.params()))
            .await?;
        let total = rows
            .next()
            .await?
            .ok_or(DatabaseError::NoResult)?
            .get::<i64>(0)?;

        let page_sql = conditions.page_sql(page);
        let sql = format!(
            "SELECT {columns} FROM {} {where_sql} {} {page_sql}",
            spec.table,
            order_by(spec)
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(conditions.params()))
            .await?;
        let mut items = Vec::new();
        while let Some(row) = rows.next().await? {
            items.push(map_row(&row)?);
        }

        Ok(Paged {
            total: u64::try_from(total).unwrap_or_default(),
            items,
        })
    }

    /// Fetch one row of `expected` by id, visible under `scope`.
    pub(crate) async fn select_one<T>(
        &self,
        expected: RecordKind,
        id: &str,
        scope: &TenantScope,
        columns: &str,
        map_row: fn(&libsql::Row) -> Result<T, DatabaseError>,
    ) -> Result<Option<T>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions.eq("id", libsql::Value::Text(id.to_string()));
        conditions.push_scope(scope);
        let sql = format!(
            "SELECT {columns} FROM {} {}",
            expected.spec().table,
            conditions.where_sql()
        );
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(conditions.params()))
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(map_row(&row)?)),
            None => Ok(None),
        }
    }
}
