//! Operate-log backend selection.
//!
//! Each request probes the index once. A configured index that answers the
//! probe in time serves the request; anything else falls back to the
//! relational store without surfacing an error.

use audit_core::entities::{NewOperateLog, OperateLogEntry};
use audit_core::identity::OrgContext;
use audit_core::query::{LogQuery, Page, Paged};
use audit_core::scope::TenantScope;
use audit_db::service::AuditService;
use audit_index::OperateLogIndex;

use crate::error::SearchError;

/// The store serving one operate-log request.
#[derive(Clone, Copy)]
pub enum OperateBackend<'a> {
    Relational(&'a AuditService),
    Index(&'a OperateLogIndex),
}

impl<'a> OperateBackend<'a> {
    /// Pick the backend for one request.
    pub async fn select(db: &'a AuditService, index: Option<&'a OperateLogIndex>) -> Self {
        let Some(index) = index.filter(|index| index.configured()) else {
            tracing::debug!("operate log index not configured, using relational store");
            return Self::Relational(db);
        };
        let timeout = index.config().ping_timeout();
        if index.ping(timeout).await {
            tracing::debug!("operate log index alive, using index");
            Self::Index(index)
        } else {
            tracing::warn!(
                url = index.config().base_url(),
                timeout_ms = timeout.as_millis(),
                "operate log index unreachable, falling back to relational store"
            );
            Self::Relational(db)
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Relational(_) => "relational",
            Self::Index(_) => "index",
        }
    }

    /// # Errors
    ///
    /// Returns `SearchError` if the selected backend fails.
    pub async fn search(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<Paged<OperateLogEntry>, SearchError> {
        match self {
            Self::Relational(db) => Ok(db.list_operate_logs(query, scope, page).await?),
            Self::Index(index) => Ok(index.search(query, scope, page).await?),
        }
    }

    /// # Errors
    ///
    /// Returns `SearchError` if the selected backend fails.
    pub async fn get(
        &self,
        id: &str,
        scope: &TenantScope,
    ) -> Result<Option<OperateLogEntry>, SearchError> {
        match self {
            Self::Relational(db) => Ok(db.get_operate_log(id, scope).await?),
            Self::Index(index) => Ok(index.get(id, scope).await?),
        }
    }

    /// Store a new entry. Ids always come from the relational store's
    /// generator so both backends share one id scheme.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if id generation or the write fails.
    pub async fn record(
        &self,
        ids: &AuditService,
        writer: &OrgContext,
        new: NewOperateLog,
    ) -> Result<OperateLogEntry, SearchError> {
        match self {
            Self::Relational(db) => Ok(db.record_operate_log(writer, new).await?),
            Self::Index(index) => {
                let entry = ids.prepare_operate_log(writer, new).await?;
                index.save(&entry).await?;
                Ok(entry)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_config::IndexConfig;

    #[tokio::test]
    async fn no_index_selects_relational() {
        let db = AuditService::new_local(":memory:").await.unwrap();
        let backend = OperateBackend::select(&db, None).await;
        assert_eq!(backend.name(), "relational");
    }

    #[tokio::test]
    async fn unconfigured_index_selects_relational() {
        let db = AuditService::new_local(":memory:").await.unwrap();
        let index = OperateLogIndex::new(&IndexConfig::default()).unwrap();
        let backend = OperateBackend::select(&db, Some(&index)).await;
        assert_eq!(backend.name(), "relational");
    }

    #[tokio::test]
    async fn unreachable_index_selects_relational() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let index = OperateLogIndex::new(&IndexConfig {
            url: format!("http://127.0.0.1:{port}"),
            ..IndexConfig::default()
        })
        .unwrap();
        let db = AuditService::new_local(":memory:").await.unwrap();
        let backend = OperateBackend::select(&db, Some(&index)).await;
        assert_eq!(backend.name(), "relational");
    }
}
