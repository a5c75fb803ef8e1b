//! Per-endpoint handlers.
//!
//! Every handler takes the caller's [`OrgContext`] explicitly, builds a
//! [`LogQuery`] from the raw parameters, resolves the viewer's
//! [`TenantScope`], runs the query on the right backend and pages the result.

use audit_config::{AuditConfig, GeneralConfig};
use audit_core::display::DisplayCatalog;
use audit_core::entities::{
    CommandExecution, NewOperateLog, NewTransferLog, OperateLogEntry, PasswordChangeLogEntry,
};
use audit_core::enums::RecordKind;
use audit_core::errors::CoreError;
use audit_core::identity::OrgContext;
use audit_core::query::{LogQuery, QueryParams};
use audit_core::scope::{StaticMembership, TenantScope};
use audit_db::service::AuditService;
use audit_index::OperateLogIndex;

use crate::backend::OperateBackend;
use crate::error::SearchError;
use crate::pagination::{Listing, page_from_params};
use crate::views::{
    CommandExecutionHostView, LoginLogView, OperateLogView, OperateProjection, RelationOptions,
    TransferLogView,
};

pub struct AuditApi {
    db: AuditService,
    index: Option<OperateLogIndex>,
    members: Option<StaticMembership>,
    general: GeneralConfig,
    catalog: DisplayCatalog,
}

impl AuditApi {
    /// Wire the handlers from configuration. The index client is built only
    /// when a cluster URL is configured.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Index` if the index client cannot be built.
    pub fn new(db: AuditService, config: &AuditConfig) -> Result<Self, SearchError> {
        let index = if config.operate_log_index.is_configured() {
            Some(OperateLogIndex::new(&config.operate_log_index)?)
        } else {
            None
        };
        Ok(Self::from_parts(
            db,
            index,
            config.general.clone(),
            config.display.catalog(),
        ))
    }

    #[must_use]
    pub const fn from_parts(
        db: AuditService,
        index: Option<OperateLogIndex>,
        general: GeneralConfig,
        catalog: DisplayCatalog,
    ) -> Self {
        Self {
            db,
            index,
            members: None,
            general,
            catalog,
        }
    }

    /// Resolve membership from `members` instead of the membership table.
    #[must_use]
    pub fn with_static_membership(mut self, members: StaticMembership) -> Self {
        self.members = Some(members);
        self
    }

    #[must_use]
    pub const fn db(&self) -> &AuditService {
        &self.db
    }

    async fn scope(&self, viewer: &OrgContext, kind: RecordKind) -> Result<TenantScope, SearchError> {
        let scope = match &self.members {
            Some(members) => TenantScope::resolve(viewer, kind, members).await?,
            None => TenantScope::resolve(viewer, kind, &self.db).await?,
        };
        Ok(scope)
    }

    async fn operate_backend(&self) -> OperateBackend<'_> {
        OperateBackend::select(&self.db, self.index.as_ref()).await
    }

    // -----------------------------------------------------------------------
    // Transfer logs
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the query fails.
    pub async fn list_transfer_logs(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<TransferLogView>, SearchError> {
        let query = LogQuery::from_params(RecordKind::Transfer, params);
        let scope = self.scope(viewer, RecordKind::Transfer).await?;
        let page = page_from_params(params, &self.general);
        let found = self.db.list_transfer_logs(&query, &scope, page).await?;
        Ok(Listing::new(found.map(TransferLogView::from), page))
    }

    /// Record a transfer on behalf of `writer`'s organization.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the write fails.
    pub async fn create_transfer_log(
        &self,
        writer: &OrgContext,
        new: NewTransferLog,
    ) -> Result<TransferLogView, SearchError> {
        let entry = self.db.record_transfer_log(writer, new).await?;
        Ok(TransferLogView::from(entry))
    }

    // -----------------------------------------------------------------------
    // Operate logs
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the selected backend fails.
    pub async fn list_operate_logs(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<OperateLogView>, SearchError> {
        let query = LogQuery::from_params(RecordKind::Operate, params);
        let scope = self.scope(viewer, RecordKind::Operate).await?;
        let page = page_from_params(params, &self.general);
        let projection = OperateProjection::from_params(params);

        let backend = self.operate_backend().await;
        let found = backend.search(&query, &scope, page).await?;
        Ok(Listing::new(
            found.map(|entry| OperateLogView::project(entry, projection, &self.catalog)),
            page,
        ))
    }

    /// Fetch one operate entry. Entries of other organizations are reported
    /// as not found.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::NotFound` if the entry is absent or not visible.
    pub async fn retrieve_operate_log(
        &self,
        viewer: &OrgContext,
        id: &str,
        params: &QueryParams,
    ) -> Result<OperateLogView, SearchError> {
        let scope = self.scope(viewer, RecordKind::Operate).await?;
        let backend = self.operate_backend().await;
        let entry = backend
            .get(id, &scope)
            .await?
            .ok_or_else(|| SearchError::NotFound {
                kind: RecordKind::Operate,
                id: id.to_string(),
            })?;
        Ok(OperateLogView::project(
            entry,
            OperateProjection::from_params(params),
            &self.catalog,
        ))
    }

    /// Record an operation through the same backend selection as reads.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the selected backend rejects the write.
    pub async fn record_operate_log(
        &self,
        writer: &OrgContext,
        new: NewOperateLog,
    ) -> Result<OperateLogEntry, SearchError> {
        let backend = self.operate_backend().await;
        backend.record(&self.db, writer, new).await
    }

    // -----------------------------------------------------------------------
    // Password change logs
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the query fails.
    pub async fn list_password_change_logs(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<PasswordChangeLogEntry>, SearchError> {
        let query = LogQuery::from_params(RecordKind::PasswordChange, params);
        let scope = self.scope(viewer, RecordKind::PasswordChange).await?;
        let page = page_from_params(params, &self.general);
        let found = self.db.list_password_change_logs(&query, &scope, page).await?;
        Ok(Listing::new(found, page))
    }

    // -----------------------------------------------------------------------
    // Login logs
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the query fails.
    pub async fn list_login_logs(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<LoginLogView>, SearchError> {
        let scope = self.scope(viewer, RecordKind::Login).await?;
        self.login_listing(params, &scope).await
    }

    /// The viewer's own login attempts, across every organization.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if the query fails.
    pub async fn list_my_login_logs(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<LoginLogView>, SearchError> {
        let scope = TenantScope::single_user(RecordKind::Login, &viewer.username)
            .ok_or_else(|| CoreError::Validation("login logs are not identity-keyed".into()))?;
        self.login_listing(params, &scope).await
    }

    async fn login_listing(
        &self,
        params: &QueryParams,
        scope: &TenantScope,
    ) -> Result<Listing<LoginLogView>, SearchError> {
        let query = LogQuery::from_params(RecordKind::Login, params);
        let page = page_from_params(params, &self.general);
        let found = self.db.list_login_logs(&query, scope, page).await?;
        Ok(Listing::new(
            found.map(|entry| LoginLogView::new(entry, &self.catalog)),
            page,
        ))
    }

    // -----------------------------------------------------------------------
    // Command executions
    // -----------------------------------------------------------------------

    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the query fails.
    pub async fn list_command_executions(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<CommandExecution>, SearchError> {
        let query = LogQuery::from_params(RecordKind::CommandExecution, params);
        let scope = self.scope(viewer, RecordKind::CommandExecution).await?;
        let page = page_from_params(params, &self.general);
        let found = self.db.list_command_executions(&query, &scope, page).await?;
        Ok(Listing::new(found, page))
    }

    /// Read-only listing of the execution-to-host relation.
    ///
    /// # Errors
    ///
    /// Returns `SearchError` if scope resolution or the query fails.
    pub async fn list_command_execution_hosts(
        &self,
        viewer: &OrgContext,
        params: &QueryParams,
    ) -> Result<Listing<CommandExecutionHostView>, SearchError> {
        let query = LogQuery::from_params(RecordKind::CommandExecutionHost, params);
        let scope = self.scope(viewer, RecordKind::CommandExecutionHost).await?;
        let page = page_from_params(params, &self.general);
        let found = self
            .db
            .list_command_execution_hosts(&query, &scope, page)
            .await?;
        Ok(Listing::new(found.map(CommandExecutionHostView::from), page))
    }

    /// What the host relation surface accepts.
    #[must_use]
    pub fn command_execution_host_options(&self) -> RelationOptions {
        let spec = RecordKind::CommandExecutionHost.spec();
        RelationOptions {
            allowed_methods: vec!["GET", "OPTIONS"],
            filter_fields: spec.filters.iter().map(|f| f.param).collect(),
            search_fields: spec.keyword_fields.to_vec(),
        }
    }
}
