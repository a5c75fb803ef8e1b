use audit_config::AuditConfig;
use audit_core::identity::OrgContext;
use audit_db::service::AuditService;
use audit_search::AuditApi;

use crate::cli::GlobalFlags;

/// Everything a command handler needs: the handlers and who is calling.
pub struct AppContext {
    pub api: AuditApi,
    pub viewer: OrgContext,
}

impl AppContext {
    pub async fn init(config: &AuditConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let db = AuditService::open(&config.database).await?;
        let api = AuditApi::new(db, config)?;
        if config.operate_log_index.is_configured() {
            tracing::debug!(
                url = config.operate_log_index.base_url(),
                "operate log index configured"
            );
        }
        Ok(Self {
            api,
            viewer: flags.viewer(),
        })
    }
}
