//! Listing views: entries plus read-time display fields.
//!
//! Display text is resolved when a view is built and never stored, so a
//! change to the lookup tables shows up on the next read.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use audit_core::display::{DisplayCatalog, login_reason_display};
use audit_core::entities::{
    CommandExecutionHost, OperateLogEntry, TransferLogEntry, UserLoginLogEntry,
};
use audit_core::enums::OperateAction;
use audit_core::query::QueryParams;

// ---------------------------------------------------------------------------
// Transfer
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferLogView {
    #[serde(flatten)]
    pub entry: TransferLogEntry,
    pub operate_display: String,
}

impl From<TransferLogEntry> for TransferLogView {
    fn from(entry: TransferLogEntry) -> Self {
        Self {
            operate_display: entry.operate.label().to_string(),
            entry,
        }
    }
}

// ---------------------------------------------------------------------------
// Operate
// ---------------------------------------------------------------------------

/// Which operate-log shape a request asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OperateProjection {
    /// Without the before/after payloads.
    #[default]
    Summary,
    /// With the before/after payloads.
    Detail,
}

impl OperateProjection {
    /// `type=action_detail` selects the detail shape; anything else is the summary.
    #[must_use]
    pub fn from_params(params: &QueryParams) -> Self {
        if params.get("type") == Some("action_detail") {
            Self::Detail
        } else {
            Self::Summary
        }
    }
}

/// An operate entry in either projection. Summary views omit `before` and
/// `after` entirely rather than serializing them as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperateLogView {
    pub id: String,
    pub org_id: String,
    pub user: String,
    pub action: OperateAction,
    pub action_display: String,
    pub resource_type: String,
    pub resource_type_display: String,
    pub resource: String,
    pub remote_addr: Option<String>,
    pub datetime: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<Value>,
}

impl OperateLogView {
    #[must_use]
    pub fn project(
        entry: OperateLogEntry,
        projection: OperateProjection,
        catalog: &DisplayCatalog,
    ) -> Self {
        let (before, after) = match projection {
            OperateProjection::Detail => (Some(entry.before), Some(entry.after)),
            OperateProjection::Summary => (None, None),
        };
        Self {
            action_display: entry.action.label().to_string(),
            resource_type_display: catalog.resource_type(&entry.resource_type),
            id: entry.id,
            org_id: entry.org_id,
            user: entry.user,
            action: entry.action,
            resource_type: entry.resource_type,
            resource: entry.resource,
            remote_addr: entry.remote_addr,
            datetime: entry.datetime,
            before,
            after,
        }
    }
}

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginLogView {
    #[serde(flatten)]
    pub entry: UserLoginLogEntry,
    pub type_display: String,
    pub mfa_display: String,
    pub status_display: String,
    pub reason_display: String,
    pub backend_display: String,
}

impl LoginLogView {
    #[must_use]
    pub fn new(entry: UserLoginLogEntry, catalog: &DisplayCatalog) -> Self {
        Self {
            type_display: entry.login_type.label().to_string(),
            mfa_display: entry.mfa.label().to_string(),
            status_display: if entry.status { "Success" } else { "Failed" }.to_string(),
            reason_display: login_reason_display(&entry.reason),
            backend_display: catalog.backend(&entry.backend),
            entry,
        }
    }
}

// ---------------------------------------------------------------------------
// Command execution hosts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandExecutionHostView {
    #[serde(flatten)]
    pub host: CommandExecutionHost,
    pub asset_display: String,
}

impl From<CommandExecutionHost> for CommandExecutionHostView {
    fn from(host: CommandExecutionHost) -> Self {
        Self {
            asset_display: host.asset_display(),
            host,
        }
    }
}

/// Describes the read-only host relation surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelationOptions {
    pub allowed_methods: Vec<&'static str>,
    pub filter_fields: Vec<&'static str>,
    pub search_fields: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use audit_core::entities::empty_payload;
    use audit_core::enums::{LoginChannel, MfaStatus};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::HashMap;

    fn operate_entry() -> OperateLogEntry {
        OperateLogEntry {
            id: "opl-1".into(),
            org_id: "org-a".into(),
            user: "alice".into(),
            action: OperateAction::Update,
            resource_type: "SystemUser".into(),
            resource: "root@web-01".into(),
            remote_addr: None,
            datetime: Utc::now(),
            before: json!({"password": "***"}),
            after: empty_payload(),
        }
    }

    #[test]
    fn projection_follows_type_param() {
        let detail = QueryParams::new().with("type", "action_detail");
        assert_eq!(OperateProjection::from_params(&detail), OperateProjection::Detail);
        let other = QueryParams::new().with("type", "summary");
        assert_eq!(OperateProjection::from_params(&other), OperateProjection::Summary);
        assert_eq!(
            OperateProjection::from_params(&QueryParams::new()),
            OperateProjection::Summary
        );
    }

    #[test]
    fn summary_omits_payload_keys() {
        let view = OperateLogView::project(
            operate_entry(),
            OperateProjection::Summary,
            &DisplayCatalog::default(),
        );
        let value = serde_json::to_value(&view).unwrap();
        assert!(value.get("before").is_none());
        assert!(value.get("after").is_none());
        assert_eq!(value["action_display"], "Update");
    }

    #[test]
    fn detail_includes_payloads_even_when_empty() {
        let catalog = DisplayCatalog::new(
            HashMap::from([("SystemUser".to_string(), "System user".to_string())]),
            HashMap::new(),
        );
        let view = OperateLogView::project(operate_entry(), OperateProjection::Detail, &catalog);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["before"], json!({"password": "***"}));
        assert_eq!(value["after"], json!({}));
        assert_eq!(value["resource_type_display"], "System user");
        assert_eq!(value["resource_type"], "SystemUser");
    }

    #[test]
    fn login_view_display_fields() {
        let entry = UserLoginLogEntry {
            id: "lgn-1".into(),
            username: "alice".into(),
            login_type: LoginChannel::Terminal,
            ip: "10.0.0.1".into(),
            city: None,
            user_agent: None,
            mfa: MfaStatus::Unknown,
            reason: "password_failed".into(),
            status: false,
            datetime: Utc::now(),
            backend: "ldap".into(),
        };
        let catalog = DisplayCatalog::new(
            HashMap::new(),
            HashMap::from([("ldap".to_string(), "LDAP".to_string())]),
        );
        let value = serde_json::to_value(LoginLogView::new(entry, &catalog)).unwrap();
        assert_eq!(value["type"], "T");
        assert_eq!(value["type_display"], "Terminal");
        assert_eq!(value["mfa_display"], "-");
        assert_eq!(value["status_display"], "Failed");
        assert_eq!(value["reason_display"], "Username/password check failed");
        assert_eq!(value["backend_display"], "LDAP");
    }
}
