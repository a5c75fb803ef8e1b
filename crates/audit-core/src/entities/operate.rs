use std::fmt;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::OperateAction;
use crate::identity::{OrgContext, ROOT_ORG_ID};

/// The empty mapping used when a payload is missing.
#[must_use]
pub fn empty_payload() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

/// A create/view/update/delete operation performed on a resource.
///
/// `resource_type` is a translation key, never display text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OperateLogEntry {
    pub id: String,
    pub org_id: String,
    pub user: String,
    pub action: OperateAction,
    pub resource_type: String,
    pub resource: String,
    #[serde(default)]
    pub remote_addr: Option<String>,
    pub datetime: DateTime<Utc>,
    #[serde(default = "empty_payload")]
    pub before: serde_json::Value,
    #[serde(default = "empty_payload")]
    pub after: serde_json::Value,
}

impl fmt::Display for OperateLogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}> {} <{}>", self.user, self.action, self.resource)
    }
}

/// Input for recording an operation.
///
/// `org_id: None` means "the writer's organization"; a root writer files it
/// under the root organization.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewOperateLog {
    #[serde(default)]
    pub org_id: Option<String>,
    pub user: String,
    pub action: OperateAction,
    pub resource_type: String,
    pub resource: String,
    #[serde(default)]
    pub remote_addr: Option<String>,
    #[serde(default = "empty_payload")]
    pub before: serde_json::Value,
    #[serde(default = "empty_payload")]
    pub after: serde_json::Value,
    #[serde(default)]
    pub datetime: Option<DateTime<Utc>>,
}

impl NewOperateLog {
    /// Organization the entry is filed under.
    ///
    /// An explicit non-empty `org_id` wins, then the writer's organization.
    /// A writer without an organization files under the root organization.
    #[must_use]
    pub fn resolve_org(&self, writer: &OrgContext) -> String {
        match self.org_id.as_deref() {
            Some(org) if !org.is_empty() => org.to_string(),
            _ if writer.org_id.is_empty() => ROOT_ORG_ID.to_string(),
            _ => writer.org_id.clone(),
        }
    }

    /// Materialize the entry with its id and write time.
    #[must_use]
    pub fn into_entry(self, id: String, writer: &OrgContext, now: DateTime<Utc>) -> OperateLogEntry {
        let org_id = self.resolve_org(writer);
        OperateLogEntry {
            id,
            org_id,
            user: self.user,
            action: self.action,
            resource_type: self.resource_type,
            resource: self.resource,
            remote_addr: super::non_empty(self.remote_addr),
            datetime: self.datetime.unwrap_or(now),
            before: self.before,
            after: self.after,
        }
    }
}
