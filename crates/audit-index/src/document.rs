//! Stored document shape and search response parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use audit_core::entities::{OperateLogEntry, empty_payload};
use audit_core::enums::OperateAction;
use audit_core::query::timestamp_key;

use crate::error::IndexError;

/// An operate entry as stored in the index.
///
/// `datetime` holds the same fixed-width text the relational store writes,
/// so range bounds compare identically in both backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    pub id: String,
    pub org_id: String,
    pub user: String,
    pub action: OperateAction,
    pub resource_type: String,
    pub resource: String,
    #[serde(default)]
    pub remote_addr: Option<String>,
    pub datetime: String,
    #[serde(default = "empty_payload")]
    pub before: Value,
    #[serde(default = "empty_payload")]
    pub after: Value,
}

impl From<&OperateLogEntry> for IndexDocument {
    fn from(entry: &OperateLogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            org_id: entry.org_id.clone(),
            user: entry.user.clone(),
            action: entry.action,
            resource_type: entry.resource_type.clone(),
            resource: entry.resource.clone(),
            remote_addr: entry.remote_addr.clone(),
            datetime: timestamp_key(&entry.datetime),
            before: entry.before.clone(),
            after: entry.after.clone(),
        }
    }
}

impl TryFrom<IndexDocument> for OperateLogEntry {
    type Error = IndexError;

    fn try_from(doc: IndexDocument) -> Result<Self, Self::Error> {
        let datetime = chrono::DateTime::parse_from_rfc3339(&doc.datetime)
            .map_err(|e| IndexError::Parse(format!("datetime '{}': {e}", doc.datetime)))?
            .with_timezone(&chrono::Utc);
        Ok(Self {
            id: doc.id,
            org_id: doc.org_id,
            user: doc.user,
            action: doc.action,
            resource_type: doc.resource_type,
            resource: doc.resource,
            remote_addr: doc.remote_addr,
            datetime,
            before: doc.before,
            after: doc.after,
        })
    }
}

/// Index mapping: every string is an exact `keyword` (case-sensitive term
/// and wildcard matching), timestamps keep microseconds, payloads are stored
/// but not indexed.
#[must_use]
pub fn index_mapping() -> Value {
    json!({
        "mappings": {
            "properties": {
                "id": { "type": "keyword" },
                "org_id": { "type": "keyword" },
                "user": { "type": "keyword" },
                "action": { "type": "keyword" },
                "resource_type": { "type": "keyword" },
                "resource": { "type": "keyword" },
                "remote_addr": { "type": "keyword" },
                "datetime": { "type": "date_nanos", "format": "strict_date_optional_time_nanos" },
                "before": { "type": "object", "enabled": false },
                "after": { "type": "object", "enabled": false },
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Search responses
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Hits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hits {
    pub total: Option<HitsTotal>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// `hits.total` is an object on 7.x+ and a bare number on older clusters.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HitsTotal {
    Object { value: u64 },
    Count(u64),
}

impl HitsTotal {
    pub const fn value(&self) -> u64 {
        match self {
            Self::Object { value } | Self::Count(value) => *value,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hit {
    #[serde(rename = "_source")]
    pub source: IndexDocument,
}

impl SearchResponse {
    /// Total match count and the decoded entries of this page.
    pub fn into_entries(self) -> Result<(u64, Vec<OperateLogEntry>), IndexError> {
        let count = self.hits.hits.len() as u64;
        let total = self.hits.total.map_or(count, |t| t.value());
        let items = self
            .hits
            .hits
            .into_iter()
            .map(|hit| OperateLogEntry::try_from(hit.source))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((total, items))
    }
}
