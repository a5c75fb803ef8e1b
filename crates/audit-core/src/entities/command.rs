use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A batch command run against one or more hosts.
///
/// `org_id` is the organization of the run-as account; tenant scoping keys on it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CommandExecution {
    pub id: String,
    pub org_id: String,
    pub command: String,
    pub user_name: String,
    pub user_username: String,
    pub run_as_name: String,
    pub run_as_username: String,
    pub is_finished: bool,
    pub date_created: DateTime<Utc>,
    pub date_start: Option<DateTime<Utc>>,
}

/// One row of the execution-to-host relation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CommandExecutionHost {
    pub id: String,
    pub command_execution_id: String,
    pub asset_id: String,
    pub hostname: String,
    pub ip: String,
}

impl CommandExecutionHost {
    /// `"<hostname>(<ip>)"`.
    #[must_use]
    pub fn asset_display(&self) -> String {
        format!("{}({})", self.hostname, self.ip)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewExecutionHost {
    pub asset_id: String,
    pub hostname: String,
    pub ip: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCommandExecution {
    pub org_id: String,
    pub command: String,
    pub user_name: String,
    pub user_username: String,
    pub run_as_name: String,
    pub run_as_username: String,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub date_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub hosts: Vec<NewExecutionHost>,
}
