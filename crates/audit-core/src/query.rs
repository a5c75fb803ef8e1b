//! Backend-neutral query model.
//!
//! A [`LogQuery`] describes *what* to select: the record kind, equality
//! filters, an optional day-granularity date range, and an optional keyword.
//! It holds no cursor state; every backend re-executes it from scratch, so the
//! same query can be run any number of times.
//!
//! The per-kind field tables ([`KindSpec`]) are the single source of truth for
//! which filters exist, which columns the keyword searches, and how results
//! are ordered. The relational store and the search-index adapter both read
//! them, which keeps the two backends in agreement.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::enums::RecordKind;

const DATE_FORMAT: &str = "%Y-%m-%d";
const LAST_SECOND_OF_DAY: i64 = 86_399;

/// Canonical timestamp encoding shared by every backend.
///
/// Fixed width (microseconds, `Z` suffix), so lexical order equals
/// chronological order for stored TEXT columns and index documents.
#[must_use]
pub fn timestamp_key(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drop precision the stored encoding cannot carry, so a written entry
/// compares equal to the same entry read back.
#[must_use]
pub fn storage_precision(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.trunc_subsecs(6)
}

/// The current time at storage precision.
#[must_use]
pub fn storage_now() -> DateTime<Utc> {
    storage_precision(Utc::now())
}

// ---------------------------------------------------------------------------
// Field tables
// ---------------------------------------------------------------------------

/// How a filter value is parsed before comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Bool,
    Int,
}

/// A filterable field: the query parameter name and the column it compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub param: &'static str,
    pub column: &'static str,
    pub ty: FieldType,
}

const fn text(param: &'static str, column: &'static str) -> FieldSpec {
    FieldSpec {
        param,
        column,
        ty: FieldType::Text,
    }
}

const fn boolean(param: &'static str, column: &'static str) -> FieldSpec {
    FieldSpec {
        param,
        column,
        ty: FieldType::Bool,
    }
}

const fn int(param: &'static str, column: &'static str) -> FieldSpec {
    FieldSpec {
        param,
        column,
        ty: FieldType::Int,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }

    #[must_use]
    pub const fn as_index_order(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Which column decides tenant visibility for a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKey {
    /// Tenant-owned: the column holds the owning organization.
    Org(&'static str),
    /// Identity-keyed: the column holds a username checked against membership.
    Username(&'static str),
}

/// Static description of a record kind's query surface.
#[derive(Debug)]
pub struct KindSpec {
    pub table: &'static str,
    /// Column the date range applies to. `None` disables date filtering.
    pub timestamp: Option<&'static str>,
    pub filters: &'static [FieldSpec],
    pub keyword_fields: &'static [&'static str],
    pub ordering: &'static [(&'static str, Direction)],
    pub scope: ScopeKey,
}

impl KindSpec {
    #[must_use]
    pub fn field(&self, param: &str) -> Option<&FieldSpec> {
        self.filters.iter().find(|f| f.param == param)
    }
}

static TRANSFER_SPEC: KindSpec = KindSpec {
    table: "transfer_logs",
    timestamp: Some("date_start"),
    filters: &[
        text("user", "user"),
        text("asset", "asset"),
        text("account", "account"),
        text("system_user", "account"),
        text("filename", "filename"),
        text("operate", "operate"),
        text("remote_addr", "remote_addr"),
        boolean("is_success", "is_success"),
    ],
    keyword_fields: &["user", "asset", "account", "filename"],
    ordering: &[("date_start", Direction::Desc)],
    scope: ScopeKey::Org("org_id"),
};

static OPERATE_SPEC: KindSpec = KindSpec {
    table: "operate_logs",
    timestamp: Some("datetime"),
    filters: &[
        text("user", "user"),
        text("action", "action"),
        text("resource_type", "resource_type"),
        text("resource", "resource"),
        text("remote_addr", "remote_addr"),
    ],
    keyword_fields: &["resource"],
    ordering: &[("datetime", Direction::Desc)],
    scope: ScopeKey::Org("org_id"),
};

static PASSWORD_CHANGE_SPEC: KindSpec = KindSpec {
    table: "password_change_logs",
    timestamp: Some("datetime"),
    filters: &[
        text("user", "user"),
        text("change_by", "change_by"),
        text("remote_addr", "remote_addr"),
    ],
    keyword_fields: &["user", "change_by", "remote_addr"],
    ordering: &[("datetime", Direction::Desc)],
    scope: ScopeKey::Username("user"),
};

static LOGIN_SPEC: KindSpec = KindSpec {
    table: "user_login_logs",
    timestamp: Some("datetime"),
    filters: &[
        text("username", "username"),
        text("ip", "ip"),
        text("city", "city"),
        text("type", "login_type"),
        boolean("status", "status"),
        int("mfa", "mfa"),
    ],
    keyword_fields: &["ip", "city", "username"],
    ordering: &[("datetime", Direction::Desc), ("username", Direction::Asc)],
    scope: ScopeKey::Username("username"),
};

static COMMAND_EXECUTION_SPEC: KindSpec = KindSpec {
    table: "command_executions",
    timestamp: Some("date_start"),
    filters: &[
        text("user_name", "user_name"),
        text("user_username", "user_username"),
        text("command", "command"),
        text("run_as_name", "run_as_name"),
        text("run_as_username", "run_as_username"),
        boolean("is_finished", "is_finished"),
    ],
    keyword_fields: &[
        "command",
        "user_name",
        "user_username",
        "run_as_name",
        "run_as_username",
    ],
    ordering: &[("date_created", Direction::Desc)],
    scope: ScopeKey::Org("org_id"),
};

static COMMAND_EXECUTION_HOST_SPEC: KindSpec = KindSpec {
    table: "command_execution_hosts",
    timestamp: None,
    filters: &[
        text("command_execution", "command_execution_id"),
        text("asset", "asset_id"),
        text("hostname", "hostname"),
    ],
    keyword_fields: &["hostname"],
    ordering: &[("hostname", Direction::Asc)],
    scope: ScopeKey::Org("org_id"),
};

impl RecordKind {
    /// The field table for this kind.
    #[must_use]
    pub const fn spec(self) -> &'static KindSpec {
        match self {
            Self::Transfer => &TRANSFER_SPEC,
            Self::Operate => &OPERATE_SPEC,
            Self::PasswordChange => &PASSWORD_CHANGE_SPEC,
            Self::Login => &LOGIN_SPEC,
            Self::CommandExecution => &COMMAND_EXECUTION_SPEC,
            Self::CommandExecutionHost => &COMMAND_EXECUTION_HOST_SPEC,
        }
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Raw string parameters from the query surface.
///
/// Empty values are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryParams(BTreeMap<String, String>);

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Look up a non-empty parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Parse a non-negative integer parameter; invalid values read as absent.
    #[must_use]
    pub fn get_u32(&self, key: &str) -> Option<u32> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Parse a `key=value` pair as typed on a command line.
    #[must_use]
    pub fn parse_pair(pair: &str) -> Option<(String, String)> {
        let (key, value) = pair.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), value.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

// ---------------------------------------------------------------------------
// LogQuery
// ---------------------------------------------------------------------------

/// Inclusive calendar-day range.
///
/// `from` is widened to `00:00:00` and `to` to `23:59:59` of their days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub const fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self { from, to }
    }

    /// Parse both bounds as `YYYY-MM-DD`. Either bound failing yields `None`.
    #[must_use]
    pub fn parse(from: &str, to: &str) -> Option<Self> {
        let from = NaiveDate::parse_from_str(from.trim(), DATE_FORMAT).ok()?;
        let to = NaiveDate::parse_from_str(to.trim(), DATE_FORMAT).ok()?;
        Some(Self { from, to })
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.from.and_time(NaiveTime::MIN).and_utc()
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.to.and_time(NaiveTime::MIN).and_utc() + TimeDelta::seconds(LAST_SECOND_OF_DAY)
    }

    #[must_use]
    pub fn contains(&self, ts: &DateTime<Utc>) -> bool {
        *ts >= self.start() && *ts <= self.end()
    }
}

/// A parsed equality filter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Bool(bool),
    Int(i64),
}

impl FilterValue {
    /// Parse a raw parameter for a field type. `None` means "ignore this filter".
    #[must_use]
    pub fn parse(ty: FieldType, raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match ty {
            FieldType::Text => Some(Self::Text(raw.to_string())),
            FieldType::Bool => match raw.to_ascii_lowercase().as_str() {
                "1" | "true" => Some(Self::Bool(true)),
                "0" | "false" => Some(Self::Bool(false)),
                _ => None,
            },
            FieldType::Int => raw.parse().ok().map(Self::Int),
        }
    }
}

/// An equality constraint on one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub column: &'static str,
    pub value: FilterValue,
}

/// A backend-neutral, re-executable query over one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogQuery {
    pub kind: RecordKind,
    pub filters: Vec<FieldFilter>,
    pub date_range: Option<DateRange>,
    pub keyword: Option<String>,
}

impl LogQuery {
    #[must_use]
    pub const fn new(kind: RecordKind) -> Self {
        Self {
            kind,
            filters: Vec::new(),
            date_range: None,
            keyword: None,
        }
    }

    /// Build a query from raw surface parameters.
    ///
    /// Unknown keys and values that do not parse for their field are ignored.
    /// The date range applies only when both `date_from` and `date_to` parse.
    #[must_use]
    pub fn from_params(kind: RecordKind, params: &QueryParams) -> Self {
        let mut query = Self::new(kind);
        for field in kind.spec().filters {
            if let Some(raw) = params.get(field.param) {
                query = query.filter(field.param, raw);
            }
        }
        if let (Some(from), Some(to)) = (params.get("date_from"), params.get("date_to")) {
            query.date_range = DateRange::parse(from, to);
            if query.date_range.is_none() {
                tracing::debug!(%kind, from, to, "ignoring unparseable date range");
            }
        }
        if let Some(keyword) = params.get("keyword").or_else(|| params.get("search")) {
            query.keyword = Some(keyword.to_string());
        }
        query
    }

    /// Add an equality filter by parameter name. Invalid input is dropped.
    #[must_use]
    pub fn filter(mut self, param: &str, raw: &str) -> Self {
        let Some(field) = self.kind.spec().field(param) else {
            return self;
        };
        if let Some(value) = FilterValue::parse(field.ty, raw) {
            self.filters.push(FieldFilter {
                column: field.column,
                value,
            });
        } else {
            tracing::debug!(kind = %self.kind, param, raw, "ignoring invalid filter value");
        }
        self
    }

    #[must_use]
    pub const fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        let keyword = keyword.into();
        self.keyword = if keyword.is_empty() {
            None
        } else {
            Some(keyword)
        };
        self
    }

    /// The date range, if the kind has a timestamp column to apply it to.
    #[must_use]
    pub fn effective_date_range(&self) -> Option<(&'static str, DateRange)> {
        let column = self.kind.spec().timestamp?;
        self.date_range.map(|range| (column, range))
    }

    /// True when the date range excludes every possible timestamp.
    #[must_use]
    pub fn is_trivially_empty(&self) -> bool {
        self.effective_date_range()
            .is_some_and(|(_, range)| range.from > range.to)
    }
}

/// Offset/limit window over a result sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub offset: u32,
    pub limit: u32,
}

impl Page {
    #[must_use]
    pub const fn new(offset: u32, limit: u32) -> Self {
        Self { offset, limit }
    }

    #[must_use]
    pub const fn first(limit: u32) -> Self {
        Self { offset: 0, limit }
    }
}

/// One page of results plus the size of the whole filtered set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub total: u64,
    pub items: Vec<T>,
}

impl<T> Paged<T> {
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total: 0,
            items: Vec::new(),
        }
    }

    /// Map every item, keeping the total.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paged<U> {
        Paged {
            total: self.total,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
