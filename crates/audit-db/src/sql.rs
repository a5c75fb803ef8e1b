//! SQL rendition of a [`LogQuery`] under a [`TenantScope`].
//!
//! Column names come from the static field tables, never from callers, so
//! they are interpolated (quoted); every value is bound as a `?N` parameter.

use audit_core::query::{FilterValue, KindSpec, LogQuery, Page, timestamp_key};
use audit_core::scope::TenantScope;

/// Accumulates `WHERE` clauses and their positional parameters.
#[derive(Debug, Default)]
pub(crate) struct Conditions {
    clauses: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Conditions {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Conditions for `query` restricted to `scope`.
    pub(crate) fn for_query(query: &LogQuery, scope: &TenantScope) -> Self {
        let mut conditions = Self::new();
        conditions.push_scope(scope);
        conditions.push_query(query);
        conditions
    }

    fn bind(&mut self, value: libsql::Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    pub(crate) fn eq(&mut self, column: &str, value: libsql::Value) {
        let idx = self.bind(value);
        self.clauses.push(format!("\"{column}\" = ?{idx}"));
    }

    pub(crate) fn push_scope(&mut self, scope: &TenantScope) {
        match scope {
            TenantScope::Unrestricted => {}
            TenantScope::Organization { column, org_id } => {
                self.eq(column, libsql::Value::Text(org_id.clone()));
            }
            TenantScope::Usernames { column, usernames } => {
                if usernames.is_empty() {
                    self.clauses.push("0".into());
                    return;
                }
                // One JSON array parameter; SQLite caps bound variables at 32766.
                let names = serde_json::Value::from(usernames.iter().cloned().collect::<Vec<_>>());
                let idx = self.bind(libsql::Value::Text(names.to_string()));
                self.clauses.push(format!(
                    "\"{column}\" IN (SELECT value FROM json_each(?{idx}))"
                ));
            }
        }
    }

    pub(crate) fn push_query(&mut self, query: &LogQuery) {
        for filter in &query.filters {
            let value = match &filter.value {
                FilterValue::Text(s) => libsql::Value::Text(s.clone()),
                FilterValue::Bool(b) => libsql::Value::Integer(i64::from(*b)),
                FilterValue::Int(n) => libsql::Value::Integer(*n),
            };
            self.eq(filter.column, value);
        }

        if let Some((column, range)) = query.effective_date_range() {
            let from = self.bind(libsql::Value::Text(timestamp_key(&range.start())));
            let to = self.bind(libsql::Value::Text(timestamp_key(&range.end())));
            self.clauses
                .push(format!("\"{column}\" >= ?{from} AND \"{column}\" <= ?{to}"));
        }

        if let Some(keyword) = &query.keyword {
            let idx = self.bind(libsql::Value::Text(keyword.clone()));
            // instr() is case-sensitive, unlike LIKE.
            let any: Vec<String> = query
                .kind
                .spec()
                .keyword_fields
                .iter()
                .map(|column| format!("instr(\"{column}\", ?{idx}) > 0"))
                .collect();
            self.clauses.push(format!("({})", any.join(" OR ")));
        }
    }

    pub(crate) fn where_sql(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// `LIMIT`/`OFFSET` bound as parameters after the conditions.
    pub(crate) fn page_sql(&mut self, page: Page) -> String {
        let limit = self.bind(libsql::Value::Integer(i64::from(page.limit)));
        let offset = self.bind(libsql::Value::Integer(i64::from(page.offset)));
        format!("LIMIT ?{limit} OFFSET ?{offset}")
    }

    pub(crate) fn params(&self) -> Vec<libsql::Value> {
        self.params.clone()
    }
}

/// `ORDER BY` for a kind. Entries that tie on every ordering column list
/// newest-inserted first; `rowid` only grows since rows are never deleted.
pub(crate) fn order_by(spec: &KindSpec) -> String {
    let mut terms: Vec<String> = spec
        .ordering
        .iter()
        .map(|(column, direction)| format!("\"{column}\" {}", direction.as_sql()))
        .collect();
    terms.push("rowid DESC".into());
    format!("ORDER BY {}", terms.join(", "))
}
