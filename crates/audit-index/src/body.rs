//! Search request bodies built from a [`LogQuery`].
//!
//! The bodies mirror the relational query: equality filters and tenant scope
//! become `term`/`terms` clauses, the date range is a `range` with the same
//! bound strings the relational store compares against, and the keyword is an
//! OR of case-sensitive `wildcard` substring matches over the kind's keyword
//! fields.

use serde_json::{Value, json};

use audit_core::query::{FilterValue, KindSpec, LogQuery, Page, timestamp_key};
use audit_core::scope::TenantScope;

/// Escape wildcard metacharacters so the keyword matches literally.
#[must_use]
pub fn escape_wildcard(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '*' | '?') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn filter_value(value: &FilterValue) -> Value {
    match value {
        FilterValue::Text(s) => json!(s),
        FilterValue::Bool(b) => json!(b),
        FilterValue::Int(n) => json!(n),
    }
}

/// Upper bound on values in one `terms` clause (`index.max_terms_count`).
pub const MAX_TERMS: usize = 65_536;

fn scope_clause(scope: &TenantScope) -> Option<Value> {
    match scope {
        TenantScope::Unrestricted => None,
        TenantScope::Organization { column, org_id } => {
            Some(json!({ "term": { *column: org_id } }))
        }
        TenantScope::Usernames { column, usernames } => {
            let names: Vec<&String> = usernames.iter().collect();
            if names.len() <= MAX_TERMS {
                return Some(json!({ "terms": { *column: names } }));
            }
            let any: Vec<Value> = names
                .chunks(MAX_TERMS)
                .map(|chunk| json!({ "terms": { *column: chunk } }))
                .collect();
            Some(json!({ "bool": { "should": any, "minimum_should_match": 1 } }))
        }
    }
}

/// The `bool` query for `query` under `scope`.
#[must_use]
pub fn bool_query(query: &LogQuery, scope: &TenantScope) -> Value {
    let mut filter: Vec<Value> = Vec::new();
    filter.extend(scope_clause(scope));
    for f in &query.filters {
        filter.push(json!({ "term": { f.column: filter_value(&f.value) } }));
    }
    if let Some((column, range)) = query.effective_date_range() {
        filter.push(json!({
            "range": {
                column: {
                    "gte": timestamp_key(&range.start()),
                    "lte": timestamp_key(&range.end()),
                }
            }
        }));
    }

    let mut bool_body = serde_json::Map::new();
    bool_body.insert("filter".into(), Value::Array(filter));

    if let Some(keyword) = &query.keyword {
        let pattern = format!("*{}*", escape_wildcard(keyword));
        let should: Vec<Value> = query
            .kind
            .spec()
            .keyword_fields
            .iter()
            .map(|field| json!({ "wildcard": { *field: { "value": pattern } } }))
            .collect();
        bool_body.insert("should".into(), Value::Array(should));
        bool_body.insert("minimum_should_match".into(), json!(1));
    }

    json!({ "bool": bool_body })
}

/// Sort clauses for a kind, with `id` as the final tie-breaker.
///
/// Documents carry no insertion sequence, so entries that tie on every
/// ordering field list by id rather than newest-inserted first as the
/// relational store does.
#[must_use]
pub fn sort_clauses(spec: &KindSpec) -> Value {
    let mut sort: Vec<Value> = spec
        .ordering
        .iter()
        .map(|(column, direction)| json!({ *column: { "order": direction.as_index_order() } }))
        .collect();
    sort.push(json!({ "id": { "order": "asc" } }));
    Value::Array(sort)
}

/// Full `_search` body for one page.
#[must_use]
pub fn search_body(query: &LogQuery, scope: &TenantScope, page: Page) -> Value {
    json!({
        "query": bool_query(query, scope),
        "sort": sort_clauses(query.kind.spec()),
        "from": page.offset,
        "size": page.limit,
        "track_total_hits": true,
    })
}

/// `_search` body fetching a single document by id under `scope`.
#[must_use]
pub fn get_body(id: &str, scope: &TenantScope) -> Value {
    let mut filter = vec![json!({ "ids": { "values": [id] } })];
    filter.extend(scope_clause(scope));
    json!({
        "query": { "bool": { "filter": filter } },
        "size": 1,
    })
}
