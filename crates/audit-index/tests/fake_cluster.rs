//! Adapter tests against a local fake cluster.
//!
//! A `tiny_http` server on `127.0.0.1:0` records every request and answers
//! from a handler closure, so the exact HTTP conversation can be asserted.

use std::io::Read;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use audit_config::IndexConfig;
use audit_core::entities::OperateLogEntry;
use audit_core::enums::{OperateAction, RecordKind};
use audit_core::query::{LogQuery, Page};
use audit_core::scope::TenantScope;
use audit_index::{IndexError, OperateLogIndex};

#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    url: String,
    body: String,
    authorization: Option<String>,
}

struct FakeCluster {
    url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeCluster {
    fn start<F>(handler: F) -> Self
    where
        F: Fn(&str, &str, &str) -> (u16, String) + Send + 'static,
    {
        let server = tiny_http::Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&requests);
        std::thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut body = String::new();
                let _ = request.as_reader().read_to_string(&mut body);
                let method = request.method().as_str().to_string();
                let url = request.url().to_string();
                let authorization = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("Authorization"))
                    .map(|h| h.value.as_str().to_string());
                let (status, reply) = handler(&method, &url, &body);
                log.lock().unwrap().push(Recorded {
                    method,
                    url,
                    body,
                    authorization,
                });
                let response = tiny_http::Response::from_string(reply)
                    .with_status_code(status)
                    .with_header(
                        tiny_http::Header::from_bytes("Content-Type", "application/json").unwrap(),
                    );
                let _ = request.respond(response);
            }
        });
        Self {
            url: format!("http://127.0.0.1:{port}"),
            requests,
        }
    }

    fn config(&self) -> IndexConfig {
        IndexConfig {
            url: self.url.clone(),
            ..IndexConfig::default()
        }
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

fn entry() -> OperateLogEntry {
    OperateLogEntry {
        id: "opl-0a1b2c3d4e5f6071".into(),
        org_id: "org-a".into(),
        user: "alice".into(),
        action: OperateAction::Update,
        resource_type: "Asset".into(),
        resource: "web-01".into(),
        remote_addr: Some("10.0.0.1".into()),
        datetime: Utc.with_ymd_and_hms(2026, 3, 1, 8, 30, 0).unwrap(),
        before: json!({ "port": 22 }),
        after: json!({ "port": 2222 }),
    }
}

fn hits(entries: &[OperateLogEntry], total: u64) -> String {
    let hits: Vec<Value> = entries
        .iter()
        .map(|e| {
            json!({
                "_id": e.id,
                "_source": serde_json::to_value(audit_index::document::IndexDocument::from(e)).unwrap(),
            })
        })
        .collect();
    json!({ "hits": { "total": { "value": total, "relation": "eq" }, "hits": hits } }).to_string()
}

#[tokio::test]
async fn ping_succeeds_against_live_cluster() {
    let cluster = FakeCluster::start(|_, _, _| {
        (200, json!({ "cluster_name": "fake" }).to_string())
    });
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    assert!(index.ping(Duration::from_secs(2)).await);
    assert_eq!(cluster.requests()[0].method, "GET");
    assert_eq!(cluster.requests()[0].url, "/");
}

#[tokio::test]
async fn ping_fails_on_error_status() {
    let cluster = FakeCluster::start(|_, _, _| (503, String::new()));
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    assert!(!index.ping(Duration::from_secs(2)).await);
}

#[tokio::test]
async fn ping_is_bounded_by_timeout() {
    let cluster = FakeCluster::start(|_, _, _| {
        std::thread::sleep(Duration::from_secs(3));
        (200, "{}".into())
    });
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    let started = std::time::Instant::now();
    assert!(!index.ping(Duration::from_millis(200)).await);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn ping_fails_when_nothing_listens() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = IndexConfig {
        url: format!("http://127.0.0.1:{port}"),
        ..IndexConfig::default()
    };
    let index = OperateLogIndex::new(&config).unwrap();
    assert!(!index.ping(Duration::from_secs(2)).await);
}

#[tokio::test]
async fn search_posts_body_and_decodes_hits() {
    let stored = entry();
    let reply = hits(std::slice::from_ref(&stored), 7);
    let cluster = FakeCluster::start(move |_, _, _| (200, reply.clone()));
    let index = OperateLogIndex::new(&cluster.config()).unwrap();

    let query = LogQuery::new(RecordKind::Operate).keyword("web");
    let scope = TenantScope::Organization {
        column: "org_id",
        org_id: "org-a".into(),
    };
    let page = index.search(&query, &scope, Page::new(5, 5)).await.unwrap();
    assert_eq!(page.total, 7);
    assert_eq!(page.items, vec![stored]);

    let requests = cluster.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "POST");
    assert!(requests[0].url.starts_with("/audit-operate-log/_search?"));
    let body: Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(body["from"], 5);
    assert_eq!(body["query"]["bool"]["filter"][0], json!({ "term": { "org_id": "org-a" } }));
}

#[tokio::test]
async fn empty_scope_skips_the_cluster() {
    let cluster = FakeCluster::start(|_, _, _| (500, String::new()));
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    let scope = TenantScope::Usernames {
        column: "user",
        usernames: std::collections::BTreeSet::new(),
    };
    let page = index
        .search(&LogQuery::new(RecordKind::Operate), &scope, Page::first(10))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(cluster.requests().is_empty());
}

#[tokio::test]
async fn search_error_status_is_reported() {
    let cluster = FakeCluster::start(|_, _, _| {
        (400, r#"{"error":{"type":"parsing_exception"}}"#.into())
    });
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    let result = index
        .search(
            &LogQuery::new(RecordKind::Operate),
            &TenantScope::Unrestricted,
            Page::first(10),
        )
        .await;
    assert!(matches!(result, Err(IndexError::Api { status: 400, .. })));
}

#[tokio::test]
async fn get_returns_none_when_no_hit() {
    let cluster = FakeCluster::start(|_, _, _| (200, hits(&[], 0)));
    let index = OperateLogIndex::new(&cluster.config()).unwrap();
    let found = index
        .get("opl-missing", &TenantScope::Unrestricted)
        .await
        .unwrap();
    assert_eq!(found, None);
}

#[tokio::test]
async fn save_creates_dated_index_then_document() {
    let cluster = FakeCluster::start(|method, _, _| match method {
        "HEAD" => (404, String::new()),
        "PUT" => (200, json!({ "acknowledged": true, "result": "created" }).to_string()),
        _ => (405, String::new()),
    });
    let config = IndexConfig {
        index_by_date: true,
        username: "elastic".into(),
        password: "changeme".into(),
        ..cluster.config()
    };
    let index = OperateLogIndex::new(&config).unwrap();
    index.save(&entry()).await.unwrap();

    let requests = cluster.requests();
    let calls: Vec<(String, String)> = requests
        .iter()
        .map(|r| (r.method.clone(), r.url.clone()))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("HEAD".into(), "/audit-operate-log-2026-03-01".into()),
            ("PUT".into(), "/audit-operate-log-2026-03-01".into()),
            (
                "PUT".into(),
                "/audit-operate-log-2026-03-01/_create/opl-0a1b2c3d4e5f6071?refresh=wait_for".into()
            ),
        ]
    );
    assert!(requests.iter().all(|r| r
        .authorization
        .as_deref()
        .is_some_and(|a| a.starts_with("Basic "))));

    let mapping: Value = serde_json::from_str(&requests[1].body).unwrap();
    assert_eq!(
        mapping["mappings"]["properties"]["resource"]["type"],
        "keyword"
    );
    let document: Value = serde_json::from_str(&requests[2].body).unwrap();
    assert_eq!(document["datetime"], "2026-03-01T08:30:00.000000Z");
    assert_eq!(document["after"], json!({ "port": 2222 }));
}
