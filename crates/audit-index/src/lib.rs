//! # audit-index
//!
//! Search-index (Elasticsearch-compatible HTTP) adapter for operate logs.
//!
//! The adapter is a drop-in replacement for the relational operate-log store:
//! the same [`LogQuery`], [`TenantScope`] and [`Page`] produce the same field
//! set, values and ordering. Whether it is used at all is decided per request
//! by [`OperateLogIndex::configured`] and a bounded [`OperateLogIndex::ping`].

pub mod body;
pub mod document;
mod error;
mod http;

pub use error::IndexError;

use std::time::Duration;

use audit_config::IndexConfig;
use audit_core::entities::OperateLogEntry;
use audit_core::enums::RecordKind;
use audit_core::query::{LogQuery, Page, Paged};
use audit_core::scope::TenantScope;

use crate::document::{IndexDocument, SearchResponse, index_mapping};
use crate::http::check_response;

/// One page of index results.
pub type IndexPage = Paged<OperateLogEntry>;

/// HTTP client for the operate-log index.
///
/// Holds no connection state beyond the HTTP pool; liveness is re-probed by
/// callers on every request.
pub struct OperateLogIndex {
    http: reqwest::Client,
    config: IndexConfig,
}

impl OperateLogIndex {
    /// Build a client for the configured cluster.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError::Http`] if the underlying client cannot be built.
    pub fn new(config: &IndexConfig) -> Result<Self, IndexError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("audit-index/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    /// Whether a cluster URL is configured.
    #[must_use]
    pub fn configured(&self) -> bool {
        self.config.is_configured()
    }

    /// The configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &IndexConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}/{path}", self.config.base_url());
        let builder = self.http.request(method, url);
        if self.config.has_credentials() {
            builder.basic_auth(&self.config.username, Some(&self.config.password))
        } else {
            builder
        }
    }

    /// Probe the cluster root. Any error, non-success status, or exceeding
    /// `timeout` reads as "not alive".
    pub async fn ping(&self, timeout: Duration) -> bool {
        if !self.configured() {
            return false;
        }
        let probe = self.request(reqwest::Method::GET, "").send();
        match tokio::time::timeout(timeout, probe).await {
            Ok(Ok(resp)) if resp.status().is_success() => true,
            Ok(Ok(resp)) => {
                tracing::debug!(status = resp.status().as_u16(), "index ping rejected");
                false
            }
            Ok(Err(e)) => {
                tracing::debug!(%e, "index ping failed");
                false
            }
            Err(_) => {
                tracing::debug!(timeout_ms = timeout.as_millis(), "index ping timed out");
                false
            }
        }
    }

    async fn run_search(&self, body: &serde_json::Value) -> Result<SearchResponse, IndexError> {
        if !self.configured() {
            return Err(IndexError::NotConfigured);
        }
        let path = format!(
            "{}/_search?ignore_unavailable=true&allow_no_indices=true",
            self.config.search_target()
        );
        let resp = check_response(
            self.request(reqwest::Method::POST, &path)
                .json(body)
                .send()
                .await?,
        )
        .await?;
        resp.json()
            .await
            .map_err(|e| IndexError::Parse(format!("search response: {e}")))
    }

    /// Run `query` under `scope` and return one page plus the filtered total.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the query is not an operate query, the
    /// request fails, or the response cannot be decoded.
    pub async fn search(
        &self,
        query: &LogQuery,
        scope: &TenantScope,
        page: Page,
    ) -> Result<IndexPage, IndexError> {
        if query.kind != RecordKind::Operate {
            return Err(IndexError::UnsupportedKind(query.kind.to_string()));
        }
        if scope.is_empty() || query.is_trivially_empty() {
            return Ok(IndexPage::empty());
        }
        let response = self
            .run_search(&body::search_body(query, scope, page))
            .await?;
        let (total, items) = response.into_entries()?;
        Ok(IndexPage { total, items })
    }

    /// Fetch one entry by id. Entries outside `scope` read as absent.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the request fails or the document cannot be
    /// decoded.
    pub async fn get(
        &self,
        id: &str,
        scope: &TenantScope,
    ) -> Result<Option<OperateLogEntry>, IndexError> {
        let response = self.run_search(&body::get_body(id, scope)).await?;
        let (_, items) = response.into_entries()?;
        Ok(items.into_iter().next())
    }

    /// Create `index` with the operate-log mapping if it does not exist yet.
    async fn ensure_index(&self, index: &str) -> Result<(), IndexError> {
        let head = self.request(reqwest::Method::HEAD, index).send().await?;
        if head.status().is_success() {
            return Ok(());
        }
        let resp = self
            .request(reqwest::Method::PUT, index)
            .json(&index_mapping())
            .send()
            .await?;
        match check_response(resp).await {
            Ok(_) => {
                tracing::debug!(index, "created operate log index");
                Ok(())
            }
            // A concurrent writer created it first.
            Err(IndexError::Api { status: 400, message })
                if message.contains("resource_already_exists_exception") =>
            {
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Store `entry`. Existing ids are rejected, never overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the cluster is not configured, the index
    /// cannot be created, or the write is rejected.
    pub async fn save(&self, entry: &OperateLogEntry) -> Result<(), IndexError> {
        if !self.configured() {
            return Err(IndexError::NotConfigured);
        }
        let day = entry.datetime.format("%Y-%m-%d").to_string();
        let index = self.config.write_target(&day);
        self.ensure_index(&index).await?;

        let path = format!("{index}/_create/{}?refresh=wait_for", entry.id);
        check_response(
            self.request(reqwest::Method::PUT, &path)
                .json(&IndexDocument::from(entry))
                .send()
                .await?,
        )
        .await?;
        tracing::debug!(index, id = %entry.id, "indexed operate log");
        Ok(())
    }
}
