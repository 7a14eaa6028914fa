//! Public documentation search over the hosted `llms-full.txt`.
//!
//! Docs are fetched without authentication and memoized in a [`DocsCache`]
//! for the configured TTL.

pub mod parser;

use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

pub use parser::{DocCategory, DocSearchResult, DocSection};

use crate::config::AstralformConfig;
use crate::error::{AstralformError, Result};

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

#[derive(Debug, Clone)]
struct CachedDocs {
    value: Arc<str>,
    fetched_at: Instant,
}

/// Memoized docs body shared between clones of a [`DocsClient`].
#[derive(Debug, Default)]
pub struct DocsCache {
    inner: Mutex<Option<CachedDocs>>,
}

impl DocsCache {
    pub fn new() -> Self {
        Self::default()
    }

    async fn fresh(&self, ttl: Duration) -> Option<Arc<str>> {
        let guard = self.inner.lock().await;
        guard
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < ttl)
            .map(|cached| cached.value.clone())
    }

    async fn store(&self, value: Arc<str>) {
        *self.inner.lock().await = Some(CachedDocs {
            value,
            fetched_at: Instant::now(),
        });
    }

    pub async fn invalidate(&self) {
        *self.inner.lock().await = None;
    }
}

/// A full documentation section returned by [`DocsClient::get_doc`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocPage {
    pub path: String,
    pub title: String,
    pub content: String,
    pub category: DocCategory,
}

/// Client for the public documentation site.
///
/// # Example
/// ```no_run
/// use astralform_mcp::config::AstralformConfig;
/// use astralform_mcp::docs::DocsClient;
///
/// # async fn run() -> astralform_mcp::error::Result<()> {
/// let docs = DocsClient::new(&AstralformConfig::default());
/// for hit in docs.search_docs("streaming", None, None).await? {
///     println!("{} {} ({})", hit.relevance, hit.title, hit.path);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DocsClient {
    client: reqwest::Client,
    docs_url: String,
    ttl: Duration,
    cache: Arc<DocsCache>,
}

impl DocsClient {
    pub fn new(config: &AstralformConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            docs_url: config.docs_url().to_string(),
            ttl: config.docs_cache_ttl(),
            cache: Arc::new(DocsCache::new()),
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_cache(mut self, cache: Arc<DocsCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Raw `llms-full.txt`, served from cache while fresh.
    pub async fn fetch_full_docs(&self) -> Result<Arc<str>> {
        if let Some(cached) = self.cache.fresh(self.ttl).await {
            return Ok(cached);
        }

        let url = format!("{}/llms-full.txt", self.docs_url);
        tracing::debug!(%url, "fetching documentation");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(AstralformError::Api {
                status: status.as_u16(),
                body: format!("Failed to fetch docs from {url}"),
            });
        }
        let value: Arc<str> = resp.text().await?.into();
        self.cache.store(value.clone()).await;
        Ok(value)
    }

    pub async fn search_docs(
        &self,
        query: &str,
        category: Option<DocCategory>,
        limit: Option<usize>,
    ) -> Result<Vec<DocSearchResult>> {
        let raw = self.fetch_full_docs().await?;
        let sections = parser::parse_sections(&raw);
        let limit = limit.filter(|l| *l > 0).unwrap_or(DEFAULT_SEARCH_LIMIT);
        Ok(parser::search(&sections, query, category, limit))
    }

    pub async fn get_doc(&self, path: &str) -> Result<DocPage> {
        let raw = self.fetch_full_docs().await?;
        let sections = parser::parse_sections(&raw);
        let section = parser::find_section(&sections, path)
            .ok_or_else(|| AstralformError::DocNotFound(path.to_string()))?;
        Ok(DocPage {
            path: section.path.clone(),
            title: section.title.clone(),
            content: section.content.trim().to_string(),
            category: section.category,
        })
    }
}
