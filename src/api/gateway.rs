use std::sync::Arc;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::{now_epoch_secs, CredentialStore, TokenRefresher};
use crate::config::AstralformConfig;
use crate::error::{AstralformError, Result};

/// Method, JSON body and query parameters for a gateway request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: None,
            query: Vec::new(),
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn post(body: Value) -> Self {
        Self::with_method(Method::POST).body(body)
    }

    pub fn put(body: Value) -> Self {
        Self::with_method(Method::PUT).body(body)
    }

    pub fn patch(body: Value) -> Self {
        Self::with_method(Method::PATCH).body(body)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Append a query parameter; `None` values are skipped.
    pub fn query(mut self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        if let Some(value) = value {
            self.query.push((key.into(), value.into()));
        }
        self
    }
}

/// Authenticated HTTP gateway to the Astralform API.
///
/// Holds no credential state of its own: the store is read on every call,
/// and a token inside the refresh window is exchanged once before use.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use astralform_mcp::api::{Gateway, RequestOptions};
/// use astralform_mcp::auth::FileCredentialStore;
/// use astralform_mcp::config::AstralformConfig;
///
/// # async fn run() -> astralform_mcp::error::Result<()> {
/// let config = AstralformConfig::from_env();
/// let store = Arc::new(FileCredentialStore::new(config.credentials_path()));
/// let gateway = Gateway::new(&config, store);
/// let me: serde_json::Value = gateway.request("/v1/dashboard/me", RequestOptions::get()).await?;
/// println!("{me}");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Gateway {
    client: reqwest::Client,
    api_url: String,
    store: Arc<dyn CredentialStore>,
    refresher: TokenRefresher,
}

impl Gateway {
    pub fn new(config: &AstralformConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url().to_string(),
            refresher: TokenRefresher::new(config.api_url(), store.clone()),
            store,
        }
    }

    /// Share one connection pool with the refresher and other clients.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.refresher = self.refresher.with_http_client(client.clone());
        self.client = client;
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        &self.store
    }

    /// Resolve a usable access token, refreshing at most once.
    pub async fn get_access_token(&self) -> Option<String> {
        let credential = self.store.load()?;
        if credential.needs_refresh(now_epoch_secs()) {
            tracing::debug!("access token inside refresh window");
            return self
                .refresher
                .refresh_access_token(&credential.refresh_token)
                .await
                .map(|refreshed| refreshed.access_token);
        }
        Some(credential.access_token)
    }

    pub async fn is_authenticated(&self) -> bool {
        self.get_access_token().await.is_some()
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let token = self
            .get_access_token()
            .await
            .ok_or(AstralformError::NotAuthenticated)?;

        tracing::debug!(method = %options.method, path, "api request");
        let mut builder = self
            .client
            .request(options.method, format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if !options.query.is_empty() {
            builder = builder.query(&options.query);
        }
        if let Some(body) = options.body {
            builder = builder.json(&body);
        }

        let resp = builder.send().await?;
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "session rejected by server; clearing credentials");
            self.store.clear();
            return Err(AstralformError::SessionExpired);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AstralformError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = resp.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_str("null")?);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn query_skips_missing_values() {
        let options = RequestOptions::get()
            .query("start_date", Some("2024-01-01"))
            .query("end_date", None::<String>);
        assert_eq!(
            options.query,
            vec![("start_date".to_string(), "2024-01-01".to_string())]
        );
    }

    #[test]
    fn constructors_set_method_and_body() {
        let options = RequestOptions::patch(json!({"name": "x"}));
        assert_eq!(options.method, Method::PATCH);
        assert_eq!(options.body, Some(json!({"name": "x"})));
        assert_eq!(RequestOptions::delete().body, None);
    }
}
