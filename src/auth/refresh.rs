use std::sync::Arc;

use super::store::CredentialStore;
use super::token::{now_epoch_secs, Credential, TokenResponse};

/// Exchanges refresh tokens for a new credential pair.
///
/// An explicit rejection from the server wipes the stored credential. A
/// transport failure or an undecodable body leaves the store untouched.
#[derive(Clone)]
pub struct TokenRefresher {
    client: reqwest::Client,
    api_url: String,
    store: Arc<dyn CredentialStore>,
}

impl TokenRefresher {
    pub fn new(api_url: impl Into<String>, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub async fn refresh_access_token(&self, refresh_token: &str) -> Option<Credential> {
        let resp = match self
            .client
            .post(format!("{}/v1/auth/refresh", self.api_url))
            .json(&serde_json::json!({
                "refresh_token": refresh_token,
                "grant_type": "refresh_token",
            }))
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(error = %err, "token refresh request failed");
                return None;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(status = %resp.status(), "token refresh rejected; clearing credentials");
            self.store.clear();
            return None;
        }

        let token: TokenResponse = match resp.json().await {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "token refresh returned an undecodable body");
                return None;
            }
        };

        let credential = Credential::from_token_response(token, now_epoch_secs());
        if let Err(err) = self.store.save(&credential) {
            tracing::warn!(error = %err, "failed to persist refreshed credentials");
            return None;
        }
        tracing::debug!("access token refreshed");
        Some(credential)
    }
}

impl std::fmt::Debug for TokenRefresher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRefresher")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
