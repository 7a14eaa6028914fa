use std::sync::Arc;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::store::CredentialStore;
use super::token::{now_epoch_secs, Credential, TokenResponse};

pub const CLIENT_ID: &str = "claude-code-plugin";
pub const DEVICE_CODE_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:device_code";

/// Device-code session details returned by `POST /v1/auth/device`.
///
/// Only held in memory while a login is in progress.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceAuthorization {
    pub device_code: String,
    pub user_code: String,
    pub verification_uri: String,
    pub verification_uri_complete: String,
    pub expires_in: u64,
    pub interval: u64,
}

/// Result of a single poll against the device-token endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Success(TokenResponse),
    Pending,
    Expired,
    Denied,
}

#[derive(Debug, Deserialize)]
struct DeviceTokenError {
    #[serde(default)]
    error: Option<String>,
}

/// Client for the OAuth 2.0 device authorization grant.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use astralform_mcp::auth::{DeviceAuthClient, FileCredentialStore, PollOutcome};
///
/// # async fn run() -> Result<(), astralform_mcp::auth::AuthError> {
/// let store = Arc::new(FileCredentialStore::new("/tmp/astralform/credentials.json"));
/// let client = DeviceAuthClient::new("https://api.astralform.dev", store);
/// let authorization = client.request_device_code().await?;
/// println!("Visit {} and enter {}", authorization.verification_uri, authorization.user_code);
/// match client.poll_for_token(&authorization.device_code).await? {
///     PollOutcome::Success(_) => println!("logged in"),
///     other => println!("{other:?}"),
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DeviceAuthClient {
    client: reqwest::Client,
    api_url: String,
    store: Arc<dyn CredentialStore>,
}

impl DeviceAuthClient {
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

    pub async fn request_device_code(&self) -> Result<DeviceAuthorization, AuthError> {
        let resp = self
            .client
            .post(format!("{}/v1/auth/device", self.api_url))
            .json(&serde_json::json!({ "client_id": CLIENT_ID }))
            .send()
            .await?;
        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::AuthServer(format!(
                "Failed to request device code: {body}"
            )));
        }
        let authorization: DeviceAuthorization = resp.json().await?;
        tracing::info!(
            verification_uri = %authorization.verification_uri,
            expires_in = authorization.expires_in,
            "device code issued"
        );
        Ok(authorization)
    }

    /// Poll the token endpoint once. Persists the credential on success.
    pub async fn poll_for_token(&self, device_code: &str) -> Result<PollOutcome, AuthError> {
        let resp = self
            .client
            .post(format!("{}/v1/auth/device/token", self.api_url))
            .json(&serde_json::json!({
                "device_code": device_code,
                "client_id": CLIENT_ID,
                "grant_type": DEVICE_CODE_GRANT_TYPE,
            }))
            .send()
            .await?;

        let status = resp.status();
        if status == StatusCode::BAD_REQUEST {
            let body = resp.text().await.unwrap_or_default();
            let code = serde_json::from_str::<DeviceTokenError>(&body)
                .ok()
                .and_then(|payload| payload.error);
            return match code.as_deref() {
                Some("authorization_pending") => Ok(PollOutcome::Pending),
                Some("expired_token") => Ok(PollOutcome::Expired),
                Some("access_denied") => Ok(PollOutcome::Denied),
                Some(other) => Err(AuthError::AuthServer(format!("Token error: {other}"))),
                None => Err(AuthError::AuthServer(format!("Token error: {body}"))),
            };
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AuthError::AuthServer(format!(
                "Failed to get token: {body}"
            )));
        }

        let token: TokenResponse = resp.json().await?;
        let credential = Credential::from_token_response(token.clone(), now_epoch_secs());
        self.store.save(&credential)?;
        tracing::info!("device authorization completed");
        Ok(PollOutcome::Success(token))
    }
}

impl std::fmt::Debug for DeviceAuthClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceAuthClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}
