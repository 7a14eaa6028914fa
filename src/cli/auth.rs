//! CLI auth command handlers for login, status, and logout.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::auth::{
    now_epoch_secs, CredentialStore, DeviceAuthClient, FileCredentialStore, PollOutcome,
    TokenResponse,
};
use crate::config::AstralformConfig;
use crate::error::{AstralformError, Result};

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Handle `astralform-mcp auth login`.
pub async fn handle_login(config: &AstralformConfig) -> Result<()> {
    let store = Arc::new(FileCredentialStore::new(config.credentials_path()));
    let client = DeviceAuthClient::new(config.api_url(), store);
    login(&client).await?;
    println!("✅ Astralform login successful!");
    println!("   Credentials: {}", config.credentials_path().display());
    Ok(())
}

/// Run the device flow to completion, polling at the server-provided interval.
pub async fn login(client: &DeviceAuthClient) -> Result<TokenResponse> {
    let authorization = client.request_device_code().await?;

    println!("🔗 Visit: {}", authorization.verification_uri);
    println!("📋 Enter code: {}", authorization.user_code);
    if !authorization.verification_uri_complete.is_empty() {
        println!("   Or open: {}", authorization.verification_uri_complete);
    }
    println!("⏳ Waiting for authorization...");

    let interval = poll_interval(authorization.interval);
    let deadline = Instant::now() + Duration::from_secs(authorization.expires_in);
    loop {
        tokio::time::sleep(interval).await;
        match client.poll_for_token(&authorization.device_code).await? {
            PollOutcome::Success(token) => return Ok(token),
            PollOutcome::Pending if Instant::now() < deadline => continue,
            PollOutcome::Pending | PollOutcome::Expired => {
                return Err(AstralformError::AuthServer(
                    "Device code expired, please try again".to_string(),
                ))
            }
            PollOutcome::Denied => {
                return Err(AstralformError::AuthServer(
                    "Authorization denied".to_string(),
                ))
            }
        }
    }
}

fn poll_interval(secs: u64) -> Duration {
    Duration::from_secs(secs).max(MIN_POLL_INTERVAL)
}

/// Handle `astralform-mcp auth status`.
pub async fn handle_status(config: &AstralformConfig) -> Result<()> {
    let store = FileCredentialStore::new(config.credentials_path());

    println!("🔐 Authentication Status\n");
    println!("  {}", status_line(&store, now_epoch_secs()));
    println!("  API: {}", config.api_url());
    println!("  Credentials: {}", store.path().display());
    Ok(())
}

fn status_line(store: &dyn CredentialStore, now: f64) -> String {
    let Some(credential) = store.load() else {
        return "❌ Not logged in".to_string();
    };
    let expiry = credential
        .expires_at_utc()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown".to_string());
    if credential.needs_refresh(now) {
        format!("⚠️  Token expiring or expired at {expiry} (refreshes on next use)")
    } else {
        format!("✅ Logged in (expires {expiry})")
    }
}

/// Handle `astralform-mcp auth logout`.
pub async fn handle_logout(config: &AstralformConfig) -> Result<()> {
    let store = FileCredentialStore::new(config.credentials_path());
    store.clear();
    println!("✅ Logged out from Astralform");
    Ok(())
}
