use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before expiry at which a stored access token is refreshed.
pub const REFRESH_BUFFER_SECS: f64 = 300.0;

/// Credential record persisted by the credential store.
///
/// `expires_at` is unix-epoch seconds. All four fields are required; a file
/// missing any of them does not deserialize and is treated as no session.
///
/// # Example
/// ```no_run
/// use astralform_mcp::auth::{Credential, TokenResponse};
///
/// let credential = Credential::from_token_response(
///     TokenResponse {
///         access_token: "access".to_string(),
///         refresh_token: "refresh".to_string(),
///         expires_in: 3600,
///         token_type: "Bearer".to_string(),
///     },
///     1_700_000_000.0,
/// );
/// assert_eq!(credential.expires_at, 1_700_003_600.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_at: f64,
    pub token_type: String,
}

impl Credential {
    pub fn from_token_response(response: TokenResponse, now: f64) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            expires_at: now + response.expires_in as f64,
            token_type: response.token_type,
        }
    }

    /// True when the token is inside the early-refresh window at `now`.
    pub fn needs_refresh(&self, now: f64) -> bool {
        self.expires_at - REFRESH_BUFFER_SECS < now
    }

    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis((self.expires_at * 1000.0) as i64)
    }
}

/// Token payload returned by the device-token and refresh endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
    pub token_type: String,
}

/// Current time as fractional unix-epoch seconds.
pub fn now_epoch_secs() -> f64 {
    Utc::now().timestamp_millis() as f64 / 1000.0
}
