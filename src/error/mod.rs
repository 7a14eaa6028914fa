//! Error types for the Astralform MCP server.

use thiserror::Error;

/// Hint appended to authentication failures so the user knows how to recover.
pub const LOGIN_HINT: &str = "Run /astralform-login (or `astralform-mcp auth login`)";

/// Primary error type for all Astralform operations.
#[derive(Error, Debug)]
pub enum AstralformError {
    /// No stored session, or the stored session could not be refreshed.
    #[error("Not authenticated. {} to authenticate.", LOGIN_HINT)]
    NotAuthenticated,

    /// The session existed but the server revoked it; credentials were cleared.
    #[error("Session expired. {} to re-authenticate.", LOGIN_HINT)]
    SessionExpired,

    #[error("Authorization server error: {0}")]
    AuthServer(String),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Documentation page not found: {0}")]
    DocNotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AstralformError {
    /// HTTP status carried by an [`AstralformError::Api`] error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the user has to run the login flow before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, Self::NotAuthenticated | Self::SessionExpired)
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AstralformError>;
