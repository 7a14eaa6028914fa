use thiserror::Error;

use crate::error::AstralformError;

/// Errors raised by the device-code client and the credential store.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The authorization server rejected the request; carries its response text.
    #[error("{0}")]
    AuthServer(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AuthError> for AstralformError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::AuthServer(message) => AstralformError::AuthServer(message),
            AuthError::Network(source) => AstralformError::Network(source),
            AuthError::Io(source) => AstralformError::Io(source),
            AuthError::Serialization(source) => AstralformError::Serialization(source),
        }
    }
}
