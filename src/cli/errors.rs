//! CLI-specific error formatting for user-facing messages.

use crate::error::AstralformError;

/// Map an [`AstralformError`] to a user-facing help string with actionable guidance.
pub fn format_error_help(err: &AstralformError) -> String {
    match err {
        AstralformError::NotAuthenticated => {
            "Not logged in. Run: astralform-mcp auth login".to_string()
        }
        AstralformError::SessionExpired => {
            "Session expired and credentials were cleared. Run: astralform-mcp auth login"
                .to_string()
        }
        AstralformError::AuthServer(msg) => {
            format!("Authorization failed: {msg}. Run: astralform-mcp auth login")
        }
        AstralformError::Network(e) => {
            format!("Network error: {e}. Check connectivity or ASTRALFORM_API_URL")
        }
        AstralformError::Configuration(msg) => {
            format!("Configuration error: {msg}. Check your .env or ASTRALFORM_* variables")
        }
        other => format!("{other}"),
    }
}
