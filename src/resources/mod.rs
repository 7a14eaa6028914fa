//! Dashboard resource wrappers.
//!
//! Each function maps to exactly one HTTP request through the [`Gateway`]
//! and passes the response JSON through unchanged.
//!
//! [`Gateway`]: crate::api::Gateway

pub mod analytics;
pub mod api_keys;
pub mod developer;
pub mod llm_config;
pub mod mcp_servers;
pub mod platform_tools;
pub mod projects;

pub use analytics::AnalyticsRange;
pub use api_keys::{ApiKeyEnvironment, CreateApiKeyInput};
pub use llm_config::SetLlmConfigInput;
pub use mcp_servers::{AddMcpServerInput, UpdateMcpServerInput};
pub use platform_tools::UpdateToolInput;
pub use projects::{CreateProjectInput, UpdateProjectInput};

use crate::error::{AstralformError, Result};

pub(crate) const PROJECTS_PATH: &str = "/v1/dashboard/projects";

/// Validate an identifier interpolated into a request path.
pub(crate) fn path_segment<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AstralformError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    if trimmed.contains(['/', '?', '#']) {
        return Err(AstralformError::InvalidArgument(format!(
            "{field} contains invalid characters: {trimmed}"
        )));
    }
    Ok(trimmed)
}

pub(crate) fn project_path(project_id: &str) -> Result<String> {
    Ok(format!(
        "{PROJECTS_PATH}/{}",
        path_segment("project_id", project_id)?
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_path_formats_id() {
        assert_eq!(
            project_path("p_123").unwrap(),
            "/v1/dashboard/projects/p_123"
        );
    }

    #[test]
    fn path_segment_rejects_empty_and_separators() {
        assert!(matches!(
            path_segment("project_id", "  "),
            Err(AstralformError::InvalidArgument(_))
        ));
        assert!(matches!(
            path_segment("key_id", "a/b"),
            Err(AstralformError::InvalidArgument(_))
        ));
    }
}
