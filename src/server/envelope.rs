//! Uniform tool-result envelopes.

use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::{AstralformError, Result};

pub const CREATE_PROJECT_WARNING: &str =
    "The encryption_key above is shown ONLY ONCE. Save it securely!";
pub const CREATE_API_KEY_WARNING: &str = "The full_key above is shown ONLY ONCE. Save it securely!";

/// Success result carrying pretty-printed JSON.
pub fn json_result<T: Serialize>(value: &T) -> std::result::Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

/// `isError` result with body `{"error": message}`.
pub fn error_result(error: &AstralformError) -> CallToolResult {
    tracing::debug!(error = %error, "tool call failed");
    CallToolResult::error(vec![Content::text(
        json!({ "error": error.to_string() }).to_string(),
    )])
}

pub fn respond<T: Serialize>(result: Result<T>) -> std::result::Result<CallToolResult, McpError> {
    match result {
        Ok(value) => json_result(&value),
        Err(err) => Ok(error_result(&err)),
    }
}

/// `{"success": true, "message": ...}` for void operations.
pub fn acknowledge(result: Result<()>, message: &str) -> std::result::Result<CallToolResult, McpError> {
    respond(result.map(|()| json!({ "success": true, "message": message })))
}

/// Insert a `WARNING` key into an object response; other shapes pass through.
pub fn with_warning(mut value: Value, warning: &str) -> Value {
    if let Value::Object(map) = &mut value {
        map.insert("WARNING".to_string(), Value::String(warning.to_string()));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(result: &CallToolResult) -> String {
        result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .unwrap()
    }

    #[test]
    fn errors_become_is_error_results() {
        let result = respond::<Value>(Err(AstralformError::NotAuthenticated)).unwrap();
        assert_eq!(result.is_error, Some(true));
        let body: Value = serde_json::from_str(&text(&result)).unwrap();
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Not authenticated."));
    }

    #[test]
    fn acknowledge_wraps_success_message() {
        let result = acknowledge(Ok(()), "Project deleted").unwrap();
        assert_ne!(result.is_error, Some(true));
        let body: Value = serde_json::from_str(&text(&result)).unwrap();
        assert_eq!(body, json!({"success": true, "message": "Project deleted"}));
    }

    #[test]
    fn warning_only_applies_to_objects() {
        assert_eq!(
            with_warning(json!({"id": "p1"}), "careful"),
            json!({"id": "p1", "WARNING": "careful"})
        );
        assert_eq!(with_warning(json!([1, 2]), "careful"), json!([1, 2]));
    }
}
