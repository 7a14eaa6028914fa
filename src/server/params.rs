//! Tool argument schemas.
//!
//! Resource input structs are flattened next to the path identifiers so the
//! advertised schema stays a single flat object.

use rmcp::schemars;
use serde::Deserialize;

use crate::docs::DocCategory;
use crate::resources::{
    AddMcpServerInput, AnalyticsRange, CreateApiKeyInput, SetLlmConfigInput, UpdateMcpServerInput,
    UpdateProjectInput, UpdateToolInput,
};

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DeviceTokenParams {
    #[schemars(description = "The device code from astralform_device_code")]
    pub device_code: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProjectParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[serde(flatten)]
    pub input: UpdateProjectInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CreateApiKeyParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[serde(flatten)]
    pub input: CreateApiKeyInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ApiKeyParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[schemars(description = "The API key UUID")]
    pub key_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetLlmConfigParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[serde(flatten)]
    pub input: SetLlmConfigInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AddMcpServerParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[serde(flatten)]
    pub input: AddMcpServerInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct McpServerParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[schemars(description = "The MCP server UUID")]
    pub server_id: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateMcpServerParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[schemars(description = "The MCP server UUID")]
    pub server_id: String,
    #[serde(flatten)]
    pub input: UpdateMcpServerInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ProjectToolParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[schemars(description = "Tool name (e.g. 'tavily')")]
    pub tool_name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProjectToolParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[schemars(description = "Tool name (e.g. 'tavily')")]
    pub tool_name: String,
    #[serde(flatten)]
    pub input: UpdateToolInput,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalyticsParams {
    #[schemars(description = "The project UUID")]
    pub project_id: String,
    #[serde(flatten)]
    pub range: AnalyticsRange,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchDocsParams {
    #[schemars(description = "Search query")]
    pub query: String,
    #[serde(default)]
    #[schemars(description = "Filter by category")]
    pub category: Option<DocCategory>,
    #[serde(default)]
    #[schemars(description = "Maximum number of results (default 5)")]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetDocParams {
    #[schemars(description = "Documentation path (e.g. '/ios-sdk/getting-started')")]
    pub path: String,
}
