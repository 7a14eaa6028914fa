use std::collections::BTreeMap;

use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{path_segment, project_path};
use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

/// New MCP server definition; either `template_id` or `command` is expected.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AddMcpServerInput {
    #[builder(into)]
    #[schemars(description = "Display name for the MCP server")]
    pub name: String,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Template id to start from (see astralform_list_mcp_templates)")]
    pub template_id: Option<String>,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Command to launch the server when not using a template")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Command arguments")]
    pub args: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Environment variables passed to the server")]
    pub env_vars: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateMcpServerInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Replacement environment variables")]
    pub env_vars: Option<BTreeMap<String, String>>,
}

fn servers_path(project_id: &str) -> Result<String> {
    Ok(format!("{}/mcp-servers", project_path(project_id)?))
}

fn server_path(project_id: &str, server_id: &str) -> Result<String> {
    Ok(format!(
        "{}/{}",
        servers_path(project_id)?,
        path_segment("server_id", server_id)?
    ))
}

pub async fn list_mcp_templates(gateway: &Gateway) -> Result<Value> {
    gateway
        .request("/v1/dashboard/mcp-templates", RequestOptions::get())
        .await
}

pub async fn list_mcp_servers(gateway: &Gateway, project_id: &str) -> Result<Value> {
    gateway
        .request(&servers_path(project_id)?, RequestOptions::get())
        .await
}

pub async fn add_mcp_server(
    gateway: &Gateway,
    project_id: &str,
    input: &AddMcpServerInput,
) -> Result<Value> {
    gateway
        .request(
            &servers_path(project_id)?,
            RequestOptions::post(serde_json::to_value(input)?),
        )
        .await
}

pub async fn update_mcp_server(
    gateway: &Gateway,
    project_id: &str,
    server_id: &str,
    input: &UpdateMcpServerInput,
) -> Result<Value> {
    gateway
        .request(
            &server_path(project_id, server_id)?,
            RequestOptions::patch(serde_json::to_value(input)?),
        )
        .await
}

/// Flip the server's enabled flag; returns the updated server.
pub async fn toggle_mcp_server(
    gateway: &Gateway,
    project_id: &str,
    server_id: &str,
) -> Result<Value> {
    let path = format!("{}/toggle", server_path(project_id, server_id)?);
    gateway
        .request(&path, RequestOptions::with_method(reqwest::Method::POST))
        .await
}

pub async fn delete_mcp_server(gateway: &Gateway, project_id: &str, server_id: &str) -> Result<()> {
    gateway
        .request::<Value>(&server_path(project_id, server_id)?, RequestOptions::delete())
        .await?;
    Ok(())
}
