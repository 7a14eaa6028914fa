use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{path_segment, project_path};
use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateToolInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Enable or disable the tool for this project")]
    pub enabled: Option<bool>,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Custom API key for tools that need one")]
    pub api_key: Option<String>,
}

fn tool_path(project_id: &str, tool_name: &str) -> Result<String> {
    Ok(format!(
        "{}/tools/{}",
        project_path(project_id)?,
        path_segment("tool_name", tool_name)?
    ))
}

pub async fn list_platform_tools(gateway: &Gateway) -> Result<Value> {
    gateway
        .request("/v1/dashboard/platform-tools", RequestOptions::get())
        .await
}

pub async fn get_project_tools(gateway: &Gateway, project_id: &str) -> Result<Value> {
    let path = format!("{}/tools", project_path(project_id)?);
    gateway.request(&path, RequestOptions::get()).await
}

pub async fn update_project_tool(
    gateway: &Gateway,
    project_id: &str,
    tool_name: &str,
    input: &UpdateToolInput,
) -> Result<Value> {
    gateway
        .request(
            &tool_path(project_id, tool_name)?,
            RequestOptions::put(serde_json::to_value(input)?),
        )
        .await
}

/// Remove the project's override so the tool falls back to platform defaults.
pub async fn delete_project_tool(gateway: &Gateway, project_id: &str, tool_name: &str) -> Result<()> {
    gateway
        .request::<Value>(&tool_path(project_id, tool_name)?, RequestOptions::delete())
        .await?;
    Ok(())
}
