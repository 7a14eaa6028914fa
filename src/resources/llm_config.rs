use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::project_path;
use crate::api::{Gateway, RequestOptions};
use crate::error::{AstralformError, Result};

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct SetLlmConfigInput {
    #[builder(into)]
    #[schemars(description = "LLM provider id (e.g. openai, anthropic)")]
    pub provider: String,
    #[builder(into)]
    #[schemars(description = "Model id offered by the provider")]
    pub model: String,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Provider API key, required for BYOK providers")]
    pub api_key: Option<String>,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Custom base URL for OpenAI-compatible providers")]
    pub base_url: Option<String>,
}

fn llm_config_path(project_id: &str) -> Result<String> {
    Ok(format!("{}/llm-config", project_path(project_id)?))
}

/// Providers and their models available to projects.
pub async fn list_llm_providers(gateway: &Gateway) -> Result<Value> {
    gateway
        .request("/v1/dashboard/llm-providers", RequestOptions::get())
        .await
}

/// Current LLM configuration; `None` when the project has none (404).
pub async fn get_llm_config(gateway: &Gateway, project_id: &str) -> Result<Option<Value>> {
    match gateway
        .request(&llm_config_path(project_id)?, RequestOptions::get())
        .await
    {
        Ok(config) => Ok(Some(config)),
        Err(AstralformError::Api { status: 404, .. }) => Ok(None),
        Err(err) => Err(err),
    }
}

pub async fn set_llm_config(
    gateway: &Gateway,
    project_id: &str,
    input: &SetLlmConfigInput,
) -> Result<Value> {
    gateway
        .request(
            &llm_config_path(project_id)?,
            RequestOptions::put(serde_json::to_value(input)?),
        )
        .await
}

pub async fn delete_llm_config(gateway: &Gateway, project_id: &str) -> Result<()> {
    gateway
        .request::<Value>(&llm_config_path(project_id)?, RequestOptions::delete())
        .await?;
    Ok(())
}
