use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

use super::{path_segment, project_path};
use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

/// Environment an API key is issued for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    schemars::JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ApiKeyEnvironment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateApiKeyInput {
    #[builder(into)]
    #[schemars(description = "Name of the API key")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Key environment: development or production")]
    pub environment: Option<ApiKeyEnvironment>,
}

fn api_keys_path(project_id: &str) -> Result<String> {
    Ok(format!("{}/api-keys", project_path(project_id)?))
}

pub async fn list_api_keys(gateway: &Gateway, project_id: &str) -> Result<Value> {
    gateway
        .request(&api_keys_path(project_id)?, RequestOptions::get())
        .await
}

/// Create a key. `full_key` in the response is only ever shown once.
pub async fn create_api_key(
    gateway: &Gateway,
    project_id: &str,
    input: &CreateApiKeyInput,
) -> Result<Value> {
    gateway
        .request(
            &api_keys_path(project_id)?,
            RequestOptions::post(serde_json::to_value(input)?),
        )
        .await
}

pub async fn revoke_api_key(gateway: &Gateway, project_id: &str, key_id: &str) -> Result<()> {
    let path = format!(
        "{}/{}",
        api_keys_path(project_id)?,
        path_segment("key_id", key_id)?
    );
    gateway
        .request::<Value>(&path, RequestOptions::delete())
        .await?;
    Ok(())
}
