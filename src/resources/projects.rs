use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{project_path, PROJECTS_PATH};
use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CreateProjectInput {
    #[builder(into)]
    #[schemars(description = "Name of the new project")]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct UpdateProjectInput {
    #[builder(into)]
    #[schemars(description = "New project name")]
    pub name: String,
}

pub async fn list_projects(gateway: &Gateway) -> Result<Value> {
    gateway.request(PROJECTS_PATH, RequestOptions::get()).await
}

pub async fn get_project(gateway: &Gateway, project_id: &str) -> Result<Value> {
    gateway
        .request(&project_path(project_id)?, RequestOptions::get())
        .await
}

/// Create a project. The response carries the project's `encryption_key`,
/// which the server never returns again.
pub async fn create_project(gateway: &Gateway, input: &CreateProjectInput) -> Result<Value> {
    gateway
        .request(
            PROJECTS_PATH,
            RequestOptions::post(serde_json::to_value(input)?),
        )
        .await
}

pub async fn update_project(
    gateway: &Gateway,
    project_id: &str,
    input: &UpdateProjectInput,
) -> Result<Value> {
    gateway
        .request(
            &project_path(project_id)?,
            RequestOptions::patch(serde_json::to_value(input)?),
        )
        .await
}

pub async fn delete_project(gateway: &Gateway, project_id: &str) -> Result<()> {
    gateway
        .request::<Value>(&project_path(project_id)?, RequestOptions::delete())
        .await?;
    Ok(())
}
