use bon::Builder;
use rmcp::schemars;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::project_path;
use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

/// Optional date window for analytics, as `YYYY-MM-DD` strings.
#[derive(Debug, Clone, Default, PartialEq, Builder, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AnalyticsRange {
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Start date (YYYY-MM-DD)")]
    pub start_date: Option<String>,
    #[builder(into)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(description = "End date (YYYY-MM-DD)")]
    pub end_date: Option<String>,
}

pub async fn get_analytics(
    gateway: &Gateway,
    project_id: &str,
    range: &AnalyticsRange,
) -> Result<Value> {
    let path = format!("{}/analytics", project_path(project_id)?);
    let options = RequestOptions::get()
        .query("start_date", non_empty(&range.start_date))
        .query("end_date", non_empty(&range.end_date));
    gateway.request(&path, options).await
}

fn non_empty(date: &Option<String>) -> Option<&str> {
    date.as_deref().filter(|d| !d.is_empty())
}
