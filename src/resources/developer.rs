use serde_json::Value;

use crate::api::{Gateway, RequestOptions};
use crate::error::Result;

/// Profile of the authenticated developer.
pub async fn whoami(gateway: &Gateway) -> Result<Value> {
    gateway.request("/v1/dashboard/me", RequestOptions::get()).await
}

/// Account-wide counters (projects, keys, conversations, messages).
pub async fn get_stats(gateway: &Gateway) -> Result<Value> {
    gateway
        .request("/v1/dashboard/stats", RequestOptions::get())
        .await
}
