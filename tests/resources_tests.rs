mod auth_support;

use std::collections::BTreeMap;
use std::sync::Arc;

use astralform_mcp::api::Gateway;
use astralform_mcp::error::AstralformError;
use astralform_mcp::resources::{
    analytics, api_keys, developer, llm_config, mcp_servers, platform_tools, projects,
    AddMcpServerInput, AnalyticsRange, ApiKeyEnvironment, CreateApiKeyInput, CreateProjectInput,
    SetLlmConfigInput, UpdateMcpServerInput, UpdateProjectInput, UpdateToolInput,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use auth_support::{credential, gateway_for, InMemoryCredentialStore};

async fn setup() -> (MockServer, Gateway) {
    let server = MockServer::start().await;
    let store = Arc::new(InMemoryCredentialStore::seeded(credential("tok", 3600.0)));
    let gateway = gateway_for(&server, store);
    (server, gateway)
}

fn ok(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

#[tokio::test]
async fn developer_endpoints() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/me"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ok(json!({"id": "d1", "email": "dev@example.com", "is_admin": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/stats"))
        .respond_with(ok(json!({"projects_count": 2})))
        .expect(1)
        .mount(&server)
        .await;

    let me = developer::whoami(&gateway).await.unwrap();
    assert_eq!(me["email"], "dev@example.com");
    let stats = developer::get_stats(&gateway).await.unwrap();
    assert_eq!(stats["projects_count"], 2);
}

#[tokio::test]
async fn project_lifecycle() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects"))
        .respond_with(ok(json!([{"id": "p1"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1"))
        .respond_with(ok(json!({"id": "p1", "name": "demo"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboard/projects"))
        .and(body_json(json!({"name": "demo"})))
        .respond_with(ok(json!({"id": "p1", "encryption_key": "ek"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v1/dashboard/projects/p1"))
        .and(body_json(json!({"name": "renamed"})))
        .respond_with(ok(json!({"id": "p1", "name": "renamed"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dashboard/projects/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(projects::list_projects(&gateway).await.unwrap(), json!([{"id": "p1"}]));
    assert_eq!(projects::get_project(&gateway, "p1").await.unwrap()["name"], "demo");
    let created = projects::create_project(&gateway, &CreateProjectInput::builder().name("demo").build())
        .await
        .unwrap();
    assert_eq!(created["encryption_key"], "ek");
    let updated = projects::update_project(
        &gateway,
        "p1",
        &UpdateProjectInput::builder().name("renamed").build(),
    )
    .await
    .unwrap();
    assert_eq!(updated["name"], "renamed");
    projects::delete_project(&gateway, "p1").await.unwrap();
}

#[tokio::test]
async fn blank_project_id_is_rejected_before_request() {
    let (server, gateway) = setup().await;
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = projects::get_project(&gateway, " ").await.unwrap_err();
    assert!(matches!(err, AstralformError::InvalidArgument(_)));
}

#[tokio::test]
async fn api_key_endpoints() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/api-keys"))
        .respond_with(ok(json!([{"id": "k1", "prefix": "sk_test_ab"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboard/projects/p1/api-keys"))
        .and(body_json(json!({"name": "ci", "environment": "production"})))
        .respond_with(ok(json!({"id": "k2", "full_key": "sk_live_secret"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dashboard/projects/p1/api-keys/k1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let keys = api_keys::list_api_keys(&gateway, "p1").await.unwrap();
    assert_eq!(keys[0]["prefix"], "sk_test_ab");
    let input = CreateApiKeyInput::builder()
        .name("ci")
        .environment(ApiKeyEnvironment::Production)
        .build();
    let created = api_keys::create_api_key(&gateway, "p1", &input).await.unwrap();
    assert_eq!(created["full_key"], "sk_live_secret");
    api_keys::revoke_api_key(&gateway, "p1", "k1").await.unwrap();
}

#[tokio::test]
async fn llm_config_endpoints() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/llm-providers"))
        .respond_with(ok(json!([{"id": "openai"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/llm-config"))
        .respond_with(ok(json!({"provider": "openai", "model_name": "gpt-4o"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p2/llm-config"))
        .respond_with(ResponseTemplate::new(404).set_body_string("{\"detail\":\"Not found\"}"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/dashboard/projects/p1/llm-config"))
        .and(body_json(json!({"provider": "openai", "model": "gpt-4o", "api_key": "sk-x"})))
        .respond_with(ok(json!({"provider": "openai", "has_api_key": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dashboard/projects/p1/llm-config"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        llm_config::list_llm_providers(&gateway).await.unwrap(),
        json!([{"id": "openai"}])
    );
    let config = llm_config::get_llm_config(&gateway, "p1").await.unwrap();
    assert_eq!(config.unwrap()["model_name"], "gpt-4o");
    assert_eq!(llm_config::get_llm_config(&gateway, "p2").await.unwrap(), None);

    let input = SetLlmConfigInput::builder()
        .provider("openai")
        .model("gpt-4o")
        .api_key("sk-x")
        .build();
    let set = llm_config::set_llm_config(&gateway, "p1", &input).await.unwrap();
    assert_eq!(set["has_api_key"], true);
    llm_config::delete_llm_config(&gateway, "p1").await.unwrap();
}

#[tokio::test]
async fn llm_config_other_errors_propagate() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/llm-config"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = llm_config::get_llm_config(&gateway, "p1").await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn mcp_server_endpoints() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/mcp-templates"))
        .respond_with(ok(json!([{"id": "github"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/mcp-servers"))
        .respond_with(ok(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboard/projects/p1/mcp-servers"))
        .and(body_json(json!({
            "name": "files",
            "command": "npx",
            "args": ["-y", "@modelcontextprotocol/server-filesystem"]
        })))
        .respond_with(ok(json!({"id": "s1", "is_enabled": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/v1/dashboard/projects/p1/mcp-servers/s1"))
        .and(body_json(json!({"env_vars": {"ROOT": "/srv"}})))
        .respond_with(ok(json!({"id": "s1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/dashboard/projects/p1/mcp-servers/s1/toggle"))
        .respond_with(ok(json!({"id": "s1", "is_enabled": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dashboard/projects/p1/mcp-servers/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        mcp_servers::list_mcp_templates(&gateway).await.unwrap(),
        json!([{"id": "github"}])
    );
    assert_eq!(mcp_servers::list_mcp_servers(&gateway, "p1").await.unwrap(), json!([]));

    let add = AddMcpServerInput::builder()
        .name("files")
        .command("npx")
        .args(vec![
            "-y".to_string(),
            "@modelcontextprotocol/server-filesystem".to_string(),
        ])
        .build();
    assert_eq!(
        mcp_servers::add_mcp_server(&gateway, "p1", &add).await.unwrap()["id"],
        "s1"
    );

    let update = UpdateMcpServerInput::builder()
        .env_vars(BTreeMap::from([("ROOT".to_string(), "/srv".to_string())]))
        .build();
    mcp_servers::update_mcp_server(&gateway, "p1", "s1", &update)
        .await
        .unwrap();

    let toggled = mcp_servers::toggle_mcp_server(&gateway, "p1", "s1").await.unwrap();
    assert_eq!(toggled["is_enabled"], false);
    mcp_servers::delete_mcp_server(&gateway, "p1", "s1").await.unwrap();
}

#[tokio::test]
async fn platform_tool_endpoints() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/platform-tools"))
        .respond_with(ok(json!([{"name": "tavily"}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/tools"))
        .respond_with(ok(json!([{"name": "tavily", "is_enabled": true}])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/v1/dashboard/projects/p1/tools/tavily"))
        .and(body_json(json!({"enabled": false})))
        .respond_with(ok(json!({"name": "tavily", "is_enabled": false})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v1/dashboard/projects/p1/tools/tavily"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(
        platform_tools::list_platform_tools(&gateway).await.unwrap()[0]["name"],
        "tavily"
    );
    platform_tools::get_project_tools(&gateway, "p1").await.unwrap();
    let input = UpdateToolInput::builder().enabled(false).build();
    let updated = platform_tools::update_project_tool(&gateway, "p1", "tavily", &input)
        .await
        .unwrap();
    assert_eq!(updated["is_enabled"], false);
    platform_tools::delete_project_tool(&gateway, "p1", "tavily")
        .await
        .unwrap();
}

#[tokio::test]
async fn analytics_forwards_date_range() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/analytics"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-01-31"))
        .respond_with(ok(json!({"totals": {"messages": 42}})))
        .expect(1)
        .mount(&server)
        .await;

    let range = AnalyticsRange::builder()
        .start_date("2024-01-01")
        .end_date("2024-01-31")
        .build();
    let data = analytics::get_analytics(&gateway, "p1", &range).await.unwrap();
    assert_eq!(data["totals"]["messages"], 42);
}

#[tokio::test]
async fn analytics_without_range_sends_no_query() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/analytics"))
        .respond_with(ok(json!({"daily": []})))
        .expect(1)
        .mount(&server)
        .await;

    analytics::get_analytics(&gateway, "p1", &AnalyticsRange::default())
        .await
        .unwrap();
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), None);
}

#[tokio::test]
async fn analytics_skips_empty_dates() {
    let (server, gateway) = setup().await;
    Mock::given(method("GET"))
        .and(path("/v1/dashboard/projects/p1/analytics"))
        .and(query_param("end_date", "2024-01-31"))
        .respond_with(ok(json!({"daily": []})))
        .expect(1)
        .mount(&server)
        .await;

    let range = AnalyticsRange::builder()
        .start_date("")
        .end_date("2024-01-31")
        .build();
    analytics::get_analytics(&gateway, "p1", &range).await.unwrap();
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("end_date=2024-01-31"));
}
