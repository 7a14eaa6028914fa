//! MCP server exposing Astralform operations as tools over stdio.

pub mod envelope;
pub mod params;

use std::sync::Arc;

use rmcp::handler::server::{tool::ToolRouter, wrapper::Parameters};
use rmcp::model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo};
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde_json::json;

use crate::api::Gateway;
use crate::auth::{DeviceAuthClient, FileCredentialStore, PollOutcome};
use crate::config::AstralformConfig;
use crate::docs::DocsClient;
use crate::error::AstralformError;
use crate::resources::{
    analytics, api_keys, developer, llm_config, mcp_servers, platform_tools, projects,
    CreateProjectInput,
};

use envelope::{acknowledge, json_result, respond, with_warning};
use params::*;

pub const SERVER_NAME: &str = "astralform";

type ToolResult = Result<CallToolResult, McpError>;

/// Tool dispatcher. Cheap to clone; every clone shares the same HTTP pool,
/// credential store and docs cache.
#[derive(Clone)]
pub struct AstralformServer {
    gateway: Gateway,
    device: DeviceAuthClient,
    docs: DocsClient,
    tool_router: ToolRouter<Self>,
}

impl AstralformServer {
    pub fn new(gateway: Gateway, device: DeviceAuthClient, docs: DocsClient) -> Self {
        Self {
            gateway,
            device,
            docs,
            tool_router: Self::tool_router(),
        }
    }

    /// Wire production components from configuration.
    pub fn from_config(config: &AstralformConfig) -> Self {
        let http = reqwest::Client::new();
        let store = Arc::new(FileCredentialStore::new(config.credentials_path()));
        let gateway = Gateway::new(config, store.clone()).with_http_client(http.clone());
        let device = DeviceAuthClient::new(config.api_url(), store).with_http_client(http.clone());
        let docs = DocsClient::new(config).with_http_client(http);
        Self::new(gateway, device, docs)
    }

    pub fn gateway(&self) -> &Gateway {
        &self.gateway
    }
}

#[tool_router]
impl AstralformServer {
    // Authentication

    #[tool(
        name = "astralform_device_code",
        description = "Start OAuth device authorization flow. Returns a user code for the user to enter at the verification URL."
    )]
    async fn device_code(&self) -> ToolResult {
        respond(
            self.device
                .request_device_code()
                .await
                .map_err(AstralformError::from),
        )
    }

    #[tool(
        name = "astralform_device_token",
        description = "Poll for device authorization token. Call repeatedly until it returns a token or error."
    )]
    async fn device_token(&self, Parameters(p): Parameters<DeviceTokenParams>) -> ToolResult {
        let outcome = match self.device.poll_for_token(&p.device_code).await {
            Ok(outcome) => outcome,
            Err(err) => return respond::<()>(Err(err.into())),
        };
        let (body, failed) = match outcome {
            PollOutcome::Success(_) => (
                json!({"status": "success", "message": "Successfully authenticated!"}),
                false,
            ),
            PollOutcome::Pending => (
                json!({"status": "pending", "message": "Waiting for user authorization..."}),
                false,
            ),
            PollOutcome::Expired => (
                json!({"status": "expired", "error": "Device code expired. Please start again."}),
                true,
            ),
            PollOutcome::Denied => (
                json!({"status": "denied", "error": "User denied authorization."}),
                true,
            ),
        };
        let content = vec![Content::text(body.to_string())];
        Ok(if failed {
            CallToolResult::error(content)
        } else {
            CallToolResult::success(content)
        })
    }

    // Developer

    #[tool(
        name = "astralform_whoami",
        description = "Get the current authenticated developer's profile. Returns email, name, and admin status."
    )]
    async fn whoami(&self) -> ToolResult {
        respond(developer::whoami(&self.gateway).await)
    }

    #[tool(
        name = "astralform_get_stats",
        description = "Get aggregate statistics for the developer: projects count, API keys count, conversations count."
    )]
    async fn get_stats(&self) -> ToolResult {
        respond(developer::get_stats(&self.gateway).await)
    }

    // Projects

    #[tool(
        name = "astralform_list_projects",
        description = "List all Astralform projects for the authenticated developer."
    )]
    async fn list_projects(&self) -> ToolResult {
        respond(projects::list_projects(&self.gateway).await)
    }

    #[tool(
        name = "astralform_get_project",
        description = "Get details for a specific project."
    )]
    async fn get_project(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        respond(projects::get_project(&self.gateway, &p.project_id).await)
    }

    #[tool(
        name = "astralform_create_project",
        description = "Create a new project. IMPORTANT: Returns an encryption_key that is shown ONLY ONCE. User must save it."
    )]
    async fn create_project(&self, Parameters(p): Parameters<CreateProjectInput>) -> ToolResult {
        respond(
            projects::create_project(&self.gateway, &p)
                .await
                .map(|created| with_warning(created, envelope::CREATE_PROJECT_WARNING)),
        )
    }

    #[tool(
        name = "astralform_update_project",
        description = "Update a project's name."
    )]
    async fn update_project(&self, Parameters(p): Parameters<UpdateProjectParams>) -> ToolResult {
        respond(projects::update_project(&self.gateway, &p.project_id, &p.input).await)
    }

    #[tool(
        name = "astralform_delete_project",
        description = "Delete a project. WARNING: This is irreversible and deletes all project data."
    )]
    async fn delete_project(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        acknowledge(
            projects::delete_project(&self.gateway, &p.project_id).await,
            "Project deleted",
        )
    }

    // API keys

    #[tool(
        name = "astralform_list_api_keys",
        description = "List API keys for a project. Only key prefixes are returned, never full keys."
    )]
    async fn list_api_keys(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        respond(api_keys::list_api_keys(&self.gateway, &p.project_id).await)
    }

    #[tool(
        name = "astralform_create_api_key",
        description = "Create a new API key. IMPORTANT: Returns the full key ONLY ONCE. User must save it."
    )]
    async fn create_api_key(&self, Parameters(p): Parameters<CreateApiKeyParams>) -> ToolResult {
        respond(
            api_keys::create_api_key(&self.gateway, &p.project_id, &p.input)
                .await
                .map(|created| with_warning(created, envelope::CREATE_API_KEY_WARNING)),
        )
    }

    #[tool(
        name = "astralform_revoke_api_key",
        description = "Revoke an API key. The key will no longer work."
    )]
    async fn revoke_api_key(&self, Parameters(p): Parameters<ApiKeyParams>) -> ToolResult {
        acknowledge(
            api_keys::revoke_api_key(&self.gateway, &p.project_id, &p.key_id).await,
            "API key revoked",
        )
    }

    // LLM configuration

    #[tool(
        name = "astralform_list_llm_providers",
        description = "List available LLM providers (OpenAI, Anthropic, Groq, Ollama, Platform)."
    )]
    async fn list_llm_providers(&self) -> ToolResult {
        respond(llm_config::list_llm_providers(&self.gateway).await)
    }

    #[tool(
        name = "astralform_get_llm_config",
        description = "Get the current LLM configuration for a project."
    )]
    async fn get_llm_config(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        match llm_config::get_llm_config(&self.gateway, &p.project_id).await {
            Ok(Some(config)) => json_result(&config),
            Ok(None) => Ok(CallToolResult::success(vec![Content::text(
                json!({"message": "No LLM configuration set"}).to_string(),
            )])),
            Err(err) => Ok(envelope::error_result(&err)),
        }
    }

    #[tool(
        name = "astralform_set_llm_config",
        description = "Set the LLM provider and model for a project."
    )]
    async fn set_llm_config(&self, Parameters(p): Parameters<SetLlmConfigParams>) -> ToolResult {
        respond(llm_config::set_llm_config(&self.gateway, &p.project_id, &p.input).await)
    }

    #[tool(
        name = "astralform_delete_llm_config",
        description = "Remove LLM configuration from a project."
    )]
    async fn delete_llm_config(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        acknowledge(
            llm_config::delete_llm_config(&self.gateway, &p.project_id).await,
            "LLM configuration removed",
        )
    }

    // MCP servers

    #[tool(
        name = "astralform_list_mcp_templates",
        description = "List available MCP server templates (GitHub, Slack, etc.)."
    )]
    async fn list_mcp_templates(&self) -> ToolResult {
        respond(mcp_servers::list_mcp_templates(&self.gateway).await)
    }

    #[tool(
        name = "astralform_list_mcp_servers",
        description = "List MCP servers configured for a project."
    )]
    async fn list_mcp_servers(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        respond(mcp_servers::list_mcp_servers(&self.gateway, &p.project_id).await)
    }

    #[tool(
        name = "astralform_add_mcp_server",
        description = "Add an MCP server to a project."
    )]
    async fn add_mcp_server(&self, Parameters(p): Parameters<AddMcpServerParams>) -> ToolResult {
        respond(mcp_servers::add_mcp_server(&self.gateway, &p.project_id, &p.input).await)
    }

    #[tool(
        name = "astralform_update_mcp_server",
        description = "Update an MCP server's environment variables."
    )]
    async fn update_mcp_server(
        &self,
        Parameters(p): Parameters<UpdateMcpServerParams>,
    ) -> ToolResult {
        respond(
            mcp_servers::update_mcp_server(&self.gateway, &p.project_id, &p.server_id, &p.input)
                .await,
        )
    }

    #[tool(
        name = "astralform_toggle_mcp_server",
        description = "Enable or disable an MCP server."
    )]
    async fn toggle_mcp_server(&self, Parameters(p): Parameters<McpServerParams>) -> ToolResult {
        respond(mcp_servers::toggle_mcp_server(&self.gateway, &p.project_id, &p.server_id).await)
    }

    #[tool(
        name = "astralform_delete_mcp_server",
        description = "Remove an MCP server from a project."
    )]
    async fn delete_mcp_server(&self, Parameters(p): Parameters<McpServerParams>) -> ToolResult {
        acknowledge(
            mcp_servers::delete_mcp_server(&self.gateway, &p.project_id, &p.server_id).await,
            "MCP server removed",
        )
    }

    // Platform tools

    #[tool(
        name = "astralform_list_platform_tools",
        description = "List available platform tools (Tavily search, etc.)."
    )]
    async fn list_platform_tools(&self) -> ToolResult {
        respond(platform_tools::list_platform_tools(&self.gateway).await)
    }

    #[tool(
        name = "astralform_get_project_tools",
        description = "Get platform tool configuration for a project."
    )]
    async fn get_project_tools(&self, Parameters(p): Parameters<ProjectParams>) -> ToolResult {
        respond(platform_tools::get_project_tools(&self.gateway, &p.project_id).await)
    }

    #[tool(
        name = "astralform_update_project_tool",
        description = "Enable/disable a platform tool or set custom API key."
    )]
    async fn update_project_tool(
        &self,
        Parameters(p): Parameters<UpdateProjectToolParams>,
    ) -> ToolResult {
        respond(
            platform_tools::update_project_tool(&self.gateway, &p.project_id, &p.tool_name, &p.input)
                .await,
        )
    }

    #[tool(
        name = "astralform_delete_project_tool",
        description = "Remove a project's tool override so platform defaults apply again."
    )]
    async fn delete_project_tool(&self, Parameters(p): Parameters<ProjectToolParams>) -> ToolResult {
        acknowledge(
            platform_tools::delete_project_tool(&self.gateway, &p.project_id, &p.tool_name).await,
            "Tool configuration removed",
        )
    }

    // Analytics

    #[tool(
        name = "astralform_get_analytics",
        description = "Get usage analytics for a project (conversations, tokens, tool usage)."
    )]
    async fn get_analytics(&self, Parameters(p): Parameters<AnalyticsParams>) -> ToolResult {
        respond(analytics::get_analytics(&self.gateway, &p.project_id, &p.range).await)
    }

    // Documentation

    #[tool(
        name = "astralform_search_docs",
        description = "Search Astralform documentation."
    )]
    async fn search_docs(&self, Parameters(p): Parameters<SearchDocsParams>) -> ToolResult {
        respond(self.docs.search_docs(&p.query, p.category, p.limit).await)
    }

    #[tool(
        name = "astralform_get_doc",
        description = "Get the full content of a documentation page."
    )]
    async fn get_doc(&self, Parameters(p): Parameters<GetDocParams>) -> ToolResult {
        respond(self.docs.get_doc(&p.path).await)
    }
}

#[tool_handler]
impl ServerHandler for AstralformServer {
    fn get_info(&self) -> ServerInfo {
        let mut server_info = Implementation::from_build_env();
        server_info.name = SERVER_NAME.into();
        server_info.version = env!("CARGO_PKG_VERSION").into();
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info,
            instructions: Some(
                "Manage Astralform projects, API keys, LLM configuration, MCP servers, platform tools and analytics, and search the Astralform docs. If a tool reports that you are not authenticated, run astralform_device_code and poll astralform_device_token until it succeeds."
                    .into(),
            ),
            ..Default::default()
        }
    }
}

/// Serve tools on stdin/stdout until the client disconnects.
pub async fn run_stdio(config: &AstralformConfig) -> crate::error::Result<()> {
    tracing::info!(api_url = config.api_url(), "starting MCP server on stdio");
    let service = AstralformServer::from_config(config)
        .serve((tokio::io::stdin(), tokio::io::stdout()))
        .await
        .map_err(|e| AstralformError::Configuration(format!("failed to start MCP server: {e}")))?;
    let reason = service
        .waiting()
        .await
        .map_err(|e| AstralformError::Configuration(format!("MCP server task failed: {e}")))?;
    tracing::info!(?reason, "MCP server stopped");
    Ok(())
}
