//! astralform-mcp: Astralform dashboard API exposed as MCP tools.
//!
//! The crate drives the OAuth device-authorization flow, persists and
//! refreshes credentials, and maps each MCP tool call onto one
//! authenticated request against the Astralform REST API.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use astralform_mcp::api::Gateway;
//! use astralform_mcp::auth::FileCredentialStore;
//! use astralform_mcp::config::AstralformConfig;
//! use astralform_mcp::resources::projects;
//!
//! # async fn example() -> astralform_mcp::error::Result<()> {
//! let config = AstralformConfig::from_env();
//! let store = Arc::new(FileCredentialStore::new(config.credentials_path()));
//! let gateway = Gateway::new(&config, store);
//! let all = projects::list_projects(&gateway).await?;
//! println!("{all:#}");
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod docs;
pub mod error;
pub mod resources;
pub mod server;
