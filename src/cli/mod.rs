//! CLI entry point for astralform-mcp.

pub mod auth;
pub mod errors;

use clap::{Parser, Subcommand};

/// Astralform MCP server
#[derive(Parser, Debug)]
#[command(
    name = "astralform-mcp",
    version,
    about = "Astralform dashboard tools for AI coding assistants over MCP"
)]
pub struct Cli {
    /// Override the Astralform API base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the MCP server on stdio (default)
    Serve,
    /// Authentication management
    Auth(AuthArgs),
}

/// Arguments for the `auth` subcommand group.
#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommands,
}

/// Auth subcommands for login, status, and logout.
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Login with the device authorization flow
    Login,
    /// Show authentication status
    Status,
    /// Remove stored credentials
    Logout,
}

impl Cli {
    /// Subcommand to run; a bare invocation serves MCP.
    pub fn command_or_default(self) -> Commands {
        self.command.unwrap_or(Commands::Serve)
    }
}
