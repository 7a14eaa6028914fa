//! astralform-mcp binary entry point.

use astralform_mcp::cli::errors::format_error_help;
use astralform_mcp::cli::{AuthCommands, Cli, Commands};
use astralform_mcp::config::AstralformConfig;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut config = AstralformConfig::from_env();
    if let Some(url) = cli.api_url.clone() {
        config = config.with_api_url(url);
    }

    let result = match cli.command_or_default() {
        Commands::Serve => astralform_mcp::server::run_stdio(&config).await,
        Commands::Auth(auth_args) => match auth_args.command {
            AuthCommands::Login => astralform_mcp::cli::auth::handle_login(&config).await,
            AuthCommands::Status => astralform_mcp::cli::auth::handle_status(&config).await,
            AuthCommands::Logout => astralform_mcp::cli::auth::handle_logout(&config).await,
        },
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {}", format_error_help(&e));
        std::process::exit(1);
    }
}

// stdout carries the MCP protocol, so logs go to stderr.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("astralform_mcp=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
