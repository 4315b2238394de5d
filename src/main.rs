use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use valorant_tools::api::{build_router, state::AppState};
use valorant_tools::config::AppConfig;
use valorant_tools::mcp::McpServer;
use valorant_tools::tools::ToolRegistry;
use valorant_tools::upstream::UpstreamClient;

#[derive(Parser)]
#[command(name = "valorant-tools")]
#[command(about = "Valorant player, match and leaderboard tools over MCP and HTTP")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// HenrikDev API key (overrides VALORANT_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve MCP over stdin/stdout (default)
    Stdio,

    /// Serve the HTTP API
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Logs always go to stderr; stdout carries MCP frames.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let dotenv = dotenvy::dotenv();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    config.apply_env();
    config.apply_overrides(cli.api_key.clone(), cli.log_level.clone());
    config.validate()?;

    init_tracing(&config.log_level, cli.json_logs);

    tracing::info!("Starting valorant-tools v{}", env!("CARGO_PKG_VERSION"));
    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Failed to load .env: {}", e),
    }

    let client = UpstreamClient::from_config(&config.api)?;
    if client.credential().is_set().await {
        tracing::info!("Valorant API key loaded");
    } else {
        tracing::warn!("No Valorant API key configured; call the set_api_key tool before other tools");
    }
    let registry = ToolRegistry::new(Arc::new(client));

    match cli.command.unwrap_or(Commands::Stdio) {
        Commands::Stdio => {
            McpServer::new(registry).serve_stdio().await?;
        }
        Commands::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host.clone());
            let port = port.unwrap_or(config.server.port);

            let app = build_router(AppState::new(registry), &config.server.cors_origin);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("failed to bind {}", addr))?;
            tracing::info!("HTTP API: http://{}", addr);
            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
