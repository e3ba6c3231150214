pub mod application;
pub mod cli;
pub mod config;
pub mod constants;
pub mod domain;
pub mod infrastructure;

pub use application::{Dispatcher, McpError, ToolOutput};
pub use cli::Cli;
pub use config::AppConfig;
pub use domain::types;
pub use infrastructure::{rpc, upstream};

use rpc::{McpServer, Shutdown};
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

pub async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    init_tracing(cli.quiet);
    info!("Starting {}", constants::SERVER_NAME);
    debug!(env_file = ?cli.env_file, "CLI arguments parsed");

    let config = AppConfig::load(cli.env_file.as_deref())?;
    if !config.has_api_key() {
        warn!(
            variable = constants::API_KEY_ENV,
            "API key is not set; every tool call will be rejected"
        );
    }
    if config.api_url.is_empty() {
        warn!(
            variable = constants::API_URL_ENV,
            "Upstream URL is not set; chat requests will fail to connect"
        );
    }

    let server = McpServer::new(Dispatcher::from_config(config));
    info!("OpenWebUI MCP server running on stdio");
    let reason = server.serve_stdio().await?;
    info!(?reason, "Server stopped");
    if reason == Shutdown::Interrupted {
        // The runtime cannot drop while tokio's blocking stdin read is
        // parked, so leave directly. Output was flushed by `serve`.
        std::process::exit(0);
    }
    Ok(())
}

/// Logs go to stderr; stdout carries the protocol.
fn init_tracing(quiet: bool) {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        let filter = if quiet {
            EnvFilter::new("off")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        };
        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_level(true)
            .init();
    });
}
