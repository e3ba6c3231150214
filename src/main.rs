use clap::Parser;
use openwebui_mcp_server::Cli;
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    openwebui_mcp_server::run(cli).await
}
