use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "openwebui-mcp-server",
    version,
    about = "MCP server exposing OpenWebUI RAG chat over stdio"
)]
pub struct Cli {
    /// Env file read before the process environment (default: config/.env)
    #[arg(long)]
    pub env_file: Option<PathBuf>,
    /// Disable logging on stderr
    #[arg(long, short)]
    pub quiet: bool,
}
