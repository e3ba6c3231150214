//! MCP JSON-RPC transport over stdio

mod server;
mod types;

pub use server::{McpServer, ServerError, Shutdown};
pub use types::{RpcError, RpcRequest, RpcResponse};
