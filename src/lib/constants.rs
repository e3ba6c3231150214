//! Application constants
//!
//! Single source of truth for environment keys, paths and protocol values.

/// Default environment file path
pub const ENV_PATH: &str = "config/.env";

/// Environment variable holding the upstream base URL
pub const API_URL_ENV: &str = "OPENWEBUI_API_URL";

/// Environment variable holding the upstream bearer credential
pub const API_KEY_ENV: &str = "OPENWEBUI_API_KEY";

/// Environment variable overriding the default chat model
pub const DEFAULT_MODEL_ENV: &str = "DEFAULT_MODEL";

/// Model used when neither the caller nor the environment names one
pub const FALLBACK_MODEL: &str = "gpt-4-turbo";

/// Upstream chat completion path, relative to the base URL
pub const CHAT_COMPLETIONS_PATH: &str = "/chat/completions";

/// Name reported in the MCP `initialize` handshake
pub const SERVER_NAME: &str = "openwebui-server";

/// MCP protocol revision spoken when the client does not request one
pub const PROTOCOL_VERSION: &str = "2025-06-18";
