//! Decoding of loosely-typed `tools/call` arguments into typed requests.

use super::error::McpError;
use super::registry::{CHAT_WITH_RAG, UPLOAD_FILE};
use crate::types::{ChatRequest, UploadRequest};
use serde_json::{Map as JsonMap, Value};

/// A validated tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    UploadFile(UploadRequest),
    ChatWithRag(ChatRequest),
}

impl ToolCall {
    /// Validate `arguments` for the named tool.
    ///
    /// String fields are never coerced. Missing arguments are reported before
    /// an unknown tool name.
    pub fn decode(
        name: &str,
        arguments: Option<&Value>,
        default_model: &str,
    ) -> Result<Self, McpError> {
        let args = match arguments {
            None | Some(Value::Null) => {
                return Err(McpError::invalid_params("Arguments are required"));
            }
            Some(Value::Object(map)) => map,
            Some(_) => return Err(McpError::invalid_params("Arguments must be an object")),
        };

        match name {
            UPLOAD_FILE => Ok(ToolCall::UploadFile(UploadRequest {
                file_path: required_string(args, "file_path")?,
            })),
            CHAT_WITH_RAG => decode_chat(args, default_model).map(ToolCall::ChatWithRag),
            _ => Err(McpError::method_not_found("Unknown tool")),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::UploadFile(_) => UPLOAD_FILE,
            ToolCall::ChatWithRag(_) => CHAT_WITH_RAG,
        }
    }
}

fn decode_chat(args: &JsonMap<String, Value>, default_model: &str) -> Result<ChatRequest, McpError> {
    let query = required_string(args, "query")?;
    let model = match args.get("model") {
        None | Some(Value::Null) => default_model.to_string(),
        Some(Value::String(model)) if model.is_empty() => default_model.to_string(),
        Some(Value::String(model)) => model.clone(),
        Some(_) => return Err(McpError::invalid_params("model must be a string")),
    };

    Ok(ChatRequest {
        model,
        query,
        file_id: optional_string(args, "file_id"),
        collection_id: optional_string(args, "collection_id"),
    })
}

fn required_string(args: &JsonMap<String, Value>, field: &str) -> Result<String, McpError> {
    match args.get(field) {
        Some(Value::String(value)) => Ok(value.clone()),
        _ => Err(McpError::invalid_params(format!("{field} must be a string"))),
    }
}

/// Wrong-typed and empty values read as absent.
fn optional_string(args: &JsonMap<String, Value>, field: &str) -> Option<String> {
    args.get(field)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
