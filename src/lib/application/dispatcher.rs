//! Routes `tools/call` requests to the upload and chat handlers.

use super::arguments::ToolCall;
use super::error::McpError;
use super::handlers::{RagChatHandler, UploadHandler};
use super::registry::tool_catalog;
use crate::config::AppConfig;
use crate::infrastructure::upstream::{ChatBackend, OpenWebUiClient};
use crate::types::{ContentBlock, ToolDescriptor, UploadOutcome};
use serde::{Serialize, Serializer};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

/// Result of a successful tool call, in its wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolOutput {
    Upload(UploadOutcome),
    Content(Vec<ContentBlock>),
}

impl Serialize for ToolOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ToolOutput::Upload(outcome) => outcome.serialize(serializer),
            ToolOutput::Content(blocks) => json!({ "content": blocks }).serialize(serializer),
        }
    }
}

pub struct Dispatcher<B: ChatBackend> {
    config: AppConfig,
    chat: RagChatHandler<B>,
    upload: UploadHandler,
}

impl Dispatcher<OpenWebUiClient> {
    pub fn from_config(config: AppConfig) -> Self {
        let client = OpenWebUiClient::from_config(&config);
        Self::new(config, client)
    }
}

impl<B: ChatBackend> Dispatcher<B> {
    pub fn new(config: AppConfig, backend: B) -> Self {
        Self {
            config,
            chat: RagChatHandler::new(backend),
            upload: UploadHandler,
        }
    }

    pub fn list_tools(&self) -> &'static [ToolDescriptor] {
        tool_catalog()
    }

    /// Validate and execute one tool call.
    ///
    /// The credential check runs before any argument validation, and all
    /// validation runs before network I/O.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: Option<&Value>,
    ) -> Result<ToolOutput, McpError> {
        if !self.config.has_api_key() {
            warn!(tool = name, "Rejecting tool call: API key not set");
            return Err(McpError::invalid_request("API key not set"));
        }

        let call = ToolCall::decode(name, arguments, &self.config.default_model)
            .inspect_err(|err| debug!(tool = name, %err, "Rejected tool arguments"))?;
        info!(tool = call.name(), "Executing tool call");

        match call {
            ToolCall::UploadFile(request) => Ok(ToolOutput::Upload(self.upload.handle(&request))),
            ToolCall::ChatWithRag(request) => {
                let result = self.chat.handle(&request).await?;
                Ok(ToolOutput::Content(vec![ContentBlock::text(result.response)]))
            }
        }
    }
}
