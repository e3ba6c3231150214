use crate::application::error::McpError;
use crate::infrastructure::upstream::ChatBackend;
use crate::types::{ChatRequest, ChatResult, UpstreamPayload};
use tracing::{debug, error};

/// Translates a validated chat request into one upstream call.
pub struct RagChatHandler<B: ChatBackend> {
    backend: B,
}

impl<B: ChatBackend> RagChatHandler<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatResult, McpError> {
        let payload = UpstreamPayload::from(request);
        debug!(
            model = payload.model.as_str(),
            reference = ?payload.files.first(),
            "Built upstream chat payload"
        );

        match self.backend.complete(&payload).await {
            Ok(response) => Ok(ChatResult { response }),
            Err(err) => {
                error!(%err, "RAG chat request failed");
                Err(McpError::from(err))
            }
        }
    }
}
