//! Upstream traits

use super::error::UpstreamError;
use crate::types::UpstreamPayload;
use async_trait::async_trait;

/// Something that can answer a single chat completion request.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one payload upstream and return the first completion's text.
    async fn complete(&self, payload: &UpstreamPayload) -> Result<String, UpstreamError>;
}
