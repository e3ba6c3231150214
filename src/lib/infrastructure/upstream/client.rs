//! OpenWebUI chat completion client

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::UpstreamError;
use super::traits::ChatBackend;
use crate::config::AppConfig;
use crate::constants::CHAT_COMPLETIONS_PATH;
use crate::types::UpstreamPayload;

/// HTTP client for OpenWebUI's OpenAI-compatible chat endpoint.
///
/// No timeout or retry is configured; a failed call fails exactly once.
#[derive(Clone)]
pub struct OpenWebUiClient {
    endpoint: String,
    api_key: String,
    http: Client,
}

impl OpenWebUiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            http: Client::new(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_url.clone(), config.api_key.clone())
    }

    /// Build URL from endpoint and path
    pub fn build_url(&self, path: &str) -> String {
        let base = self.endpoint.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

#[async_trait]
impl ChatBackend for OpenWebUiClient {
    async fn complete(&self, payload: &UpstreamPayload) -> Result<String, UpstreamError> {
        let url = self.build_url(CHAT_COMPLETIONS_PATH);

        info!(
            model = payload.model.as_str(),
            files = payload.files.len(),
            "Sending request to OpenWebUI"
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .and_then(ErrorBody::into_message);
            warn!(status = status.as_u16(), ?message, "OpenWebUI rejected chat request");
            return Err(UpstreamError::Status { status, message });
        }

        let body: CompletionResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                UpstreamError::invalid_response(format!("undecodable body: {e}"))
            } else {
                UpstreamError::transport(&url, e)
            }
        })?;
        debug!(choices = body.choices.len(), "Received response from OpenWebUI");

        body.choices
            .into_iter()
            .next()
            .ok_or_else(|| UpstreamError::invalid_response("no completion choices"))?
            .message
            .and_then(|m| m.content)
            .ok_or_else(|| UpstreamError::invalid_response("first choice has no message content"))
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: Option<CompletionMessage>,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<Value>,
}

impl ErrorBody {
    fn into_message(self) -> Option<String> {
        match self.message? {
            Value::Null => None,
            Value::String(text) => Some(text),
            other => Some(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_url_joins_without_duplicate_slashes() {
        let client = OpenWebUiClient::new("http://localhost:3000/api/", "key");
        assert_eq!(
            client.build_url(CHAT_COMPLETIONS_PATH),
            "http://localhost:3000/api/chat/completions"
        );
    }

    #[test]
    fn build_url_with_empty_endpoint_is_relative() {
        let client = OpenWebUiClient::new("", "key");
        assert_eq!(client.build_url(CHAT_COMPLETIONS_PATH), "/chat/completions");
    }

    #[test]
    fn error_body_stringifies_non_string_messages() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": {"detail": "x"}}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some(r#"{"detail":"x"}"#));
    }
}
