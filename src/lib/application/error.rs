use crate::infrastructure::upstream::UpstreamError;
use thiserror::Error;

/// JSON-RPC error codes surfaced to the MCP client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    ParseError,
    InvalidRequest,
    MethodNotFound,
    InvalidParams,
    InternalError,
}

impl ErrorCode {
    pub fn code(self) -> i64 {
        match self {
            ErrorCode::ParseError => -32700,
            ErrorCode::InvalidRequest => -32600,
            ErrorCode::MethodNotFound => -32601,
            ErrorCode::InvalidParams => -32602,
            ErrorCode::InternalError => -32603,
        }
    }
}

#[derive(Debug, Error)]
pub enum McpError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    InvalidParams(String),
    #[error("{0}")]
    MethodNotFound(String),
    #[error("{}", upstream_message(.0))]
    Upstream(#[from] UpstreamError),
}

fn upstream_message(err: &UpstreamError) -> String {
    if err.is_malformed_response() {
        format!("RAG API returned a malformed response: {}", err.diagnostic())
    } else {
        format!("RAG API error: {}", err.diagnostic())
    }
}

impl McpError {
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    pub fn method_not_found(message: impl Into<String>) -> Self {
        Self::MethodNotFound(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            McpError::InvalidRequest(_) => ErrorCode::InvalidRequest,
            McpError::InvalidParams(_) => ErrorCode::InvalidParams,
            McpError::MethodNotFound(_) => ErrorCode::MethodNotFound,
            McpError::Upstream(_) => ErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn upstream_errors_are_internal() {
        let err = McpError::from(UpstreamError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: Some("bad model".to_string()),
        });
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.to_string(), "RAG API error: bad model");
    }

    #[test]
    fn malformed_responses_are_distinguishable() {
        let err = McpError::from(UpstreamError::invalid_response("no completion choices"));
        assert_eq!(err.code().code(), -32603);
        assert_eq!(
            err.to_string(),
            "RAG API returned a malformed response: no completion choices"
        );
    }
}
