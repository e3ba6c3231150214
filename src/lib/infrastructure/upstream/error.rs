use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the single upstream chat call
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("upstream returned HTTP {}", status.as_u16())]
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("upstream returned invalid response: {reason}")]
    InvalidResponse { reason: String },
}

impl UpstreamError {
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }

    /// Best-effort diagnostic for the caller: the upstream-provided message
    /// when the service sent one, otherwise the transport-level description.
    pub fn diagnostic(&self) -> String {
        match self {
            UpstreamError::Transport { source, .. } => source.to_string(),
            UpstreamError::Status { status, message } => message.clone().unwrap_or_else(|| {
                format!("Request failed with status code {}", status.as_u16())
            }),
            UpstreamError::InvalidResponse { reason } => reason.clone(),
        }
    }

    pub fn is_malformed_response(&self) -> bool {
        matches!(self, UpstreamError::InvalidResponse { .. })
    }
}
