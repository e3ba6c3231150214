//! OpenWebUI upstream access

mod client;
mod error;
mod traits;

pub use client::OpenWebUiClient;
pub use error::UpstreamError;
pub use traits::ChatBackend;
