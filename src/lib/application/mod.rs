pub mod arguments;
pub mod dispatcher;
pub mod error;
pub mod handlers;
pub mod registry;

pub use arguments::ToolCall;
pub use dispatcher::{Dispatcher, ToolOutput};
pub use error::{ErrorCode, McpError};
