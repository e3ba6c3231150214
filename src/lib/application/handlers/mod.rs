mod chat;
mod upload;

pub use chat::RagChatHandler;
pub use upload::UploadHandler;
