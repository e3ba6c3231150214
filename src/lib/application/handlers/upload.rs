use crate::types::{UploadOutcome, UploadRequest};
use tracing::debug;

/// Placeholder for uploading a local file to OpenWebUI.
///
/// Touches neither the filesystem nor the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct UploadHandler;

impl UploadHandler {
    pub fn handle(&self, request: &UploadRequest) -> UploadOutcome {
        debug!(file_path = request.file_path.as_str(), "File upload is not supported yet");
        UploadOutcome::Unsupported
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nonexistent_path_still_reports_unsupported() {
        let outcome = UploadHandler.handle(&UploadRequest {
            file_path: "/definitely/not/here.txt".to_string(),
        });
        assert_eq!(outcome, UploadOutcome::Unsupported);
    }
}
