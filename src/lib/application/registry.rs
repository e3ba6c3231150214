//! Static catalogue of the tools this server exposes.

use crate::types::{InputField, ToolDescriptor};

pub const UPLOAD_FILE: &str = "upload_file";
pub const CHAT_WITH_RAG: &str = "chat_with_rag";

static TOOLS: [ToolDescriptor; 2] = [
    ToolDescriptor {
        name: UPLOAD_FILE,
        description: "Upload file to OpenWebUI",
        fields: &[InputField::required("file_path")],
    },
    ToolDescriptor {
        name: CHAT_WITH_RAG,
        description: "Chat using RAG with OpenWebUI",
        fields: &[
            InputField::optional("model"),
            InputField::required("query"),
            InputField::optional("file_id"),
            InputField::optional("collection_id"),
        ],
    },
];

pub fn tool_catalog() -> &'static [ToolDescriptor] {
    &TOOLS
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn catalogue_lists_both_tools_in_order() {
        let names: Vec<&str> = tool_catalog().iter().map(|tool| tool.name).collect();
        assert_eq!(names, vec![UPLOAD_FILE, CHAT_WITH_RAG]);
    }

    #[test]
    fn chat_schema_requires_only_query() {
        let tool = &tool_catalog()[1];
        let schema = tool.input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["query"]));
        assert_eq!(schema["properties"]["collection_id"], json!({"type": "string"}));
    }

    #[test]
    fn descriptor_serializes_with_input_schema_key() {
        let value = serde_json::to_value(&tool_catalog()[0]).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "upload_file",
                "description": "Upload file to OpenWebUI",
                "inputSchema": {
                    "type": "object",
                    "properties": {"file_path": {"type": "string"}},
                    "required": ["file_path"]
                }
            })
        );
    }
}
