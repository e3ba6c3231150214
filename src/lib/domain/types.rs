use serde::{Serialize, Serializer};
use serde_json::{Value, json};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// JSON type accepted by a tool input field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
}

impl FieldType {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldType::String => "string",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputField {
    pub name: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl InputField {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name,
            field_type: FieldType::String,
            required: false,
        }
    }
}

/// A callable operation advertised through `tools/list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub fields: &'static [InputField],
}

impl ToolDescriptor {
    /// Render the JSON-schema object sent as `inputSchema`.
    pub fn input_schema(&self) -> Value {
        let properties: serde_json::Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.to_string(),
                    json!({ "type": field.field_type.as_str() }),
                )
            })
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| field.required)
            .map(|field| field.name)
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }
}

impl Serialize for ToolDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.input_schema(),
        })
        .serialize(serializer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub model: String,
    pub query: String,
    pub file_id: Option<String>,
    pub collection_id: Option<String>,
}

impl ChatRequest {
    /// The single knowledge reference forwarded upstream; `file_id` wins.
    pub fn file_reference(&self) -> Option<FileReference> {
        if let Some(id) = &self.file_id {
            return Some(FileReference::file(id.clone()));
        }
        self.collection_id
            .as_ref()
            .map(|id| FileReference::collection(id.clone()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileReferenceKind {
    File,
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReference {
    #[serde(rename = "type")]
    pub kind: FileReferenceKind,
    pub id: String,
}

impl FileReference {
    pub fn file(id: impl Into<String>) -> Self {
        Self {
            kind: FileReferenceKind::File,
            id: id.into(),
        }
    }

    pub fn collection(id: impl Into<String>) -> Self {
        Self {
            kind: FileReferenceKind::Collection,
            id: id.into(),
        }
    }
}

/// Body of the upstream `/chat/completions` request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamPayload {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub files: Vec<FileReference>,
}

impl From<&ChatRequest> for UpstreamPayload {
    fn from(request: &ChatRequest) -> Self {
        Self {
            model: request.model.clone(),
            messages: vec![ChatMessage::new(MessageRole::User, request.query.clone())],
            files: request.file_reference().into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatResult {
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub file_path: String,
}

/// Outcome of an `upload_file` call.
///
/// Uploading is not supported yet, so only `Unsupported` is ever produced.
/// It keeps the `{"success": false}` wire shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Uploaded { file_id: String },
    Unsupported,
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded { .. })
    }
}

impl Serialize for UploadOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            UploadOutcome::Uploaded { file_id } => {
                json!({ "success": true, "file_id": file_id }).serialize(serializer)
            }
            UploadOutcome::Unsupported => json!({ "success": false }).serialize(serializer),
        }
    }
}

/// Normalized unit of textual tool output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Text { text: String },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }
}
