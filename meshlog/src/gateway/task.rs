//! Task descriptors submitted to the agent mesh.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Agent that receives tasks when nothing else is configured.
pub const DEFAULT_TARGET_AGENT: &str = "OrchestratorAgent";

/// One piece of task or artifact content.
///
/// Tagged by `kind`, following the A2A part shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// The text content.
        text: String,
    },
    /// Structured JSON data.
    Data {
        /// The data content.
        data: Value,
    },
    /// Reference to a file.
    File {
        /// File name, if known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        /// MIME type, if known.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        /// Location of the file content.
        uri: String,
    },
}

impl ContentPart {
    /// Create a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a data part.
    #[must_use]
    pub const fn data(data: Value) -> Self {
        Self::Data { data }
    }

    /// Create a file part referencing `uri`.
    #[must_use]
    pub fn file(uri: impl Into<String>) -> Self {
        Self::File {
            name: None,
            mime_type: None,
            uri: uri.into(),
        }
    }

    /// The text of a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

/// A task addressed to an agent in the mesh.
///
/// # Example
///
/// ```rust
/// use meshlog::gateway::{ContentPart, Task};
///
/// let task = Task::new("OrchestratorAgent")
///     .with_part(ContentPart::text("summarize the incident"))
///     .with_metadata("source", "webhook");
///
/// assert_eq!(task.content.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier of the agent that should handle the task.
    pub target_agent: String,
    /// Ordered content parts.
    pub content: Vec<ContentPart>,
    /// Free-form metadata forwarded with the task.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub metadata: Map<String, Value>,
}

impl Task {
    /// Create an empty task for `target_agent`.
    #[must_use]
    pub fn new(target_agent: impl Into<String>) -> Self {
        Self {
            target_agent: target_agent.into(),
            content: Vec::new(),
            metadata: Map::new(),
        }
    }

    /// Append a content part.
    #[must_use]
    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.content.push(part);
        self
    }

    /// Insert a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Concatenated text of all text parts, newline separated.
    #[must_use]
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
