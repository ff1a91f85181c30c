//! Updates streamed back from the agent mesh.
//!
//! An [`Update`] is one of a closed set of variants, each declaring which of
//! the optional fields (`text`, `status`, `error`, `artifacts`) it carries.
//! Renderers call the accessors on [`Update`] instead of probing for fields.
//!
//! On the wire the variant is selected by a `type` tag:
//!
//! ```json
//! {"type": "text", "text": "partial answer"}
//! {"type": "status", "status": "working", "message": "calling tools"}
//! {"type": "composite", "text": "done", "status": "completed"}
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::task::ContentPart;

/// Lifecycle state of a delegated task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    /// Accepted, not yet started.
    Submitted,
    /// In progress.
    Working,
    /// Waiting for more input from the caller.
    InputRequired,
    /// Finished successfully.
    Completed,
    /// Canceled before completion.
    Canceled,
    /// Finished with a failure.
    Failed,
    /// Refused by the agent.
    Rejected,
    /// State not reported.
    Unknown,
}

impl TaskState {
    /// Wire name of the state.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Working => "working",
            Self::InputRequired => "input-required",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
            Self::Failed => "failed",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }

    /// Whether no further updates are expected after this state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Canceled | Self::Failed | Self::Rejected
        )
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output produced by an agent for a task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    /// Artifact identifier.
    pub artifact_id: String,
    /// Human-readable name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Artifact content.
    #[serde(default)]
    pub parts: Vec<ContentPart>,
}

impl Artifact {
    /// Create an empty artifact.
    #[must_use]
    pub fn new(artifact_id: impl Into<String>) -> Self {
        Self {
            artifact_id: artifact_id.into(),
            name: None,
            description: None,
            parts: Vec::new(),
        }
    }

    /// Set the artifact name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a content part.
    #[must_use]
    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }
}

/// Incremental or final text output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUpdate {
    /// Text content.
    pub text: String,
    /// Whether this is the last chunk of the text stream.
    #[serde(default)]
    pub last_chunk: bool,
}

/// Task state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusUpdate {
    /// New task state.
    pub status: TaskState,
    /// Optional human-readable note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Failure reported by the mesh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorUpdate {
    /// Error description.
    pub error: String,
    /// Optional error code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
}

/// One or more artifacts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactUpdate {
    /// Produced artifacts.
    pub artifacts: Vec<Artifact>,
}

/// Update carrying any combination of the optional fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeUpdate {
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Task state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskState>,
    /// Error description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Produced artifacts.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub artifacts: Vec<Artifact>,
}

/// An update received from the agent mesh.
///
/// # Example
///
/// ```rust
/// use meshlog::gateway::{TaskState, Update};
///
/// let update = Update::composite()
///     .with_text("done")
///     .with_status(TaskState::Completed)
///     .build();
///
/// assert_eq!(update.text(), Some("done"));
/// assert_eq!(update.status(), Some(TaskState::Completed));
/// assert!(update.error().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Update {
    /// Text output.
    Text(TextUpdate),
    /// State transition.
    Status(StatusUpdate),
    /// Failure.
    Error(ErrorUpdate),
    /// Artifacts.
    Artifact(ArtifactUpdate),
    /// Any combination of the above.
    Composite(CompositeUpdate),
}

impl Update {
    /// Create a text update.
    #[must_use]
    pub fn text_update(text: impl Into<String>) -> Self {
        Self::Text(TextUpdate {
            text: text.into(),
            last_chunk: false,
        })
    }

    /// Create a status update.
    #[must_use]
    pub const fn status_update(status: TaskState) -> Self {
        Self::Status(StatusUpdate {
            status,
            message: None,
        })
    }

    /// Create an error update.
    #[must_use]
    pub fn error_update(error: impl Into<String>) -> Self {
        Self::Error(ErrorUpdate {
            error: error.into(),
            code: None,
        })
    }

    /// Create an artifact update.
    #[must_use]
    pub const fn artifact_update(artifacts: Vec<Artifact>) -> Self {
        Self::Artifact(ArtifactUpdate { artifacts })
    }

    /// Start building a composite update.
    #[must_use]
    pub fn composite() -> CompositeBuilder {
        CompositeBuilder::default()
    }

    /// Name of the variant, rendered as the update type.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "TextUpdate",
            Self::Status(_) => "StatusUpdate",
            Self::Error(_) => "ErrorUpdate",
            Self::Artifact(_) => "ArtifactUpdate",
            Self::Composite(_) => "CompositeUpdate",
        }
    }

    /// Text content, if the variant carries non-empty text.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        let text = match self {
            Self::Text(u) => Some(u.text.as_str()),
            Self::Composite(u) => u.text.as_deref(),
            Self::Status(_) | Self::Error(_) | Self::Artifact(_) => None,
        };
        text.filter(|t| !t.is_empty())
    }

    /// Task state, if the variant carries one.
    #[must_use]
    pub const fn status(&self) -> Option<TaskState> {
        match self {
            Self::Status(u) => Some(u.status),
            Self::Composite(u) => u.status,
            Self::Text(_) | Self::Error(_) | Self::Artifact(_) => None,
        }
    }

    /// Error description, if the variant carries a non-empty one.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        let error = match self {
            Self::Error(u) => Some(u.error.as_str()),
            Self::Composite(u) => u.error.as_deref(),
            Self::Text(_) | Self::Status(_) | Self::Artifact(_) => None,
        };
        error.filter(|e| !e.is_empty())
    }

    /// Artifacts carried by the variant; empty when there are none.
    #[must_use]
    pub fn artifacts(&self) -> &[Artifact] {
        match self {
            Self::Artifact(u) => &u.artifacts,
            Self::Composite(u) => &u.artifacts,
            Self::Text(_) | Self::Status(_) | Self::Error(_) => &[],
        }
    }

    /// Whether the update ends the task stream.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        match self {
            Self::Text(u) => u.last_chunk,
            Self::Error(_) => true,
            _ => self.status().is_some_and(TaskState::is_terminal),
        }
    }

    /// The variant's declared fields as name/value pairs, in declaration order.
    ///
    /// Absent optional fields are omitted. Returns `None` when the variant
    /// cannot be represented as a JSON object.
    #[must_use]
    pub fn fields(&self) -> Option<Map<String, Value>> {
        let value = match self {
            Self::Text(u) => serde_json::to_value(u),
            Self::Status(u) => serde_json::to_value(u),
            Self::Error(u) => serde_json::to_value(u),
            Self::Artifact(u) => serde_json::to_value(u),
            Self::Composite(u) => serde_json::to_value(u),
        };
        match value {
            Ok(Value::Object(map)) => Some(map),
            _ => None,
        }
    }
}

/// Builder for [`Update::Composite`].
#[derive(Debug, Clone, Default)]
pub struct CompositeBuilder {
    inner: CompositeUpdate,
}

impl CompositeBuilder {
    /// Set the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.inner.text = Some(text.into());
        self
    }

    /// Set the task state.
    #[must_use]
    pub const fn with_status(mut self, status: TaskState) -> Self {
        self.inner.status = Some(status);
        self
    }

    /// Set the error description.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.inner.error = Some(error.into());
        self
    }

    /// Append an artifact.
    #[must_use]
    pub fn with_artifact(mut self, artifact: Artifact) -> Self {
        self.inner.artifacts.push(artifact);
        self
    }

    /// Finish the update.
    #[must_use]
    pub fn build(self) -> Update {
        Update::Composite(self.inner)
    }
}
