//! The adapter seam between the host gateway and this crate.
//!
//! The host drives a [`GatewayAdapter`] through the lifecycle of every request:
//!
//! 1. **`init`**: once, when the gateway starts
//! 2. **`prepare_task`**: per incoming request, turning external input into a [`Task`]
//! 3. **`handle_update`**: per update streamed back from the mesh
//! 4. **`on_task_complete`**, or **`on_error`** on failure
//!
//! Every hook except `prepare_task` has a default no-op implementation.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::TaskConfig;
use crate::error::{Error, Result};
use crate::payload::{DEFAULT_INDENT, format_value};

use super::context::{GatewayContext, ResponseContext};
use super::task::{ContentPart, DEFAULT_TARGET_AGENT, Task};
use super::update::Update;

/// A boxed, thread-safe [`GatewayAdapter`] trait object.
pub type BoxedAdapter = Box<dyn GatewayAdapter>;

/// Metadata value recorded as the `source` of prepared tasks by default.
pub const DEFAULT_TASK_SOURCE: &str = "logging_webhook_adapter";

/// Lifecycle hooks invoked by the host gateway.
///
/// # Object Safety
///
/// This trait is object-safe and can be used as `Box<dyn GatewayAdapter>`.
#[async_trait]
pub trait GatewayAdapter: Send + Sync {
    /// Called once before any request is handled.
    ///
    /// # Errors
    ///
    /// Returns an error if the adapter cannot start; the host should not proceed.
    async fn init(&mut self, _ctx: &GatewayContext) -> Result<()> {
        Ok(())
    }

    /// Turn an incoming request into a task for the mesh.
    ///
    /// `endpoint_context` carries request metadata (path, headers, ...) when
    /// the host provides it.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be turned into a task.
    async fn prepare_task(
        &self,
        external_input: &Value,
        endpoint_context: Option<&Map<String, Value>>,
    ) -> Result<Task>;

    /// Called for each update streamed back from the mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if the update cannot be processed.
    async fn handle_update(&self, _update: &Update, _ctx: &ResponseContext) -> Result<()> {
        Ok(())
    }

    /// Called once a task has fully completed.
    async fn on_task_complete(&self, _ctx: &ResponseContext) {}

    /// Called when processing fails anywhere in the pipeline.
    ///
    /// The error stays owned by the host, which keeps propagating it.
    async fn on_error(&self, _error: &Error, _ctx: Option<&ResponseContext>) {}
}

/// Default adapter behavior: wrap the input in a single text part.
///
/// String input is forwarded verbatim; any other JSON input is formatted with
/// [`format_value`]. The task targets the configured agent and records its
/// source in the metadata.
///
/// # Example
///
/// ```rust,ignore
/// let adapter = PassthroughAdapter::new();
/// let task = adapter.prepare_task(&json!("hello"), None).await?;
/// assert_eq!(task.text(), "hello");
/// ```
#[derive(Debug, Clone)]
pub struct PassthroughAdapter {
    target_agent: String,
    source: String,
    indent: usize,
}

impl Default for PassthroughAdapter {
    fn default() -> Self {
        Self {
            target_agent: DEFAULT_TARGET_AGENT.to_owned(),
            source: DEFAULT_TASK_SOURCE.to_owned(),
            indent: DEFAULT_INDENT,
        }
    }
}

impl PassthroughAdapter {
    /// Create a pass-through adapter with the default target agent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a pass-through adapter from task configuration.
    #[must_use]
    pub fn from_config(task: &TaskConfig, indent: usize) -> Self {
        Self {
            target_agent: task.target_agent.clone(),
            source: task.source.clone(),
            indent,
        }
    }

    /// Override the target agent.
    #[must_use]
    pub fn with_target_agent(mut self, agent: impl Into<String>) -> Self {
        self.target_agent = agent.into();
        self
    }

    /// The agent prepared tasks are addressed to.
    #[must_use]
    pub fn target_agent(&self) -> &str {
        &self.target_agent
    }
}

#[async_trait]
impl GatewayAdapter for PassthroughAdapter {
    async fn prepare_task(
        &self,
        external_input: &Value,
        _endpoint_context: Option<&Map<String, Value>>,
    ) -> Result<Task> {
        if self.target_agent.is_empty() {
            return Err(Error::invalid_input("no target agent configured"));
        }

        let text = match external_input {
            Value::String(s) => s.clone(),
            other => format_value(other, self.indent),
        };

        Ok(Task::new(&self.target_agent)
            .with_part(ContentPart::text(text))
            .with_metadata("source", self.source.as_str()))
    }
}
