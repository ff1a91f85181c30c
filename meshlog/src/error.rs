//! Error types for the meshlog gateway adapter.
//!
//! Two kinds of failures flow through this crate:
//! - errors raised by the adapter itself (configuration, I/O, malformed input)
//! - errors reported by the host gateway and handed to
//!   [`GatewayAdapter::on_error`](crate::gateway::GatewayAdapter::on_error)
//!   for rendering
//!
//! Payload formatting has no error type: it always falls back to a textual form.

use crate::config::ConfigError;

/// Result type alias for meshlog operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error used as the source of transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for the meshlog crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Generic gateway processing failure.
    #[error("Gateway error: {0}")]
    Gateway(String),

    /// A delegated task failed inside the agent mesh.
    #[error("Task {task_id} failed: {message}")]
    TaskFailed {
        /// Identifier of the failed task.
        task_id: String,
        /// Failure description reported by the mesh.
        message: String,
    },

    /// The external input could not be turned into a task.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Delivery to or from the mesh failed.
    #[error("Transport error: {message}")]
    Transport {
        /// Short description of the failed operation.
        message: String,
        /// Underlying cause.
        #[source]
        source: BoxError,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a gateway error with a message.
    #[must_use]
    pub fn gateway(msg: impl Into<String>) -> Self {
        Self::Gateway(msg.into())
    }

    /// Create a task failure error.
    #[must_use]
    pub fn task_failed(task_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskFailed {
            task_id: task_id.into(),
            message: message.into(),
        }
    }

    /// Create an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a transport error wrapping its cause.
    #[must_use]
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Transport {
            message: message.into(),
            source: source.into(),
        }
    }

    /// Stable name of the error kind, rendered as the error type in reports.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Gateway(_) => "GatewayError",
            Self::TaskFailed { .. } => "TaskFailed",
            Self::InvalidInput(_) => "InvalidInput",
            Self::Transport { .. } => "TransportError",
            Self::Config(_) => "ConfigError",
            Self::Json(_) => "JsonError",
            Self::Io(_) => "IoError",
        }
    }

    /// Messages of every underlying cause, outermost first.
    ///
    /// The error's own message is not included.
    #[must_use]
    pub fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut current = std::error::Error::source(self);
        while let Some(err) = current {
            causes.push(err.to_string());
            current = err.source();
        }
        causes
    }
}
