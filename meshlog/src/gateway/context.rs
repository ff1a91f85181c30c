//! Context types handed to adapter hooks by the host gateway.
//!
//! [`GatewayContext`] is given once at initialization. [`ResponseContext`]
//! accompanies every update and terminal event of a delegated task and
//! identifies the session, task and user it belongs to.

use serde::{Deserialize, Serialize};

/// Placeholder rendered for identifiers the host did not provide.
pub const NOT_AVAILABLE: &str = "N/A";

/// Context passed to [`GatewayAdapter::init`](super::GatewayAdapter::init).
///
/// # Example
///
/// ```rust
/// use meshlog::gateway::GatewayContext;
///
/// let ctx = GatewayContext::new().with_gateway_id("webhook-gw-01");
/// assert_eq!(ctx.gateway_id(), Some("webhook-gw-01"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    gateway_id: Option<String>,
}

impl GatewayContext {
    /// Create an empty gateway context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the gateway identifier.
    #[must_use]
    pub fn with_gateway_id(mut self, id: impl Into<String>) -> Self {
        self.gateway_id = Some(id.into());
        self
    }

    /// Get the gateway identifier, if set.
    #[must_use]
    pub fn gateway_id(&self) -> Option<&str> {
        self.gateway_id.as_deref()
    }
}

/// Metadata identifying the session, task and user of an update.
///
/// Every identifier is optional; the `*_or_na` accessors render missing ones
/// as [`NOT_AVAILABLE`].
///
/// # Example
///
/// ```rust
/// use meshlog::gateway::ResponseContext;
///
/// let ctx = ResponseContext::new()
///     .with_session_id("sess-1")
///     .with_task_id("task-9");
///
/// assert_eq!(ctx.task_id(), Some("task-9"));
/// assert_eq!(ctx.user_id_or_na(), "N/A");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<String>,
}

impl ResponseContext {
    /// Create an empty response context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session identifier.
    #[must_use]
    pub fn with_session_id(mut self, id: impl Into<String>) -> Self {
        self.session_id = Some(id.into());
        self
    }

    /// Set the task identifier.
    #[must_use]
    pub fn with_task_id(mut self, id: impl Into<String>) -> Self {
        self.task_id = Some(id.into());
        self
    }

    /// Set the user identifier.
    #[must_use]
    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.user_id = Some(id.into());
        self
    }

    /// Get the session identifier, if set.
    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    /// Get the task identifier, if set.
    #[must_use]
    pub fn task_id(&self) -> Option<&str> {
        self.task_id.as_deref()
    }

    /// Get the user identifier, if set.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Session identifier or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn session_id_or_na(&self) -> &str {
        self.session_id().unwrap_or(NOT_AVAILABLE)
    }

    /// Task identifier or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn task_id_or_na(&self) -> &str {
        self.task_id().unwrap_or(NOT_AVAILABLE)
    }

    /// User identifier or [`NOT_AVAILABLE`].
    #[must_use]
    pub fn user_id_or_na(&self) -> &str {
        self.user_id().unwrap_or(NOT_AVAILABLE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    mod gateway_context {
        use super::*;

        #[test]
        fn new_has_no_id() {
            assert!(GatewayContext::new().gateway_id().is_none());
        }

        #[test]
        fn with_gateway_id_sets_id() {
            let ctx = GatewayContext::new().with_gateway_id("gw");
            assert_eq!(ctx.gateway_id(), Some("gw"));
        }

        #[test]
        fn deserializes_from_json() {
            let ctx: GatewayContext =
                serde_json::from_value(serde_json::json!({"gateway_id": "gw-2"})).unwrap();
            assert_eq!(ctx.gateway_id(), Some("gw-2"));
        }
    }

    mod response_context {
        use super::*;

        #[test]
        fn empty_renders_not_available() {
            let ctx = ResponseContext::new();
            assert_eq!(ctx.session_id_or_na(), NOT_AVAILABLE);
            assert_eq!(ctx.task_id_or_na(), NOT_AVAILABLE);
            assert_eq!(ctx.user_id_or_na(), NOT_AVAILABLE);
        }

        #[test]
        fn builder_chain() {
            let ctx = ResponseContext::new()
                .with_session_id("s")
                .with_task_id("t")
                .with_user_id("u");
            assert_eq!(ctx.session_id(), Some("s"));
            assert_eq!(ctx.task_id(), Some("t"));
            assert_eq!(ctx.user_id(), Some("u"));
            assert_eq!(ctx.user_id_or_na(), "u");
        }

        #[test]
        fn serialization_skips_missing_ids() {
            let ctx = ResponseContext::new().with_task_id("t-1");
            let value = serde_json::to_value(&ctx).unwrap();
            assert_eq!(value, serde_json::json!({"task_id": "t-1"}));
        }
    }
}
