//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits for easy access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use meshlog::prelude::*;
//! ```

pub use crate::config::{MeshlogConfig, load_config, load_config_from};
pub use crate::error::{Error, Result};
pub use crate::gateway::{
    Artifact, ContentPart, GatewayAdapter, GatewayContext, LoggingAdapter, PassthroughAdapter,
    ResponseContext, Task, TaskState, Update,
};
pub use crate::payload::{DEFAULT_INDENT, Opaque, format_payload, format_value};
pub use crate::sink::{
    ConsoleSink, LogLevel, LogSink, MemorySink, MultiSink, SharedSink, TracingSink,
};
pub use crate::truncate::{FIELD_LIMIT, OBJECT_LIMIT, truncate};
