//! meshlog - verbose logging for agent mesh gateways
//!
//! This crate provides a gateway adapter that renders every lifecycle event of
//! a webhook gateway (incoming requests, prepared tasks, streamed updates,
//! completions and errors) as readable, bounded text, sent to `tracing` and
//! straight to the console.
//!
//! - [`payload`]: never-failing payload formatting
//! - [`truncate`]: length bounding with an original-length marker
//! - [`sink`]: the observability sink and its backends
//! - [`gateway`]: host types, the [`GatewayAdapter`](gateway::GatewayAdapter)
//!   trait and the [`LoggingAdapter`](gateway::LoggingAdapter)
//! - [`config`]: TOML configuration with environment overrides

pub mod config;
pub mod error;
pub mod gateway;
pub mod payload;
pub mod prelude;
pub mod sink;
pub mod truncate;

pub use error::{Error, Result};
