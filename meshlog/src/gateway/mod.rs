//! Gateway lifecycle: host types, the adapter seam and the logging adapter.
//!
//! The host gateway owns delivery and transport; this module models what it
//! hands to an adapter and what it expects back:
//!
//! - [`GatewayContext`] / [`ResponseContext`]: identifiers supplied by the host
//! - [`Task`]: what `prepare_task` returns
//! - [`Update`]: the closed set of update shapes streamed back from the mesh
//! - [`GatewayAdapter`]: the lifecycle hooks, with [`PassthroughAdapter`] as
//!   default behavior and [`LoggingAdapter`] as the verbose decorator

mod adapter;
pub mod banner;
mod context;
mod logging;
mod task;
mod update;

pub use adapter::{BoxedAdapter, DEFAULT_TASK_SOURCE, GatewayAdapter, PassthroughAdapter};
pub use context::{GatewayContext, NOT_AVAILABLE, ResponseContext};
pub use logging::{LoggingAdapter, sink_from_config};
pub use task::{ContentPart, DEFAULT_TARGET_AGENT, Task};
pub use update::{
    Artifact, ArtifactUpdate, CompositeBuilder, CompositeUpdate, ErrorUpdate, StatusUpdate,
    TaskState, TextUpdate, Update,
};
