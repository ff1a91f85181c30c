//! Verbose logging decorator for gateway adapters.
//!
//! [`LoggingAdapter`] wraps another [`GatewayAdapter`] and renders every
//! lifecycle event (incoming requests, prepared tasks, mesh updates,
//! completions and errors) as framed, human-readable blocks before delegating.
//! All output goes through one [`LogSink`]; the usual sink pairs `tracing` with
//! the console, see [`LoggingAdapter::from_config`].
//!
//! # Example
//!
//! ```rust,ignore
//! use meshlog::prelude::*;
//! use std::sync::Arc;
//!
//! let mut adapter = LoggingAdapter::new(Arc::new(ConsoleSink::stdout()));
//! adapter.init(&GatewayContext::new().with_gateway_id("gw-1")).await?;
//!
//! let task = adapter.prepare_task(&json!({"event": "push"}), None).await?;
//! adapter.handle_update(&Update::text_update("working on it"), &ctx).await?;
//! adapter.on_task_complete(&ctx).await;
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::config::{FormatConfig, MeshlogConfig};
use crate::error::{Error, Result};
use crate::payload::{format_payload, format_value};
use crate::sink::{
    ConsoleSink, LogLevel, LogSink, MultiSink, NoopSink, SharedSink, TracingSink,
};
use crate::truncate::truncate;

use super::adapter::{GatewayAdapter, PassthroughAdapter};
use super::banner::{Rule, event_banner};
use super::context::{GatewayContext, ResponseContext};
use super::task::Task;
use super::update::Update;

/// A [`GatewayAdapter`] that logs every event, then delegates to `A`.
#[derive(Debug)]
pub struct LoggingAdapter<A = PassthroughAdapter> {
    inner: A,
    sink: SharedSink,
    format: FormatConfig,
    context: Option<GatewayContext>,
}

impl LoggingAdapter {
    /// Log to `sink` and delegate to a default [`PassthroughAdapter`].
    #[must_use]
    pub fn new(sink: SharedSink) -> Self {
        Self::wrap(PassthroughAdapter::new(), sink)
    }

    /// Build the adapter, its sinks and its pass-through delegate from configuration.
    #[must_use]
    pub fn from_config(config: &MeshlogConfig) -> Self {
        let inner = PassthroughAdapter::from_config(&config.task, config.format.indent);
        Self::wrap(inner, sink_from_config(config)).with_format(config.format)
    }
}

impl<A: GatewayAdapter> LoggingAdapter<A> {
    /// Log to `sink` and delegate to `inner`.
    #[must_use]
    pub fn wrap(inner: A, sink: SharedSink) -> Self {
        Self {
            inner,
            sink,
            format: FormatConfig::default(),
            context: None,
        }
    }

    /// Override indentation and truncation thresholds.
    #[must_use]
    pub fn with_format(mut self, format: FormatConfig) -> Self {
        self.format = format;
        self
    }

    /// The wrapped adapter.
    #[must_use]
    pub const fn inner(&self) -> &A {
        &self.inner
    }

    /// Context received at initialization, if `init` has run.
    #[must_use]
    pub const fn context(&self) -> Option<&GatewayContext> {
        self.context.as_ref()
    }

    fn line(&self, line: &str) {
        self.sink.emit(LogLevel::Info, line);
    }

    fn rule(&self, rule: Rule) {
        self.line(&rule.to_string());
    }

    fn error_line(&self, line: &str) {
        self.sink.emit(LogLevel::Error, line);
    }

    fn banner(&self) {
        for line in event_banner() {
            self.line(&line);
        }
    }

    fn render_request(
        &self,
        external_input: &Value,
        endpoint_context: Option<&Map<String, Value>>,
    ) {
        let indent = self.format.indent;

        self.banner();
        self.rule(Rule::Thick);
        self.rule(Rule::Inbound);
        self.line("    INCOMING WEBHOOK REQUEST RECEIVED");
        self.rule(Rule::Inbound);
        self.rule(Rule::Thin);

        if let Some(endpoint) = endpoint_context.filter(|m| !m.is_empty()) {
            self.line("    ENDPOINT CONTEXT:");
            let endpoint = format_value(&Value::Object(endpoint.clone()), indent);
            self.sink.emit_block(LogLevel::Info, "", &endpoint);
            self.rule(Rule::Thin);
        }

        self.line("    RAW EXTERNAL INPUT PAYLOAD:");
        self.rule(Rule::Thin);
        self.sink
            .emit_block(LogLevel::Info, "", &format_value(external_input, indent));
        self.rule(Rule::Thin);

        if let Value::Object(fields) = external_input {
            self.line("    PAYLOAD BREAKDOWN:");
            for (key, value) in fields {
                let formatted = format_value(value, indent);
                let bounded = truncate(&formatted, self.format.field_limit).to_string();
                self.sink
                    .emit_block(LogLevel::Info, &format!("      {key}: "), &bounded);
            }
        }

        self.rule(Rule::Inbound);
        self.rule(Rule::Thick);
    }

    fn render_task(&self, task: &Task) {
        self.rule(Rule::Thin);
        self.line("    PREPARED TASK:");
        self.line(&format!("      Target Agent: {}", task.target_agent));
        self.line(&format!("      Content Parts: {}", task.content.len()));
        self.rule(Rule::Thin);
    }

    fn render_update(&self, update: &Update, ctx: &ResponseContext) {
        self.banner();
        self.rule(Rule::Thick);
        self.rule(Rule::Outbound);
        self.line("    AGENT MESH RESPONSE/UPDATE RECEIVED");
        self.rule(Rule::Outbound);
        self.rule(Rule::Thin);

        self.line(&format!("    UPDATE TYPE: {}", update.kind_name()));

        self.line("    RESPONSE CONTEXT:");
        self.line(&format!("      Session ID: {}", ctx.session_id_or_na()));
        self.line(&format!("      Task ID: {}", ctx.task_id_or_na()));
        self.line(&format!("      User ID: {}", ctx.user_id_or_na()));

        self.rule(Rule::Thin);
        self.line("    UPDATE DETAILS:");
        self.render_details(update);

        if let Some(text) = update.text() {
            self.rule(Rule::Thin);
            self.line("    TEXT CONTENT:");
            self.sink.emit_block(LogLevel::Info, "      ", text);
        }

        if let Some(status) = update.status() {
            self.rule(Rule::Thin);
            self.line(&format!("    STATUS: {status}"));
        }

        if let Some(error) = update.error() {
            self.rule(Rule::Thin);
            self.sink.emit_block(LogLevel::Info, "    ERROR: ", error);
        }

        let artifacts = update.artifacts();
        if !artifacts.is_empty() {
            self.rule(Rule::Thin);
            self.line("    ARTIFACTS:");
            for artifact in artifacts {
                let formatted = format_payload(artifact, self.format.indent);
                self.sink.emit_block(LogLevel::Info, "      - ", &formatted);
            }
        }

        self.rule(Rule::Outbound);
        self.rule(Rule::Thick);
    }

    fn render_details(&self, update: &Update) {
        let Some(fields) = update.fields() else {
            let raw = format_payload(update, self.format.indent);
            self.sink
                .emit_block(LogLevel::Info, "      Raw Update: ", &raw);
            return;
        };

        for (name, value) in &fields {
            let formatted = format_value(value, self.format.indent);
            let bounded = truncate(&formatted, self.format.object_limit);
            if bounded.is_truncated() {
                self.line(&format!("      {name} (truncated):"));
                self.sink.emit_block(
                    LogLevel::Info,
                    "        ",
                    &format!("{}...", bounded.head()),
                );
                self.line(&format!(
                    "        [Total length: {} chars]",
                    bounded.original_len()
                ));
            } else {
                self.line(&format!("      {name}:"));
                self.sink
                    .emit_block(LogLevel::Info, "        ", bounded.head());
            }
        }
        tracing::debug!(
            kind = update.kind_name(),
            fields = fields.len(),
            "update rendered"
        );
    }

    fn render_completion(&self, ctx: &ResponseContext) {
        self.rule(Rule::Thick);
        self.line("    TASK COMPLETED");
        self.line(&format!("      Session ID: {}", ctx.session_id_or_na()));
        self.line(&format!("      Task ID: {}", ctx.task_id_or_na()));
        self.rule(Rule::Thick);
    }

    fn render_error(&self, error: &Error, ctx: Option<&ResponseContext>) {
        self.error_line(&Rule::Thick.to_string());
        self.error_line("    ERROR IN GATEWAY PROCESSING");
        self.error_line(&Rule::Thin.to_string());
        self.error_line(&format!("    Error Type: {}", error.kind()));
        self.sink.emit_block(
            LogLevel::Error,
            "    Error Message: ",
            &error.to_string(),
        );
        if let Some(ctx) = ctx {
            self.error_line(&format!(
                "    Context Session ID: {}",
                ctx.session_id_or_na()
            ));
            self.error_line(&format!("    Context Task ID: {}", ctx.task_id_or_na()));
        }
        for cause in error.causes() {
            self.sink
                .emit_block(LogLevel::Error, "    Caused by: ", &cause);
        }
        self.error_line(&Rule::Thick.to_string());
    }
}

/// Assemble the sink described by the `[sinks]` configuration section.
#[must_use]
pub fn sink_from_config(config: &MeshlogConfig) -> SharedSink {
    let mut sinks: Vec<SharedSink> = Vec::new();
    if config.sinks.tracing {
        sinks.push(Arc::new(TracingSink));
    }
    if config.sinks.console {
        sinks.push(Arc::new(ConsoleSink::stream(config.sinks.console_stream)));
    }
    match sinks.len() {
        0 => Arc::new(NoopSink),
        1 => sinks.remove(0),
        _ => Arc::new(MultiSink::new(sinks)),
    }
}

#[async_trait]
impl<A: GatewayAdapter> GatewayAdapter for LoggingAdapter<A> {
    async fn init(&mut self, ctx: &GatewayContext) -> Result<()> {
        self.rule(Rule::Thick);
        self.line("    LOGGING WEBHOOK ADAPTER INITIALIZED");
        self.line(&format!(
            "    Gateway ID: {}",
            ctx.gateway_id().unwrap_or("unknown")
        ));
        self.rule(Rule::Thick);

        self.context = Some(ctx.clone());
        self.inner.init(ctx).await
    }

    async fn prepare_task(
        &self,
        external_input: &Value,
        endpoint_context: Option<&Map<String, Value>>,
    ) -> Result<Task> {
        self.render_request(external_input, endpoint_context);

        match self.inner.prepare_task(external_input, endpoint_context).await {
            Ok(task) => {
                self.render_task(&task);
                Ok(task)
            }
            Err(err) => {
                self.error_line(&format!("    TASK PREPARATION FAILED: {err}"));
                Err(err)
            }
        }
    }

    async fn handle_update(&self, update: &Update, ctx: &ResponseContext) -> Result<()> {
        self.render_update(update, ctx);
        self.inner.handle_update(update, ctx).await
    }

    async fn on_task_complete(&self, ctx: &ResponseContext) {
        self.render_completion(ctx);
        self.inner.on_task_complete(ctx).await;
    }

    async fn on_error(&self, error: &Error, ctx: Option<&ResponseContext>) {
        self.render_error(error, ctx);
        self.inner.on_error(error, ctx).await;
    }
}
