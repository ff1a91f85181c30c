//! End-to-end tests for the logging adapter lifecycle.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meshlog::gateway::{BoxedAdapter, GatewayAdapter};
use meshlog::prelude::*;
use serde_json::{Map, Value, json};

/// Shared in-memory writer standing in for stdout.
#[derive(Debug, Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().unwrap().clone())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for SharedBuf {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn response_ctx() -> ResponseContext {
    ResponseContext::new()
        .with_session_id("web-session-1")
        .with_task_id("gdk-task-99")
        .with_user_id("webhook-user")
}

/// Inner adapter that records what reaches it after logging.
#[derive(Debug, Default)]
struct Recording {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl GatewayAdapter for Recording {
    async fn prepare_task(
        &self,
        external_input: &Value,
        _endpoint_context: Option<&Map<String, Value>>,
    ) -> meshlog::Result<Task> {
        self.seen.lock().unwrap().push("prepare".into());
        let agent = external_input
            .get("agent")
            .and_then(Value::as_str)
            .ok_or_else(|| Error::invalid_input("missing 'agent'"))?;
        Ok(Task::new(agent).with_part(ContentPart::data(external_input.clone())))
    }

    async fn handle_update(&self, update: &Update, _ctx: &ResponseContext) -> meshlog::Result<()> {
        self.seen.lock().unwrap().push(update.kind_name().into());
        Ok(())
    }

    async fn on_task_complete(&self, _ctx: &ResponseContext) {
        self.seen.lock().unwrap().push("complete".into());
    }

    async fn on_error(&self, error: &Error, _ctx: Option<&ResponseContext>) {
        self.seen.lock().unwrap().push(format!("error:{}", error.kind()));
    }
}

#[tokio::test]
async fn full_lifecycle_renders_every_event() {
    let memory = Arc::new(MemorySink::new());
    let mut adapter = LoggingAdapter::new(memory.clone());

    adapter
        .init(&GatewayContext::new().with_gateway_id("webhook-gw"))
        .await
        .unwrap();

    let mut endpoint = Map::new();
    endpoint.insert("path".into(), json!("/webhooks/alerts"));
    let input = json!({"alert": "disk usage 91%", "host": "db-3", "tags": ["prod", "storage"]});
    let task = adapter.prepare_task(&input, Some(&endpoint)).await.unwrap();
    assert_eq!(task.target_agent, "OrchestratorAgent");

    let ctx = response_ctx();
    adapter
        .handle_update(&Update::status_update(TaskState::Working), &ctx)
        .await
        .unwrap();
    adapter
        .handle_update(&Update::text_update("Investigating db-3"), &ctx)
        .await
        .unwrap();
    adapter.on_task_complete(&ctx).await;

    for expected in [
        "LOGGING WEBHOOK ADAPTER INITIALIZED",
        "Gateway ID: webhook-gw",
        "INCOMING WEBHOOK REQUEST RECEIVED",
        "ENDPOINT CONTEXT:",
        "PAYLOAD BREAKDOWN:",
        "      host: db-3",
        "PREPARED TASK:",
        "UPDATE TYPE: StatusUpdate",
        "STATUS: working",
        "UPDATE TYPE: TextUpdate",
        "Investigating db-3",
        "TASK COMPLETED",
        "Task ID: gdk-task-99",
    ] {
        assert!(memory.contains(expected), "missing line containing {expected:?}");
    }
    assert!(memory.records().iter().all(|r| r.level == LogLevel::Info));
}

#[tokio::test]
async fn done_and_completed_update_omits_error_and_artifacts() {
    let memory = Arc::new(MemorySink::new());
    let adapter = LoggingAdapter::new(memory.clone());

    let update = Update::composite()
        .with_text("done")
        .with_status(TaskState::Completed)
        .build();
    adapter.handle_update(&update, &response_ctx()).await.unwrap();

    let lines = memory.lines();
    assert!(lines.iter().any(|l| l.contains("done")));
    assert!(lines.iter().any(|l| l.contains("completed")));
    assert!(!lines.iter().any(|l| l.contains("ERROR")));
    assert!(!lines.iter().any(|l| l.contains("ARTIFACTS")));
}

#[tokio::test]
async fn console_and_tracing_receive_identical_text() {
    let memory = Arc::new(MemorySink::new());
    let console = SharedBuf::default();
    let sink = MultiSink::new(vec![
        Arc::new(TracingSink),
        memory.clone(),
        Arc::new(ConsoleSink::writer(console.clone())),
    ]);
    let adapter = LoggingAdapter::new(Arc::new(sink));

    adapter
        .prepare_task(&json!({"k": {"nested": [1, 2]}}), None)
        .await
        .unwrap();
    adapter
        .on_error(&Error::gateway("broker unavailable"), Some(&response_ctx()))
        .await;

    assert!(!console.lines().is_empty());
    assert_eq!(console.lines(), memory.lines());
}

#[tokio::test]
async fn decorator_delegates_after_logging() {
    let memory = Arc::new(MemorySink::new());
    let adapter = LoggingAdapter::wrap(Recording::default(), memory.clone());
    let ctx = response_ctx();

    let task = adapter
        .prepare_task(&json!({"agent": "BillingAgent"}), None)
        .await
        .unwrap();
    assert_eq!(task.target_agent, "BillingAgent");

    adapter
        .handle_update(&Update::error_update("card declined"), &ctx)
        .await
        .unwrap();
    adapter.on_error(&Error::task_failed("t", "declined"), Some(&ctx)).await;
    adapter.on_task_complete(&ctx).await;

    let seen = adapter.inner().seen.lock().unwrap().clone();
    assert_eq!(
        seen,
        vec!["prepare", "ErrorUpdate", "error:TaskFailed", "complete"]
    );
    assert!(memory.contains("ERROR: card declined"));
}

#[tokio::test]
async fn inner_errors_pass_through_unchanged() {
    let memory = Arc::new(MemorySink::new());
    let adapter = LoggingAdapter::wrap(Recording::default(), memory.clone());

    let err = adapter.prepare_task(&json!({}), None).await.unwrap_err();

    assert!(matches!(err, Error::InvalidInput(ref m) if m == "missing 'agent'"));
    assert!(memory.contains("RAW EXTERNAL INPUT PAYLOAD:"));
    assert!(memory.contains("TASK PREPARATION FAILED"));
}

#[tokio::test]
async fn boxed_logging_adapter_is_object_safe() {
    let memory = Arc::new(MemorySink::new());
    let mut adapter: BoxedAdapter = Box::new(LoggingAdapter::new(memory.clone()));

    adapter.init(&GatewayContext::new()).await.unwrap();
    adapter.on_task_complete(&ResponseContext::new()).await;

    assert!(memory.contains("Gateway ID: unknown"));
    assert!(memory.contains("Session ID: N/A"));
}

#[tokio::test]
async fn opaque_values_render_through_display() {
    let memory = Arc::new(MemorySink::new());
    let adapter = LoggingAdapter::new(memory.clone());

    let addr: std::net::SocketAddr = "10.1.2.3:443".parse().unwrap();
    let input = serde_json::to_value(vec![Opaque(addr)]).unwrap();
    adapter.prepare_task(&input, None).await.unwrap();

    assert!(memory.contains("\"10.1.2.3:443\""));
}

#[tokio::test]
async fn shared_adapter_handles_concurrent_updates() {
    let memory = Arc::new(MemorySink::new());
    let adapter = Arc::new(LoggingAdapter::new(memory.clone()));

    let mut handles = Vec::new();
    for i in 0..8 {
        let adapter = Arc::clone(&adapter);
        handles.push(tokio::spawn(async move {
            let ctx = ResponseContext::new().with_task_id(format!("task-{i}"));
            adapter
                .handle_update(&Update::text_update(format!("chunk {i}")), &ctx)
                .await
                .unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    for i in 0..8 {
        assert!(memory.contains(&format!("chunk {i}")));
        assert!(memory.contains(&format!("Task ID: task-{i}")));
    }
}
