use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::executor::result::RunStatus;
use crate::executor::step::StepStatus;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    RunStarted {
        run_id: Uuid,
        workflow_id: Option<String>,
    },
    RunFinished {
        run_id: Uuid,
        status: RunStatus,
    },
    StepStarted {
        run_id: Uuid,
        node_id: String,
        node_type: String,
    },
    StepFinished {
        run_id: Uuid,
        node_id: String,
        status: StepStatus,
    },
}

impl Event {
    pub fn event_type(&self) -> &'static str {
        match self {
            Event::RunStarted { .. } => "run.started",
            Event::RunFinished { .. } => "run.finished",
            Event::StepStarted { .. } => "step.started",
            Event::StepFinished { .. } => "step.finished",
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let ty = self.event_type();
        match self {
            Event::RunStarted {
                run_id,
                workflow_id,
            } => json!({ "type": ty, "run_id": run_id.to_string(), "workflow_id": workflow_id }),
            Event::RunFinished { run_id, status } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "status": status.as_str() })
            }
            Event::StepStarted {
                run_id,
                node_id,
                node_type,
            } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "node_id": node_id, "node_type": node_type })
            }
            Event::StepFinished {
                run_id,
                node_id,
                status,
            } => {
                json!({ "type": ty, "run_id": run_id.to_string(), "node_id": node_id, "status": status.as_str() })
            }
        }
    }
}

#[async_trait]
pub trait EventSink: Send + Sync {
    async fn emit(&self, event: Event);
}

pub struct CompositeEventSink {
    sinks: Vec<Box<dyn EventSink>>,
}

impl Default for CompositeEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl CompositeEventSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

#[async_trait]
impl EventSink for CompositeEventSink {
    async fn emit(&self, event: Event) {
        for sink in &self.sinks {
            sink.emit(event.clone()).await;
        }
    }
}

/// One JSON object per line on stdout.
pub struct StdoutEventSink;

#[async_trait]
impl EventSink for StdoutEventSink {
    async fn emit(&self, event: Event) {
        println!("{}", serde_json::to_string(&event.to_json()).unwrap_or_default());
    }
}

pub struct NoOpEventSink;

#[async_trait]
impl EventSink for NoOpEventSink {
    async fn emit(&self, _event: Event) {}
}
