use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use flowrun_core::{ExecutionInput, Graph, Node, NodeKind};
use serde_json::{json, Map};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::executor::events::{Event, EventSink, NoOpEventSink};
use crate::executor::handlers::{self, HandlerContext, HandlerError};
use crate::executor::http::{HttpClient, ReqwestHttpClient};
use crate::executor::interrupt::Interrupt;
use crate::executor::result::{ExecutionError, ExecutionResult, RunStatus};
use crate::executor::step::{ExecutionStep, StepStatus};
use crate::executor::template::render_placeholders;
use crate::executor::types::EngineConfig;
use crate::executor::vars::Variables;

/// Walks a workflow graph breadth-first from its start node.
///
/// Each node is processed at most once. Handler failures are recorded on the step and
/// traversal carries on; only cancellation or the run deadline stop it early.
pub struct Engine {
    config: EngineConfig,
    http: Arc<dyn HttpClient>,
    event_sink: Arc<dyn EventSink>,
}

impl Engine {
    pub fn new(config: EngineConfig, event_sink: Arc<dyn EventSink>) -> Self {
        Self {
            config,
            http: Arc::new(ReqwestHttpClient::default()),
            event_sink,
        }
    }

    pub fn with_http(mut self, http: Arc<dyn HttpClient>) -> Self {
        self.http = http;
        self
    }

    pub async fn run(
        &self,
        graph: &Graph,
        input: &ExecutionInput,
    ) -> Result<ExecutionResult, ExecutionError> {
        self.run_with_cancel(graph, input, &CancellationToken::new())
            .await
    }

    pub async fn run_with_cancel(
        &self,
        graph: &Graph,
        input: &ExecutionInput,
        cancel: &CancellationToken,
    ) -> Result<ExecutionResult, ExecutionError> {
        let start = graph.start_node().ok_or(ExecutionError::NoStartNode)?;
        if graph.start_nodes().count() > 1 {
            tracing::warn!(start = %start.id, "multiple start nodes, using the first");
        }

        let run_id = Uuid::new_v4();
        let workflow_id = graph.id().map(str::to_string);
        let executed_at = Utc::now();
        tracing::info!(run_id = %run_id, workflow_id = ?workflow_id, "run started");
        self.event_sink
            .emit(Event::RunStarted {
                run_id,
                workflow_id: workflow_id.clone(),
            })
            .await;

        let interrupt = Interrupt::new(cancel.clone(), self.config.run_timeout);
        let ctx = HandlerContext {
            config: &self.config,
            http: self.http.as_ref(),
            interrupt: &interrupt,
        };

        let mut vars = Variables::from(input.form_data.clone().unwrap_or_default());
        let mut steps = Vec::new();
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([start.id.clone()]);
        let mut cancelled = false;

        while let Some(id) = queue.pop_front() {
            if let Some(err) = interrupt.check() {
                tracing::warn!(run_id = %run_id, error = %err, "run interrupted");
                cancelled = true;
                break;
            }
            if !visited.insert(id.clone()) {
                continue;
            }
            let Some(node) = graph.node(&id) else {
                tracing::warn!(node_id = %id, "edge target not found in graph, skipping");
                continue;
            };

            self.event_sink
                .emit(Event::StepStarted {
                    run_id,
                    node_id: node.id.clone(),
                    node_type: node.kind.to_string(),
                })
                .await;

            let started = Instant::now();
            let outcome = handlers::dispatch(node, &vars, input, &ctx).await;
            let (step, interrupted) = self.finish_step(node, outcome, &mut vars, started);

            self.event_sink
                .emit(Event::StepFinished {
                    run_id,
                    node_id: step.node_id.clone(),
                    status: step.status,
                })
                .await;
            steps.push(step);

            if interrupted {
                cancelled = true;
                break;
            }

            let condition_met = vars.condition_met().unwrap_or(false);
            for edge in graph.outgoing(&node.id) {
                if node.kind == NodeKind::Condition && !edge.follows_outcome(condition_met) {
                    continue;
                }
                queue.push_back(edge.target.clone());
            }
        }

        let status = if cancelled || steps.iter().any(ExecutionStep::is_failed) {
            RunStatus::Failed
        } else {
            RunStatus::Completed
        };
        tracing::info!(run_id = %run_id, status = %status, steps = steps.len(), "run finished");
        self.event_sink
            .emit(Event::RunFinished { run_id, status })
            .await;

        Ok(ExecutionResult {
            run_id,
            workflow_id,
            executed_at,
            status,
            steps,
            cancelled,
        })
    }

    /// Turn a handler outcome into a step, merging published output into `vars`.
    /// The flag is set when the handler was cut short by cancellation or the deadline.
    fn finish_step(
        &self,
        node: &Node,
        outcome: Result<handlers::Handled, HandlerError>,
        vars: &mut Variables,
        started: Instant,
    ) -> (ExecutionStep, bool) {
        let mut description = node.description.clone();
        let (status, output, error, interrupted) = match outcome {
            Ok(handled) => {
                if handlers::publishes_output(&node.kind) {
                    vars.merge(&handled.output);
                }
                if node.kind == NodeKind::Integration {
                    description = description.map(|d| render_placeholders(&d, vars));
                }
                (handled.status, handled.output, None, false)
            }
            Err(err) => {
                tracing::warn!(node_id = %node.id, kind = %node.kind, error = %err, "node failed");
                let mut output = Map::new();
                if let Some(msg) = handlers::failure_message(&node.kind) {
                    output.insert("message".into(), json!(msg));
                }
                let interrupted = err.is_interrupt();
                (StepStatus::Failed, output, Some(err.to_string()), interrupted)
            }
        };
        tracing::debug!(node_id = %node.id, status = %status, "step finished");

        let step = ExecutionStep {
            node_id: node.id.clone(),
            node_type: node.kind.to_string(),
            status,
            label: node.label.clone(),
            description,
            output,
            error,
            duration_ms: started.elapsed().as_millis() as u64,
        };
        (step, interrupted)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default(), Arc::new(NoOpEventSink))
    }
}
