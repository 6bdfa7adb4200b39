//! Per-kind node handlers.
//!
//! A handler reads the variable context and returns its output map. Merging that output
//! back into the context is the engine's job, so handlers never mutate shared state.

mod condition;
mod email;
mod form;
mod integration;

use flowrun_core::{ConfigError, ExecutionInput, Node, NodeKind};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::executor::http::{HttpClient, HttpError};
use crate::executor::interrupt::Interrupt;
use crate::executor::step::StepStatus;
use crate::executor::types::EngineConfig;
use crate::executor::vars::Variables;

#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("required input variable '{0}' not found in variables")]
    MissingVariable(String),
    #[error("no matching option found for input values")]
    NoMatchingOption,
    #[error("failed to call API: {0}")]
    Http(#[from] HttpError),
    #[error("API returned status {status}")]
    Status { status: u16 },
    #[error("failed to parse API response: {0}")]
    InvalidJson(String),
    #[error("API response is not a JSON object")]
    NotJsonObject,
    #[error("condition configuration is missing")]
    MissingCondition,
    #[error("temperature not found in variables or invalid type")]
    MissingTemperature,
    #[error("execution cancelled")]
    Cancelled,
    #[error("execution timed out after {0}ms")]
    TimedOut(u64),
}

impl HandlerError {
    /// Cancellation and deadline errors end the run instead of just failing the step.
    pub fn is_interrupt(&self) -> bool {
        matches!(self, HandlerError::Cancelled | HandlerError::TimedOut(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Handled {
    pub status: StepStatus,
    pub output: Map<String, Value>,
}

impl Handled {
    pub(crate) fn completed(output: Map<String, Value>) -> Self {
        Self {
            status: StepStatus::Completed,
            output,
        }
    }

    pub(crate) fn skipped(output: Map<String, Value>) -> Self {
        Self {
            status: StepStatus::Skipped,
            output,
        }
    }
}

pub(crate) struct HandlerContext<'a> {
    pub config: &'a EngineConfig,
    pub http: &'a dyn HttpClient,
    pub interrupt: &'a Interrupt,
}

pub(crate) async fn dispatch(
    node: &Node,
    vars: &Variables,
    input: &ExecutionInput,
    ctx: &HandlerContext<'_>,
) -> Result<Handled, HandlerError> {
    match &node.kind {
        NodeKind::Start => Ok(Handled::completed(message("Workflow started successfully"))),
        NodeKind::Form => form::handle(node, vars),
        NodeKind::Integration => integration::handle(node, vars, ctx).await,
        NodeKind::Condition => condition::handle(vars, input.condition.as_ref()),
        NodeKind::Email => email::handle(node, vars, ctx.config),
        NodeKind::End => Ok(Handled::completed(message("Workflow completed successfully"))),
        NodeKind::Unknown(kind) => {
            tracing::warn!(node_id = %node.id, kind = %kind, "unsupported node type, passing through");
            Ok(Handled::completed(Map::new()))
        }
    }
}

/// Output message recorded on a failed step.
pub(crate) fn failure_message(kind: &NodeKind) -> Option<&'static str> {
    match kind {
        NodeKind::Form => Some("Failed to process form data"),
        NodeKind::Integration => Some("Failed to process integration"),
        NodeKind::Condition => Some("Failed to evaluate condition"),
        NodeKind::Email => Some("Failed to process email"),
        _ => None,
    }
}

/// Kinds whose successful output is merged back into the variable context.
pub(crate) fn publishes_output(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Integration | NodeKind::Condition)
}

pub(crate) fn message(text: impl Into<String>) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("message".into(), json!(text.into()));
    out
}
