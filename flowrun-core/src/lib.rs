#![forbid(unsafe_code)]

pub mod error;
pub mod parser;
pub mod types;
pub mod validate;

pub use crate::error::{ConfigError, ParseError, ValidationError, Violation};
pub use crate::parser::{parse_graph_str, parse_workflow_str, DocumentFormat, ParsedWorkflow};
pub use crate::types::{
    ConditionSpec, Edge, EmailConfig, EmailTemplate, ExecutionInput, FormConfig, Graph,
    IntegrationConfig, Metadata, Node, NodeKind, Operator, WorkflowDocument,
};
pub use crate::validate::{validate_graph, Validate};
