use crate::error::ParseError;
use crate::types::{Graph, WorkflowDocument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Auto,
}

#[derive(Debug, Clone)]
pub struct ParsedWorkflow {
    pub document: WorkflowDocument,
    pub format: DocumentFormat,
}

impl ParsedWorkflow {
    pub fn into_graph(self) -> Graph {
        Graph::from_document(self.document)
    }
}

pub fn parse_workflow_str(input: &str, format: DocumentFormat) -> Result<ParsedWorkflow, ParseError> {
    match format {
        DocumentFormat::Json => Ok(ParsedWorkflow {
            document: serde_json::from_str::<WorkflowDocument>(input)?,
            format,
        }),
        DocumentFormat::Yaml => Ok(ParsedWorkflow {
            document: serde_yaml::from_str::<WorkflowDocument>(input)?,
            format,
        }),
        DocumentFormat::Auto => parse_workflow_auto(input),
    }
}

pub fn parse_graph_str(input: &str, format: DocumentFormat) -> Result<Graph, ParseError> {
    parse_workflow_str(input, format).map(ParsedWorkflow::into_graph)
}

fn parse_workflow_auto(input: &str) -> Result<ParsedWorkflow, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::UnknownFormat);
    }

    // JSON documents always open with `{` or `[`.
    let trimmed = input.trim_start();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return match serde_json::from_str::<WorkflowDocument>(input) {
            Ok(document) => Ok(ParsedWorkflow {
                document,
                format: DocumentFormat::Json,
            }),
            Err(e) => serde_yaml::from_str::<WorkflowDocument>(input)
                .map(|document| ParsedWorkflow {
                    document,
                    format: DocumentFormat::Yaml,
                })
                .map_err(|_| ParseError::Json(e)),
        };
    }

    match serde_yaml::from_str::<WorkflowDocument>(input) {
        Ok(document) => Ok(ParsedWorkflow {
            document,
            format: DocumentFormat::Yaml,
        }),
        Err(e) => serde_json::from_str::<WorkflowDocument>(input)
            .map(|document| ParsedWorkflow {
                document,
                format: DocumentFormat::Json,
            })
            .map_err(|_| ParseError::Yaml(e)),
    }
}
