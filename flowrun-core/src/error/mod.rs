use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to parse as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse as YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("unable to auto-detect document format (neither valid JSON nor valid YAML)")]
    UnknownFormat,
}

/// Metadata shape problems for a single node.
///
/// Messages are surfaced verbatim on failed execution steps and in validation reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{kind} node missing metadata")]
    MissingMetadata { kind: &'static str },
    #[error("{kind} node missing {field} in metadata")]
    MissingField {
        kind: &'static str,
        field: &'static str,
    },
    #[error("{field} must be an array")]
    NotAnArray { field: &'static str },
    #[error("{field} must be a string")]
    NotAString { field: &'static str },
    #[error("{field} must be an object")]
    NotAnObject { field: &'static str },
}

#[derive(Debug, Error)]
#[error("workflow graph failed validation ({violations_len} violations)")]
pub struct ValidationError {
    pub violations: Vec<Violation>,
    violations_len: usize,
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        let violations_len = violations.len();
        Self {
            violations,
            violations_len,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub message: String,
}

impl Violation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
