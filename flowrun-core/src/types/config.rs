//! Typed views over the per-node metadata bag.
//!
//! Each constructor checks only what its node kind needs; unknown keys are ignored.

use serde_json::Value;

use crate::error::ConfigError;
use crate::types::Metadata;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormConfig {
    /// `None` copies the whole variable context.
    pub output_variables: Option<Vec<String>>,
    /// Fields the form is expected to provide; only checked for diagnostics.
    pub input_fields: Vec<String>,
}

impl FormConfig {
    pub fn from_metadata(metadata: Option<&Metadata>) -> Result<Self, ConfigError> {
        let Some(metadata) = metadata else {
            return Ok(Self::default());
        };

        let output_variables = match metadata.get("outputVariables") {
            None => None,
            Some(Value::Array(items)) => Some(string_items(items)),
            Some(_) => {
                return Err(ConfigError::NotAnArray {
                    field: "outputVariables",
                })
            }
        };

        let input_fields = match metadata.get("inputFields") {
            Some(Value::Array(items)) => string_items(items),
            _ => Vec::new(),
        };

        Ok(Self {
            output_variables,
            input_fields,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationConfig {
    pub input_variables: Vec<String>,
    /// Candidate parameter sets; the first one matching every input value is used.
    pub options: Vec<Metadata>,
    /// URL template with `{key}` placeholders filled from the selected option.
    pub api_endpoint: String,
    pub output_variables: Vec<String>,
}

impl IntegrationConfig {
    const KIND: &'static str = "integration";

    pub fn from_metadata(metadata: Option<&Metadata>) -> Result<Self, ConfigError> {
        let metadata = metadata.ok_or(ConfigError::MissingMetadata { kind: Self::KIND })?;

        let input_variables = match required(metadata, Self::KIND, "inputVariables")? {
            Value::Array(items) => string_items(items),
            _ => {
                return Err(ConfigError::NotAnArray {
                    field: "inputVariables",
                })
            }
        };

        let options = match required(metadata, Self::KIND, "options")? {
            Value::Array(items) => items
                .iter()
                .filter_map(|v| v.as_object().cloned())
                .collect(),
            _ => return Err(ConfigError::NotAnArray { field: "options" }),
        };

        let api_endpoint = match required(metadata, Self::KIND, "apiEndpoint")? {
            Value::String(s) => s.clone(),
            _ => {
                return Err(ConfigError::NotAString {
                    field: "apiEndpoint",
                })
            }
        };

        Ok(Self {
            input_variables,
            options,
            api_endpoint,
            output_variables: optional_string_list(metadata, "outputVariables"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmailTemplate {
    pub subject: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmailConfig {
    pub template: EmailTemplate,
    /// Sender override; the engine default applies when absent.
    pub from: Option<String>,
    pub input_variables: Vec<String>,
    pub output_variables: Vec<String>,
}

impl EmailConfig {
    const KIND: &'static str = "email";

    pub fn from_metadata(metadata: Option<&Metadata>) -> Result<Self, ConfigError> {
        let metadata = metadata.ok_or(ConfigError::MissingMetadata { kind: Self::KIND })?;

        let template = match required(metadata, Self::KIND, "emailTemplate")? {
            Value::Object(t) => EmailTemplate {
                subject: t
                    .get("subject")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                body: t
                    .get("body")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            },
            _ => {
                return Err(ConfigError::NotAnObject {
                    field: "emailTemplate",
                })
            }
        };

        Ok(Self {
            template,
            from: metadata
                .get("from")
                .and_then(Value::as_str)
                .map(str::to_string),
            input_variables: optional_string_list(metadata, "inputVariables"),
            output_variables: optional_string_list(metadata, "outputVariables"),
        })
    }
}

fn required<'a>(
    metadata: &'a Metadata,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a Value, ConfigError> {
    metadata
        .get(field)
        .ok_or(ConfigError::MissingField { kind, field })
}

fn optional_string_list(metadata: &Metadata, field: &str) -> Vec<String> {
    match metadata.get(field) {
        Some(Value::Array(items)) => string_items(items),
        _ => Vec::new(),
    }
}

/// Keep the string entries of a JSON list, dropping anything else.
fn string_items(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn meta(v: Value) -> Metadata {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn form_without_metadata_copies_everything() {
        let cfg = FormConfig::from_metadata(None).unwrap();
        assert_eq!(cfg.output_variables, None);
    }

    #[test]
    fn form_output_variables_skip_non_strings() {
        let m = meta(json!({"outputVariables": ["name", 123, "email", true]}));
        let cfg = FormConfig::from_metadata(Some(&m)).unwrap();
        assert_eq!(cfg.output_variables, Some(vec!["name".into(), "email".into()]));
    }

    #[test]
    fn form_rejects_scalar_output_variables() {
        let m = meta(json!({"outputVariables": "not-an-array"}));
        let err = FormConfig::from_metadata(Some(&m)).unwrap_err();
        assert_eq!(err.to_string(), "outputVariables must be an array");
    }

    #[test]
    fn integration_reports_first_missing_field() {
        let err = IntegrationConfig::from_metadata(None).unwrap_err();
        assert_eq!(err.to_string(), "integration node missing metadata");

        let m = meta(json!({"inputVariables": ["city"], "options": []}));
        let err = IntegrationConfig::from_metadata(Some(&m)).unwrap_err();
        assert_eq!(err.to_string(), "integration node missing apiEndpoint in metadata");

        let m = meta(json!({"inputVariables": "city"}));
        let err = IntegrationConfig::from_metadata(Some(&m)).unwrap_err();
        assert_eq!(err.to_string(), "inputVariables must be an array");
    }

    #[test]
    fn integration_keeps_only_object_options() {
        let m = meta(json!({
            "inputVariables": ["city"],
            "options": [{"city": "Sydney", "lat": -33.87}, "junk", {"city": "Melbourne"}],
            "apiEndpoint": "https://api.example.com?lat={lat}",
            "outputVariables": ["temperature"],
        }));
        let cfg = IntegrationConfig::from_metadata(Some(&m)).unwrap();
        assert_eq!(cfg.options.len(), 2);
        assert_eq!(cfg.output_variables, vec!["temperature".to_string()]);
    }

    #[test]
    fn email_template_must_be_an_object() {
        let m = meta(json!({"emailTemplate": "hello"}));
        let err = EmailConfig::from_metadata(Some(&m)).unwrap_err();
        assert_eq!(err.to_string(), "emailTemplate must be an object");

        let m = meta(json!({"emailTemplate": {"subject": "Hi {{name}}"}, "from": "ops@example.com"}));
        let cfg = EmailConfig::from_metadata(Some(&m)).unwrap();
        assert_eq!(cfg.template.subject, "Hi {{name}}");
        assert_eq!(cfg.template.body, "");
        assert_eq!(cfg.from.as_deref(), Some("ops@example.com"));
    }
}
