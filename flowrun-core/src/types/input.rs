use std::fmt;

use crate::types::Metadata;

/// Runtime input bundle supplied by the caller for one execution.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct ExecutionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "formData")]
    pub form_data: Option<Metadata>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<ConditionSpec>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConditionSpec {
    /// Kept as given so unrecognized operators can be reported back verbatim.
    pub operator: String,
    pub threshold: f64,
}

impl ConditionSpec {
    pub fn new(operator: impl Into<String>, threshold: f64) -> Self {
        Self {
            operator: operator.into(),
            threshold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterThan,
    LessThan,
    Equals,
    GreaterThanOrEqual,
    LessThanOrEqual,
}

impl Operator {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "greater_than" => Some(Operator::GreaterThan),
            "less_than" => Some(Operator::LessThan),
            "equals" => Some(Operator::Equals),
            "greater_than_or_equal" => Some(Operator::GreaterThanOrEqual),
            "less_than_or_equal" => Some(Operator::LessThanOrEqual),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
            Operator::Equals => "equals",
            Operator::GreaterThanOrEqual => "greater_than_or_equal",
            Operator::LessThanOrEqual => "less_than_or_equal",
        }
    }

    pub fn evaluate(&self, value: f64, threshold: f64) -> bool {
        match self {
            Operator::GreaterThan => value > threshold,
            Operator::LessThan => value < threshold,
            Operator::Equals => value == threshold,
            Operator::GreaterThanOrEqual => value >= threshold,
            Operator::LessThanOrEqual => value <= threshold,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
