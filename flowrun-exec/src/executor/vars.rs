use serde_json::{Map, Value};

/// Numeric reading consumed by condition nodes.
pub const TEMPERATURE: &str = "temperature";
/// Boolean outcome written by condition nodes and read by branch selection and email nodes.
pub const CONDITION_MET: &str = "conditionMet";
/// Recipient address for email nodes.
pub const EMAIL: &str = "email";
pub const CITY: &str = "city";

/// Variable context threaded through a single execution.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variables(Map<String, Value>);

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(name.into(), value)
    }

    /// Overwrite existing entries with `values`.
    pub fn merge(&mut self, values: &Map<String, Value>) {
        for (k, v) in values {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// `None` when no condition has been evaluated (or the value is not a boolean).
    pub fn condition_met(&self) -> Option<bool> {
        self.get(CONDITION_MET).and_then(Value::as_bool)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).filter(|v| v.is_number()).and_then(Value::as_f64)
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Variables {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
