use std::path::Path;
use std::time::Duration;

use flowrun_core::{ConditionSpec, ExecutionInput};
use flowrun_exec::EngineConfig;
use serde_json::Value;

use crate::{ConditionArgs, EngineArgs};

pub fn load_inputs(path: Option<&Path>) -> Result<ExecutionInput, String> {
    let Some(path) = path else {
        return Ok(ExecutionInput::default());
    };
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read inputs: {e}"))?;
    if let Ok(v) = serde_json::from_str(&content) {
        return Ok(v);
    }
    if let Ok(v) = serde_yaml::from_str(&content) {
        return Ok(v);
    }
    Err("inputs file is neither valid JSON nor YAML".to_string())
}

/// Apply `KEY=VALUE` pairs onto the form data. Entries without `=` are ignored.
pub fn merge_set_inputs(input: &mut ExecutionInput, set_inputs: &[String]) {
    if set_inputs.is_empty() {
        return;
    }
    let form = input.form_data.get_or_insert_with(Default::default);
    for s in set_inputs {
        if let Some((k, v)) = s.split_once('=') {
            form.insert(k.to_string(), parse_set_value(v));
        }
    }
}

fn parse_set_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn apply_condition(input: &mut ExecutionInput, condition: &ConditionArgs) {
    if let (Some(operator), Some(threshold)) = (&condition.operator, condition.threshold) {
        input.condition = Some(ConditionSpec::new(operator.clone(), threshold));
    }
}

pub fn build_engine_config(args: &EngineArgs) -> EngineConfig {
    let mut config = EngineConfig {
        http_timeout: Duration::from_millis(args.http_timeout),
        max_response_bytes: args.max_response_bytes,
        run_timeout: args.run_timeout.map(Duration::from_millis),
        ..EngineConfig::default()
    };
    if let Some(sender) = &args.sender {
        config.default_sender = sender.clone();
    }
    config
}
