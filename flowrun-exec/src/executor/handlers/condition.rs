use flowrun_core::{ConditionSpec, Operator};
use serde_json::{json, Map};

use super::{Handled, HandlerError};
use crate::executor::vars::{Variables, CONDITION_MET, TEMPERATURE};

pub(super) fn handle(
    vars: &Variables,
    condition: Option<&ConditionSpec>,
) -> Result<Handled, HandlerError> {
    let condition = condition.ok_or(HandlerError::MissingCondition)?;
    let temperature = vars
        .number(TEMPERATURE)
        .ok_or(HandlerError::MissingTemperature)?;

    let operator = Operator::parse(&condition.operator).unwrap_or_else(|| {
        tracing::warn!(operator = %condition.operator, "unknown operator, using greater_than");
        Operator::GreaterThan
    });
    let met = operator.evaluate(temperature, condition.threshold);

    let mut output = Map::new();
    output.insert(CONDITION_MET.into(), json!(met));
    output.insert("threshold".into(), json!(condition.threshold));
    output.insert("operator".into(), json!(condition.operator));
    output.insert("actualValue".into(), json!(temperature));
    output.insert(
        "message".into(),
        json!(format!(
            "Temperature {temperature:.1}°C is {} {:.1}°C - condition {}",
            condition.operator,
            condition.threshold,
            if met { "met" } else { "not met" }
        )),
    );

    Ok(Handled::completed(output))
}
