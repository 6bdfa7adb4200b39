use flowrun_core::{IntegrationConfig, Metadata, Node};
use serde_json::{json, Map, Value};

use super::{Handled, HandlerContext, HandlerError};
use crate::executor::lookup::{find_value, MAX_LOOKUP_DEPTH};
use crate::executor::template::fill_url_template;
use crate::executor::vars::{Variables, CITY, TEMPERATURE};

pub(super) async fn handle(
    node: &Node,
    vars: &Variables,
    ctx: &HandlerContext<'_>,
) -> Result<Handled, HandlerError> {
    let config = IntegrationConfig::from_metadata(node.metadata.as_ref())?;

    let mut inputs = Map::new();
    for name in &config.input_variables {
        let value = vars
            .get(name)
            .ok_or_else(|| HandlerError::MissingVariable(name.clone()))?;
        inputs.insert(name.clone(), value.clone());
    }

    let option = select_option(&config.options, &inputs).ok_or(HandlerError::NoMatchingOption)?;
    let url = fill_url_template(&config.api_endpoint, option);
    tracing::debug!(node_id = %node.id, url = %url, "calling integration endpoint");

    let response = ctx
        .interrupt
        .guard(ctx.http.get(
            &url,
            ctx.config.http_timeout,
            ctx.config.max_response_bytes,
        ))
        .await??;
    if !response.is_success() {
        return Err(HandlerError::Status {
            status: response.status,
        });
    }

    let body: Value = serde_json::from_slice(&response.body)
        .map_err(|e| HandlerError::InvalidJson(e.to_string()))?;
    let Value::Object(body) = body else {
        return Err(HandlerError::NotJsonObject);
    };

    let mut output = Map::new();
    for name in &config.output_variables {
        match find_value(&body, name, MAX_LOOKUP_DEPTH) {
            Some(v) => {
                output.insert(name.clone(), v);
            }
            None => {
                tracing::debug!(node_id = %node.id, variable = %name, "output variable not in response");
                if let Some(v) = inputs.get(name) {
                    output.insert(name.clone(), v.clone());
                }
            }
        }
    }

    let temperature = output.get(TEMPERATURE).and_then(Value::as_f64);
    let city = inputs.get(CITY).and_then(Value::as_str);
    if let (Some(t), Some(city)) = (temperature, city) {
        output.insert(
            "message".into(),
            json!(format!("Weather data fetched for {city}: {t:.1}°C")),
        );
    }

    Ok(Handled::completed(output))
}

/// First option carrying every input value.
fn select_option<'a>(options: &'a [Metadata], inputs: &Map<String, Value>) -> Option<&'a Metadata> {
    options.iter().find(|opt| {
        inputs
            .iter()
            .all(|(k, v)| opt.get(k).is_some_and(|o| values_match(o, v)))
    })
}

fn values_match(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) if a.is_number() && b.is_number() => x == y,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<Metadata> {
        vec![
            json!({"city": "Sydney", "lat": -33.8688}).as_object().cloned().unwrap(),
            json!({"city": "Melbourne", "zone": 3}).as_object().cloned().unwrap(),
        ]
    }

    #[test]
    fn selects_first_option_matching_every_input() {
        let inputs = json!({"city": "Melbourne"}).as_object().cloned().unwrap();
        let opts = options();
        let opt = select_option(&opts, &inputs).unwrap();
        assert_eq!(opt["city"], "Melbourne");

        let inputs = json!({"city": "Perth"}).as_object().cloned().unwrap();
        assert!(select_option(&options(), &inputs).is_none());
    }

    #[test]
    fn numbers_match_across_representations() {
        let inputs = json!({"zone": 3.0}).as_object().cloned().unwrap();
        assert_eq!(select_option(&options(), &inputs).unwrap()["city"], "Melbourne");
        assert!(!values_match(&json!("3"), &json!(3)));
    }
}
