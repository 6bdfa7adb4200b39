use flowrun_core::{FormConfig, Node};
use serde_json::{Map, Value};

use super::{Handled, HandlerError};
use crate::executor::vars::Variables;

pub(super) fn handle(node: &Node, vars: &Variables) -> Result<Handled, HandlerError> {
    let config = FormConfig::from_metadata(node.metadata.as_ref())?;

    for field in &config.input_fields {
        if !vars.contains(field) {
            tracing::warn!(node_id = %node.id, field = %field, "form input field missing from variables");
        }
    }

    let output = match &config.output_variables {
        None => vars.as_map().clone(),
        Some(names) => {
            let mut out = Map::new();
            for name in names {
                let value = vars.get(name).cloned().unwrap_or_else(|| {
                    tracing::debug!(node_id = %node.id, variable = %name, "form output variable not set");
                    Value::Null
                });
                out.insert(name.clone(), value);
            }
            out
        }
    };

    Ok(Handled::completed(output))
}

#[cfg(test)]
mod tests {
    use flowrun_core::NodeKind;
    use serde_json::json;

    use super::*;

    fn vars() -> Variables {
        Variables::from(json!({"name": "Alice", "city": "Sydney"}).as_object().cloned().unwrap())
    }

    #[test]
    fn copies_whole_context_without_output_variables() {
        let node = Node::new("form", NodeKind::Form).with_metadata(json!({"inputFields": ["name"]}));
        let handled = handle(&node, &vars()).unwrap();
        assert_eq!(&handled.output, vars().as_map());
    }

    #[test]
    fn missing_output_variables_become_null() {
        let node = Node::new("form", NodeKind::Form)
            .with_metadata(json!({"outputVariables": ["name", "email"]}));
        let handled = handle(&node, &vars()).unwrap();
        assert_eq!(handled.output.get("name"), Some(&json!("Alice")));
        assert_eq!(handled.output.get("email"), Some(&Value::Null));
        assert!(!handled.output.contains_key("city"));
    }

    #[test]
    fn scalar_output_variables_fail() {
        let node = Node::new("form", NodeKind::Form).with_metadata(json!({"outputVariables": "name"}));
        let err = handle(&node, &vars()).unwrap_err();
        assert_eq!(err.to_string(), "outputVariables must be an array");
    }
}
