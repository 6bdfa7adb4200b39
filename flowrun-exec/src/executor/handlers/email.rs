use chrono::{SecondsFormat, Utc};
use flowrun_core::{ConfigError, EmailConfig, Node};
use serde_json::{json, Map};
use uuid::Uuid;

use super::{message, Handled, HandlerError};
use crate::executor::template::render_placeholders;
use crate::executor::types::EngineConfig;
use crate::executor::vars::{Variables, EMAIL};

pub(super) fn handle(
    node: &Node,
    vars: &Variables,
    config: &EngineConfig,
) -> Result<Handled, HandlerError> {
    if node.metadata.is_none() {
        return Err(ConfigError::MissingMetadata { kind: "email" }.into());
    }
    if vars.condition_met() == Some(false) {
        return Ok(Handled::skipped(message("Email alert skipped - condition not met")));
    }

    let email = EmailConfig::from_metadata(node.metadata.as_ref())?;
    let subject = render_placeholders(&email.template.subject, vars);
    let body = render_placeholders(&email.template.body, vars);
    let to = vars.string(EMAIL).unwrap_or_default().to_string();
    let from = email
        .from
        .clone()
        .unwrap_or_else(|| config.default_sender.clone());

    let mut output = Map::new();
    output.insert(
        "emailDraft".into(),
        json!({
            "to": to,
            "from": from,
            "subject": subject,
            "body": body,
            "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }),
    );
    output.insert("deliveryStatus".into(), json!("sent"));
    output.insert(
        "messageId".into(),
        json!(format!("msg_{}", Uuid::new_v4().simple())),
    );
    output.insert("emailSent".into(), json!(true));
    output.insert("message".into(), json!(format!("Email alert sent to {to}")));

    for name in &email.output_variables {
        if output.contains_key(name) || !email.input_variables.contains(name) {
            continue;
        }
        if let Some(v) = vars.get(name) {
            output.insert(name.clone(), v.clone());
        }
    }

    Ok(Handled::completed(output))
}

#[cfg(test)]
mod tests {
    use flowrun_core::NodeKind;

    use super::*;
    use crate::executor::step::StepStatus;
    use crate::executor::vars::CONDITION_MET;

    fn node() -> Node {
        Node::new("mail", NodeKind::Email).with_metadata(json!({
            "inputVariables": ["city", "temperature"],
            "outputVariables": ["city", "emailSent"],
            "emailTemplate": {
                "subject": "Alert for {{city}}",
                "body": "{{city}} is {{temperature}}°C, {{unknown}}"
            }
        }))
    }

    fn vars() -> Variables {
        Variables::from(
            json!({"city": "Sydney", "temperature": 28.5, "email": "alice@example.com"})
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    #[test]
    fn renders_draft_from_context() {
        let handled = handle(&node(), &vars(), &EngineConfig::default()).unwrap();
        assert_eq!(handled.status, StepStatus::Completed);

        let draft = &handled.output["emailDraft"];
        assert_eq!(draft["to"], "alice@example.com");
        assert_eq!(draft["from"], "weather-alerts@example.com");
        assert_eq!(draft["subject"], "Alert for Sydney");
        assert_eq!(draft["body"], "Sydney is 28.5°C, {{unknown}}");
        assert_eq!(handled.output["deliveryStatus"], "sent");
        assert_eq!(handled.output["city"], "Sydney");
        assert_eq!(handled.output["emailSent"], true);
        assert!(handled.output["messageId"].as_str().unwrap().starts_with("msg_"));
    }

    #[test]
    fn skips_when_condition_not_met() {
        let mut vars = vars();
        vars.insert(CONDITION_MET, json!(false));
        let handled = handle(&node(), &vars, &EngineConfig::default()).unwrap();
        assert_eq!(handled.status, StepStatus::Skipped);
        assert!(!handled.output.contains_key("emailDraft"));
    }

    #[test]
    fn missing_metadata_fails_before_skip_check() {
        let mut vars = vars();
        vars.insert(CONDITION_MET, json!(false));
        let err = handle(&Node::new("mail", NodeKind::Email), &vars, &EngineConfig::default())
            .unwrap_err();
        assert_eq!(err.to_string(), "email node missing metadata");
    }

    #[test]
    fn sender_falls_back_to_engine_default() {
        let node = Node::new("mail", NodeKind::Email)
            .with_metadata(json!({"emailTemplate": {"subject": "s", "body": "b"}}));
        let config = EngineConfig {
            default_sender: "ops@example.com".into(),
            ..EngineConfig::default()
        };
        let handled = handle(&node, &Variables::new(), &config).unwrap();
        assert_eq!(handled.output["emailDraft"]["from"], "ops@example.com");
        assert_eq!(handled.output["emailDraft"]["to"], "");
    }
}
