//! Text substitution helpers shared by node handlers.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::executor::vars::Variables;

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([^{}\s]+)\s*\}\}").expect("valid"));

/// Replace `{{ name }}` with the string form of variable `name`. Unknown names stay literal.
pub fn render_placeholders(text: &str, vars: &Variables) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures<'_>| match vars.get(&caps[1]) {
            Some(v) => display_value(v),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Replace `{key}` in a URL template with each parameter value. No encoding is applied.
pub fn fill_url_template(template: &str, params: &Map<String, Value>) -> String {
    let mut url = template.to_string();
    for (k, v) in params {
        url = url.replace(&format!("{{{k}}}"), &display_value(v));
    }
    url
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
