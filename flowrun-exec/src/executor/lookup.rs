//! Key search through nested JSON objects.

use serde_json::{Map, Value};

/// Depth below the response root searched by integration nodes.
pub const MAX_LOOKUP_DEPTH: usize = 2;

/// Find `key` in `data` or in objects nested up to `max_depth` levels below it.
///
/// Every match is collected, current level first. The first numeric match wins; otherwise
/// the first non-null match is returned.
pub fn find_value(data: &Map<String, Value>, key: &str, max_depth: usize) -> Option<Value> {
    let mut candidates = Vec::new();
    collect(data, key, 0, max_depth, &mut candidates);

    candidates
        .iter()
        .find(|v| v.is_number())
        .or_else(|| candidates.iter().find(|v| !v.is_null()))
        .map(|v| (*v).clone())
}

fn collect<'a>(
    data: &'a Map<String, Value>,
    key: &str,
    depth: usize,
    max_depth: usize,
    out: &mut Vec<&'a Value>,
) {
    if let Some(v) = data.get(key) {
        out.push(v);
    }
    if depth >= max_depth {
        return;
    }
    for v in data.values() {
        if let Value::Object(nested) = v {
            collect(nested, key, depth + 1, max_depth, out);
        }
    }
}
