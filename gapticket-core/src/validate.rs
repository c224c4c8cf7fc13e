//! Required-field validation over the raw JSON document.
//!
//! Every check runs regardless of earlier failures, so the caller sees all
//! problems at once. Optional fields are never inspected.

use serde_json::{Map, Value};

/// Validate a decoded gap report. An empty result means the input is valid.
pub fn validate(value: &Value) -> Vec<String> {
    let Some(data) = value.as_object() else {
        return vec!["input must be a JSON object".to_string()];
    };

    let mut errors = Vec::new();

    require_truthy(data, "summary", &mut errors);
    require_truthy(data, "background", &mut errors);

    match data.get("current_state") {
        None => errors.push(missing("current_state")),
        Some(Value::Object(_)) => {}
        Some(_) => errors.push("current_state must be a dictionary".to_string()),
    }

    match data.get("tasks") {
        None => errors.push(missing("tasks")),
        Some(Value::Array(tasks)) if !tasks.is_empty() => {}
        Some(_) => errors.push("tasks must be a non-empty list".to_string()),
    }

    match data.get("effort_days") {
        None => errors.push(missing("effort_days")),
        Some(Value::Number(_)) => {}
        Some(_) => errors.push("effort_days must be a number".to_string()),
    }

    errors
}

fn require_truthy(data: &Map<String, Value>, field: &str, errors: &mut Vec<String>) {
    if !data.get(field).is_some_and(is_truthy) {
        errors.push(missing(field));
    }
}

fn missing(field: &str) -> String {
    format!("Missing required field: {field}")
}

/// JSON truthiness: null, false, zero, and empty strings/arrays/objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
