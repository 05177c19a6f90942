//! Clarification payload normalization.
//!
//! The clarification agent's output has drifted across versions: a bare
//! string array, an array of question objects, or a wrapped
//! `{clarifications: [...]}` object. The final fallback synthesizes one
//! pseudo-question per top-level key so the UI always has something to
//! render, even for a completely unanticipated shape.

use rfx_protocol::ClarificationView;
use serde_json::Value;

use crate::normalize::fields::first_str;

/// Normalize a clarification payload into an ordered question list.
pub fn normalize_clarification(payload: &Value) -> ClarificationView {
    ClarificationView {
        questions: extract_questions(payload),
    }
}

fn extract_questions(payload: &Value) -> Vec<String> {
    match payload {
        Value::Array(items) => questions_from_array(items),
        Value::String(s) => vec![s.clone()],
        Value::Object(map) => {
            for wrapper in ["questions", "clarifications"] {
                if let Some(items) = map.get(wrapper).and_then(Value::as_array) {
                    return questions_from_array(items);
                }
            }
            // Last resort: one pseudo-question per top-level key, in
            // payload order.
            map.iter()
                .map(|(key, value)| format!("{key}: {}", render_value(value)))
                .collect()
        }
        _ => Vec::new(),
    }
}

fn questions_from_array(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => s.clone(),
            Value::Object(_) => first_str(item, &["question", "q", "text", "prompt"])
                .map(str::to_string)
                .unwrap_or_else(|| item.to_string()),
            other => render_value(other),
        })
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
