//! 往返一致性检查（诊断工具，不参与正常转换路径）。
//!
//! Round-trip equivalence checking.
//!
//! Translating a request forward and back should preserve its essential
//! parameters even when the exact shape changes (a string `input` comes back
//! as a one-element message array, `instructions` come back as a system
//! message). [`RoundTripChecker`] compares only those essentials:
//!
//! | Field | Extracted from |
//! |-------|----------------|
//! | model | `model` |
//! | content | last message content, or `input` string / last input message content |
//! | token limit | `max_tokens`, `max_completion_tokens` or `max_output_tokens` |
//! | sampling | `temperature`, `top_p` |
//! | misc | `stream`, `tools`, `tool_choice`, `metadata` |

use serde::Serialize;
use serde_json::Value;

use crate::translator::{create_translator, TranslateError, TranslationOptions};
use crate::types::Direction;
use crate::utils::{json_type_name, PathMapper};

const TOKEN_LIMIT_FIELDS: [&str; 3] = ["max_tokens", "max_completion_tokens", "max_output_tokens"];
const PLAIN_FIELDS: [&str; 6] = ["temperature", "top_p", "stream", "tools", "tool_choice", "metadata"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundTripReport {
    pub success: bool,
    pub differences: Vec<String>,
}

impl RoundTripReport {
    fn from_differences(differences: Vec<String>) -> Self {
        Self {
            success: differences.is_empty(),
            differences,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RoundTripChecker;

impl RoundTripChecker {
    pub fn new() -> Self {
        Self
    }

    /// Compare `original` with `back`, the result of translating `original`
    /// to `intermediate` and then back again.
    pub fn check(&self, original: &Value, intermediate: &Value, back: &Value) -> RoundTripReport {
        let mut differences = Vec::new();

        if !intermediate.is_object() {
            differences.push(format!(
                "intermediate: expected object, got {}",
                json_type_name(intermediate)
            ));
        }

        compare("model", field(original, "model"), field(back, "model"), &mut differences);
        compare(
            "content",
            primary_content(original),
            primary_content(back),
            &mut differences,
        );
        compare(
            "token_limit",
            token_limit(original),
            token_limit(back),
            &mut differences,
        );
        for name in PLAIN_FIELDS {
            compare(name, field(original, name), field(back, name), &mut differences);
        }

        RoundTripReport::from_differences(differences)
    }
}

/// Translate `payload` in `direction`, translate the output back, and check
/// the pair. Fails if either leg fails.
pub fn round_trip(payload: &Value, direction: Direction) -> Result<RoundTripReport, TranslateError> {
    let options = TranslationOptions::new();
    let forward = create_translator(direction)
        .translate_request(payload, &options)
        .into_result()?;
    let back = create_translator(direction.reverse())
        .translate_request(&forward.translated, &options)
        .into_result()?;
    Ok(RoundTripChecker::new().check(payload, &forward.translated, &back.translated))
}

fn compare(name: &str, original: Option<&Value>, back: Option<&Value>, out: &mut Vec<String>) {
    if original != back {
        out.push(format!("{}: {} != {}", name, render(original), render(back)));
    }
}

fn render(value: Option<&Value>) -> String {
    value.map_or_else(|| "<absent>".to_string(), Value::to_string)
}

/// Top-level field, treating `null` as absent.
fn field<'a>(payload: &'a Value, name: &str) -> Option<&'a Value> {
    payload
        .as_object()
        .and_then(|obj| PathMapper::get_path(obj, name))
        .filter(|v| !v.is_null())
}

fn token_limit(payload: &Value) -> Option<&Value> {
    TOKEN_LIMIT_FIELDS.iter().find_map(|name| field(payload, name))
}

fn primary_content(payload: &Value) -> Option<&Value> {
    if let Some(messages) = field(payload, "messages").and_then(Value::as_array) {
        return last_message_content(messages);
    }
    match field(payload, "input")? {
        s @ Value::String(_) => Some(s),
        Value::Array(items) => last_message_content(items),
        _ => None,
    }
}

fn last_message_content(messages: &[Value]) -> Option<&Value> {
    messages.last().and_then(|m| m.get("content"))
}
