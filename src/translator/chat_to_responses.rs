//! Message-array → single-input translator
//!
//! Key differences handled here:
//! - `messages` is carried over as the `input` array, element shape unchanged.
//! - `max_tokens` (or `max_completion_tokens`) becomes `max_output_tokens`.
//! - `response_format` is nested as `text.format`.
//! - Sampling-count, penalty, stop and logprob controls are dropped.

use serde_json::Value;

use super::{
    guard_internal, pass_through_unknown_fields, RequestTranslator, TranslateError, Translation,
    TranslationOptions, TranslationResult,
};
use crate::mapping::{apply_rules, CHAT_TO_RESPONSES_RULES};
use crate::schema::{validate_chat_request, ValidationError};
use crate::types::{ChatRequest, Direction};

#[derive(Debug, Default, Clone, Copy)]
pub struct ChatToResponsesTranslator;

impl ChatToResponsesTranslator {
    pub fn new() -> Self {
        Self
    }

    fn translate_validated(
        &self,
        request: &ChatRequest,
        payload: &Value,
        options: &TranslationOptions,
    ) -> Result<Translation, TranslateError> {
        let mut out = apply_rules(CHAT_TO_RESPONSES_RULES, &request.body)?;
        let unknown_fields =
            pass_through_unknown_fields(Direction::ChatToResponses, payload, &mut out);
        let multi_turn = request.is_multi_turn();

        tracing::debug!(
            request_id = %options.request_id,
            model = %request.model,
            messages = request.messages.len(),
            unknown_fields = unknown_fields.len(),
            multi_turn,
            "translated message-array request"
        );

        Ok(Translation {
            translated: Value::Object(out),
            unknown_fields,
            multi_turn: Some(multi_turn),
        })
    }
}

impl RequestTranslator for ChatToResponsesTranslator {
    fn name(&self) -> &str {
        "chat_to_responses"
    }

    fn direction(&self) -> Direction {
        Direction::ChatToResponses
    }

    fn validate(&self, payload: &Value) -> Result<(), ValidationError> {
        self.direction().source().validate(payload)
    }

    fn translate_request(
        &self,
        payload: &Value,
        options: &TranslationOptions,
    ) -> TranslationResult {
        guard_internal(self.name(), || {
            let request = validate_chat_request(payload)?;
            self.translate_validated(&request, payload, options)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn translate(payload: Value) -> TranslationResult {
        ChatToResponsesTranslator::new()
            .translate_request(&payload, &TranslationOptions::with_request_id("test"))
    }

    #[test]
    fn test_basic_rename() {
        let result = translate(json!({
            "model": "m",
            "messages": [{"role": "user", "content": "Hi"}],
            "max_tokens": 50
        }));
        assert_eq!(
            result.translated().unwrap(),
            &json!({
                "model": "m",
                "input": [{"role": "user", "content": "Hi"}],
                "max_output_tokens": 50
            })
        );
        assert!(!result.multi_turn());
    }

    #[test]
    fn test_full_parameter_set() {
        let tools = json!([{"type": "function", "function": {"name": "lookup"}}]);
        let result = translate(json!({
            "model": "m",
            "messages": [
                {"role": "system", "content": "sys"},
                {"role": "assistant", "content": "", "tool_calls": [{"id": "c1"}]},
                {"role": "tool", "content": "42", "tool_call_id": "c1"}
            ],
            "temperature": 0.3,
            "top_p": 0.9,
            "stream": true,
            "tools": tools,
            "tool_choice": "auto",
            "response_format": {"type": "json_object"},
            "metadata": {"trace": "abc"},
            "max_completion_tokens": 12
        }));
        let out = result.translated().unwrap();
        assert_eq!(out["temperature"], 0.3);
        assert_eq!(out["top_p"], 0.9);
        assert_eq!(out["stream"], true);
        assert_eq!(out["tools"], tools);
        assert_eq!(out["tool_choice"], "auto");
        assert_eq!(out["text"], json!({"format": {"type": "json_object"}}));
        assert_eq!(out["metadata"], json!({"trace": "abc"}));
        assert_eq!(out["max_output_tokens"], 12);
        assert_eq!(out["input"][1]["tool_calls"][0]["id"], "c1");
        assert_eq!(out["input"][2]["tool_call_id"], "c1");
        assert!(out.get("messages").is_none());
        assert!(out.get("response_format").is_none());
        assert!(result.multi_turn());
    }

    #[test]
    fn test_dropped_fields_never_reach_output() {
        let result = translate(json!({
            "model": "m",
            "messages": [{"role": "user", "content": "Hi"}],
            "frequency_penalty": 0.5,
            "presence_penalty": 0.1,
            "n": 2,
            "stop": ["\n"],
            "logprobs": true,
            "top_logprobs": 3
        }));
        let out = result.translated().unwrap().as_object().unwrap();
        assert_eq!(out.len(), 2, "only model and input expected: {:?}", out);
        assert!(result.unknown_fields().is_empty());
    }

    #[test]
    fn test_unknown_fields_pass_through() {
        let result = translate(json!({
            "model": "m",
            "messages": [{"role": "user", "content": "Hi"}],
            "future_field": 42,
            "user": "u-1"
        }));
        let out = result.translated().unwrap();
        assert_eq!(out["future_field"], 42);
        assert_eq!(out["user"], "u-1");
        assert_eq!(result.unknown_fields(), &["future_field", "user"]);
    }

    #[test]
    fn test_absent_and_null_fields_stay_absent() {
        let result = translate(json!({
            "model": "m",
            "messages": [{"role": "user", "content": "Hi"}],
            "temperature": null,
            "metadata": {}
        }));
        let out = result.translated().unwrap();
        assert!(out.get("temperature").is_none());
        assert!(out.get("metadata").is_none());
        assert!(out.get("max_output_tokens").is_none());
        assert!(out.get("text").is_none());
    }

    #[test]
    fn test_invalid_role_fails_without_translation() {
        let result = translate(json!({
            "model": "m",
            "messages": [{"role": "bogus", "content": "x"}]
        }));
        assert!(!result.is_success());
        let msg = result.error().unwrap().to_string();
        assert!(msg.contains("Invalid role"));
        assert!(msg.contains("bogus"));
        assert!(msg.contains("messages[0]"));
        assert!(result.unknown_fields().is_empty());
    }
}
