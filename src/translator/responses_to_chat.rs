//! Single-input → message-array translator
//!
//! Key differences handled here:
//! - A string `input` becomes one user message; an array is carried over.
//! - `instructions` becomes a leading system message. The reverse direction
//!   never extracts it again, so such requests only round-trip approximately.
//! - `max_output_tokens` becomes `max_tokens`; `text.format` becomes
//!   `response_format`.
//! - `previous_response_id` has no message-array equivalent and is dropped.

use serde_json::Value;

use super::{
    guard_internal, pass_through_unknown_fields, RequestTranslator, TranslateError, Translation,
    TranslationOptions, TranslationResult,
};
use crate::mapping::{apply_rules, RESPONSES_TO_CHAT_RULES};
use crate::schema::{validate_responses_request, ValidationError};
use crate::types::{Direction, ResponsesInput, ResponsesRequest};

#[derive(Debug, Default, Clone, Copy)]
pub struct ResponsesToChatTranslator;

impl ResponsesToChatTranslator {
    pub fn new() -> Self {
        Self
    }

    fn translate_validated(
        &self,
        request: &ResponsesRequest,
        payload: &Value,
        options: &TranslationOptions,
    ) -> Result<Translation, TranslateError> {
        let mut out = apply_rules(RESPONSES_TO_CHAT_RULES, &request.body)?;
        let unknown_fields =
            pass_through_unknown_fields(Direction::ResponsesToChat, payload, &mut out);

        let input_kind = match request.input {
            ResponsesInput::Text(_) => "text",
            ResponsesInput::Messages(_) => "messages",
        };
        tracing::debug!(
            request_id = %options.request_id,
            model = %request.model,
            input_kind,
            unknown_fields = unknown_fields.len(),
            "translated single-input request"
        );

        Ok(Translation {
            translated: Value::Object(out),
            unknown_fields,
            multi_turn: None,
        })
    }
}

impl RequestTranslator for ResponsesToChatTranslator {
    fn name(&self) -> &str {
        "responses_to_chat"
    }

    fn direction(&self) -> Direction {
        Direction::ResponsesToChat
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
            let request = validate_responses_request(payload)?;
            self.translate_validated(&request, payload, options)
        })
    }
}
