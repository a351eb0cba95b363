//! 请求结构层：两种请求结构的已知字段、结构校验与未知字段检测。
//!
//! # Schema Layer
//!
//! Everything the engine knows about the two request schemas:
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`fields`] | Known-field sets per schema and the drop list |
//! | [`validator`] | Minimal-shape validators returning typed views |
//! | [`unknown`] | Set difference between payload keys and a known-field set |
//! | [`error`] | [`ValidationError`] |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_translate::schema::{detect_unknown_fields, validate_chat_request, Schema};
//! use serde_json::json;
//!
//! let payload = json!({
//!     "model": "gpt-4o",
//!     "messages": [{"role": "user", "content": "Hi"}],
//!     "future_field": 42
//! });
//! let request = validate_chat_request(&payload).unwrap();
//! assert_eq!(request.model, "gpt-4o");
//!
//! let detection = detect_unknown_fields(&payload, Schema::Chat);
//! assert_eq!(detection.unknown_fields, vec!["future_field"]);
//! ```

pub mod error;
pub mod fields;
pub mod unknown;
pub mod validator;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

pub use error::ValidationError;
pub use fields::{is_dropped, CHAT_FIELDS, DROPPED_FIELDS, RESPONSES_FIELDS, TEXT_FIELDS};
pub use unknown::{detect_unknown_fields, Detection};
pub use validator::{
    is_valid_chat_request, is_valid_responses_request, validate_chat_request,
    validate_responses_request,
};

/// The two request schemas the engine translates between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Schema {
    /// Message-array schema (`messages: [...]`).
    Chat,
    /// Single-input schema (`input: "..." | [...]`).
    Responses,
}

impl Schema {
    pub fn as_str(&self) -> &'static str {
        match self {
            Schema::Chat => "chat",
            Schema::Responses => "responses",
        }
    }

    /// Top-level known fields, in table order.
    pub fn known_fields(&self) -> &'static [&'static str] {
        match self {
            Schema::Chat => CHAT_FIELDS,
            Schema::Responses => RESPONSES_FIELDS,
        }
    }

    pub fn is_known(&self, field: &str) -> bool {
        match self {
            Schema::Chat => fields::CHAT_FIELD_SET.contains(field),
            Schema::Responses => fields::RESPONSES_FIELD_SET.contains(field),
        }
    }

    /// Known sub-keys of a structural object that is inspected one level deep.
    pub fn nested_known_fields(&self, field: &str) -> Option<&'static HashSet<&'static str>> {
        match (self, field) {
            (Schema::Responses, "text") => Some(&*fields::TEXT_FIELD_SET),
            _ => None,
        }
    }

    /// Validate `payload` against this schema.
    pub fn validate(&self, payload: &serde_json::Value) -> Result<(), ValidationError> {
        match self {
            Schema::Chat => validate_chat_request(payload).map(|_| ()),
            Schema::Responses => validate_responses_request(payload).map(|_| ()),
        }
    }

    /// Guess the schema from the list field a payload carries.
    ///
    /// `messages` wins when both are present; `None` if neither is.
    pub fn detect(payload: &serde_json::Value) -> Option<Schema> {
        let obj = payload.as_object()?;
        if obj.contains_key("messages") {
            Some(Schema::Chat)
        } else if obj.contains_key("input") {
            Some(Schema::Responses)
        } else {
            None
        }
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_schema_detection() {
        assert_eq!(Schema::detect(&json!({"messages": []})), Some(Schema::Chat));
        assert_eq!(Schema::detect(&json!({"input": "x"})), Some(Schema::Responses));
        assert_eq!(Schema::detect(&json!({"model": "m"})), None);
        assert_eq!(Schema::detect(&json!("x")), None);
    }

    #[test]
    fn test_nested_known_fields_only_for_text() {
        assert!(Schema::Responses.nested_known_fields("text").is_some());
        assert!(Schema::Chat.nested_known_fields("text").is_none());
        assert!(Schema::Responses.nested_known_fields("metadata").is_none());
    }

    #[test]
    fn test_validate_dispatches_on_schema() {
        let chat = json!({"model": "m", "messages": [{"role": "user", "content": "Hi"}]});
        assert!(Schema::Chat.validate(&chat).is_ok());
        assert_eq!(
            Schema::Responses.validate(&chat),
            Err(ValidationError::MissingField { field: "input" })
        );
    }
}
