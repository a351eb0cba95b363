//! 协议转换层：在消息数组请求与单一 input 请求之间双向转换。
//!
//! # Directional Translators
//!
//! A translator is any value with the [`RequestTranslator`] capability set:
//! validate a payload, translate a payload. The two built-in translators
//! compose shape validation, the mapping table for their direction and
//! unknown-field passthrough:
//!
//! 1. validate the source shape, failing fast with the offending field;
//! 2. run the mapping table to build the known output fields;
//! 3. detect unknown fields on the *original* payload;
//! 4. copy every top-level unknown field that is not on the drop list;
//! 5. return the output together with the unknown-field list.
//!
//! Translators never mutate shared state, so any number of translations may
//! run concurrently. A fault inside a built-in translator is caught and
//! returned as [`TranslateError::Internal`] instead of unwinding.
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_translate::translator::{create_translator, TranslationOptions};
//! use ai_lib_translate::Direction;
//! use serde_json::json;
//!
//! let translator = create_translator(Direction::ResponsesToChat);
//! let result = translator.translate_request(
//!     &json!({"model": "m", "input": "Hi", "instructions": "Be terse"}),
//!     &TranslationOptions::new(),
//! );
//! assert_eq!(
//!     result.translated().unwrap(),
//!     &json!({"model": "m", "messages": [
//!         {"role": "system", "content": "Be terse"},
//!         {"role": "user", "content": "Hi"}
//!     ]})
//! );
//! ```

pub mod chat_to_responses;
pub mod error;
pub mod responses_to_chat;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::schema::{detect_unknown_fields, is_dropped, ValidationError};
use crate::types::Direction;
use crate::utils::panic_message;

pub use chat_to_responses::ChatToResponsesTranslator;
pub use error::TranslateError;
pub use responses_to_chat::ResponsesToChatTranslator;

/// Per-call options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationOptions {
    /// Opaque correlation token; used only for observability.
    pub request_id: String,
    /// Accepted but currently has no effect: unknown fields are still passed
    /// through. The orchestrator logs a warning when it would have mattered.
    pub strict: bool,
}

impl TranslationOptions {
    /// Options with a freshly generated request id.
    pub fn new() -> Self {
        Self::with_request_id(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_request_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            strict: false,
        }
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl Default for TranslationOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful translation.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The request in the target schema.
    pub translated: Value,
    /// Unknown source fields in payload order (nested ones dotted).
    pub unknown_fields: Vec<String>,
    /// More than one message in a message-array request. Only reported in
    /// the message-array → single-input direction.
    pub multi_turn: Option<bool>,
}

/// Outcome of one translation: exactly one of output or error.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationResult {
    Success(Translation),
    Failure(TranslateError),
}

impl TranslationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, TranslationResult::Success(_))
    }

    pub fn translated(&self) -> Option<&Value> {
        match self {
            TranslationResult::Success(t) => Some(&t.translated),
            TranslationResult::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&TranslateError> {
        match self {
            TranslationResult::Success(_) => None,
            TranslationResult::Failure(e) => Some(e),
        }
    }

    /// Empty on failure: detection only runs after validation succeeds.
    pub fn unknown_fields(&self) -> &[String] {
        match self {
            TranslationResult::Success(t) => &t.unknown_fields,
            TranslationResult::Failure(_) => &[],
        }
    }

    pub fn multi_turn(&self) -> bool {
        match self {
            TranslationResult::Success(t) => t.multi_turn.unwrap_or(false),
            TranslationResult::Failure(_) => false,
        }
    }

    pub fn into_result(self) -> Result<Translation, TranslateError> {
        self.into()
    }
}

impl From<Result<Translation, TranslateError>> for TranslationResult {
    fn from(result: Result<Translation, TranslateError>) -> Self {
        match result {
            Ok(t) => TranslationResult::Success(t),
            Err(e) => TranslationResult::Failure(e),
        }
    }
}

impl From<TranslationResult> for Result<Translation, TranslateError> {
    fn from(result: TranslationResult) -> Self {
        match result {
            TranslationResult::Success(t) => Ok(t),
            TranslationResult::Failure(e) => Err(e),
        }
    }
}

/// Wire shape: `{success, translated?, error?, unknownFields, multiTurnDetected?}`.
impl Serialize for TranslationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("success", &self.is_success())?;
        match self {
            TranslationResult::Success(t) => {
                map.serialize_entry("translated", &t.translated)?;
                map.serialize_entry("unknownFields", &t.unknown_fields)?;
                if let Some(multi_turn) = t.multi_turn {
                    map.serialize_entry("multiTurnDetected", &multi_turn)?;
                }
            }
            TranslationResult::Failure(e) => {
                map.serialize_entry("error", &e.to_string())?;
                map.serialize_entry("unknownFields", &[] as &[String])?;
            }
        }
        map.end()
    }
}

/// Capability set every translator provides.
///
/// The orchestrator only depends on this trait, so stand-in translators
/// can replace the built-in ones in tests.
pub trait RequestTranslator: Send + Sync + fmt::Debug {
    /// Name used in logs and contract-violation errors.
    fn name(&self) -> &str;

    fn direction(&self) -> Direction;

    /// Shape check without translating.
    fn validate(&self, payload: &Value) -> Result<(), ValidationError>;

    fn is_valid_request(&self, payload: &Value) -> bool {
        self.validate(payload).is_ok()
    }

    /// Translate `payload`. Must return a result for every input.
    fn translate_request(&self, payload: &Value, options: &TranslationOptions)
        -> TranslationResult;
}

/// Built-in translator for `direction`.
pub fn create_translator(direction: Direction) -> Box<dyn RequestTranslator> {
    match direction {
        Direction::ChatToResponses => Box::new(ChatToResponsesTranslator::new()),
        Direction::ResponsesToChat => Box::new(ResponsesToChatTranslator::new()),
    }
}

/// Run a translation body, turning a panic into [`TranslateError::Internal`].
pub(crate) fn guard_internal<F>(translator: &str, body: F) -> TranslationResult
where
    F: FnOnce() -> Result<Translation, TranslateError>,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(result) => result.into(),
        Err(panic) => {
            let message = panic_message(&*panic);
            tracing::error!(translator, message = %message, "internal fault during translation");
            TranslationResult::Failure(TranslateError::Internal(message))
        }
    }
}

/// Steps 3 and 4: detect unknown fields on the original payload and copy the
/// forwardable ones into `out`. Returns every detected unknown field.
///
/// Dropped fields are never copied. A key already produced by the mapping
/// table is never overwritten, and nested (`text.*`) unknowns are only
/// reported because their parent is restructured.
pub(crate) fn pass_through_unknown_fields(
    direction: Direction,
    payload: &Value,
    out: &mut Map<String, Value>,
) -> Vec<String> {
    let detection = detect_unknown_fields(payload, direction.source());
    if let Some(source) = detection.cleaned_payload.as_object() {
        for key in detection.top_level() {
            if is_dropped(key) {
                tracing::debug!(field = key, %direction, "dropping unknown field on the drop list");
                continue;
            }
            if out.contains_key(key) {
                tracing::debug!(field = key, %direction, "unknown field collides with a mapped field; keeping mapped value");
                continue;
            }
            if let Some(value) = source.get(key) {
                out.insert(key.to_string(), value.clone());
            }
        }
    }
    detection.unknown_fields
}
