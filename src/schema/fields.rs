//! Known-field sets and the drop list
//!
//! Process-wide constants, built once and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Top-level fields understood for the message-array schema.
pub const CHAT_FIELDS: &[&str] = &[
    "model",
    "messages",
    "temperature",
    "max_tokens",
    "max_completion_tokens",
    "top_p",
    "stream",
    "tools",
    "tool_choice",
    "response_format",
    "metadata",
    "frequency_penalty",
    "presence_penalty",
    "n",
    "stop",
    "logprobs",
    "top_logprobs",
];

/// Top-level fields understood for the single-input schema.
pub const RESPONSES_FIELDS: &[&str] = &[
    "model",
    "input",
    "instructions",
    "temperature",
    "max_output_tokens",
    "top_p",
    "stream",
    "tools",
    "tool_choice",
    "text",
    "metadata",
    "previous_response_id",
];

/// Fields understood inside the single-input `text` object.
pub const TEXT_FIELDS: &[&str] = &["format"];

/// Known message-array fields with no single-input equivalent.
///
/// Never copied in either direction, including when one of them shows up
/// as an unknown field of a single-input request.
pub const DROPPED_FIELDS: &[&str] = &[
    "frequency_penalty",
    "presence_penalty",
    "n",
    "stop",
    "logprobs",
    "top_logprobs",
];

pub(crate) static CHAT_FIELD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| CHAT_FIELDS.iter().copied().collect());

pub(crate) static RESPONSES_FIELD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| RESPONSES_FIELDS.iter().copied().collect());

pub(crate) static TEXT_FIELD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| TEXT_FIELDS.iter().copied().collect());

static DROPPED_FIELD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| DROPPED_FIELDS.iter().copied().collect());

/// `true` if `field` must never be forwarded.
pub fn is_dropped(field: &str) -> bool {
    DROPPED_FIELD_SET.contains(field)
}
