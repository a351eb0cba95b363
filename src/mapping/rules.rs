//! The two mapping tables.
//!
//! Order matters only for the message list in the single-input direction:
//! `input` must be expanded before `instructions` is prepended.

use super::{FieldRule, Restructure, ValueKind};
use crate::types::Direction;

/// Message-array request → single-input request.
pub const CHAT_TO_RESPONSES_RULES: &[FieldRule] = &[
    FieldRule::copy("model", ValueKind::NonEmptyString),
    FieldRule::restructure(
        "messages",
        "input",
        Restructure::MessagesToInput,
        ValueKind::Array,
    ),
    FieldRule::copy("temperature", ValueKind::Number),
    FieldRule::rename("max_tokens", "max_output_tokens", ValueKind::Number)
        .with_fallback("max_completion_tokens"),
    FieldRule::copy("top_p", ValueKind::Number),
    FieldRule::copy("stream", ValueKind::Bool),
    FieldRule::copy("tools", ValueKind::Array),
    FieldRule::copy("tool_choice", ValueKind::StringOrObject),
    FieldRule::restructure(
        "response_format",
        "text.format",
        Restructure::Nest,
        ValueKind::NonEmptyObject,
    ),
    FieldRule::copy("metadata", ValueKind::NonEmptyObject),
    FieldRule::drop("frequency_penalty"),
    FieldRule::drop("presence_penalty"),
    FieldRule::drop("n"),
    FieldRule::drop("stop"),
    FieldRule::drop("logprobs"),
    FieldRule::drop("top_logprobs"),
];

/// Single-input request → message-array request.
///
/// `instructions` becomes a leading system message. Nothing maps a leading
/// system message back to `instructions` in the other table.
pub const RESPONSES_TO_CHAT_RULES: &[FieldRule] = &[
    FieldRule::copy("model", ValueKind::NonEmptyString),
    FieldRule::restructure(
        "input",
        "messages",
        Restructure::InputToMessages,
        ValueKind::StringOrArray,
    ),
    FieldRule::restructure(
        "instructions",
        "messages",
        Restructure::PrependSystemMessage,
        ValueKind::NonEmptyString,
    ),
    FieldRule::copy("temperature", ValueKind::Number),
    FieldRule::rename("max_output_tokens", "max_tokens", ValueKind::Number),
    FieldRule::copy("top_p", ValueKind::Number),
    FieldRule::copy("stream", ValueKind::Bool),
    FieldRule::copy("tools", ValueKind::Array),
    FieldRule::copy("tool_choice", ValueKind::StringOrObject),
    FieldRule::restructure(
        "text.format",
        "response_format",
        Restructure::Unnest,
        ValueKind::NonEmptyObject,
    ),
    FieldRule::copy("metadata", ValueKind::NonEmptyObject),
    FieldRule::drop("previous_response_id"),
];

pub fn rules_for(direction: Direction) -> &'static [FieldRule] {
    match direction {
        Direction::ChatToResponses => CHAT_TO_RESPONSES_RULES,
        Direction::ResponsesToChat => RESPONSES_TO_CHAT_RULES,
    }
}
