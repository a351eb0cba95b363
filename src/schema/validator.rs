//! 请求结构校验：只检查翻译所需的最小结构。
//!
//! Minimal-shape validators for both request schemas.
//!
//! Each validator takes an arbitrary JSON value and returns either a typed
//! view ([`ChatRequest`] / [`ResponsesRequest`]) or a [`ValidationError`].
//! Nothing here panics, allocates global state or looks past the fields it
//! needs: richer message fields are carried along untouched.

use serde_json::{Map, Value};

use super::error::ValidationError;
use crate::types::{ChatRequest, Message, MessageRole, ResponsesInput, ResponsesRequest};
use crate::utils::json_type_name;

/// Validate a message-array request.
pub fn validate_chat_request(payload: &Value) -> Result<ChatRequest, ValidationError> {
    let body = as_object(payload)?;
    let model = validate_model(body)?;

    let raw = body
        .get("messages")
        .ok_or(ValidationError::MissingField { field: "messages" })?;
    let items = raw.as_array().ok_or(ValidationError::InvalidFieldType {
        field: "messages",
        expected: "array",
        actual: json_type_name(raw),
    })?;
    let messages = validate_messages("messages", items)?;

    Ok(ChatRequest {
        model,
        messages,
        body: body.clone(),
    })
}

/// Validate a single-input request.
pub fn validate_responses_request(payload: &Value) -> Result<ResponsesRequest, ValidationError> {
    let body = as_object(payload)?;
    let model = validate_model(body)?;

    let raw = body
        .get("input")
        .ok_or(ValidationError::MissingField { field: "input" })?;
    let input = match raw {
        Value::String(text) if text.is_empty() => {
            return Err(ValidationError::EmptyField { field: "input" })
        }
        Value::String(text) => ResponsesInput::Text(text.clone()),
        Value::Array(items) => ResponsesInput::Messages(validate_messages("input", items)?),
        other => {
            return Err(ValidationError::InvalidFieldType {
                field: "input",
                expected: "string or array",
                actual: json_type_name(other),
            })
        }
    };

    Ok(ResponsesRequest {
        model,
        input,
        body: body.clone(),
    })
}

pub fn is_valid_chat_request(payload: &Value) -> bool {
    validate_chat_request(payload).is_ok()
}

pub fn is_valid_responses_request(payload: &Value) -> bool {
    validate_responses_request(payload).is_ok()
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject {
        actual: json_type_name(payload),
    })
}

fn validate_model(body: &Map<String, Value>) -> Result<String, ValidationError> {
    match body.get("model") {
        None => Err(ValidationError::MissingModel),
        Some(Value::String(m)) if m.is_empty() => Err(ValidationError::EmptyModel),
        Some(Value::String(m)) => Ok(m.clone()),
        Some(other) => Err(ValidationError::InvalidModelType {
            actual: json_type_name(other),
        }),
    }
}

fn validate_messages(field: &'static str, items: &[Value]) -> Result<Vec<Message>, ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_message(field, index, item))
        .collect()
}

fn validate_message(
    field: &'static str,
    index: usize,
    item: &Value,
) -> Result<Message, ValidationError> {
    let obj = item.as_object().ok_or(ValidationError::InvalidMessage {
        field,
        index,
        actual: json_type_name(item),
    })?;

    let role = match obj.get("role") {
        None => return Err(ValidationError::MissingRole { field, index }),
        Some(Value::String(r)) => r
            .parse::<MessageRole>()
            .map_err(|role| ValidationError::InvalidRole { field, index, role })?,
        Some(other) => {
            return Err(ValidationError::InvalidRoleType {
                field,
                index,
                actual: json_type_name(other),
            })
        }
    };

    let content = match obj.get("content") {
        None => return Err(ValidationError::MissingContent { field, index }),
        Some(Value::String(c)) => c.clone(),
        Some(other) => {
            return Err(ValidationError::InvalidContentType {
                field,
                index,
                actual: json_type_name(other),
            })
        }
    };

    let extra = obj
        .iter()
        .filter(|(k, _)| k.as_str() != "role" && k.as_str() != "content")
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Message {
        role,
        content,
        extra,
    })
}
