//! Validated request views
//!
//! Both views keep the original request object in `body` so the mapping
//! tables can read optional parameters without a second parse.

use serde_json::{Map, Value};

use super::message::Message;

/// Message-array request after shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    /// Non-empty model id.
    pub model: String,
    /// Non-empty list of validated turns.
    pub messages: Vec<Message>,
    /// The request object exactly as received.
    pub body: Map<String, Value>,
}

impl ChatRequest {
    /// More than one turn present.
    pub fn is_multi_turn(&self) -> bool {
        self.messages.len() > 1
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// `input` of a single-input request.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponsesInput {
    Text(String),
    Messages(Vec<Message>),
}

impl ResponsesInput {
    /// Expand into a message list; a plain string becomes one user turn.
    pub fn into_messages(self) -> Vec<Message> {
        match self {
            ResponsesInput::Text(text) => vec![Message::user(text)],
            ResponsesInput::Messages(messages) => messages,
        }
    }

    /// The string input, or the content of the last message.
    pub fn primary_content(&self) -> Option<&str> {
        match self {
            ResponsesInput::Text(text) => Some(text.as_str()),
            ResponsesInput::Messages(messages) => messages.last().map(|m| m.content.as_str()),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ResponsesInput::Text(_) => 1,
            ResponsesInput::Messages(messages) => messages.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Single-input request after shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: ResponsesInput,
    pub body: Map<String, Value>,
}
