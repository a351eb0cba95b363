//! Message format shared by the message-array and single-input schemas

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// One conversation turn.
///
/// Only `role` and `content` are understood by the engine. Everything else
/// on the message (`tool_calls`, `name`, `tool_call_id`, ...) lands in
/// `extra` and is serialized back out untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Message {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            extra: Map::new(),
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, text)
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, text)
    }

    /// Attach a pass-through field (e.g. `tool_calls`).
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Render as a JSON object: `role`, `content`, then the pass-through fields.
    pub fn to_value(&self) -> Value {
        let mut obj = Map::with_capacity(self.extra.len() + 2);
        obj.insert("role".into(), Value::String(self.role.as_str().into()));
        obj.insert("content".into(), Value::String(self.content.clone()));
        for (k, v) in &self.extra {
            if k != "role" && k != "content" {
                obj.insert(k.clone(), v.clone());
            }
        }
        Value::Object(obj)
    }
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
    Developer,
    Tool,
}

impl MessageRole {
    pub const ALL: [MessageRole; 5] = [
        MessageRole::System,
        MessageRole::User,
        MessageRole::Assistant,
        MessageRole::Developer,
        MessageRole::Tool,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Developer => "developer",
            MessageRole::Tool => "tool",
        }
    }
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageRole::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in MessageRole::ALL {
            assert_eq!(role.as_str().parse::<MessageRole>(), Ok(role));
        }
        assert_eq!("bogus".parse::<MessageRole>(), Err("bogus".to_string()));
        // Case matters: the wire format is lowercase only.
        assert!("User".parse::<MessageRole>().is_err());
    }

    #[test]
    fn test_to_value_keeps_passthrough_fields() {
        let msg = Message::assistant("calling tool").with_extra(
            "tool_calls",
            json!([{"id": "call_1", "type": "function"}]),
        );
        let v = msg.to_value();
        assert_eq!(v["role"], "assistant");
        assert_eq!(v["content"], "calling tool");
        assert_eq!(v["tool_calls"][0]["id"], "call_1");
    }

    #[test]
    fn test_deserialize_collects_extra() {
        let msg: Message = serde_json::from_value(json!({
            "role": "tool",
            "content": "42",
            "tool_call_id": "call_1"
        }))
        .unwrap();
        assert_eq!(msg.role, MessageRole::Tool);
        assert_eq!(msg.extra.get("tool_call_id"), Some(&json!("call_1")));
    }
}
