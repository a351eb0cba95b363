//! Translation direction tag supplied by the routing layer

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::schema::Schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Message-array request in, single-input request out.
    ChatToResponses,
    /// Single-input request in, message-array request out.
    ResponsesToChat,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::ChatToResponses, Direction::ResponsesToChat];

    pub fn source(&self) -> Schema {
        match self {
            Direction::ChatToResponses => Schema::Chat,
            Direction::ResponsesToChat => Schema::Responses,
        }
    }

    pub fn target(&self) -> Schema {
        self.reverse().source()
    }

    pub fn reverse(&self) -> Direction {
        match self {
            Direction::ChatToResponses => Direction::ResponsesToChat,
            Direction::ResponsesToChat => Direction::ChatToResponses,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::ChatToResponses => "chat_to_responses",
            Direction::ResponsesToChat => "responses_to_chat",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    /// Accepts `chat_to_responses`, `chat-to-responses` and the reverse forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "chat_to_responses" => Ok(Direction::ChatToResponses),
            "responses_to_chat" => Ok(Direction::ResponsesToChat),
            _ => Err(format!(
                "Unknown direction '{}': expected chat-to-responses or responses-to-chat",
                s
            )),
        }
    }
}
