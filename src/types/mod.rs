//! 类型系统模块：定义两种请求结构共享的消息与请求类型。
//!
//! # Types Module
//!
//! Strongly-typed views over the two request schemas the engine translates
//! between. Validators in [`crate::schema`] produce these views; the mapping
//! tables read from them and from the raw request body.
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Message`] | One role/content turn, with pass-through fields kept verbatim |
//! | [`MessageRole`] | Enumerated role set (system, user, assistant, developer, tool) |
//! | [`ChatRequest`] | Validated message-array request |
//! | [`ResponsesRequest`] | Validated single-input request |
//! | [`ResponsesInput`] | `input` as either a string or a message list |
//! | [`Direction`] | Which schema is translated into which |
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_translate::types::{Message, MessageRole};
//!
//! let system = Message::system("You are a helpful assistant");
//! let user = Message::user("What's the weather?");
//! assert_eq!(system.role, MessageRole::System);
//! assert_eq!(user.content, "What's the weather?");
//! ```

pub mod direction;
pub mod message;
pub mod request;

pub use direction::Direction;
pub use message::{Message, MessageRole};
pub use request::{ChatRequest, ResponsesInput, ResponsesRequest};
