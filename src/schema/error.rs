//! Shape validation errors

use crate::types::MessageRole;

/// Why a payload does not have the minimal shape needed to translate it.
///
/// `field` is the name of the message list (`messages` or `input`) so the
/// same variants serve both schemas. Message-level variants carry the 0-based
/// index and the observed JSON type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Request body must be a JSON object, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("Missing required field: model")]
    MissingModel,

    #[error("Invalid model: expected string, got {actual}")]
    InvalidModelType { actual: &'static str },

    #[error("Invalid model: must be a non-empty string")]
    EmptyModel,

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid {field}: expected {expected}, got {actual}")]
    InvalidFieldType {
        field: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Invalid {field}: must not be empty")]
    EmptyField { field: &'static str },

    #[error("Invalid message at {field}[{index}]: expected object, got {actual}")]
    InvalidMessage {
        field: &'static str,
        index: usize,
        actual: &'static str,
    },

    #[error("Missing role at {field}[{index}]")]
    MissingRole { field: &'static str, index: usize },

    #[error("Invalid role type at {field}[{index}]: expected string, got {actual}")]
    InvalidRoleType {
        field: &'static str,
        index: usize,
        actual: &'static str,
    },

    #[error("Invalid role '{role}' at {field}[{index}]: expected one of {}", allowed_roles())]
    InvalidRole {
        field: &'static str,
        index: usize,
        role: String,
    },

    #[error("Missing content at {field}[{index}]")]
    MissingContent { field: &'static str, index: usize },

    #[error("Invalid content type at {field}[{index}]: expected string, got {actual}")]
    InvalidContentType {
        field: &'static str,
        index: usize,
        actual: &'static str,
    },
}

fn allowed_roles() -> String {
    MessageRole::ALL
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// Path of the offending field, e.g. `messages[2].role`.
    pub fn field_path(&self) -> String {
        match self {
            ValidationError::NotAnObject { .. } => "$".to_string(),
            ValidationError::MissingModel
            | ValidationError::InvalidModelType { .. }
            | ValidationError::EmptyModel => "model".to_string(),
            ValidationError::MissingField { field }
            | ValidationError::InvalidFieldType { field, .. }
            | ValidationError::EmptyField { field } => field.to_string(),
            ValidationError::InvalidMessage { field, index, .. } => format!("{}[{}]", field, index),
            ValidationError::MissingRole { field, index }
            | ValidationError::InvalidRoleType { field, index, .. }
            | ValidationError::InvalidRole { field, index, .. } => {
                format!("{}[{}].role", field, index)
            }
            ValidationError::MissingContent { field, index }
            | ValidationError::InvalidContentType { field, index, .. } => {
                format!("{}[{}].content", field, index)
            }
        }
    }

    /// Index of the offending message, when the error is message-level.
    pub fn message_index(&self) -> Option<usize> {
        match self {
            ValidationError::InvalidMessage { index, .. }
            | ValidationError::MissingRole { index, .. }
            | ValidationError::InvalidRoleType { index, .. }
            | ValidationError::InvalidRole { index, .. }
            | ValidationError::MissingContent { index, .. }
            | ValidationError::InvalidContentType { index, .. } => Some(*index),
            _ => None,
        }
    }
}
