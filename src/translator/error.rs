//! Translation error types

use crate::mapping::MappingError;
use crate::schema::ValidationError;

/// Why a translation produced no output.
///
/// Always carried as data inside a failed
/// [`TranslationResult`](super::TranslationResult); nothing in the engine
/// returns it through a panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// The payload does not have the minimal shape of the source schema.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Field mapping failed: {0}")]
    Mapping(#[from] MappingError),

    /// A translator misbehaved (panicked) instead of returning a result.
    #[error("Translator '{translator}' violated its contract: {message}")]
    ContractViolation { translator: String, message: String },

    #[error("Internal translation error: {0}")]
    Internal(String),
}

impl TranslateError {
    pub fn contract_violation(translator: impl Into<String>, message: impl Into<String>) -> Self {
        TranslateError::ContractViolation {
            translator: translator.into(),
            message: message.into(),
        }
    }

    /// Stable category name for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslateError::Validation(_) => "validation",
            TranslateError::Mapping(_) => "mapping",
            TranslateError::ContractViolation { .. } => "contract_violation",
            TranslateError::Internal(_) => "internal",
        }
    }

    /// Shape errors are the client's fault; everything else is ours.
    pub fn is_client_error(&self) -> bool {
        matches!(self, TranslateError::Validation(_))
    }

    /// Offending field path for validation failures.
    pub fn field_path(&self) -> Option<String> {
        match self {
            TranslateError::Validation(e) => Some(e.field_path()),
            _ => None,
        }
    }
}
