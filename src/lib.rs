//! # ai-lib-translate
//!
//! 在消息数组（chat）请求与单一 input（responses）请求之间进行双向、数据驱动的请求结构转换。
//!
//! Bidirectional request-shape translation between the message-array
//! ("chat") schema and the single-input ("responses") schema of LLM APIs.
//!
//! ## Overview
//!
//! Clients written against one schema can talk to a backend that speaks the
//! other. A translator validates the minimal shape of the source payload,
//! maps every known field through a data table (copy, rename, restructure
//! or drop), forwards unknown fields untouched, and reports which fields
//! were unknown. All mapping knowledge lives in [`mapping::rules`]; nothing
//! outside that table knows which field becomes which.
//!
//! ## Core Philosophy
//!
//! - **Table-Driven**: field correspondences are data, not code
//! - **Forward-Compatible**: fields the engine does not know are passed through
//! - **Failures Are Data**: translators return a [`TranslationResult`] and never panic
//! - **Pure**: no I/O, no shared mutable state; safe to call concurrently
//!
//! ## Quick Start
//!
//! ```rust
//! use ai_lib_translate::{Direction, TranslationOptions, TranslationOrchestrator};
//! use serde_json::json;
//!
//! let orchestrator = TranslationOrchestrator::default();
//! let result = orchestrator.run_direction(
//!     Direction::ChatToResponses,
//!     &json!({
//!         "model": "gpt-4o",
//!         "messages": [{"role": "user", "content": "Hi"}],
//!         "max_tokens": 50
//!     }),
//!     &TranslationOptions::new(),
//! );
//!
//! assert_eq!(
//!     result.translated().unwrap(),
//!     &json!({
//!         "model": "gpt-4o",
//!         "input": [{"role": "user", "content": "Hi"}],
//!         "max_output_tokens": 50
//!     })
//! );
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`types`] | Messages, roles, typed request views, [`Direction`] |
//! | [`schema`] | Known-field sets, shape validation, unknown-field detection |
//! | [`mapping`] | Field-mapping rule tables and the rule engine |
//! | [`translator`] | Directional translators and [`TranslationResult`] |
//! | [`orchestrator`] | Validation, contract enforcement and event emission |
//! | [`roundtrip`] | Round-trip equivalence checking |
//! | [`telemetry`] | Translation events and sinks |
//! | [`config`] | YAML / environment configuration |

pub mod config;
pub mod mapping;
pub mod orchestrator;
pub mod roundtrip;
pub mod schema;
pub mod telemetry;
pub mod translator;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{SinkKind, TranslateConfig};
pub use orchestrator::TranslationOrchestrator;
pub use roundtrip::{round_trip, RoundTripChecker, RoundTripReport};
pub use schema::{Schema, ValidationError};
pub use telemetry::{TranslationEvent, TranslationSink};
pub use translator::{
    create_translator, RequestTranslator, TranslateError, Translation, TranslationOptions,
    TranslationResult,
};
pub use types::{Direction, Message, MessageRole};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
