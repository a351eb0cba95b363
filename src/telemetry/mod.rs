//! 可观测性模块：翻译事件与可注入的事件接收器。
//!
//! Observability for the translation engine.
//!
//! The orchestrator reports structured [`TranslationEvent`]s to an injected
//! [`TranslationSink`]. The engine depends only on the sink's capability set
//! (`info`/`warn`/`error`/`debug`), never on a concrete backend.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`TranslationEvent`] | Typed event enum |
//! | [`TranslationSink`] | Trait for event destinations |
//! | [`TracingSink`] | Default sink, forwards to `tracing` |
//! | [`NoopSink`] | Discards everything |
//! | [`InMemorySink`] | Bounded in-memory sink for tests |
//! | [`CompositeSink`] | Fan-out to several sinks |

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, RwLock};

use crate::types::Direction;

/// Severity of an emitted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for EventLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventLevel::Debug => "debug",
            EventLevel::Info => "info",
            EventLevel::Warn => "warn",
            EventLevel::Error => "error",
        })
    }
}

/// Structured events emitted by the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum TranslationEvent {
    /// The payload failed the translator's shape check; nothing was translated.
    ValidationFailed {
        request_id: String,
        direction: Direction,
        translator: String,
        error: String,
        field_path: Option<String>,
    },
    /// The translator ran; `success` says whether it produced output.
    Translated {
        request_id: String,
        direction: Direction,
        translator: String,
        success: bool,
        unknown_field_count: usize,
        unknown_fields: Vec<String>,
        multi_turn: bool,
        error: Option<String>,
    },
    /// The message-array request carried more than one message.
    MultiTurnDetected {
        request_id: String,
        direction: Direction,
    },
    /// `strict` was requested but unknown fields were passed through anyway.
    StrictModeIgnored {
        request_id: String,
        direction: Direction,
        unknown_fields: Vec<String>,
    },
    /// The translator panicked instead of returning a result.
    ContractViolation {
        request_id: String,
        direction: Direction,
        translator: String,
        message: String,
    },
}

impl TranslationEvent {
    pub fn request_id(&self) -> &str {
        match self {
            TranslationEvent::ValidationFailed { request_id, .. }
            | TranslationEvent::Translated { request_id, .. }
            | TranslationEvent::MultiTurnDetected { request_id, .. }
            | TranslationEvent::StrictModeIgnored { request_id, .. }
            | TranslationEvent::ContractViolation { request_id, .. } => request_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TranslationEvent::ValidationFailed { .. } => "validation_failed",
            TranslationEvent::Translated { .. } => "translated",
            TranslationEvent::MultiTurnDetected { .. } => "multi_turn_detected",
            TranslationEvent::StrictModeIgnored { .. } => "strict_mode_ignored",
            TranslationEvent::ContractViolation { .. } => "contract_violation",
        }
    }
}

/// Event destination.
///
/// Implementations must not block; the orchestrator calls them inline and
/// ignores anything that goes wrong inside them.
pub trait TranslationSink: Send + Sync {
    fn record(&self, level: EventLevel, event: &TranslationEvent);

    fn debug(&self, event: &TranslationEvent) {
        self.record(EventLevel::Debug, event)
    }
    fn info(&self, event: &TranslationEvent) {
        self.record(EventLevel::Info, event)
    }
    fn warn(&self, event: &TranslationEvent) {
        self.record(EventLevel::Warn, event)
    }
    fn error(&self, event: &TranslationEvent) {
        self.record(EventLevel::Error, event)
    }
}

/// No-op sink.
pub struct NoopSink;

impl TranslationSink for NoopSink {
    fn record(&self, _: EventLevel, _: &TranslationEvent) {}
}

/// Returns a no-op sink.
pub fn noop_sink() -> Arc<dyn TranslationSink> {
    Arc::new(NoopSink)
}

/// Forwards events to `tracing` with the event serialized as a field.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl TranslationSink for TracingSink {
    fn record(&self, level: EventLevel, event: &TranslationEvent) {
        let name = event.name();
        let request_id = event.request_id();
        let detail = serde_json::to_string(event).unwrap_or_default();
        match level {
            EventLevel::Debug => tracing::debug!(event = name, request_id, %detail, "translation event"),
            EventLevel::Info => tracing::info!(event = name, request_id, %detail, "translation event"),
            EventLevel::Warn => tracing::warn!(event = name, request_id, %detail, "translation event"),
            EventLevel::Error => tracing::error!(event = name, request_id, %detail, "translation event"),
        }
    }
}

/// Returns the default `tracing`-backed sink.
pub fn tracing_sink() -> Arc<dyn TranslationSink> {
    Arc::new(TracingSink)
}

/// In-memory sink for testing. Keeps the newest `max_events` entries.
pub struct InMemorySink {
    events: RwLock<Vec<(EventLevel, TranslationEvent)>>,
    max_events: usize,
}

impl InMemorySink {
    pub fn new(max: usize) -> Self {
        Self {
            events: RwLock::new(Vec::new()),
            max_events: max,
        }
    }

    pub fn get_events(&self) -> Vec<(EventLevel, TranslationEvent)> {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn get_events_by_request(&self, req_id: &str) -> Vec<(EventLevel, TranslationEvent)> {
        self.get_events()
            .into_iter()
            .filter(|(_, e)| e.request_id() == req_id)
            .collect()
    }

    /// Names of recorded events, oldest first.
    pub fn event_names(&self) -> Vec<&'static str> {
        self.get_events().iter().map(|(_, e)| e.name()).collect()
    }

    pub fn clear(&self) {
        self.events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }

    pub fn len(&self) -> usize {
        self.events
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySink {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl TranslationSink for InMemorySink {
    fn record(&self, level: EventLevel, event: &TranslationEvent) {
        let mut events = self
            .events
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        events.push((level, event.clone()));
        if events.len() > self.max_events {
            events.remove(0);
        }
    }
}

/// Composite sink for multiple destinations.
#[derive(Default)]
pub struct CompositeSink {
    sinks: Vec<Arc<dyn TranslationSink>>,
}

impl CompositeSink {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn add_sink(mut self, sink: Arc<dyn TranslationSink>) -> Self {
        self.sinks.push(sink);
        self
    }
}

impl TranslationSink for CompositeSink {
    fn record(&self, level: EventLevel, event: &TranslationEvent) {
        for s in &self.sinks {
            s.record(level, event);
        }
    }
}
