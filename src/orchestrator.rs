//! 转换编排：校验、调用转换器、上报事件。
//!
//! The orchestrator wraps one translation call with observability and
//! contract enforcement:
//!
//! 1. ask the translator to validate the payload; on failure emit
//!    `ValidationFailed` (warn) and return the failure;
//! 2. run the translator, converting a panic into
//!    [`TranslateError::ContractViolation`] (logged at error level);
//! 3. emit `Translated` (info on success, warn on failure), then
//!    `MultiTurnDetected` when applicable, then `StrictModeIgnored` when
//!    `strict` was requested and unknown fields were passed through.
//!
//! The returned result is exactly what the translator produced. Sink
//! emission is fire-and-forget: a sink that panics is logged and skipped.

use serde_json::Value;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::config::TranslateConfig;
use crate::telemetry::{tracing_sink, EventLevel, TranslationEvent, TranslationSink};
use crate::translator::{
    create_translator, RequestTranslator, TranslateError, TranslationOptions, TranslationResult,
};
use crate::types::Direction;
use crate::utils::panic_message;

pub struct TranslationOrchestrator {
    sink: Arc<dyn TranslationSink>,
    emit_multi_turn_events: bool,
    strict: bool,
}

impl TranslationOrchestrator {
    pub fn new(sink: Arc<dyn TranslationSink>) -> Self {
        Self {
            sink,
            emit_multi_turn_events: true,
            strict: false,
        }
    }

    pub fn from_config(config: &TranslateConfig) -> Self {
        Self::new(config.build_sink())
            .with_multi_turn_events(config.emit_multi_turn_events)
            .with_strict(config.strict)
    }

    pub fn with_multi_turn_events(mut self, enabled: bool) -> Self {
        self.emit_multi_turn_events = enabled;
        self
    }

    /// Treat every call as strict, whatever its options say.
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn sink(&self) -> &Arc<dyn TranslationSink> {
        &self.sink
    }

    /// Run the built-in translator for `direction`.
    pub fn run_direction(
        &self,
        direction: Direction,
        payload: &Value,
        options: &TranslationOptions,
    ) -> TranslationResult {
        let translator = create_translator(direction);
        self.run(translator.as_ref(), payload, options)
    }

    pub fn run(
        &self,
        translator: &dyn RequestTranslator,
        payload: &Value,
        options: &TranslationOptions,
    ) -> TranslationResult {
        let direction = translator.direction();
        let name = translator.name().to_string();
        let request_id = options.request_id.clone();

        match panic::catch_unwind(AssertUnwindSafe(|| translator.validate(payload))) {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                self.emit(
                    EventLevel::Warn,
                    TranslationEvent::ValidationFailed {
                        request_id,
                        direction,
                        translator: name,
                        error: e.to_string(),
                        field_path: Some(e.field_path()),
                    },
                );
                return TranslationResult::Failure(e.into());
            }
            Err(panic) => return self.contract_violation(&name, direction, request_id, panic),
        }

        let result = match panic::catch_unwind(AssertUnwindSafe(|| {
            translator.translate_request(payload, options)
        })) {
            Ok(result) => result,
            Err(panic) => return self.contract_violation(&name, direction, request_id, panic),
        };

        let multi_turn = result.multi_turn();
        let unknown_fields = result.unknown_fields().to_vec();
        let level = if result.is_success() {
            EventLevel::Info
        } else {
            EventLevel::Warn
        };
        self.emit(
            level,
            TranslationEvent::Translated {
                request_id: request_id.clone(),
                direction,
                translator: name,
                success: result.is_success(),
                unknown_field_count: unknown_fields.len(),
                unknown_fields: unknown_fields.clone(),
                multi_turn,
                error: result.error().map(ToString::to_string),
            },
        );

        if multi_turn && self.emit_multi_turn_events {
            self.emit(
                EventLevel::Info,
                TranslationEvent::MultiTurnDetected {
                    request_id: request_id.clone(),
                    direction,
                },
            );
        }

        if (options.strict || self.strict) && !unknown_fields.is_empty() {
            self.emit(
                EventLevel::Warn,
                TranslationEvent::StrictModeIgnored {
                    request_id,
                    direction,
                    unknown_fields,
                },
            );
        }

        result
    }

    fn contract_violation(
        &self,
        translator: &str,
        direction: Direction,
        request_id: String,
        panic: Box<dyn Any + Send>,
    ) -> TranslationResult {
        let message = panic_message(&*panic);
        tracing::error!(
            request_id = %request_id,
            translator,
            %direction,
            message = %message,
            "translator panicked"
        );
        self.emit(
            EventLevel::Error,
            TranslationEvent::ContractViolation {
                request_id,
                direction,
                translator: translator.to_string(),
                message: message.clone(),
            },
        );
        TranslationResult::Failure(TranslateError::contract_violation(translator, message))
    }

    fn emit(&self, level: EventLevel, event: TranslationEvent) {
        let recorded = panic::catch_unwind(AssertUnwindSafe(|| self.sink.record(level, &event)));
        if recorded.is_err() {
            tracing::warn!(
                event = event.name(),
                request_id = event.request_id(),
                "translation sink panicked; event dropped"
            );
        }
    }
}

impl Default for TranslationOrchestrator {
    fn default() -> Self {
        Self::new(tracing_sink())
    }
}

impl std::fmt::Debug for TranslationOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationOrchestrator")
            .field("emit_multi_turn_events", &self.emit_multi_turn_events)
            .field("strict", &self.strict)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::InMemorySink;
    use serde_json::json;

    fn orchestrator() -> (TranslationOrchestrator, Arc<InMemorySink>) {
        let sink = Arc::new(InMemorySink::default());
        (TranslationOrchestrator::new(sink.clone()), sink)
    }

    #[test]
    fn test_single_turn_emits_one_event() {
        let (orch, sink) = orchestrator();
        let result = orch.run_direction(
            Direction::ChatToResponses,
            &json!({"model": "m", "messages": [{"role": "user", "content": "Hi"}]}),
            &TranslationOptions::with_request_id("r1"),
        );
        assert!(result.is_success());
        let events = sink.get_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].0, EventLevel::Info);
        assert_eq!(events[0].1.request_id(), "r1");
    }

    #[test]
    fn test_multi_turn_events_can_be_disabled() {
        let sink = Arc::new(InMemorySink::default());
        let orch = TranslationOrchestrator::new(sink.clone()).with_multi_turn_events(false);
        let result = orch.run_direction(
            Direction::ChatToResponses,
            &json!({"model": "m", "messages": [
                {"role": "user", "content": "a"},
                {"role": "assistant", "content": "b"}
            ]}),
            &TranslationOptions::new(),
        );
        assert!(result.multi_turn());
        assert_eq!(sink.event_names(), vec!["translated"]);
    }

    #[test]
    fn test_from_config_uses_configured_sink() {
        let cfg = TranslateConfig::from_yaml_str("sink: noop\nemit_multi_turn_events: false\n").unwrap();
        let orch = TranslationOrchestrator::from_config(&cfg);
        assert!(!orch.emit_multi_turn_events);
        assert!(!orch.strict);
        let result = orch.run_direction(
            Direction::ResponsesToChat,
            &json!({"model": "m", "input": "Hi"}),
            &TranslationOptions::new(),
        );
        assert!(result.is_success());
    }

    #[test]
    fn test_configured_strict_applies_without_option() {
        let cfg = TranslateConfig::from_yaml_str("sink: noop\nstrict: true\n").unwrap();
        assert!(TranslationOrchestrator::from_config(&cfg).strict);

        let sink = Arc::new(InMemorySink::default());
        let orch = TranslationOrchestrator::new(sink.clone()).with_strict(cfg.strict);
        orch.run_direction(
            Direction::ResponsesToChat,
            &json!({"model": "m", "input": "Hi", "future_field": 1}),
            &TranslationOptions::new(),
        );
        assert_eq!(sink.event_names(), vec!["translated", "strict_mode_ignored"]);
    }
}
