//! End-to-end translation through the public API

use ai_lib_translate::schema::DROPPED_FIELDS;
use ai_lib_translate::{
    create_translator, Direction, TranslateError, TranslationOptions, TranslationResult,
    ValidationError,
};
use serde_json::{json, Value};

fn translate(direction: Direction, payload: Value) -> TranslationResult {
    create_translator(direction).translate_request(&payload, &TranslationOptions::new())
}

#[test]
fn test_instructions_example() {
    let result = translate(
        Direction::ResponsesToChat,
        json!({"model": "m", "input": "Hi", "instructions": "Be terse"}),
    );
    assert_eq!(
        result.translated().unwrap(),
        &json!({
            "model": "m",
            "messages": [
                {"role": "system", "content": "Be terse"},
                {"role": "user", "content": "Hi"}
            ]
        })
    );
}

#[test]
fn test_max_tokens_example() {
    let result = translate(
        Direction::ChatToResponses,
        json!({"model": "m", "messages": [{"role": "user", "content": "Hi"}], "max_tokens": 50}),
    );
    assert_eq!(
        result.translated().unwrap(),
        &json!({
            "model": "m",
            "input": [{"role": "user", "content": "Hi"}],
            "max_output_tokens": 50
        })
    );
}

#[test]
fn test_invalid_role_example() {
    let result = translate(
        Direction::ChatToResponses,
        json!({"model": "m", "messages": [{"role": "bogus", "content": "x"}]}),
    );
    let wire = serde_json::to_value(&result).unwrap();
    assert_eq!(wire["success"], false);
    assert!(wire.get("translated").is_none());
    let error = wire["error"].as_str().unwrap();
    assert!(error.contains("Invalid role"), "{}", error);
    assert!(error.contains("bogus"), "{}", error);
    assert!(error.contains('0'), "{}", error);
}

#[test]
fn test_validation_errors_name_the_field() {
    let cases = vec![
        (
            Direction::ChatToResponses,
            json!("not an object"),
            ValidationError::NotAnObject { actual: "string" },
        ),
        (
            Direction::ChatToResponses,
            json!({"messages": [{"role": "user", "content": "x"}]}),
            ValidationError::MissingModel,
        ),
        (
            Direction::ChatToResponses,
            json!({"model": "m", "messages": []}),
            ValidationError::EmptyField { field: "messages" },
        ),
        (
            Direction::ResponsesToChat,
            json!({"model": "m", "input": ""}),
            ValidationError::EmptyField { field: "input" },
        ),
        (
            Direction::ResponsesToChat,
            json!({"model": "m", "input": [{"role": "user", "content": "a"}, {"role": "user"}]}),
            ValidationError::MissingContent { field: "input", index: 1 },
        ),
    ];

    for (direction, payload, expected) in cases {
        let result = translate(direction, payload.clone());
        assert_eq!(
            result.error(),
            Some(&TranslateError::Validation(expected)),
            "payload: {}",
            payload
        );
    }
}

#[test]
fn test_message_order_and_extra_fields_survive() {
    let messages = json!([
        {"role": "system", "content": "s"},
        {"role": "user", "content": "u", "name": "ann"},
        {"role": "assistant", "content": "", "tool_calls": [{"id": "c1", "type": "function"}]},
        {"role": "tool", "content": "42", "tool_call_id": "c1"},
        {"role": "developer", "content": "d"}
    ]);
    let forward = translate(
        Direction::ChatToResponses,
        json!({"model": "m", "messages": messages}),
    );
    assert_eq!(forward.translated().unwrap()["input"], messages);

    let back = translate(Direction::ResponsesToChat, forward.translated().unwrap().clone());
    assert_eq!(back.translated().unwrap()["messages"], messages);
}

#[test]
fn test_unknown_fields_are_listed_in_payload_order() {
    let result = translate(
        Direction::ChatToResponses,
        json!({
            "model": "m",
            "messages": [{"role": "user", "content": "Hi"}],
            "zeta": 1,
            "alpha": 2
        }),
    );
    assert_eq!(result.unknown_fields(), &["zeta", "alpha"]);
    let keys: Vec<&str> = result
        .translated()
        .unwrap()
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .filter(|k| ["zeta", "alpha"].contains(k))
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn test_every_dropped_field_is_removed() {
    let mut payload = json!({"model": "m", "messages": [{"role": "user", "content": "x"}]});
    for (i, field) in DROPPED_FIELDS.iter().enumerate() {
        payload[*field] = json!(i);
    }
    let out = translate(Direction::ChatToResponses, payload);
    let translated = out.translated().unwrap().as_object().unwrap();
    for field in DROPPED_FIELDS {
        assert!(!translated.contains_key(*field), "{} leaked", field);
    }
    assert!(out.unknown_fields().is_empty());
}

#[test]
fn test_response_format_and_text_format_are_mirrored() {
    let format = json!({"type": "json_schema", "json_schema": {"name": "x", "schema": {}}});
    let forward = translate(
        Direction::ChatToResponses,
        json!({
            "model": "m",
            "messages": [{"role": "user", "content": "x"}],
            "response_format": format
        }),
    );
    assert_eq!(forward.translated().unwrap()["text"]["format"], format);

    let back = translate(Direction::ResponsesToChat, forward.translated().unwrap().clone());
    assert_eq!(back.translated().unwrap()["response_format"], format);
}

#[test]
fn test_wrong_typed_optional_fields_are_omitted() {
    let result = translate(
        Direction::ChatToResponses,
        json!({
            "model": "m",
            "messages": [{"role": "user", "content": "x"}],
            "temperature": "hot",
            "stream": "yes",
            "tools": {"not": "an array"}
        }),
    );
    let out = result.translated().unwrap();
    assert!(out.get("temperature").is_none());
    assert!(out.get("stream").is_none());
    assert!(out.get("tools").is_none());
}

#[test]
fn test_translation_does_not_mutate_input() {
    let payload = json!({
        "model": "m",
        "messages": [{"role": "user", "content": "x"}],
        "max_tokens": 5,
        "future_field": {"nested": true}
    });
    let before = payload.clone();
    let _ = create_translator(Direction::ChatToResponses)
        .translate_request(&payload, &TranslationOptions::new());
    assert_eq!(payload, before);
}

#[test]
fn test_translators_are_shareable_across_threads() {
    let translator: std::sync::Arc<dyn ai_lib_translate::RequestTranslator> =
        std::sync::Arc::from(create_translator(Direction::ChatToResponses));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let t = translator.clone();
            std::thread::spawn(move || {
                let payload = json!({
                    "model": format!("m{}", i),
                    "messages": [{"role": "user", "content": "x"}]
                });
                t.translate_request(&payload, &TranslationOptions::new())
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        let result = handle.join().unwrap();
        assert_eq!(result.translated().unwrap()["model"], format!("m{}", i));
    }
}
