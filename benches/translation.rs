//! Benchmarks for request translation
//!
//! This benchmark measures:
//! - Translation in both directions for small, tool-heavy and long requests
//! - Orchestrator overhead with a no-op sink
//! - Unknown-field detection on wide payloads

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use std::sync::Arc;

use ai_lib_translate::schema::{detect_unknown_fields, Schema};
use ai_lib_translate::telemetry::NoopSink;
use ai_lib_translate::{
    create_translator, Direction, Message, TranslationOptions, TranslationOrchestrator,
};

fn create_simple_chat() -> Value {
    json!({
        "model": "gpt-4o",
        "messages": [Message::user("Hello, world!").to_value()],
        "temperature": 0.7,
        "max_tokens": 1000,
        "stream": true
    })
}

fn create_tool_chat() -> Value {
    json!({
        "model": "gpt-4o",
        "messages": [
            Message::system("You are a helpful assistant that can check the weather.").to_value(),
            Message::user("What is the weather like in Tokyo?").to_value()
        ],
        "temperature": 0.7,
        "max_tokens": 2000,
        "tools": [{
            "type": "function",
            "function": {
                "name": "get_weather",
                "description": "Get the current weather in a given location",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "location": {"type": "string"},
                        "unit": {"type": "string", "enum": ["celsius", "fahrenheit"]}
                    },
                    "required": ["location"]
                }
            }
        }],
        "tool_choice": "auto",
        "response_format": {"type": "json_object"},
        "frequency_penalty": 0.2,
        "seed": 42
    })
}

fn create_long_chat(turns: usize) -> Value {
    let mut messages = vec![Message::system("You are a helpful assistant.").to_value()];
    for i in 0..turns {
        messages.push(Message::user(format!("User message number {}", i)).to_value());
        messages.push(Message::assistant(format!("Assistant response number {}", i)).to_value());
    }
    json!({"model": "gpt-4o", "messages": messages, "max_tokens": 4000})
}

fn create_simple_responses() -> Value {
    json!({
        "model": "gpt-4o",
        "input": "Hello, world!",
        "instructions": "Be terse",
        "max_output_tokens": 1000,
        "text": {"format": {"type": "text"}}
    })
}

fn bench_translate(c: &mut Criterion) {
    let mut group = c.benchmark_group("translate");
    let options = TranslationOptions::with_request_id("bench");

    let cases = [
        ("simple", Direction::ChatToResponses, create_simple_chat()),
        ("with_tools", Direction::ChatToResponses, create_tool_chat()),
        ("long_conversation", Direction::ChatToResponses, create_long_chat(50)),
        ("instructions", Direction::ResponsesToChat, create_simple_responses()),
    ];

    for (name, direction, payload) in &cases {
        let translator = create_translator(*direction);
        group.bench_with_input(BenchmarkId::new(direction.as_str(), name), payload, |b, p| {
            b.iter(|| translator.translate_request(black_box(p), &options))
        });
    }

    group.finish();
}

fn bench_orchestrator(c: &mut Criterion) {
    let mut group = c.benchmark_group("orchestrator");
    let orchestrator = TranslationOrchestrator::new(Arc::new(NoopSink));
    let options = TranslationOptions::with_request_id("bench");

    for turns in [1usize, 10, 100] {
        let payload = create_long_chat(turns);
        group.throughput(Throughput::Elements((turns * 2 + 1) as u64));
        group.bench_with_input(BenchmarkId::new("run", turns), &payload, |b, p| {
            b.iter(|| orchestrator.run_direction(Direction::ChatToResponses, black_box(p), &options))
        });
    }

    group.finish();
}

fn bench_unknown_detection(c: &mut Criterion) {
    let mut payload = create_simple_chat();
    if let Some(obj) = payload.as_object_mut() {
        for i in 0..64 {
            obj.insert(format!("vendor_field_{}", i), json!(i));
        }
    }

    c.bench_function("detect_unknown_fields/64_extra", |b| {
        b.iter(|| detect_unknown_fields(black_box(&payload), Schema::Chat))
    });
}

criterion_group!(
    benches,
    bench_translate,
    bench_orchestrator,
    bench_unknown_detection
);
criterion_main!(benches);
