//! 字段映射层：以数据表描述两种请求结构之间的复制、重命名、重组与丢弃规则。
//!
//! # Field Mapping
//!
//! Each direction has one table of [`FieldRule`]s (see [`rules`]). A rule
//! names a source field, an optional fallback source, a destination, what
//! kind of move it is and which JSON values it accepts. [`apply_rules`]
//! walks a table in order and builds the known part of the output object;
//! unknown-field passthrough happens afterwards in the translators.
//!
//! A rule fires only when its source value is present and accepted by its
//! [`ValueKind`]. Absent or wrong-typed values are skipped, so an optional
//! field that is missing from the input is missing from the output too.
//!
//! ## Example
//!
//! ```rust
//! use ai_lib_translate::mapping::{apply_rules, rules_for};
//! use ai_lib_translate::Direction;
//! use serde_json::json;
//!
//! let source = json!({
//!     "model": "m",
//!     "messages": [{"role": "user", "content": "Hi"}],
//!     "max_tokens": 50,
//!     "n": 3
//! });
//! let out = apply_rules(rules_for(Direction::ChatToResponses), source.as_object().unwrap()).unwrap();
//! assert_eq!(out["max_output_tokens"], 50);
//! assert!(!out.contains_key("n"));
//! ```

pub mod rules;

use serde::Serialize;
use serde_json::{json, Map, Value};
use std::fmt;

use crate::types::Direction;
use crate::utils::{PathMapper, PathMapperError};

pub use rules::{rules_for, CHAT_TO_RESPONSES_RULES, RESPONSES_TO_CHAT_RULES};

/// Which JSON values a rule accepts from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// Any non-null value.
    Any,
    Number,
    Bool,
    NonEmptyString,
    NonEmptyObject,
    Array,
    StringOrObject,
    StringOrArray,
}

impl ValueKind {
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            ValueKind::Any => !value.is_null(),
            ValueKind::Number => value.is_number(),
            ValueKind::Bool => value.is_boolean(),
            ValueKind::NonEmptyString => value.as_str().map_or(false, |s| !s.is_empty()),
            ValueKind::NonEmptyObject => value.as_object().map_or(false, |o| !o.is_empty()),
            ValueKind::Array => value.is_array(),
            ValueKind::StringOrObject => value.is_string() || value.is_object(),
            ValueKind::StringOrArray => value.is_string() || value.is_array(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Number => "number",
            ValueKind::Bool => "boolean",
            ValueKind::NonEmptyString => "non-empty string",
            ValueKind::NonEmptyObject => "non-empty object",
            ValueKind::Array => "array",
            ValueKind::StringOrObject => "string or object",
            ValueKind::StringOrArray => "string or array",
        }
    }
}

/// Structural transforms that are more than a move between paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Restructure {
    /// `messages` array becomes the `input` array unchanged.
    MessagesToInput,
    /// `input` array becomes `messages`; a string becomes one user message.
    InputToMessages,
    /// A string becomes a system message placed before all other messages.
    PrependSystemMessage,
    /// The whole source object is nested at the destination path.
    Nest,
    /// A nested object is lifted out to the destination path.
    Unnest,
}

impl Restructure {
    fn apply(
        &self,
        rule: &FieldRule,
        value: &Value,
        out: &mut Map<String, Value>,
    ) -> Result<(), MappingError> {
        match self {
            Restructure::MessagesToInput | Restructure::Nest | Restructure::Unnest => {
                rule.write(out, value.clone())
            }
            Restructure::InputToMessages => {
                let messages = match value {
                    Value::String(text) => json!([{ "role": "user", "content": text }]),
                    other => other.clone(),
                };
                rule.write(out, messages)
            }
            Restructure::PrependSystemMessage => {
                let system = json!({ "role": "system", "content": value });
                let slot = out
                    .entry(rule.dest.to_string())
                    .or_insert_with(|| Value::Array(Vec::new()));
                match slot.as_array_mut() {
                    Some(list) => {
                        list.insert(0, system);
                        Ok(())
                    }
                    None => Err(MappingError::Write {
                        field: rule.source,
                        dest: rule.dest,
                        error: PathMapperError::CannotSetValue(rule.dest.to_string()),
                    }),
                }
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Restructure::MessagesToInput => "messages_to_input",
            Restructure::InputToMessages => "input_to_messages",
            Restructure::PrependSystemMessage => "prepend_system_message",
            Restructure::Nest => "nest",
            Restructure::Unnest => "unnest",
        }
    }
}

/// What a rule does with its source value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "transform")]
pub enum RuleKind {
    Copy,
    Rename,
    Restructure(Restructure),
    /// Known field with no destination equivalent.
    Drop,
}

/// One row of a mapping table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldRule {
    /// Source path (dot notation for nested fields).
    pub source: &'static str,
    /// Consulted only when `source` is absent or not accepted.
    pub fallback: Option<&'static str>,
    /// Destination path. Empty for `Drop`.
    pub dest: &'static str,
    pub kind: RuleKind,
    pub accepts: ValueKind,
}

impl FieldRule {
    pub const fn copy(field: &'static str, accepts: ValueKind) -> Self {
        Self {
            source: field,
            fallback: None,
            dest: field,
            kind: RuleKind::Copy,
            accepts,
        }
    }

    pub const fn rename(source: &'static str, dest: &'static str, accepts: ValueKind) -> Self {
        Self {
            source,
            fallback: None,
            dest,
            kind: RuleKind::Rename,
            accepts,
        }
    }

    pub const fn restructure(
        source: &'static str,
        dest: &'static str,
        transform: Restructure,
        accepts: ValueKind,
    ) -> Self {
        Self {
            source,
            fallback: None,
            dest,
            kind: RuleKind::Restructure(transform),
            accepts,
        }
    }

    pub const fn drop(field: &'static str) -> Self {
        Self {
            source: field,
            fallback: None,
            dest: "",
            kind: RuleKind::Drop,
            accepts: ValueKind::Any,
        }
    }

    pub const fn with_fallback(mut self, fallback: &'static str) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn is_drop(&self) -> bool {
        matches!(self.kind, RuleKind::Drop)
    }

    /// Top-level source keys this rule consumes (source and fallback).
    pub fn source_keys(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.source)
            .chain(self.fallback)
            .map(|p| p.split('.').next().unwrap_or(p))
    }

    /// Top-level destination key, `None` for drops.
    pub fn dest_key(&self) -> Option<&'static str> {
        if self.is_drop() {
            None
        } else {
            self.dest.split('.').next()
        }
    }

    /// The source value this rule would consume, if any.
    pub fn resolve<'a>(&self, source: &'a Map<String, Value>) -> Option<&'a Value> {
        let accepted = |path: &str| PathMapper::get_path(source, path).filter(|v| self.accepts.accepts(v));
        accepted(self.source).or_else(|| self.fallback.and_then(accepted))
    }

    fn write(&self, out: &mut Map<String, Value>, value: Value) -> Result<(), MappingError> {
        PathMapper::set_path(out, self.dest, value).map_err(|error| MappingError::Write {
            field: self.source,
            dest: self.dest,
            error,
        })
    }

    /// Apply this rule from `source` into `out`. Returns whether it fired.
    pub fn apply(
        &self,
        source: &Map<String, Value>,
        out: &mut Map<String, Value>,
    ) -> Result<bool, MappingError> {
        if self.is_drop() {
            return Ok(false);
        }
        let Some(value) = self.resolve(source) else {
            return Ok(false);
        };
        match self.kind {
            RuleKind::Copy | RuleKind::Rename => self.write(out, value.clone())?,
            RuleKind::Restructure(transform) => transform.apply(self, value, out)?,
            RuleKind::Drop => return Ok(false),
        }
        Ok(true)
    }
}

impl fmt::Display for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = match self.fallback {
            Some(fb) => format!("{} (or {})", self.source, fb),
            None => self.source.to_string(),
        };
        match self.kind {
            RuleKind::Copy => write!(f, "copy     {} [{}]", source, self.accepts.as_str()),
            RuleKind::Rename => write!(
                f,
                "rename   {} -> {} [{}]",
                source,
                self.dest,
                self.accepts.as_str()
            ),
            RuleKind::Restructure(t) => write!(
                f,
                "reshape  {} -> {} ({}) [{}]",
                source,
                self.dest,
                t.as_str(),
                self.accepts.as_str()
            ),
            RuleKind::Drop => write!(f, "drop     {}", source),
        }
    }
}

/// Failure to write a mapped value into the output object.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MappingError {
    #[error("rule for '{field}' could not write '{dest}': {error}")]
    Write {
        field: &'static str,
        dest: &'static str,
        error: PathMapperError,
    },
}

/// Run a mapping table over `source`, producing the known part of the output.
pub fn apply_rules(
    rules: &[FieldRule],
    source: &Map<String, Value>,
) -> Result<Map<String, Value>, MappingError> {
    let mut out = Map::new();
    for rule in rules {
        if rule.apply(source, &mut out)? {
            tracing::trace!(rule = %rule, "mapping rule fired");
        }
    }
    Ok(out)
}

/// Every top-level source key the table for `direction` has a rule for.
pub fn known_sources(direction: Direction) -> impl Iterator<Item = &'static str> {
    rules_for(direction).iter().flat_map(|r| r.source_keys())
}

/// Source keys the table for `direction` drops.
pub fn dropped_sources(direction: Direction) -> impl Iterator<Item = &'static str> {
    rules_for(direction)
        .iter()
        .filter(|r| r.is_drop())
        .map(|r| r.source)
}
