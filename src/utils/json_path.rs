//! Dotted-path access over JSON objects
//!
//! The mapping tables name nested fields with dot notation (`text.format`);
//! these helpers resolve and write such paths. Array indexing is not needed
//! by either schema and is not supported.

use serde_json::{Map, Value};

/// Path mapper error
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum PathMapperError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Cannot set value at path: {0}")]
    CannotSetValue(String),
}

/// Stateless dot-notation reader/writer.
pub struct PathMapper;

impl PathMapper {
    /// Resolve `path` against an object map.
    ///
    /// Examples:
    /// - "temperature"
    /// - "text.format"
    pub fn get_path<'a>(obj: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
        let mut parts = path.split('.');
        let first = parts.next().filter(|p| !p.is_empty())?;
        let mut current = obj.get(first)?;
        for part in parts {
            if part.is_empty() {
                return None;
            }
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Write `value` at `path`, creating intermediate objects.
    ///
    /// An intermediate segment that holds a non-object value is an error
    /// rather than being overwritten.
    pub fn set_path(
        obj: &mut Map<String, Value>,
        path: &str,
        value: Value,
    ) -> Result<(), PathMapperError> {
        if path.is_empty() {
            return Err(PathMapperError::InvalidPath("Empty path".to_string()));
        }
        let parts: Vec<&str> = path.split('.').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(PathMapperError::InvalidPath(path.to_string()));
        }

        let (last, parents) = parts
            .split_last()
            .ok_or_else(|| PathMapperError::InvalidPath(path.to_string()))?;

        let mut current = obj;
        for part in parents {
            let slot = current
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            current = slot
                .as_object_mut()
                .ok_or_else(|| PathMapperError::CannotSetValue(path.to_string()))?;
        }
        current.insert(last.to_string(), value);
        Ok(())
    }
}

/// JSON type name used in diagnostics ("null", "boolean", "number", ...).
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_get_nested_path() {
        let m = obj(json!({"text": {"format": {"type": "json_object"}}, "top_p": 0.5}));
        assert_eq!(
            PathMapper::get_path(&m, "text.format"),
            Some(&json!({"type": "json_object"}))
        );
        assert_eq!(PathMapper::get_path(&m, "top_p"), Some(&json!(0.5)));
        assert_eq!(PathMapper::get_path(&m, "text.verbosity"), None);
        assert_eq!(PathMapper::get_path(&m, "top_p.x"), None);
        assert_eq!(PathMapper::get_path(&m, ""), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut m = Map::new();
        PathMapper::set_path(&mut m, "text.format", json!({"type": "text"})).unwrap();
        assert_eq!(Value::Object(m), json!({"text": {"format": {"type": "text"}}}));
    }

    #[test]
    fn test_set_refuses_to_clobber_scalar_parent() {
        let mut m = obj(json!({"text": "plain"}));
        let err = PathMapper::set_path(&mut m, "text.format", json!(1)).unwrap_err();
        assert!(matches!(err, PathMapperError::CannotSetValue(_)));
        assert!(matches!(
            PathMapper::set_path(&mut m, "a..b", json!(1)),
            Err(PathMapperError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_type_names() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!(1)), "number");
        assert_eq!(json_type_name(&json!([])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
