//! Unknown-field detection
//!
//! "Unknown" only means the engine has no rule for the key. Whether an
//! unknown key is forwarded is decided by the translators (drop list first,
//! then passthrough); a known key may still be dropped by the mapping table.

use serde_json::Value;

use super::Schema;

/// Result of [`detect_unknown_fields`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection<'a> {
    /// Unknown keys in payload order; nested ones as `parent.child`.
    pub unknown_fields: Vec<String>,
    /// The payload as given. No cleaning is performed.
    pub cleaned_payload: &'a Value,
}

impl Detection<'_> {
    pub fn is_empty(&self) -> bool {
        self.unknown_fields.is_empty()
    }

    /// Unknown top-level keys only (nested paths are skipped).
    pub fn top_level(&self) -> impl Iterator<Item = &str> {
        self.unknown_fields
            .iter()
            .map(String::as_str)
            .filter(|f| !f.contains('.'))
    }
}

/// List the keys of `payload` that `schema` has no rule for.
///
/// The single-input `text` object is inspected one level deep. Non-object
/// payloads have no keys and yield an empty list.
pub fn detect_unknown_fields(payload: &Value, schema: Schema) -> Detection<'_> {
    let mut unknown_fields = Vec::new();

    if let Some(obj) = payload.as_object() {
        for (key, value) in obj {
            if !schema.is_known(key) {
                unknown_fields.push(key.clone());
                continue;
            }
            if let Some(nested) = schema.nested_known_fields(key) {
                if let Some(inner) = value.as_object() {
                    unknown_fields.extend(
                        inner
                            .keys()
                            .filter(|k| !nested.contains(k.as_str()))
                            .map(|k| format!("{}.{}", key, k)),
                    );
                }
            }
        }
    }

    Detection {
        unknown_fields,
        cleaned_payload: payload,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_detects_top_level_unknowns() {
        let payload = json!({
            "model": "m",
            "messages": [],
            "future_field": 42,
            "user": "abc"
        });
        let d = detect_unknown_fields(&payload, Schema::Chat);
        assert_eq!(d.unknown_fields, vec!["future_field", "user"]);
        assert!(std::ptr::eq(d.cleaned_payload, &payload));
    }

    #[test]
    fn test_unknowns_keep_payload_order() {
        let payload = json!({
            "model": "m",
            "messages": [],
            "zeta": 1,
            "alpha": 2,
            "mid": 3
        });
        let d = detect_unknown_fields(&payload, Schema::Chat);
        assert_eq!(d.unknown_fields, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_nested_unknowns_sit_at_parent_position() {
        let payload = json!({
            "zeta": 1,
            "text": {"verbosity": "low"},
            "model": "m",
            "input": "hi",
            "alpha": 2
        });
        let d = detect_unknown_fields(&payload, Schema::Responses);
        assert_eq!(d.unknown_fields, vec!["zeta", "text.verbosity", "alpha"]);
    }

    #[test]
    fn test_known_but_dropped_fields_are_not_unknown() {
        let payload = json!({"model": "m", "messages": [], "n": 2, "stop": ["x"]});
        assert!(detect_unknown_fields(&payload, Schema::Chat).is_empty());
    }

    #[test]
    fn test_text_subkeys_reported_with_dotted_path() {
        let payload = json!({
            "model": "m",
            "input": "hi",
            "text": {"format": {"type": "text"}, "verbosity": "low"}
        });
        let d = detect_unknown_fields(&payload, Schema::Responses);
        assert_eq!(d.unknown_fields, vec!["text.verbosity"]);
        assert_eq!(d.top_level().count(), 0);
    }

    #[test]
    fn test_text_is_unknown_for_chat_schema() {
        let payload = json!({"model": "m", "messages": [], "text": {"verbosity": "low"}});
        let d = detect_unknown_fields(&payload, Schema::Chat);
        assert_eq!(d.unknown_fields, vec!["text"]);
    }

    #[test]
    fn test_non_object_payload() {
        assert!(detect_unknown_fields(&json!([1, 2]), Schema::Responses).is_empty());
    }
}
