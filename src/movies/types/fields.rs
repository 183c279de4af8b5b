//! Ordered candidate-field extractors.
//!
//! The upstream API names the same attribute differently depending on the
//! endpoint. Every extractor takes a priority-ordered key list and the first
//! candidate holding a usable value wins.

use crate::movies::{MoviesError, Result};
use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

/// Borrow `value` as a JSON object or fail with a decoding error
pub fn object<'a>(value: &'a Value, what: &str) -> Result<&'a Object> {
    value
        .as_object()
        .ok_or_else(|| MoviesError::Decoding(format!("expected a JSON object for {what}")))
}

/// First non-empty string
pub fn first_string(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

/// First non-empty string, also accepting bare integers (`"year": 1999`)
pub fn first_text(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key) {
        Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    })
}

/// Rating-style number accepted either as JSON number or numeric string.
///
/// The first key holding a number or a non-empty string decides. A string
/// that does not parse yields `None` instead of falling through to the next
/// alias.
pub fn first_number(obj: &Object, keys: &[&str]) -> Option<f64> {
    for key in keys {
        match obj.get(*key) {
            Some(Value::Number(n)) => return n.as_f64().filter(|v| v.is_finite()),
            Some(Value::String(s)) if !s.trim().is_empty() => {
                return s.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            }
            _ => {}
        }
    }
    None
}

/// String list given either as a JSON array of strings or a comma-separated string
pub fn first_list(obj: &Object, keys: &[&str]) -> Option<Vec<String>> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>(),
        Value::String(s) => Some(split_csv(s)),
        _ => None,
    })
}

/// Runtime normalized to display text: integer minutes become `"{n} min"`
pub fn runtime(obj: &Object, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Number(n) => n.as_u64().map(|minutes| format!("{minutes} min")),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    })
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn obj(value: Value) -> Object {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_first_string_skips_empty_candidates() {
        let o = obj(json!({ "image_url": "", "poster_path": "https://x/p.jpg" }));
        assert_eq!(
            first_string(&o, &["image_url", "poster_path", "poster"]),
            Some("https://x/p.jpg".to_string())
        );
    }

    #[test]
    fn test_first_number_stops_at_unparseable_string() {
        let o = obj(json!({ "imdb_rating": "N/A", "rating": 7.0 }));
        assert_eq!(first_number(&o, &["imdb_rating", "rating"]), None);
    }

    #[test]
    fn test_first_list_rejects_mixed_arrays() {
        let o = obj(json!({ "genres": ["Drama", 3], "alt": "Action, Crime" }));
        assert_eq!(
            first_list(&o, &["genres", "alt"]),
            Some(vec!["Action".to_string(), "Crime".to_string()])
        );
    }

    #[test]
    fn test_runtime_formats_minutes() {
        let o = obj(json!({ "runtime": 142 }));
        assert_eq!(runtime(&o, &["runtime"]), Some("142 min".to_string()));
    }
}
