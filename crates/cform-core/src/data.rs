//! Form data tree
//!
//! A single mutable JSON object holding every form value, addressed by
//! dot-separated paths (`"seo.keywords"`). Reads and writes follow the
//! usual path semantics: reads through a missing or non-object segment
//! yield nothing, writes create intermediate objects as needed.

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Owned tree of form values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormData {
    root: Value,
}

impl FormData {
    /// An empty tree (`{}`)
    pub fn new() -> Self {
        Self {
            root: Value::Object(Map::new()),
        }
    }

    /// Seed a tree from an initial value, which must be an object
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(_) => Ok(Self { root: value }),
            Value::Null => Ok(Self::new()),
            other => Err(Error::InvalidInitialValue {
                kind: json_kind(&other),
            }),
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Value at a dot-path, if every segment exists
    pub fn get(&self, path: &str) -> Option<&Value> {
        segments(path).try_fold(&self.root, |node, key| node.as_object()?.get(key))
    }

    /// JavaScript truthiness of the value at a path
    pub fn is_truthy(&self, path: &str) -> bool {
        self.get(path).is_some_and(is_truthy)
    }

    /// Write a value at a dot-path, creating intermediate objects.
    ///
    /// A non-object intermediate is replaced by an empty object.
    pub fn set(&mut self, path: &str, value: Value) {
        let keys: Vec<&str> = segments(path).collect();
        let Some((last, parents)) = keys.split_last() else {
            self.root = value;
            return;
        };

        let mut node = &mut self.root;
        for key in parents {
            node = ensure_object(node)
                .entry(key.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(node).insert(last.to_string(), value);
    }

    /// Write one field under its parent object.
    ///
    /// When the parent already holds a truthy value the field is set in
    /// place. Otherwise the parent is replaced by a fresh object that keeps
    /// whatever the parent held and adds the field, so an empty parent ends
    /// up with exactly one key.
    pub fn write_field(&mut self, base: &str, property: &str, value: Value) {
        if self.is_truthy(base) {
            self.set(&join_path(base, property), value);
            return;
        }

        let mut merged = match self.get(base) {
            Some(Value::Object(existing)) => existing.clone(),
            _ => Map::new(),
        };
        merged.insert(property.to_string(), value);
        self.set(base, Value::Object(merged));
    }
}

/// Join a base path and a property name with `.`
pub fn join_path(base: &str, property: &str) -> String {
    if base.is_empty() {
        property.to_string()
    } else {
        format!("{base}.{property}")
    }
}

/// Top-level keys of `current` whose value differs from `origin`.
///
/// Keys removed from `current` are not reported.
pub fn shallow_diff(origin: &Value, current: &Value) -> Value {
    let mut diff = Map::new();
    if let Some(current) = current.as_object() {
        let origin = origin.as_object();
        for (key, value) in current {
            if origin.and_then(|o| o.get(key)) != Some(value) {
                diff.insert(key.clone(), value.clone());
            }
        }
    }
    Value::Object(diff)
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('.').filter(|s| !s.is_empty())
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced by an object"),
    }
}

fn json_kind(value: &Value) -> &'static str {
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

    #[test]
    fn test_get_nested_path() {
        let data = FormData::from_value(json!({ "seo": { "title": "Blog" } })).unwrap();
        assert_eq!(data.get("seo.title"), Some(&json!("Blog")));
        assert_eq!(data.get("seo.missing"), None);
        assert_eq!(data.get("seo.title.deeper"), None);
    }

    #[test]
    fn test_set_creates_intermediate_objects() {
        let mut data = FormData::new();
        data.set("a.b.c", json!(1));
        assert_eq!(data.as_value(), &json!({ "a": { "b": { "c": 1 } } }));
    }

    #[test]
    fn test_set_replaces_non_object_intermediate() {
        let mut data = FormData::from_value(json!({ "a": "text" })).unwrap();
        data.set("a.b", json!(true));
        assert_eq!(data.as_value(), &json!({ "a": { "b": true } }));
    }

    #[test]
    fn test_write_field_into_empty_parent_adds_one_key() {
        let mut data = FormData::new();
        data.write_field("main", "color", json!("red"));
        assert_eq!(data.as_value(), &json!({ "main": { "color": "red" } }));
        assert_eq!(data.get("main").unwrap().as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_write_field_into_existing_parent_keeps_siblings() {
        let mut data = FormData::from_value(json!({ "main": { "color": "red" } })).unwrap();
        data.write_field("main", "tags", json!(["a", "b"]));
        assert_eq!(
            data.as_value(),
            &json!({ "main": { "color": "red", "tags": ["a", "b"] } })
        );
    }

    #[test]
    fn test_write_field_with_falsy_parent_replaces_it() {
        let mut data = FormData::from_value(json!({ "main": null })).unwrap();
        data.write_field("main", "on", json!(false));
        assert_eq!(data.as_value(), &json!({ "main": { "on": false } }));
    }

    #[test]
    fn test_write_field_nested_base() {
        let mut data = FormData::new();
        data.write_field("wrapper.inner", "limit", json!(3));
        assert_eq!(
            data.as_value(),
            &json!({ "wrapper": { "inner": { "limit": 3 } } })
        );
    }

    #[test]
    fn test_round_trip_leaf_values() {
        let mut data = FormData::new();
        for (path, value) in [
            ("m.s", json!("text")),
            ("m.n", json!(42)),
            ("m.b", json!(true)),
            ("m.t", json!(["x", "y"])),
        ] {
            data.set(path, value.clone());
            assert_eq!(data.get(path), Some(&value));
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(!is_truthy(&json!(false)));
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!("0")));
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        let err = FormData::from_value(json!([1, 2])).unwrap_err();
        assert!(matches!(err, Error::InvalidInitialValue { kind: "array" }));
        assert_eq!(FormData::from_value(json!(null)).unwrap(), FormData::new());
    }

    #[test]
    fn test_shallow_diff_reports_changed_top_level_keys() {
        let origin = json!({ "name": "innei", "mail": "a@b.c", "seo": { "t": 1 } });
        let current = json!({ "name": "innei", "mail": "x@y.z", "seo": { "t": 2 }, "new": true });
        assert_eq!(
            shallow_diff(&origin, &current),
            json!({ "mail": "x@y.z", "seo": { "t": 2 }, "new": true })
        );
        assert_eq!(shallow_diff(&origin, &origin), json!({}));
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("", "a"), "a");
        assert_eq!(join_path("a.b", "c"), "a.b.c");
    }
}
