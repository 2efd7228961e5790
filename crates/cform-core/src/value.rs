//! Typed leaf values emitted by form fields

use serde_json::Value;

/// A value a field widget emits
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(i64),
    Bool(bool),
    Tags(Vec<String>),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Tags(_) => "array",
        }
    }

    /// Short single-line rendering for list rows
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::Number(n) => n.to_string(),
            Self::Bool(b) => if *b { "true" } else { "false" }.to_string(),
            Self::Tags(tags) => tags.join(", "),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => Value::from(*n),
            Self::Bool(b) => Value::Bool(*b),
            Self::Tags(tags) => Value::Array(tags.iter().cloned().map(Value::String).collect()),
        }
    }

    /// Read a stored JSON value as text, if it is one
    pub fn text_from(value: Option<&Value>) -> Option<String> {
        match value? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Read a stored JSON value as an integer. Floats are truncated.
    pub fn number_from(value: Option<&Value>) -> Option<i64> {
        match value? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn bool_from(value: Option<&Value>) -> Option<bool> {
        value?.as_bool()
    }

    /// Read a stored JSON array as string tags; non-string items are
    /// stringified
    pub fn tags_from(value: Option<&Value>) -> Option<Vec<String>> {
        let items = value?.as_array()?;
        Some(
            items
                .iter()
                .map(|item| match item {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        )
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        value.to_json()
    }
}
