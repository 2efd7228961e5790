//! Schema document model
//!
//! A schema document is a JSON object of the shape
//! `{ "definitions": { name: SubSchema }, "ps": [string] }`. It is read once
//! into a strongly typed tree and validated before any form is built:
//! unresolved `$ref`s, reference cycles, unknown field types and selects
//! without options are all reported up front as [`SchemaIssue`]s.
//!
//! Definition and property order follows the source document.

use std::collections::HashSet;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::{Error, Result};

/// `ui:options.type` value that hides a definition from the panel list
pub const HIDDEN_SECTION: &str = "hidden";

/// A problem found while validating a schema document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaIssue {
    #[error("{location}: $ref points to missing definition '{name}'")]
    UnresolvedRef { location: String, name: String },

    #[error("$ref cycle: {}", .chain.join(" -> "))]
    RefCycle { chain: Vec<String> },

    #[error("{location}: unknown field type '{type_name}'")]
    UnknownFieldType { location: String, type_name: String },

    #[error("{location}: select field has no 'values'")]
    SelectWithoutValues { location: String },

    #[error("{location}: property has neither '$ref' nor 'type'")]
    UntypedProperty { location: String },
}

// ─────────────────────────────────────────────────────────────────
// Typed model
// ─────────────────────────────────────────────────────────────────

/// One choice of a select field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

/// How a free-text field is edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    /// Single-line input; `input_type` is the declared `ui:options.type`
    /// (`text` when absent, e.g. `password`)
    SingleLine { input_type: String },
    /// Multi-line input, auto-sized between 3 and 5 rows
    Textarea,
}

impl TextInput {
    pub fn is_password(&self) -> bool {
        matches!(self, Self::SingleLine { input_type } if input_type == "password")
    }
}

/// Closed set of field kinds a terminal property can declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `string` or `url` edited as free text
    Text { url: bool, input: TextInput },
    /// `string` or `url` with `ui:options.type == "select"`
    Select { url: bool, options: Vec<SelectOption> },
    /// `array` of strings
    Tags,
    /// `boolean`
    Toggle,
    /// `integer`
    Integer,
}

impl FieldKind {
    /// The schema `type` this kind was declared with
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Text { url: true, .. } | Self::Select { url: true, .. } => "url",
            Self::Text { .. } | Self::Select { .. } => "string",
            Self::Tags => "array",
            Self::Toggle => "boolean",
            Self::Integer => "integer",
        }
    }

    pub fn is_url(&self) -> bool {
        matches!(self, Self::Text { url: true, .. } | Self::Select { url: true, .. })
    }
}

/// A terminal property: a concrete, editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub title: String,
    pub description: Option<String>,
    pub kind: FieldKind,
    /// Occupy half a row when the layout has two columns
    pub half_grid: bool,
}

/// A property of a sub-schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertySchema {
    /// Pointer to another definition (`#/definitions/<name>`)
    Ref { name: String },
    Field(FieldSchema),
}

/// A named, reusable group of properties
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubSchema {
    pub title: Option<String>,
    pub properties: IndexMap<String, PropertySchema>,
    pub hidden: bool,
}

impl SubSchema {
    /// Whether this definition is shown as a top-level panel
    pub fn is_panel(&self) -> bool {
        self.title.is_some() && !self.hidden
    }
}

/// The root schema document plus its definition lookup map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaDocument {
    definitions: IndexMap<String, SubSchema>,
    ps: Vec<String>,
}

/// Name of the definition a `$ref` points to: the part after the last `/`
pub fn ref_name(pointer: &str) -> &str {
    pointer.rsplit('/').next().unwrap_or(pointer)
}

impl SchemaDocument {
    /// Parse and validate a document. Any issue fails the whole load.
    pub fn from_value(value: Value) -> Result<Self> {
        let (doc, issues) = Self::lenient(value)?;
        if issues.is_empty() {
            Ok(doc)
        } else {
            Err(Error::schema_invalid(issues))
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(json)?)
    }

    /// Read a document from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        Self::from_value(read_json(path)?)
    }

    /// Parse a document, returning the problems found instead of failing.
    /// Nothing is logged here; reporting the issues is up to the caller.
    ///
    /// Properties with an unknown or missing type and selects without
    /// options are dropped. Unresolved references and cycles are kept; the
    /// section renderer skips them.
    pub fn lenient(value: Value) -> Result<(Self, Vec<SchemaIssue>)> {
        let raw: RawDocument = serde_json::from_value(value)?;
        let mut issues = Vec::new();

        let mut definitions = IndexMap::with_capacity(raw.definitions.len());
        for (name, raw_sub) in raw.definitions {
            let sub = build_sub_schema(&name, raw_sub, &mut issues);
            definitions.insert(name, sub);
        }

        let doc = Self {
            definitions,
            ps: raw.ps,
        };
        doc.check_references(&mut issues);
        doc.check_cycles(&mut issues);

        Ok((doc, issues))
    }

    /// Lenient read from disk
    pub fn lenient_from_path(path: &Path) -> Result<(Self, Vec<SchemaIssue>)> {
        Self::lenient(read_json(path)?)
    }

    /// Look up a definition by name
    pub fn lookup(&self, name: &str) -> Option<&SubSchema> {
        self.definitions.get(name)
    }

    /// All definitions in document order
    pub fn definitions(&self) -> impl Iterator<Item = (&str, &SubSchema)> {
        self.definitions.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Postscript notes shown below the form
    pub fn ps(&self) -> &[String] {
        &self.ps
    }

    fn check_references(&self, issues: &mut Vec<SchemaIssue>) {
        for (def_name, sub) in &self.definitions {
            for (prop, schema) in &sub.properties {
                if let PropertySchema::Ref { name } = schema {
                    if !self.definitions.contains_key(name) {
                        issues.push(SchemaIssue::UnresolvedRef {
                            location: format!("{def_name}.{prop}"),
                            name: name.clone(),
                        });
                    }
                }
            }
        }
    }

    /// Depth-first search over the definition reference graph.
    fn check_cycles(&self, issues: &mut Vec<SchemaIssue>) {
        let mut done: HashSet<&str> = HashSet::new();
        let mut reported: HashSet<Vec<String>> = HashSet::new();

        for start in self.definitions.keys() {
            let mut stack: Vec<&str> = Vec::new();
            self.visit(start, &mut stack, &mut done, &mut reported, issues);
        }
    }

    fn visit<'a>(
        &'a self,
        name: &'a str,
        stack: &mut Vec<&'a str>,
        done: &mut HashSet<&'a str>,
        reported: &mut HashSet<Vec<String>>,
        issues: &mut Vec<SchemaIssue>,
    ) {
        if done.contains(name) {
            return;
        }
        if let Some(pos) = stack.iter().position(|n| *n == name) {
            let mut chain: Vec<String> = stack[pos..].iter().map(|s| s.to_string()).collect();
            chain.push(name.to_string());
            let mut key = chain[..chain.len() - 1].to_vec();
            key.sort();
            if reported.insert(key) {
                issues.push(SchemaIssue::RefCycle { chain });
            }
            return;
        }
        let Some(sub) = self.definitions.get(name) else {
            return;
        };

        stack.push(name);
        for schema in sub.properties.values() {
            if let PropertySchema::Ref { name: target } = schema {
                self.visit(target, stack, done, reported, issues);
            }
        }
        stack.pop();
        done.insert(name);
    }
}

fn read_json(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::schema_not_found(path)
        } else {
            Error::Io(e)
        }
    })?;
    Ok(serde_json::from_str(&content)?)
}

// ─────────────────────────────────────────────────────────────────
// Raw (wire) model
// ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    definitions: IndexMap<String, RawSubSchema>,
    #[serde(default)]
    ps: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawSubSchema {
    title: Option<String>,
    #[serde(default)]
    properties: IndexMap<String, RawProperty>,
    #[serde(rename = "ui:options", default)]
    ui_options: RawUiOptions,
}

#[derive(Debug, Deserialize)]
struct RawProperty {
    #[serde(rename = "$ref")]
    reference: Option<String>,
    #[serde(rename = "type")]
    type_name: Option<Value>,
    title: Option<String>,
    description: Option<String>,
    #[serde(rename = "ui:options", default)]
    ui_options: RawUiOptions,
}

#[derive(Debug, Default, Deserialize)]
struct RawUiOptions {
    #[serde(rename = "type")]
    kind: Option<String>,
    values: Option<Vec<SelectOption>>,
    #[serde(rename = "halfGrid", default)]
    half_grid: bool,
}

fn build_sub_schema(name: &str, raw: RawSubSchema, issues: &mut Vec<SchemaIssue>) -> SubSchema {
    let mut properties = IndexMap::with_capacity(raw.properties.len());
    for (prop, raw_prop) in raw.properties {
        let location = format!("{name}.{prop}");
        if let Some(schema) = build_property(&prop, &location, raw_prop, issues) {
            properties.insert(prop, schema);
        }
    }

    SubSchema {
        title: raw.title,
        properties,
        hidden: raw.ui_options.kind.as_deref() == Some(HIDDEN_SECTION),
    }
}

fn build_property(
    prop: &str,
    location: &str,
    raw: RawProperty,
    issues: &mut Vec<SchemaIssue>,
) -> Option<PropertySchema> {
    if let Some(pointer) = raw.reference {
        return Some(PropertySchema::Ref {
            name: ref_name(&pointer).to_string(),
        });
    }

    let Some(type_value) = raw.type_name else {
        issues.push(SchemaIssue::UntypedProperty {
            location: location.to_string(),
        });
        return None;
    };
    let type_name = match &type_value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let options = raw.ui_options;
    let kind = match type_name.as_str() {
        "string" | "url" => {
            let url = type_name == "url";
            match options.kind.as_deref() {
                Some("select") => {
                    let Some(values) = options.values else {
                        issues.push(SchemaIssue::SelectWithoutValues {
                            location: location.to_string(),
                        });
                        return None;
                    };
                    FieldKind::Select {
                        url,
                        options: values,
                    }
                }
                Some("textarea") => FieldKind::Text {
                    url,
                    input: TextInput::Textarea,
                },
                other => FieldKind::Text {
                    url,
                    input: TextInput::SingleLine {
                        input_type: other.unwrap_or("text").to_string(),
                    },
                },
            }
        }
        "array" => FieldKind::Tags,
        "boolean" => FieldKind::Toggle,
        "integer" => FieldKind::Integer,
        _ => {
            issues.push(SchemaIssue::UnknownFieldType {
                location: location.to_string(),
                type_name,
            });
            return None;
        }
    };

    Some(PropertySchema::Field(FieldSchema {
        title: raw.title.unwrap_or_else(|| prop.to_string()),
        description: raw.description,
        kind,
        half_grid: options.half_grid,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "definitions": {
                "seo": {
                    "title": "SEO",
                    "properties": {
                        "title": { "type": "string", "title": "Site title" },
                        "keywords": { "type": "array", "title": "Keywords" }
                    }
                },
                "url": {
                    "title": "URLs",
                    "properties": {
                        "webUrl": { "type": "url", "title": "Web", "ui:options": { "halfGrid": true } },
                        "mode": {
                            "type": "string",
                            "title": "Mode",
                            "ui:options": {
                                "type": "select",
                                "values": [{ "label": "Fast", "value": "fast" }]
                            }
                        }
                    }
                },
                "secret": {
                    "title": "Secret",
                    "ui:options": { "type": "hidden" },
                    "properties": {
                        "token": { "type": "string", "title": "Token", "ui:options": { "type": "password" } }
                    }
                },
                "nested": {
                    "properties": {
                        "enabled": { "type": "boolean", "title": "Enabled" },
                        "limit": { "type": "integer", "title": "Limit" }
                    }
                },
                "wrapper": {
                    "title": "Wrapper",
                    "properties": {
                        "inner": { "$ref": "#/definitions/nested" },
                        "bio": { "type": "string", "title": "Bio", "ui:options": { "type": "textarea" } }
                    }
                }
            },
            "ps": ["Restart required after changes"]
        })
    }

    #[test]
    fn test_parse_preserves_definition_order() {
        let doc = SchemaDocument::from_value(sample()).unwrap();
        let names: Vec<&str> = doc.definitions().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["seo", "url", "secret", "nested", "wrapper"]);
        assert_eq!(doc.ps(), ["Restart required after changes".to_string()]);
    }

    #[test]
    fn test_parse_field_kinds() {
        let doc = SchemaDocument::from_value(sample()).unwrap();
        let url = doc.lookup("url").unwrap();

        match &url.properties["webUrl"] {
            PropertySchema::Field(field) => {
                assert!(field.half_grid);
                assert_eq!(field.kind.type_name(), "url");
                assert!(field.kind.is_url());
            }
            other => panic!("expected field, got {other:?}"),
        }
        match &url.properties["mode"] {
            PropertySchema::Field(FieldSchema {
                kind: FieldKind::Select { options, url },
                ..
            }) => {
                assert!(!url);
                assert_eq!(options[0].value, "fast");
            }
            other => panic!("expected select, got {other:?}"),
        }

        let secret = doc.lookup("secret").unwrap();
        match &secret.properties["token"] {
            PropertySchema::Field(field) => match &field.kind {
                FieldKind::Text { input, .. } => assert!(input.is_password()),
                other => panic!("expected text, got {other:?}"),
            },
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_ref_resolves_to_name_after_last_slash() {
        assert_eq!(ref_name("#/definitions/nested"), "nested");
        assert_eq!(ref_name("nested"), "nested");

        let doc = SchemaDocument::from_value(sample()).unwrap();
        let wrapper = doc.lookup("wrapper").unwrap();
        assert_eq!(
            wrapper.properties["inner"],
            PropertySchema::Ref {
                name: "nested".to_string()
            }
        );
    }

    #[test]
    fn test_panel_eligibility() {
        let doc = SchemaDocument::from_value(sample()).unwrap();
        assert!(doc.lookup("seo").unwrap().is_panel());
        assert!(!doc.lookup("secret").unwrap().is_panel());
        assert!(!doc.lookup("nested").unwrap().is_panel());
    }

    #[test]
    fn test_missing_ps_defaults_to_empty() {
        let doc = SchemaDocument::from_value(json!({ "definitions": {} })).unwrap();
        assert!(doc.ps().is_empty());
    }

    #[test]
    fn test_unresolved_ref_is_rejected() {
        let value = json!({
            "definitions": {
                "main": { "title": "Main", "properties": { "x": { "$ref": "#/definitions/gone" } } }
            },
            "ps": []
        });
        let err = SchemaDocument::from_value(value).unwrap_err();
        match err {
            Error::SchemaInvalid { issues } => assert_eq!(
                issues,
                vec![SchemaIssue::UnresolvedRef {
                    location: "main.x".to_string(),
                    name: "gone".to_string()
                }]
            ),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_ref_cycle_is_rejected() {
        let value = json!({
            "definitions": {
                "a": { "title": "A", "properties": { "b": { "$ref": "#/definitions/b" } } },
                "b": { "properties": { "a": { "$ref": "#/definitions/a" } } }
            },
            "ps": []
        });
        let (_, issues) = SchemaDocument::lenient(value).unwrap();
        assert_eq!(
            issues,
            vec![SchemaIssue::RefCycle {
                chain: vec!["a".into(), "b".into(), "a".into()]
            }]
        );
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let value = json!({
            "definitions": {
                "node": { "title": "Node", "properties": { "child": { "$ref": "#/definitions/node" } } }
            }
        });
        let (_, issues) = SchemaDocument::lenient(value).unwrap();
        assert_eq!(issues.len(), 1);
        assert!(matches!(&issues[0], SchemaIssue::RefCycle { chain } if chain.len() == 2));
    }

    #[test]
    fn test_multi_level_refs_are_accepted() {
        let value = json!({
            "definitions": {
                "top": { "title": "Top", "properties": { "mid": { "$ref": "#/definitions/mid" } } },
                "mid": { "properties": { "leaf": { "$ref": "#/definitions/leaf" } } },
                "leaf": { "properties": { "on": { "type": "boolean", "title": "On" } } }
            }
        });
        assert!(SchemaDocument::from_value(value).is_ok());
    }

    #[test]
    fn test_lenient_drops_bad_fields_and_reports() {
        let value = json!({
            "definitions": {
                "main": {
                    "title": "Main",
                    "properties": {
                        "ok": { "type": "boolean", "title": "Ok" },
                        "weird": { "type": "object", "title": "Weird" },
                        "pick": { "type": "string", "title": "Pick", "ui:options": { "type": "select" } },
                        "bare": { "title": "Bare" }
                    }
                }
            }
        });
        let (doc, issues) = SchemaDocument::lenient(value).unwrap();
        let props: Vec<&String> = doc.lookup("main").unwrap().properties.keys().collect();
        assert_eq!(props, vec!["ok"]);
        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&SchemaIssue::UnknownFieldType {
            location: "main.weird".into(),
            type_name: "object".into()
        }));
        assert!(issues.contains(&SchemaIssue::SelectWithoutValues {
            location: "main.pick".into()
        }));
        assert!(issues.contains(&SchemaIssue::UntypedProperty {
            location: "main.bare".into()
        }));
    }

    #[test]
    fn test_missing_field_title_falls_back_to_property_name() {
        let value = json!({
            "definitions": { "m": { "title": "M", "properties": { "port": { "type": "integer" } } } }
        });
        let doc = SchemaDocument::from_value(value).unwrap();
        match &doc.lookup("m").unwrap().properties["port"] {
            PropertySchema::Field(f) => assert_eq!(f.title, "port"),
            other => panic!("expected field, got {other:?}"),
        }
    }

    #[test]
    fn test_from_path_missing_file() {
        let temp = tempfile::tempdir().unwrap();
        let err = SchemaDocument::from_path(&temp.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, Error::SchemaNotFound { .. }));
    }

    #[test]
    fn test_from_path_reads_document() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("schema.json");
        std::fs::write(&path, sample().to_string()).unwrap();
        let doc = SchemaDocument::from_path(&path).unwrap();
        assert!(doc.lookup("seo").is_some());
    }
}
