//! Schema section rendering
//!
//! Flattens a sub-schema into one [`FieldBinding`] per terminal property,
//! following `$ref` properties into nested sections. Paths grow by one
//! segment per level: a field `limit` inside `$ref` property `inner` of the
//! panel keyed `wrapper` binds to `wrapper.inner.limit`.

use cform_core::prelude::*;
use cform_core::{join_path, FieldSchema, PropertySchema, SchemaDocument, SubSchema};

/// A terminal property resolved to its place in the data tree
#[derive(Debug, Clone, PartialEq)]
pub struct FieldBinding {
    /// Path of the parent object (`main`, `wrapper.inner`)
    pub base: String,
    /// Key of the field inside its parent
    pub property: String,
    /// `base.property`
    pub path: String,
    pub schema: FieldSchema,
    /// Heading of the nested section this field belongs to, if any
    pub group: Option<String>,
    /// Number of `$ref` hops from the panel root
    pub depth: usize,
}

/// Render `sub` rooted at `base` into field bindings, in declared order.
///
/// `name` is the definition being rendered and seeds the cycle guard. A
/// reference to a missing definition renders nothing; a reference back into
/// the current chain stops the recursion.
pub fn render_section(
    doc: &SchemaDocument,
    name: &str,
    sub: &SubSchema,
    base: &str,
) -> Vec<FieldBinding> {
    let mut out = Vec::new();
    let mut chain = vec![name.to_string()];
    walk(doc, sub, base, None, 0, &mut chain, &mut out);
    out
}

fn walk(
    doc: &SchemaDocument,
    sub: &SubSchema,
    base: &str,
    group: Option<&str>,
    depth: usize,
    chain: &mut Vec<String>,
    out: &mut Vec<FieldBinding>,
) {
    for (property, schema) in &sub.properties {
        match schema {
            PropertySchema::Field(field) => out.push(FieldBinding {
                base: base.to_string(),
                property: property.clone(),
                path: join_path(base, property),
                schema: field.clone(),
                group: group.map(str::to_string),
                depth,
            }),
            PropertySchema::Ref { name } => {
                let Some(nested) = doc.lookup(name) else {
                    warn!(
                        "Skipping '{}': $ref points to missing definition '{}'",
                        join_path(base, property),
                        name
                    );
                    continue;
                };
                if chain.iter().any(|seen| seen == name) {
                    error!(
                        "Skipping '{}': $ref cycle {} -> {}",
                        join_path(base, property),
                        chain.join(" -> "),
                        name
                    );
                    continue;
                }

                let heading = nested.title.as_deref().unwrap_or(property);
                chain.push(name.clone());
                walk(
                    doc,
                    nested,
                    &join_path(base, property),
                    Some(heading),
                    depth + 1,
                    chain,
                    out,
                );
                chain.pop();
            }
        }
    }
}
