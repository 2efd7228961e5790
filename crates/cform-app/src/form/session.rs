//! Form session
//!
//! Owns everything one open form needs: the validated schema, the data
//! tree, the panel list and accordion, and the consumer's change observer.
//! Writes mark the tree changed; [`FormSession::flush`] delivers the settled
//! tree to the observer once per update batch, and only when it differs from
//! what the observer last saw.

use std::fmt;

use serde_json::Value;

use cform_core::prelude::*;
use cform_core::{shallow_diff, FieldValue, FormData, SchemaDocument};

use super::container::{build_panels, Accordion, Panel};
use super::keymap::KeyMap;
use super::section::FieldBinding;

/// Callback receiving the whole settled value tree
pub type ValueObserver = Box<dyn FnMut(&Value) + Send>;

pub struct FormSession {
    schema: SchemaDocument,
    data: FormData,
    initial: Value,
    keys: KeyMap,
    panels: Vec<Panel>,
    accordion: Accordion,
    observer: Option<ValueObserver>,
    last_notified: Value,
    pending: bool,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("panels", &self.panels.len())
            .field("accordion", &self.accordion)
            .field("data", &self.data)
            .field("observer", &self.observer.is_some())
            .field("pending", &self.pending)
            .finish()
    }
}

impl FormSession {
    /// Open a form over `initial`, which must be an object (or null)
    pub fn new(schema: SchemaDocument, initial: Value) -> Result<Self> {
        let data = FormData::from_value(initial)?;
        let panels = build_panels(&schema, &|name: &str| name.to_string());
        let accordion = Accordion::new(panels.len());
        let initial = data.as_value().clone();

        info!(
            "Form session opened: {} panels, {} fields",
            panels.len(),
            panels.iter().map(|p| p.fields.len()).sum::<usize>()
        );

        Ok(Self {
            schema,
            last_notified: initial.clone(),
            initial,
            data,
            keys: KeyMap::default(),
            panels,
            accordion,
            observer: None,
            pending: false,
        })
    }

    /// Remap top-level definition names to other root paths
    pub fn with_key_map(mut self, keys: KeyMap) -> Self {
        self.panels = build_panels(&self.schema, &|name: &str| keys.map(name));
        self.accordion = Accordion::new(self.panels.len());
        self.keys = keys;
        self
    }

    /// Register the consumer callback for settled changes
    pub fn on_value_change(mut self, observer: impl FnMut(&Value) + Send + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn schema(&self) -> &SchemaDocument {
        &self.schema
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn panel(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub fn binding(&self, panel: usize, field: usize) -> Option<&FieldBinding> {
        self.panels.get(panel)?.fields.get(field)
    }

    pub fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    pub fn accordion_mut(&mut self) -> &mut Accordion {
        &mut self.accordion
    }

    /// Current value tree
    pub fn value(&self) -> &Value {
        self.data.as_value()
    }

    /// The tree the session was opened with
    pub fn initial(&self) -> &Value {
        &self.initial
    }

    /// Stored value for a binding
    pub fn value_of(&self, binding: &FieldBinding) -> Option<&Value> {
        self.data.get(&binding.path)
    }

    /// Write a field value back into the tree
    pub fn write(&mut self, binding: &FieldBinding, value: FieldValue) {
        debug!("Field '{}' <- {}", binding.path, value.type_name());
        self.data
            .write_field(&binding.base, &binding.property, value.into());
        self.pending = true;
    }

    /// Whether the tree differs from the one the session opened with
    pub fn is_modified(&self) -> bool {
        self.data.as_value() != &self.initial
    }

    /// Top-level keys changed since the session opened
    pub fn diff(&self) -> Value {
        shallow_diff(&self.initial, self.data.as_value())
    }

    /// Deliver the settled tree to the observer.
    ///
    /// Returns true when the observer was called. Repeated flushes without
    /// an actual change never call it again.
    pub fn flush(&mut self) -> bool {
        if !std::mem::take(&mut self.pending) {
            return false;
        }
        if self.data.as_value() == &self.last_notified {
            trace!("Flush: tree unchanged, not notifying");
            return false;
        }

        self.last_notified = self.data.as_value().clone();
        match self.observer.as_mut() {
            Some(observer) => {
                observer(&self.last_notified);
                true
            }
            None => false,
        }
    }

    pub fn into_value(self) -> Value {
        self.data.into_value()
    }
}
