//! Top-level key remapping
//!
//! By default a definition's values live under a key of the same name. A
//! [`KeyMap`] sends chosen definitions elsewhere, e.g. `seo=config.seo`.

use std::collections::HashMap;

use cform_core::prelude::*;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyMap {
    entries: HashMap<String, String>,
}

impl KeyMap {
    /// Parse `name=path` entries. Both sides must be non-empty and the path
    /// may not start or end with `.`.
    pub fn parse<S: AsRef<str>>(mappings: &[S]) -> Result<Self> {
        let mut entries = HashMap::with_capacity(mappings.len());
        for mapping in mappings {
            let mapping = mapping.as_ref();
            let (name, path) = mapping
                .split_once('=')
                .map(|(n, p)| (n.trim(), p.trim()))
                .ok_or_else(|| Error::invalid_key_mapping(mapping))?;
            if name.is_empty() || path.is_empty() || path.starts_with('.') || path.ends_with('.')
            {
                return Err(Error::invalid_key_mapping(mapping));
            }
            if entries.insert(name.to_string(), path.to_string()).is_some() {
                warn!("Key mapping for '{}' given more than once, keeping the last", name);
            }
        }
        Ok(Self { entries })
    }

    /// Root path for a definition name
    pub fn map(&self, name: &str) -> String {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
