//! Collapsible section container
//!
//! One panel per titled, non-hidden top-level definition, shown as an
//! accordion: at most one panel is open at a time and the first panel
//! starts open.

use cform_core::{FieldSchema, SchemaDocument, Viewport};

use super::section::{render_section, FieldBinding};

/// One top-level definition rendered as a collapsible panel
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// Definition name
    pub name: String,
    pub title: String,
    /// Root path in the data tree, after key remapping
    pub key: String,
    pub fields: Vec<FieldBinding>,
}

/// Build the panel list for a document.
///
/// `map_key` remaps each definition name to its root path in the data tree.
pub fn build_panels(doc: &SchemaDocument, map_key: &dyn Fn(&str) -> String) -> Vec<Panel> {
    doc.definitions()
        .filter(|(_, sub)| sub.is_panel())
        .map(|(name, sub)| {
            let key = map_key(name);
            Panel {
                name: name.to_string(),
                title: sub.title.clone().unwrap_or_default(),
                fields: render_section(doc, name, sub, &key),
                key,
            }
        })
        .collect()
}

/// Which panel is open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accordion {
    expanded: Option<usize>,
    count: usize,
}

impl Accordion {
    /// `count` panels, the first one open
    pub fn new(count: usize) -> Self {
        Self {
            expanded: (count > 0).then_some(0),
            count,
        }
    }

    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded == Some(index)
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Open a panel, closing whichever was open
    pub fn open(&mut self, index: usize) {
        if index < self.count {
            self.expanded = Some(index);
        }
    }

    /// Open a closed panel, or close the open one
    pub fn toggle(&mut self, index: usize) {
        if self.is_expanded(index) {
            self.expanded = None;
        } else {
            self.open(index);
        }
    }
}

/// Where a field's label sits relative to its control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelPlacement {
    Left,
    Top,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAlign {
    Left,
    Right,
}

/// How much of a row a field occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpan {
    Full,
    Half,
}

/// Form layout derived from the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormLayout {
    pub placement: LabelPlacement,
    pub align: LabelAlign,
    pub label_width: u16,
    pub columns: u8,
}

impl FormLayout {
    /// Desktop: labels left, right-aligned, two columns.
    /// Mobile: labels on top, left-aligned, one column.
    pub fn for_viewport(viewport: &Viewport, label_width: u16) -> Self {
        if viewport.mobile {
            Self {
                placement: LabelPlacement::Top,
                align: LabelAlign::Left,
                label_width,
                columns: 1,
            }
        } else {
            Self {
                placement: LabelPlacement::Left,
                align: LabelAlign::Right,
                label_width,
                columns: 2,
            }
        }
    }

    /// Half-grid fields share a row only in the two-column layout
    pub fn span(&self, field: &FieldSchema) -> FieldSpan {
        if field.half_grid && self.columns == 2 {
            FieldSpan::Half
        } else {
            FieldSpan::Full
        }
    }
}
