//! Schema-driven form model
//!
//! - `section`: flattens a sub-schema into field bindings
//! - `widget`: resolves a field kind to its editing control
//! - `container`: panels, accordion and layout
//! - `session`: data tree ownership and change notification
//! - `keymap`: top-level key remapping
//! - `fuzzy`: select filter matching

pub mod container;
pub mod fuzzy;
pub mod keymap;
pub mod section;
pub mod session;
pub mod widget;

pub use container::{
    build_panels, Accordion, FieldSpan, FormLayout, LabelAlign, LabelPlacement, Panel,
};
pub use keymap::KeyMap;
pub use section::{render_section, FieldBinding};
pub use session::{FormSession, ValueObserver};
pub use widget::{FieldWidget, WidgetInput};
