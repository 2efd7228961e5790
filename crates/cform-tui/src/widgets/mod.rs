//! Custom widgets for the form UI

mod form_panel;

pub use form_panel::FormPanel;
