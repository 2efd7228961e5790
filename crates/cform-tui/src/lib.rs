//! cform-tui - Terminal UI for config-form
//!
//! Renders a [`cform_app::AppState`] with ratatui and feeds terminal events
//! back into the TEA loop.

pub mod event;
pub mod render;
pub mod runner;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use runner::run;
