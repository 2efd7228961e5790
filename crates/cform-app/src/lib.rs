//! cform-app - Form state and orchestration for config-form
//!
//! This crate implements the TEA (The Elm Architecture) pattern for the
//! form: messages, the update function and its handlers, and the model.
//! The schema-driven form itself (section rendering, widget resolution,
//! panels, change notification) lives in [`form`]. Configuration loading,
//! the notifier and signal handling round it out.

pub mod config;
pub mod form;
pub mod handler;
pub mod input_key;
pub mod message;
pub mod notifier;
pub mod process;
pub mod signals;
pub mod state;

pub use form::{FormSession, KeyMap};
pub use handler::{update, UpdateResult};
pub use message::Message;
pub use process::process_message;
pub use state::AppState;
