//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: main update() function and message dispatch
//! - `keys`: key event handlers for each UI mode
//! - `form_handlers`: navigation, editing and submit handlers

pub(crate) mod form_handlers;
pub(crate) mod keys;
pub(crate) mod update;

#[cfg(test)]
mod tests;

use crate::message::Message;

pub use update::update;

/// Result of one update step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self { message: Some(msg) }
    }
}
