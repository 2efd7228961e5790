//! Message processing
//!
//! Runs one message and its follow-ups through the update function, then
//! flushes the form session so the observer sees each settled tree once.

use crate::handler;
use crate::message::Message;
use crate::state::AppState;

/// Process a message through the TEA update function
pub fn process_message(state: &mut AppState, message: Message) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        msg = handler::update(state, m).message;
    }
    state.session.flush();
}
