//! Main update function - handles state transitions (TEA pattern)

use std::time::Instant;

use crate::message::Message;
use crate::state::AppState;

use super::{form_handlers, keys::handle_key, UpdateResult};

/// Process a message and update state.
/// Returns an optional follow-up message.
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Resize { cols, rows } => {
            state.resize.push(cols, rows, Instant::now());
            UpdateResult::none()
        }

        Message::Tick => {
            let now = Instant::now();
            state.poll_resize(now);
            state.status.expire(now);
            UpdateResult::none()
        }

        Message::RequestQuit => {
            state.request_quit();
            UpdateResult::none()
        }

        Message::Quit => {
            state.force_quit();
            UpdateResult::none()
        }

        Message::ConfirmQuit => {
            state.confirm_quit();
            UpdateResult::none()
        }

        Message::CancelQuit => {
            state.cancel_quit();
            UpdateResult::none()
        }

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::FormNext => form_handlers::handle_move(state, 1),
        Message::FormPrev => form_handlers::handle_move(state, -1),
        Message::FormFirst => form_handlers::handle_first(state),
        Message::FormLast => form_handlers::handle_last(state),
        Message::FormNextPanel => form_handlers::handle_panel_step(state, 1),
        Message::FormPrevPanel => form_handlers::handle_panel_step(state, -1),
        Message::FormActivate => form_handlers::handle_activate(state),
        Message::FormCollapse => form_handlers::handle_collapse(state),

        // ─────────────────────────────────────────────────────────
        // Editing
        // ─────────────────────────────────────────────────────────
        Message::EditInput(input) => form_handlers::handle_edit_input(state, input),
        Message::EditEnd => form_handlers::handle_edit_end(state),

        Message::Submit => form_handlers::handle_submit(state),
    }
}
