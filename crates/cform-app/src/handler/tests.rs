//! Tests for handler module

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use super::*;
use crate::config::Settings;
use crate::form::FormSession;
use crate::input_key::InputKey;
use crate::message::Message;
use crate::notifier::NoticeLevel;
use crate::process::process_message;
use crate::state::{AppPhase, AppState, FormRow, UiMode};
use cform_core::SchemaDocument;

fn schema() -> SchemaDocument {
    SchemaDocument::from_value(json!({
        "definitions": {
            "main": {
                "title": "Main",
                "properties": {
                    "color": { "type": "string", "title": "Color" },
                    "tags": { "type": "array", "title": "Tags" },
                    "on": { "type": "boolean", "title": "On" }
                }
            },
            "theme": {
                "title": "Theme",
                "properties": {
                    "mode": {
                        "type": "string",
                        "title": "Mode",
                        "ui:options": {
                            "type": "select",
                            "values": [
                                { "label": "Light", "value": "light" },
                                { "label": "Dark", "value": "dark" }
                            ]
                        }
                    }
                }
            }
        }
    }))
    .unwrap()
}

fn test_state() -> AppState {
    let session = FormSession::new(schema(), json!({})).unwrap();
    AppState::new(session, Settings::default(), "test")
}

fn observed_state() -> (AppState, Arc<Mutex<Vec<Value>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let session = FormSession::new(schema(), json!({}))
        .unwrap()
        .on_value_change(move |v| sink.lock().unwrap().push(v.clone()));
    (AppState::new(session, Settings::default(), "test"), seen)
}

fn press(state: &mut AppState, key: InputKey) {
    process_message(state, Message::Key(key));
}

fn type_str(state: &mut AppState, s: &str) {
    for c in s.chars() {
        press(state, InputKey::Char(c));
    }
}

#[test]
fn test_quit_message_sets_quitting_phase() {
    let mut state = test_state();
    update(&mut state, Message::Quit);
    assert_eq!(state.phase, AppPhase::Quitting);
    assert!(state.should_quit());
}

#[test]
fn test_q_key_produces_request_quit_message() {
    let state = test_state();
    let result = keys::handle_key(&state, InputKey::Char('q'));
    assert_eq!(result, Some(Message::RequestQuit));
}

#[test]
fn test_navigation_walks_open_panel_then_headers() {
    let mut state = test_state();
    assert_eq!(state.view.cursor, FormRow::Header(0));

    press(&mut state, InputKey::Down);
    assert_eq!(state.view.cursor, FormRow::Field { panel: 0, field: 0 });

    press(&mut state, InputKey::End);
    assert_eq!(state.view.cursor, FormRow::Header(1));

    // clamped at the end
    press(&mut state, InputKey::Down);
    assert_eq!(state.view.cursor, FormRow::Header(1));

    press(&mut state, InputKey::Home);
    press(&mut state, InputKey::Up);
    assert_eq!(state.view.cursor, FormRow::Header(0));
}

#[test]
fn test_enter_on_header_keeps_one_panel_open() {
    let mut state = test_state();
    press(&mut state, InputKey::End);
    press(&mut state, InputKey::Enter);

    assert!(state.session.accordion().is_expanded(1));
    assert!(!state.session.accordion().is_expanded(0));

    press(&mut state, InputKey::Enter);
    assert_eq!(state.session.accordion().expanded(), None);
}

#[test]
fn test_next_panel_opens_it() {
    let mut state = test_state();
    press(&mut state, InputKey::PageDown);
    assert_eq!(state.view.cursor, FormRow::Header(1));
    assert_eq!(state.session.accordion().expanded(), Some(1));

    press(&mut state, InputKey::PageUp);
    assert_eq!(state.session.accordion().expanded(), Some(0));
}

#[test]
fn test_collapse_moves_cursor_to_header() {
    let mut state = test_state();
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Left);
    assert_eq!(state.view.cursor, FormRow::Header(0));
    assert_eq!(state.session.accordion().expanded(), None);
}

#[test]
fn test_example_edit_scenario() {
    let (mut state, seen) = observed_state();

    // color
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    assert_eq!(state.ui_mode, UiMode::Editing);
    type_str(&mut state, "red");
    press(&mut state, InputKey::Enter);
    assert_eq!(state.ui_mode, UiMode::Form);
    assert_eq!(state.session.value(), &json!({ "main": { "color": "red" } }));

    // tags
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    type_str(&mut state, "a");
    press(&mut state, InputKey::Enter);
    type_str(&mut state, "b");
    press(&mut state, InputKey::Enter);
    press(&mut state, InputKey::Esc);

    assert_eq!(
        state.session.value(),
        &json!({ "main": { "color": "red", "tags": ["a", "b"] } })
    );

    let seen = seen.lock().unwrap();
    assert_eq!(seen.first(), Some(&json!({ "main": { "color": "r" } })));
    assert_eq!(
        seen.last(),
        Some(&json!({ "main": { "color": "red", "tags": ["a", "b"] } }))
    );
}

#[test]
fn test_navigation_alone_never_notifies() {
    let (mut state, seen) = observed_state();
    for key in [InputKey::Down, InputKey::Down, InputKey::Up, InputKey::PageDown] {
        press(&mut state, key);
    }
    process_message(&mut state, Message::Tick);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn test_toggle_flips_without_editor() {
    let (mut state, seen) = observed_state();
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);

    assert_eq!(state.ui_mode, UiMode::Form);
    assert_eq!(state.session.value(), &json!({ "main": { "on": true } }));
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn test_select_filter_and_pick() {
    let mut state = test_state();
    press(&mut state, InputKey::PageDown);
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    type_str(&mut state, "dk");
    press(&mut state, InputKey::Enter);
    press(&mut state, InputKey::Esc);

    assert_eq!(state.session.value(), &json!({ "theme": { "mode": "dark" } }));
}

#[test]
fn test_submit_reports_and_finishes() {
    let mut state = test_state();
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    type_str(&mut state, "x");
    press(&mut state, InputKey::CharCtrl('s'));

    assert_eq!(state.phase, AppPhase::Submitted);
    assert!(state.should_quit());
    let notice = state.status.current().unwrap();
    assert_eq!(notice.level, NoticeLevel::Success);
    assert_eq!(notice.message, "Submitted 1 changed section");
}

#[test]
fn test_quit_with_edits_asks_first() {
    let mut state = test_state();
    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    type_str(&mut state, "x");
    press(&mut state, InputKey::Esc);
    press(&mut state, InputKey::Char('q'));

    assert_eq!(state.ui_mode, UiMode::ConfirmQuit);
    press(&mut state, InputKey::Char('n'));
    assert_eq!(state.ui_mode, UiMode::Form);

    press(&mut state, InputKey::Char('q'));
    press(&mut state, InputKey::Char('y'));
    assert_eq!(state.phase, AppPhase::Quitting);
}

#[test]
fn test_quit_without_confirmation_setting() {
    let session = FormSession::new(schema(), json!({ "main": { "color": "x" } })).unwrap();
    let mut settings = Settings::default();
    settings.behavior.confirm_quit = false;
    let mut state = AppState::new(session, settings, "test");

    press(&mut state, InputKey::Down);
    press(&mut state, InputKey::Enter);
    press(&mut state, InputKey::Backspace);
    press(&mut state, InputKey::Esc);
    press(&mut state, InputKey::Esc);

    assert_eq!(state.phase, AppPhase::Quitting);
}

#[test]
fn test_resize_is_debounced_until_tick() {
    let mut state = test_state();
    state.apply_size(160, 40);
    assert!(!state.viewport.mobile);

    process_message(&mut state, Message::Resize { cols: 50, rows: 20 });
    assert!(!state.viewport.mobile);
    assert!(state.resize.is_pending());
}
