//! Form page handlers
//!
//! Handles navigation between panels and fields, field editing, and
//! submission.

use tracing::debug;

use crate::form::{FieldWidget, FormSession, WidgetInput};
use crate::notifier::Notifier;
use crate::state::{ActiveEditor, AppPhase, AppState, FormRow, UiMode};

use super::UpdateResult;

/// Move the cursor by `delta` visible rows, clamped to the ends
pub fn handle_move(state: &mut AppState, delta: isize) -> UpdateResult {
    let rows = state.rows();
    if rows.is_empty() {
        return UpdateResult::none();
    }
    let current = rows
        .iter()
        .position(|r| *r == state.view.cursor)
        .unwrap_or(0);
    let next = current
        .saturating_add_signed(delta)
        .min(rows.len() - 1);
    state.view.cursor = rows[next];
    UpdateResult::none()
}

pub fn handle_first(state: &mut AppState) -> UpdateResult {
    if let Some(first) = state.rows().first() {
        state.view.cursor = *first;
    }
    UpdateResult::none()
}

pub fn handle_last(state: &mut AppState) -> UpdateResult {
    if let Some(last) = state.rows().last() {
        state.view.cursor = *last;
    }
    UpdateResult::none()
}

/// Open the neighbouring panel and put the cursor on its header
pub fn handle_panel_step(state: &mut AppState, delta: isize) -> UpdateResult {
    let count = state.session.panels().len();
    if count == 0 {
        return UpdateResult::none();
    }
    let target = state
        .view
        .cursor
        .panel()
        .saturating_add_signed(delta)
        .min(count - 1);
    state.session.accordion_mut().open(target);
    state.view.cursor = FormRow::Header(target);
    UpdateResult::none()
}

/// Enter on a row.
///
/// On a header the panel is toggled. On a switch the value flips in place;
/// any other field opens its editor seeded with the stored value.
pub fn handle_activate(state: &mut AppState) -> UpdateResult {
    match state.view.cursor {
        FormRow::Header(panel) => {
            state.session.accordion_mut().toggle(panel);
        }
        FormRow::Field { panel, field } => {
            let Some(binding) = state.session.binding(panel, field).cloned() else {
                return UpdateResult::none();
            };
            let mut widget =
                FieldWidget::resolve(&binding.schema, state.session.value_of(&binding));

            if matches!(widget, FieldWidget::Toggle(_)) {
                if let Some(value) = widget.handle(WidgetInput::Enter) {
                    state.session.write(&binding, value);
                }
                return UpdateResult::none();
            }

            debug!("Editing '{}'", binding.path);
            state.view.editor = Some(ActiveEditor {
                panel,
                field,
                widget,
            });
            state.ui_mode = UiMode::Editing;
        }
    }
    UpdateResult::none()
}

/// Close the panel the cursor is in and move to its header
pub fn handle_collapse(state: &mut AppState) -> UpdateResult {
    let panel = state.view.cursor.panel();
    if state.session.accordion().is_expanded(panel) {
        state.session.accordion_mut().toggle(panel);
    }
    state.view.cursor = FormRow::Header(panel);
    UpdateResult::none()
}

/// Feed input to the active widget and write back any change
pub fn handle_edit_input(state: &mut AppState, input: WidgetInput) -> UpdateResult {
    let Some(editor) = state.view.editor.as_mut() else {
        return UpdateResult::none();
    };
    let Some(value) = editor.widget.handle(input) else {
        return UpdateResult::none();
    };
    let (panel, field) = (editor.panel, editor.field);
    if let Some(binding) = state.session.binding(panel, field).cloned() {
        state.session.write(&binding, value);
    }
    UpdateResult::none()
}

pub fn handle_edit_end(state: &mut AppState) -> UpdateResult {
    state.view.editor = None;
    state.ui_mode = UiMode::Form;
    UpdateResult::none()
}

/// Finish the form with the current tree as its result
pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    state.view.editor = None;
    state.ui_mode = UiMode::Form;
    report_submit(&state.session, &mut state.status);
    state.phase = AppPhase::Submitted;
    UpdateResult::none()
}

fn report_submit(session: &FormSession, notifier: &mut dyn Notifier) {
    let changed = session.diff().as_object().map_or(0, |m| m.len());
    match changed {
        0 => notifier.info("Submitted without changes"),
        1 => notifier.success("Submitted 1 changed section"),
        n => notifier.success(&format!("Submitted {n} changed sections")),
    }
}
