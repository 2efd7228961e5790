//! Application state (Model in TEA pattern)

use std::time::Instant;

use cform_core::{ResizeDebouncer, Viewport};

use crate::config::Settings;
use crate::form::{FieldBinding, FieldWidget, FormLayout, FormSession};
use crate::notifier::StatusLine;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Moving between panels and fields
    #[default]
    Form,

    /// A field widget has the keyboard
    Editing,

    /// Asking whether to drop unsubmitted edits
    ConfirmQuit,
}

/// Lifecycle of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    /// The user submitted; the tree is the result
    Submitted,
    /// Leaving without a result
    Quitting,
}

/// A selectable row of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRow {
    Header(usize),
    Field { panel: usize, field: usize },
}

impl FormRow {
    pub fn panel(&self) -> usize {
        match *self {
            Self::Header(panel) | Self::Field { panel, .. } => panel,
        }
    }
}

/// The field currently being edited
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEditor {
    pub panel: usize,
    pub field: usize,
    pub widget: FieldWidget,
}

/// Cursor, editor and scroll position of the form view
#[derive(Debug, Clone, PartialEq)]
pub struct FormViewState {
    pub cursor: FormRow,
    pub editor: Option<ActiveEditor>,
    /// Index of the first rendered block (panel header, group heading, field
    /// row or note), maintained by the renderer
    pub scroll_offset: usize,
}

impl Default for FormViewState {
    fn default() -> Self {
        Self {
            cursor: FormRow::Header(0),
            editor: None,
            scroll_offset: 0,
        }
    }
}

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub ui_mode: UiMode,
    pub phase: AppPhase,
    pub session: FormSession,
    pub view: FormViewState,
    pub viewport: Viewport,
    pub layout: FormLayout,
    pub resize: ResizeDebouncer,
    pub settings: Settings,
    pub status: StatusLine,
    /// Shown in the header (usually the schema file name)
    pub title: String,
}

impl AppState {
    pub fn new(session: FormSession, settings: Settings, title: impl Into<String>) -> Self {
        let viewport = Viewport::default();
        let layout = FormLayout::for_viewport(&viewport, settings.ui.label_width);
        Self {
            ui_mode: UiMode::default(),
            phase: AppPhase::default(),
            session,
            view: FormViewState::default(),
            viewport,
            layout,
            resize: ResizeDebouncer::new(settings.ui.resize_debounce()),
            settings,
            status: StatusLine::default(),
            title: title.into(),
        }
    }

    /// Reclassify the viewport for a terminal size, without debouncing
    pub fn apply_size(&mut self, cols: u16, rows: u16) {
        let viewport = Viewport::from_terminal(cols, rows, self.settings.ui.cell_width_px);
        if viewport.mobile != self.viewport.mobile {
            tracing::debug!(
                "Layout switched to {}",
                if viewport.mobile { "mobile" } else { "desktop" }
            );
        }
        self.viewport = viewport;
        self.layout = FormLayout::for_viewport(&viewport, self.settings.ui.label_width);
    }

    /// Apply a settled resize, if the debounce window has passed
    pub fn poll_resize(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some((cols, rows)) => {
                self.apply_size(cols, rows);
                true
            }
            None => false,
        }
    }

    /// Selectable rows in display order: every panel header, plus the
    /// fields of the open panel
    pub fn rows(&self) -> Vec<FormRow> {
        let accordion = self.session.accordion();
        let mut rows = Vec::new();
        for (index, panel) in self.session.panels().iter().enumerate() {
            rows.push(FormRow::Header(index));
            if accordion.is_expanded(index) {
                rows.extend((0..panel.fields.len()).map(|field| FormRow::Field {
                    panel: index,
                    field,
                }));
            }
        }
        rows
    }

    /// Binding under the cursor, if the cursor is on a field
    pub fn selected_binding(&self) -> Option<&FieldBinding> {
        match self.view.cursor {
            FormRow::Field { panel, field } => self.session.binding(panel, field),
            FormRow::Header(_) => None,
        }
    }

    pub fn is_editing(&self, panel: usize, field: usize) -> bool {
        self.view
            .editor
            .as_ref()
            .is_some_and(|e| e.panel == panel && e.field == field)
    }

    // ─────────────────────────────────────────────────────────
    // Quit
    // ─────────────────────────────────────────────────────────

    /// Quit, asking first when there are unsubmitted edits
    pub fn request_quit(&mut self) {
        if self.session.is_modified() && self.settings.behavior.confirm_quit {
            self.ui_mode = UiMode::ConfirmQuit;
        } else {
            self.phase = AppPhase::Quitting;
        }
    }

    pub fn force_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn confirm_quit(&mut self) {
        self.phase = AppPhase::Quitting;
    }

    pub fn cancel_quit(&mut self) {
        self.ui_mode = UiMode::Form;
    }

    pub fn should_quit(&self) -> bool {
        self.phase != AppPhase::Running
    }
}
