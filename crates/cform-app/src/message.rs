//! Message types for the application (TEA pattern)

use crate::form::WidgetInput;
use crate::input_key::InputKey;

/// All possible messages in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Keyboard event from terminal
    Key(InputKey),

    /// Terminal resized; applied once resizing settles
    Resize { cols: u16, rows: u16 },

    /// Periodic tick from the event loop
    Tick,

    /// Request to quit (asks first when there are unsubmitted edits)
    RequestQuit,

    /// Quit without confirmation (Ctrl+C, signal handler)
    Quit,

    /// Confirm quit from the confirmation prompt
    ConfirmQuit,

    /// Cancel quit from the confirmation prompt
    CancelQuit,

    // ─────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────
    /// Move to the next visible row
    FormNext,
    /// Move to the previous visible row
    FormPrev,
    FormFirst,
    FormLast,
    /// Open the next panel and move to its header
    FormNextPanel,
    /// Open the previous panel and move to its header
    FormPrevPanel,
    /// Enter on a row: toggle a panel, flip a switch, or start editing
    FormActivate,
    /// Close the panel the cursor is in
    FormCollapse,

    // ─────────────────────────────────────────────────────────
    // Editing
    // ─────────────────────────────────────────────────────────
    /// Input for the field being edited
    EditInput(WidgetInput),
    /// Stop editing; the value is already written
    EditEnd,

    /// Hand the settled tree back to the caller and exit
    Submit,
}
