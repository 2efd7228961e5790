//! Styling helpers for form panel rendering

use ratatui::style::{Modifier, Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use cform_app::form::FieldWidget;
use cform_core::SpanStyle;

use crate::theme::palette;

/// Accent bar plus one space
pub const INDICATOR_WIDTH: u16 = 2;
/// Most options a select shows while open
pub const MAX_SELECT_ROWS: usize = 5;
/// Gap between the label column and the control
pub const LABEL_GAP: u16 = 2;
/// Gap between the two cells of a half-grid row
pub const COLUMN_GAP: u16 = 2;

pub const CURSOR: &str = "▌";
pub const ACCENT_BAR: &str = "▎";

pub fn selected_row_bg() -> Style {
    Style::default().bg(palette::SELECTED_ROW_BG)
}

pub fn label_style(is_selected: bool) -> Style {
    if is_selected {
        Style::default()
            .fg(palette::TEXT_BRIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::TEXT_SECONDARY)
    }
}

/// Style of a field's value, by kind
pub fn value_style(widget: &FieldWidget, is_selected: bool) -> Style {
    let base = if is_selected {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    match widget {
        FieldWidget::Toggle(t) if t.is_on() => base.fg(palette::STATUS_GREEN),
        FieldWidget::Toggle(_) => base.fg(palette::STATUS_RED),
        FieldWidget::Stepper(_) => base.fg(palette::ACCENT),
        FieldWidget::Select(_) => base.fg(palette::STATUS_INDIGO),
        FieldWidget::Tags(_) => base.fg(palette::STATUS_BLUE),
        FieldWidget::Text(_) => base.fg(palette::TEXT_PRIMARY),
    }
}

pub fn editing_style() -> Style {
    Style::default()
        .fg(palette::ACCENT)
        .add_modifier(Modifier::BOLD)
}

pub fn placeholder_style() -> Style {
    Style::default()
        .fg(palette::TEXT_MUTED)
        .add_modifier(Modifier::ITALIC)
}

pub fn hint_style() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Secondary text under a control, styled per markup span
pub fn description_style(style: SpanStyle) -> Style {
    let base = Style::default().fg(palette::TEXT_MUTED);
    match style {
        SpanStyle::Plain => base,
        SpanStyle::Strong => base.add_modifier(Modifier::BOLD),
        SpanStyle::Emphasis => base.add_modifier(Modifier::ITALIC),
        SpanStyle::Code => Style::default().fg(palette::TEXT_SECONDARY),
        SpanStyle::Link => Style::default()
            .fg(palette::STATUS_BLUE)
            .add_modifier(Modifier::UNDERLINED),
    }
}

pub fn panel_header_style(is_expanded: bool, is_selected: bool) -> Style {
    let style = if is_expanded {
        Style::default().fg(palette::ACCENT)
    } else {
        Style::default().fg(palette::TEXT_PRIMARY)
    };
    if is_selected || is_expanded {
        style.add_modifier(Modifier::BOLD)
    } else {
        style
    }
}

pub fn group_style() -> Style {
    Style::default()
        .fg(palette::TEXT_SECONDARY)
        .add_modifier(Modifier::BOLD)
}

pub fn option_style(is_cursor: bool) -> Style {
    if is_cursor {
        Style::default()
            .fg(palette::TEXT_BRIGHT)
            .bg(palette::SELECTED_ROW_BG)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette::TEXT_SECONDARY)
    }
}

/// Cut `s` to at most `max_width` display columns, ending in `…` when cut
pub fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Pad `s` to exactly `width` columns, truncating if needed
pub fn pad_str(s: &str, width: usize, right_align: bool) -> String {
    let text = truncate_str(s, width);
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{fill}{text}")
    } else {
        format!("{text}{fill}")
    }
}
