//! Semantic style builders.

use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, BorderType, Borders};

use cform_app::notifier::NoticeLevel;

use super::palette;

pub fn text_primary() -> Style {
    Style::default().fg(palette::TEXT_PRIMARY)
}

pub fn text_secondary() -> Style {
    Style::default().fg(palette::TEXT_SECONDARY)
}

pub fn text_muted() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn title() -> Style {
    Style::default()
        .fg(palette::TEXT_BRIGHT)
        .add_modifier(Modifier::BOLD)
}

pub fn accent() -> Style {
    Style::default().fg(palette::ACCENT)
}

pub fn border_inactive() -> Style {
    Style::default().fg(palette::BORDER_DIM)
}

pub fn border_active() -> Style {
    Style::default().fg(palette::BORDER_ACTIVE)
}

/// Key badge in the footer hints (e.g. " Enter ")
pub fn kbd_badge() -> Style {
    Style::default()
        .fg(palette::TEXT_SECONDARY)
        .bg(palette::POPUP_BG)
}

/// Text following a key badge
pub fn kbd_label() -> Style {
    Style::default().fg(palette::TEXT_MUTED)
}

pub fn notice(level: NoticeLevel) -> Style {
    match level {
        NoticeLevel::Info => Style::default().fg(palette::STATUS_BLUE),
        NoticeLevel::Success => Style::default().fg(palette::STATUS_GREEN),
        NoticeLevel::Error => Style::default()
            .fg(palette::STATUS_RED)
            .add_modifier(Modifier::BOLD),
    }
}

pub fn modified_marker() -> Style {
    Style::default().fg(palette::STATUS_YELLOW)
}

/// Rounded bordered block
pub fn glass_block(focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if focused {
            border_active()
        } else {
            border_inactive()
        })
        .style(Style::default().bg(palette::SURFACE))
}
