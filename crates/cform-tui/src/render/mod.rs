//! Main render/view function (View in TEA pattern)


use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use cform_app::state::{AppState, UiMode};

use crate::theme::{palette, styles};
use crate::widgets;

/// Render the complete UI.
///
/// Only the form view state is written to (scroll position).
pub fn view(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let [header, body, footer] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(frame, header, state);

    let block = styles::glass_block(state.ui_mode != UiMode::ConfirmQuit);
    let inner = block.inner(body);
    frame.render_widget(block, body);
    frame.render_stateful_widget(
        widgets::FormPanel::new(&state.session, state.layout),
        inner,
        &mut state.view,
    );

    render_footer(frame, footer, state);

    if state.ui_mode == UiMode::ConfirmQuit {
        render_confirm_quit(frame, area);
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut spans = vec![Span::styled(format!(" {}", state.title), styles::title())];
    if state.session.is_modified() {
        spans.push(Span::styled(" ● modified", styles::modified_marker()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let mode = if state.viewport.mobile {
        "compact "
    } else {
        "wide "
    };
    frame.render_widget(
        Paragraph::new(Span::styled(mode, styles::text_muted())).right_aligned(),
        area,
    );
}

fn render_footer(frame: &mut Frame, area: Rect, state: &AppState) {
    if let Some(notice) = state.status.current() {
        let line = Line::from(vec![
            Span::styled(format!(" {} ", notice.at.format("%H:%M:%S")), styles::text_muted()),
            Span::styled(notice.message.clone(), styles::notice(notice.level)),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    }

    let hints: &[(&str, &str)] = match state.ui_mode {
        UiMode::Form => &[
            ("j/k", "Navigate"),
            ("Enter", "Open/Edit"),
            ("[/]", "Panels"),
            ("Ctrl+S", "Submit"),
            ("q", "Quit"),
        ],
        UiMode::Editing => &[
            ("Esc", "Done"),
            ("Ctrl+U", "Clear"),
            ("Ctrl+R", "Reveal"),
            ("Ctrl+S", "Submit"),
        ],
        UiMode::ConfirmQuit => &[("y", "Quit"), ("n", "Stay")],
    };
    frame.render_widget(Paragraph::new(hint_line(hints)), area);
}

fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, label)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(format!(" {key} "), styles::kbd_badge()));
        spans.push(Span::styled(format!(" {label}"), styles::kbd_label()));
    }
    Line::from(spans)
}

fn render_confirm_quit(frame: &mut Frame, area: Rect) {
    let [row] = Layout::vertical([Constraint::Length(5)])
        .flex(Flex::Center)
        .areas(area);
    let [modal] = Layout::horizontal([Constraint::Length(46)])
        .flex(Flex::Center)
        .areas(row);

    let block = styles::glass_block(true).title(Span::styled(" Quit ", styles::accent()));
    let text = vec![
        Line::from(Span::styled(
            "Discard unsubmitted changes?",
            styles::text_primary(),
        )),
        Line::default(),
        hint_line(&[("y", "Discard and quit"), ("n", "Keep editing")]),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .centered()
            .style(Style::default().fg(palette::TEXT_SECONDARY)),
        modal,
    );
}
