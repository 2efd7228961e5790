//! Form panel widget - the accordion of schema panels
//!
//! Lays out panel headers, nested group headings and field cells as a list
//! of blocks, scrolls so the cursor block stays visible, and draws each
//! block straight into the buffer. Half-grid fields pair up on one row
//! when the layout has two columns.

mod styles;


use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::StatefulWidget,
};

use cform_app::form::{
    FieldBinding, FieldSpan, FieldWidget, FormLayout, FormSession, LabelAlign, LabelPlacement,
};
use cform_app::state::{FormRow, FormViewState};
use cform_core::{literal_lines, render_description, MarkupLine};

use styles::{
    description_style, editing_style, group_style, hint_style, label_style, option_style,
    pad_str, panel_header_style, placeholder_style, selected_row_bg, truncate_str, value_style,
    ACCENT_BAR, COLUMN_GAP, CURSOR, INDICATOR_WIDTH, LABEL_GAP, MAX_SELECT_ROWS,
};

use crate::theme::{palette, styles as theme};

/// Scrollable view of every panel of a form session
pub struct FormPanel<'a> {
    session: &'a FormSession,
    layout: FormLayout,
}

impl<'a> FormPanel<'a> {
    pub fn new(session: &'a FormSession, layout: FormLayout) -> Self {
        Self { session, layout }
    }
}

/// One field as it will be drawn
struct FieldCell {
    row: FormRow,
    title: String,
    widget: FieldWidget,
    editing: bool,
    description: Vec<MarkupLine>,
}

enum FormBlock {
    Header { panel: usize },
    Group { title: String, depth: usize },
    Fields { left: FieldCell, right: Option<FieldCell> },
    Note(MarkupLine),
    /// Back to the panel's own fields after a nested group
    Rule,
    Spacer,
}

impl StatefulWidget for FormPanel<'_> {
    type State = FormViewState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.width <= INDICATOR_WIDTH || area.height == 0 {
            return;
        }

        let blocks = self.build_blocks(state);
        if blocks.is_empty() {
            buf.set_string(
                area.x + INDICATOR_WIDTH,
                area.y,
                "This schema has no panels to show",
                placeholder_style(),
            );
            return;
        }

        let heights: Vec<u16> = blocks
            .iter()
            .map(|b| self.block_height(b, area.width))
            .collect();
        let focus = blocks
            .iter()
            .position(|b| block_contains(b, state.cursor))
            .unwrap_or(0);
        state.scroll_offset = scroll_to(state.scroll_offset, focus, &heights, area.height);

        let mut y = area.y;
        for (block, height) in blocks.iter().zip(&heights).skip(state.scroll_offset) {
            if y >= area.bottom() {
                break;
            }
            let h = (*height).min(area.bottom() - y);
            let rect = Rect::new(area.x, y, area.width, h);
            self.render_block(block, rect, buf, state.cursor);
            y += h;
        }
    }
}

/// First block to draw so that `focus` is fully visible, moving as little
/// as possible from `current`
fn scroll_to(current: usize, focus: usize, heights: &[u16], viewport: u16) -> usize {
    let mut offset = current.min(focus);
    loop {
        let used: u32 = heights[offset..=focus].iter().map(|h| u32::from(*h)).sum();
        if used <= u32::from(viewport) || offset == focus {
            return offset;
        }
        offset += 1;
    }
}

fn block_contains(block: &FormBlock, cursor: FormRow) -> bool {
    match block {
        FormBlock::Header { panel } => cursor == FormRow::Header(*panel),
        FormBlock::Fields { left, right } => {
            left.row == cursor || right.as_ref().is_some_and(|r| r.row == cursor)
        }
        _ => false,
    }
}

impl FormPanel<'_> {
    // ─────────────────────────────────────────────────────────────────────────────
    // Block construction
    // ─────────────────────────────────────────────────────────────────────────────

    fn build_blocks(&self, state: &FormViewState) -> Vec<FormBlock> {
        let mut blocks = Vec::new();
        let accordion = self.session.accordion();

        for (index, panel) in self.session.panels().iter().enumerate() {
            blocks.push(FormBlock::Header { panel: index });
            if !accordion.is_expanded(index) {
                continue;
            }

            // Sections are keyed by parent path: two refs to the same
            // definition share a title but not a base
            let mut section: Option<&str> = None;
            let mut in_group = false;
            let mut pending_half: Option<FieldCell> = None;
            for (field, binding) in panel.fields.iter().enumerate() {
                if section != Some(binding.base.as_str()) {
                    flush_half(&mut blocks, &mut pending_half);
                    section = Some(binding.base.as_str());
                    match binding.group.as_deref() {
                        Some(title) => {
                            blocks.push(FormBlock::Group {
                                title: title.to_string(),
                                depth: binding.depth,
                            });
                            in_group = true;
                        }
                        None if in_group => {
                            blocks.push(FormBlock::Rule);
                            in_group = false;
                        }
                        None => {}
                    }
                }

                let cell = self.cell(index, field, binding, state);
                match self.layout.span(&binding.schema) {
                    FieldSpan::Half => match pending_half.take() {
                        Some(left) => blocks.push(FormBlock::Fields {
                            left,
                            right: Some(cell),
                        }),
                        None => pending_half = Some(cell),
                    },
                    FieldSpan::Full => {
                        flush_half(&mut blocks, &mut pending_half);
                        blocks.push(FormBlock::Fields {
                            left: cell,
                            right: None,
                        });
                    }
                }
            }
            flush_half(&mut blocks, &mut pending_half);
            blocks.push(FormBlock::Spacer);
        }

        let ps = self.session.schema().ps();
        if !blocks.is_empty() && !ps.is_empty() {
            if !matches!(blocks.last(), Some(FormBlock::Spacer)) {
                blocks.push(FormBlock::Spacer);
            }
            for note in ps {
                blocks.extend(literal_lines(note).into_iter().map(FormBlock::Note));
            }
        }
        blocks
    }

    fn cell(
        &self,
        panel: usize,
        field: usize,
        binding: &FieldBinding,
        state: &FormViewState,
    ) -> FieldCell {
        let active = state
            .editor
            .as_ref()
            .filter(|e| e.panel == panel && e.field == field);
        let widget = match active {
            Some(editor) => editor.widget.clone(),
            None => FieldWidget::resolve(&binding.schema, self.session.value_of(binding)),
        };
        FieldCell {
            row: FormRow::Field { panel, field },
            title: binding.schema.title.clone(),
            widget,
            editing: active.is_some(),
            description: binding
                .schema
                .description
                .as_deref()
                .map(render_description)
                .unwrap_or_default(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Measuring
    // ─────────────────────────────────────────────────────────────────────────────

    fn block_height(&self, block: &FormBlock, width: u16) -> u16 {
        match block {
            FormBlock::Fields { left, right } => {
                let (lw, rw) = self.cell_widths(width, right.is_some());
                let l = self.cell_height(left, lw);
                let r = right.as_ref().map_or(0, |c| self.cell_height(c, rw));
                l.max(r)
            }
            _ => 1,
        }
    }

    fn cell_widths(&self, width: u16, paired: bool) -> (u16, u16) {
        if paired {
            let left = width.saturating_sub(COLUMN_GAP) / 2;
            (left, width.saturating_sub(COLUMN_GAP + left))
        } else {
            (width, 0)
        }
    }

    fn cell_height(&self, cell: &FieldCell, width: u16) -> u16 {
        let label = match self.layout.placement {
            LabelPlacement::Top => 1,
            LabelPlacement::Left => 0,
        };
        let control = control_lines(cell, usize::from(width)).len();
        let hint = usize::from(cell.widget.hint().is_some());
        let total = label + control + hint + cell.description.len();
        u16::try_from(total).unwrap_or(u16::MAX)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Drawing
    // ─────────────────────────────────────────────────────────────────────────────

    fn render_block(&self, block: &FormBlock, area: Rect, buf: &mut Buffer, cursor: FormRow) {
        match block {
            FormBlock::Header { panel } => self.render_header(*panel, area, buf, cursor),
            FormBlock::Group { title, depth } => {
                let indent = INDICATOR_WIDTH + 2 * (*depth as u16).saturating_sub(1);
                let text = format!("── {title}");
                let width = area.width.saturating_sub(indent);
                buf.set_string(
                    area.x + indent,
                    area.y,
                    truncate_str(&text, usize::from(width)),
                    group_style(),
                );
            }
            FormBlock::Fields { left, right } => {
                let (lw, rw) = self.cell_widths(area.width, right.is_some());
                self.render_cell(left, Rect::new(area.x, area.y, lw, area.height), buf, cursor);
                if let Some(right) = right {
                    let x = area.x + lw + COLUMN_GAP;
                    self.render_cell(right, Rect::new(x, area.y, rw, area.height), buf, cursor);
                }
            }
            FormBlock::Note(line) => {
                let width = area.width.saturating_sub(INDICATOR_WIDTH);
                let spans = line
                    .spans
                    .iter()
                    .map(|s| Span::styled(s.text.clone(), description_style(s.style)));
                let line = Line::from(
                    std::iter::once(Span::styled("· ", theme::text_muted()))
                        .chain(spans)
                        .collect::<Vec<_>>(),
                );
                buf.set_line(area.x + INDICATOR_WIDTH, area.y, &line, width);
            }
            FormBlock::Rule => {
                let width = usize::from(area.width.saturating_sub(INDICATOR_WIDTH));
                buf.set_string(
                    area.x + INDICATOR_WIDTH,
                    area.y,
                    "─".repeat(width),
                    theme::border_inactive(),
                );
            }
            FormBlock::Spacer => {}
        }
    }

    fn render_header(&self, panel: usize, area: Rect, buf: &mut Buffer, cursor: FormRow) {
        let Some(p) = self.session.panel(panel) else {
            return;
        };
        let is_selected = cursor == FormRow::Header(panel);
        let is_expanded = self.session.accordion().is_expanded(panel);

        if is_selected {
            highlight(area, buf);
        }

        let marker = if is_expanded { "▾ " } else { "▸ " };
        let count = match p.fields.len() {
            1 => "1 field".to_string(),
            n => format!("{n} fields"),
        };
        let x = area.x + INDICATOR_WIDTH;
        let width = area.width.saturating_sub(INDICATOR_WIDTH);
        let title_width = usize::from(width).saturating_sub(count.len() + 3);

        let line = Line::from(vec![
            Span::styled(marker, theme::accent()),
            Span::styled(
                truncate_str(&p.title, title_width),
                panel_header_style(is_expanded, is_selected),
            ),
        ]);
        buf.set_line(x, area.y, &line, width);

        if usize::from(width) > count.len() + 4 {
            let cx = area.right().saturating_sub(count.len() as u16 + 1);
            buf.set_string(cx, area.y, &count, theme::text_muted());
        }
    }

    fn render_cell(&self, cell: &FieldCell, area: Rect, buf: &mut Buffer, cursor: FormRow) {
        if area.width <= INDICATOR_WIDTH {
            return;
        }
        let is_selected = cell.row == cursor;
        if is_selected {
            highlight(area, buf);
        }

        let x = area.x + INDICATOR_WIDTH;
        let width = area.width - INDICATOR_WIDTH;
        let mut y = area.y;

        let (control_x, control_width) = match self.layout.placement {
            LabelPlacement::Top => {
                buf.set_string(
                    x,
                    y,
                    truncate_str(&cell.title, usize::from(width)),
                    label_style(is_selected),
                );
                y += 1;
                (x, width)
            }
            LabelPlacement::Left => {
                let label_width = self.layout.label_width.min(width / 2);
                let label = pad_str(
                    &cell.title,
                    usize::from(label_width),
                    self.layout.align == LabelAlign::Right,
                );
                buf.set_string(x, y, label, label_style(is_selected));
                let offset = label_width + LABEL_GAP;
                (x + offset, width.saturating_sub(offset))
            }
        };

        let mut lines = control_lines(cell, usize::from(control_width));
        if let Some(hint) = cell.widget.hint() {
            lines.push(Line::from(Span::styled(format!("⚠ {hint}"), hint_style())));
        }
        lines.extend(cell.description.iter().map(|line| {
            Line::from(
                line.spans
                    .iter()
                    .map(|s| Span::styled(s.text.clone(), description_style(s.style)))
                    .collect::<Vec<_>>(),
            )
        }));

        for line in lines {
            if y >= area.bottom() {
                break;
            }
            buf.set_line(control_x, y, &line, control_width);
            y += 1;
        }
    }
}

fn flush_half(blocks: &mut Vec<FormBlock>, pending: &mut Option<FieldCell>) {
    if let Some(left) = pending.take() {
        blocks.push(FormBlock::Fields { left, right: None });
    }
}

/// Selected-row background plus the accent bar down the left edge
fn highlight(area: Rect, buf: &mut Buffer) {
    for row in area.y..area.bottom() {
        for col in area.x..area.right() {
            if let Some(cell) = buf.cell_mut((col, row)) {
                cell.set_style(selected_row_bg());
            }
        }
        if let Some(cell) = buf.cell_mut((area.x, row)) {
            cell.set_symbol(ACCENT_BAR);
            cell.set_fg(palette::ACCENT);
        }
    }
}

/// Lines drawing the control itself, without hint or description
fn control_lines(cell: &FieldCell, width: usize) -> Vec<Line<'static>> {
    let style = if cell.editing {
        editing_style()
    } else {
        value_style(&cell.widget, false)
    };
    let cursor = if cell.editing { CURSOR } else { "" };

    match &cell.widget {
        FieldWidget::Text(text) if text.is_multiline() => {
            let display = format!("{}{cursor}", text.display());
            let mut lines: Vec<Line<'static>> = display
                .split('\n')
                .take(text.rows())
                .map(|l| Line::from(Span::styled(truncate_str(l, width), style)))
                .collect();
            while lines.len() < text.rows() {
                lines.push(Line::from(Span::styled("┆", theme::text_muted())));
            }
            lines
        }
        FieldWidget::Select(select) if cell.editing => {
            let mut lines = vec![Line::from(vec![
                Span::styled("filter: ", theme::text_muted()),
                Span::styled(format!("{}{CURSOR}", select.filter()), style),
            ])];
            let visible: Vec<_> = select.visible().collect();
            if visible.is_empty() {
                lines.push(Line::from(Span::styled("no matches", placeholder_style())));
            }
            let start = select.cursor().saturating_sub(MAX_SELECT_ROWS - 1);
            for (i, option) in visible.iter().enumerate().skip(start).take(MAX_SELECT_ROWS) {
                let is_cursor = i == select.cursor();
                let mark = if select.selected() == Some(option.value.as_str()) {
                    "✓ "
                } else {
                    "  "
                };
                let pointer = if is_cursor { "› " } else { "  " };
                let text = format!("{pointer}{mark}{}", option.label);
                lines.push(Line::from(Span::styled(
                    truncate_str(&text, width),
                    option_style(is_cursor),
                )));
            }
            lines
        }
        FieldWidget::Tags(tags) => {
            let mut spans: Vec<Span<'static>> = tags
                .tags()
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    if cell.editing && tags.selected() == Some(i) {
                        Span::styled(format!("[{t}]"), option_style(true))
                    } else {
                        Span::styled(format!("[{t}]"), style)
                    }
                })
                .flat_map(|chip| [chip, Span::raw(" ")])
                .collect();
            if cell.editing {
                spans.push(Span::styled(format!("{}{CURSOR}", tags.draft()), editing_style()));
            } else if spans.is_empty() {
                spans.push(Span::styled("(none)", placeholder_style()));
            }
            vec![Line::from(spans)]
        }
        FieldWidget::Toggle(toggle) => {
            let text = if toggle.is_on() { "● on" } else { "○ off" };
            vec![Line::from(Span::styled(text, value_style(&cell.widget, false)))]
        }
        widget => {
            let display = widget.display();
            if display.is_empty() && !cell.editing {
                return vec![Line::from(Span::styled("(empty)", placeholder_style()))];
            }
            let text = truncate_str(&format!("{display}{cursor}"), width);
            vec![Line::from(Span::styled(text, style))]
        }
    }
}
