//! Field widget resolver
//!
//! Maps each [`FieldKind`] to the control that edits it. A widget keeps a
//! local copy of the value seeded from the data tree; every change to that
//! copy is returned from [`FieldWidget::handle`] so the caller can write it
//! straight back.

use serde_json::Value;

use cform_core::{FieldKind, FieldSchema, FieldValue, SelectOption, TextInput};

use super::fuzzy::filter_options;

/// Fewest and most rows a textarea occupies
pub const TEXTAREA_MIN_ROWS: usize = 3;
pub const TEXTAREA_MAX_ROWS: usize = 5;

const MASK_CHAR: char = '•';

/// Editing input for the active widget, independent of the terminal layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetInput {
    Char(char),
    Backspace,
    /// Clear the whole value
    Clear,
    Enter,
    Up,
    Down,
    /// Show or hide a masked value
    Reveal,
}

/// The control editing one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldWidget {
    Select(SelectWidget),
    Text(TextWidget),
    Tags(TagsWidget),
    Toggle(ToggleWidget),
    Stepper(StepperWidget),
}

impl FieldWidget {
    /// Build the widget for `schema`, seeded with the stored value
    pub fn resolve(schema: &FieldSchema, current: Option<&Value>) -> Self {
        match &schema.kind {
            FieldKind::Select { options, .. } => Self::Select(SelectWidget::new(
                options.clone(),
                FieldValue::text_from(current),
            )),
            FieldKind::Text { url, input } => Self::Text(TextWidget {
                value: FieldValue::text_from(current).unwrap_or_default(),
                multiline: matches!(input, TextInput::Textarea),
                masked: input.is_password(),
                revealed: false,
                url: *url,
            }),
            FieldKind::Tags => Self::Tags(TagsWidget {
                tags: FieldValue::tags_from(current).unwrap_or_default(),
                draft: String::new(),
                selected: None,
            }),
            FieldKind::Toggle => Self::Toggle(ToggleWidget {
                on: FieldValue::bool_from(current).unwrap_or(false),
            }),
            FieldKind::Integer => Self::Stepper(StepperWidget {
                value: FieldValue::number_from(current),
                negative: false,
            }),
        }
    }

    /// Apply one input. Returns the new value when it changed.
    pub fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match self {
            Self::Select(w) => w.handle(input),
            Self::Text(w) => w.handle(input),
            Self::Tags(w) => w.handle(input),
            Self::Toggle(w) => w.handle(input),
            Self::Stepper(w) => w.handle(input),
        }
    }

    /// Whether Enter finishes editing rather than feeding the widget
    pub fn submits_on_enter(&self) -> bool {
        match self {
            Self::Text(w) => !w.multiline,
            Self::Toggle(_) | Self::Stepper(_) => true,
            Self::Select(_) | Self::Tags(_) => false,
        }
    }

    /// Rows the control needs, not counting label or description
    pub fn rows(&self) -> usize {
        match self {
            Self::Text(w) if w.multiline => w.rows(),
            _ => 1,
        }
    }

    /// Single-line rendering of the current value
    pub fn display(&self) -> String {
        match self {
            Self::Select(w) => w.display(),
            Self::Text(w) => w.display(),
            Self::Tags(w) => w.tags.join(", "),
            Self::Toggle(w) => if w.on { "on" } else { "off" }.to_string(),
            Self::Stepper(w) => w.display(),
        }
    }

    /// Inline warning shown next to the control, if any
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Text(w) => w.url_hint(),
            _ => None,
        }
    }
}

/// Single-choice picker with a fuzzy filter
#[derive(Debug, Clone, PartialEq)]
pub struct SelectWidget {
    options: Vec<SelectOption>,
    selected: Option<String>,
    filter: String,
    matches: Vec<usize>,
    cursor: usize,
}

impl SelectWidget {
    fn new(options: Vec<SelectOption>, selected: Option<String>) -> Self {
        let matches = (0..options.len()).collect();
        let cursor = selected
            .as_ref()
            .and_then(|value| options.iter().position(|o| &o.value == value))
            .unwrap_or(0);
        Self {
            options,
            selected,
            filter: String::new(),
            matches,
            cursor,
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Options passing the filter, in match order
    pub fn visible(&self) -> impl Iterator<Item = &SelectOption> {
        self.matches.iter().map(|&i| &self.options[i])
    }

    /// Position of the highlighted option within [`Self::visible`]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Label of the selected option, or the raw value when no option
    /// carries it
    pub fn display(&self) -> String {
        let Some(value) = &self.selected else {
            return String::new();
        };
        self.options
            .iter()
            .find(|o| &o.value == value)
            .map(|o| o.label.clone())
            .unwrap_or_else(|| value.clone())
    }

    fn refilter(&mut self) {
        self.matches = filter_options(&self.filter, &self.options);
        self.cursor = 0;
    }

    fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match input {
            WidgetInput::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            WidgetInput::Down => {
                if self.cursor + 1 < self.matches.len() {
                    self.cursor += 1;
                }
                None
            }
            WidgetInput::Char(c) => {
                self.filter.push(c);
                self.refilter();
                None
            }
            WidgetInput::Backspace => {
                if self.filter.pop().is_some() {
                    self.refilter();
                }
                None
            }
            WidgetInput::Clear => {
                self.filter.clear();
                self.refilter();
                None
            }
            WidgetInput::Enter => {
                let index = *self.matches.get(self.cursor)?;
                let value = self.options[index].value.clone();
                if self.selected.as_ref() == Some(&value) {
                    return None;
                }
                self.selected = Some(value.clone());
                Some(FieldValue::Text(value))
            }
            WidgetInput::Reveal => None,
        }
    }
}

/// Single or multi-line text editor
#[derive(Debug, Clone, PartialEq)]
pub struct TextWidget {
    value: String,
    multiline: bool,
    masked: bool,
    revealed: bool,
    url: bool,
}

impl TextWidget {
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Whether the value is currently hidden behind mask characters
    pub fn is_masked(&self) -> bool {
        self.masked && !self.revealed
    }

    /// Visible rows: the line count clamped to the textarea bounds
    pub fn rows(&self) -> usize {
        let lines = self.value.split('\n').count();
        lines.clamp(TEXTAREA_MIN_ROWS, TEXTAREA_MAX_ROWS)
    }

    pub fn display(&self) -> String {
        if self.is_masked() {
            return MASK_CHAR.to_string().repeat(self.value.chars().count());
        }
        self.value.clone()
    }

    /// A non-empty URL field that does not parse gets a hint. The value is
    /// still stored as typed.
    pub fn url_hint(&self) -> Option<&'static str> {
        if !self.url || self.value.trim().is_empty() {
            return None;
        }
        match url::Url::parse(self.value.trim()) {
            Ok(_) => None,
            Err(_) => Some("not a valid URL"),
        }
    }

    fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match input {
            WidgetInput::Char(c) => self.value.push(c),
            WidgetInput::Enter if self.multiline => self.value.push('\n'),
            WidgetInput::Backspace => {
                self.value.pop()?;
            }
            WidgetInput::Clear if !self.value.is_empty() => self.value.clear(),
            WidgetInput::Reveal => {
                if self.masked {
                    self.revealed = !self.revealed;
                }
                return None;
            }
            _ => return None,
        }
        Some(FieldValue::Text(self.value.clone()))
    }
}

/// Editable list of string tags.
///
/// Up/Down walk a selection over existing tags; Backspace removes the
/// selected tag, or the last one when the draft is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct TagsWidget {
    tags: Vec<String>,
    draft: String,
    selected: Option<usize>,
}

impl TagsWidget {
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Tag being typed, not yet added
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Index of the selected tag, if any
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match input {
            WidgetInput::Up if !self.tags.is_empty() => {
                self.selected = Some(match self.selected {
                    Some(i) => i.saturating_sub(1),
                    None => self.tags.len() - 1,
                });
                None
            }
            WidgetInput::Down => {
                self.selected = self.selected.map(|i| i + 1).filter(|&i| i < self.tags.len());
                None
            }
            WidgetInput::Backspace if self.selected.is_some() => {
                let index = self.selected?;
                self.tags.remove(index);
                self.selected = index.checked_sub(1).or(if self.tags.is_empty() {
                    None
                } else {
                    Some(0)
                });
                Some(FieldValue::Tags(self.tags.clone()))
            }
            WidgetInput::Char(c) => {
                self.selected = None;
                self.draft.push(c);
                None
            }
            WidgetInput::Enter => {
                self.selected = None;
                let tag = self.draft.trim().to_string();
                self.draft.clear();
                if tag.is_empty() || self.tags.contains(&tag) {
                    return None;
                }
                self.tags.push(tag);
                Some(FieldValue::Tags(self.tags.clone()))
            }
            WidgetInput::Backspace if self.draft.is_empty() => {
                self.tags.pop()?;
                Some(FieldValue::Tags(self.tags.clone()))
            }
            WidgetInput::Backspace => {
                self.draft.pop();
                None
            }
            WidgetInput::Clear if !self.tags.is_empty() => {
                self.tags.clear();
                self.draft.clear();
                self.selected = None;
                Some(FieldValue::Tags(Vec::new()))
            }
            _ => None,
        }
    }
}

/// On/off switch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleWidget {
    on: bool,
}

impl ToggleWidget {
    pub fn is_on(&self) -> bool {
        self.on
    }

    fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match input {
            WidgetInput::Enter | WidgetInput::Char(' ') => {
                self.on = !self.on;
                Some(FieldValue::Bool(self.on))
            }
            WidgetInput::Char('y') | WidgetInput::Up if !self.on => {
                self.on = true;
                Some(FieldValue::Bool(true))
            }
            WidgetInput::Char('n') | WidgetInput::Down if self.on => {
                self.on = false;
                Some(FieldValue::Bool(false))
            }
            _ => None,
        }
    }
}

/// Integer input.
///
/// Up/Down step by one and digits are appended. `-` and `+` set the sign;
/// on an empty or zero value the sign is held until the first digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepperWidget {
    value: Option<i64>,
    negative: bool,
}

impl StepperWidget {
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    pub fn display(&self) -> String {
        match self.value {
            Some(0) | None if self.negative => "-".to_string(),
            Some(n) => n.to_string(),
            None => String::new(),
        }
    }

    fn emit(&mut self, next: i64) -> Option<FieldValue> {
        self.negative = false;
        if self.value == Some(next) {
            return None;
        }
        self.value = Some(next);
        Some(FieldValue::Number(next))
    }

    fn step(&mut self, delta: i64) -> Option<FieldValue> {
        self.emit(self.value.unwrap_or(0).saturating_add(delta))
    }

    fn set_sign(&mut self, negative: bool) -> Option<FieldValue> {
        match self.value {
            Some(n) if n != 0 && (n < 0) != negative => self.emit(n.checked_neg()?),
            Some(n) if n != 0 => None,
            _ => {
                self.negative = negative;
                None
            }
        }
    }

    fn handle(&mut self, input: WidgetInput) -> Option<FieldValue> {
        match input {
            WidgetInput::Up => self.step(1),
            WidgetInput::Down => self.step(-1),
            WidgetInput::Char('-') => {
                let negative = match self.value {
                    Some(n) if n != 0 => n > 0,
                    _ => !self.negative,
                };
                self.set_sign(negative)
            }
            WidgetInput::Char('+') => self.set_sign(false),
            WidgetInput::Char(c) => {
                let digit = i64::from(c.to_digit(10)?);
                let current = self.value.unwrap_or(0);
                let next = if current < 0 || self.negative {
                    current.checked_mul(10)?.checked_sub(digit)?
                } else {
                    current.checked_mul(10)?.checked_add(digit)?
                };
                self.emit(next)
            }
            WidgetInput::Backspace if self.negative => {
                self.negative = false;
                None
            }
            WidgetInput::Backspace => {
                let current = self.value?;
                self.emit(current / 10)
            }
            WidgetInput::Clear if self.value.is_some() || self.negative => {
                self.negative = false;
                if self.value.is_some() {
                    self.emit(0)
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn field(kind: FieldKind) -> FieldSchema {
        FieldSchema {
            title: "Field".into(),
            description: None,
            kind,
            half_grid: false,
        }
    }

    fn text(input: TextInput, url: bool) -> FieldSchema {
        field(FieldKind::Text { url, input })
    }

    fn single_line(input_type: &str) -> TextInput {
        TextInput::SingleLine {
            input_type: input_type.into(),
        }
    }

    fn colors() -> FieldSchema {
        field(FieldKind::Select {
            url: false,
            options: vec![
                SelectOption {
                    label: "Red".into(),
                    value: "red".into(),
                },
                SelectOption {
                    label: "Blue".into(),
                    value: "blue".into(),
                },
            ],
        })
    }

    fn type_str(widget: &mut FieldWidget, s: &str) -> Option<FieldValue> {
        let mut last = None;
        for c in s.chars() {
            last = widget.handle(WidgetInput::Char(c)).or(last);
        }
        last
    }

    #[test]
    fn test_resolver_is_exhaustive() {
        assert!(matches!(FieldWidget::resolve(&colors(), None), FieldWidget::Select(_)));
        assert!(matches!(
            FieldWidget::resolve(&text(TextInput::Textarea, false), None),
            FieldWidget::Text(_)
        ));
        assert!(matches!(
            FieldWidget::resolve(&field(FieldKind::Tags), None),
            FieldWidget::Tags(_)
        ));
        assert!(matches!(
            FieldWidget::resolve(&field(FieldKind::Toggle), None),
            FieldWidget::Toggle(_)
        ));
        assert!(matches!(
            FieldWidget::resolve(&field(FieldKind::Integer), None),
            FieldWidget::Stepper(_)
        ));
    }

    #[test]
    fn test_select_picks_value_not_label() {
        let mut widget = FieldWidget::resolve(&colors(), None);
        widget.handle(WidgetInput::Down);
        assert_eq!(
            widget.handle(WidgetInput::Enter),
            Some(FieldValue::Text("blue".into()))
        );
        assert_eq!(widget.display(), "Blue");
        // Picking the same option again is not a change
        assert_eq!(widget.handle(WidgetInput::Enter), None);
    }

    #[test]
    fn test_select_filter_narrows_choices() {
        let mut widget = FieldWidget::resolve(&colors(), Some(&json!("red")));
        assert_eq!(type_str(&mut widget, "bl"), None);
        let FieldWidget::Select(select) = &widget else {
            panic!("expected select");
        };
        assert_eq!(select.filter(), "bl");
        assert_eq!(select.visible().count(), 1);
        assert_eq!(
            widget.handle(WidgetInput::Enter),
            Some(FieldValue::Text("blue".into()))
        );
    }

    #[test]
    fn test_select_seeds_cursor_from_value() {
        let widget = FieldWidget::resolve(&colors(), Some(&json!("blue")));
        let FieldWidget::Select(select) = &widget else {
            panic!("expected select");
        };
        assert_eq!(select.cursor(), 1);
        assert_eq!(select.selected(), Some("blue"));
    }

    #[test]
    fn test_text_emits_on_every_change() {
        let mut widget =
            FieldWidget::resolve(&text(single_line("text"), false), Some(&json!("ab")));
        assert_eq!(
            widget.handle(WidgetInput::Char('c')),
            Some(FieldValue::Text("abc".into()))
        );
        assert_eq!(
            widget.handle(WidgetInput::Backspace),
            Some(FieldValue::Text("ab".into()))
        );
        assert_eq!(widget.handle(WidgetInput::Clear), Some(FieldValue::Text(String::new())));
        assert_eq!(widget.handle(WidgetInput::Backspace), None);
        assert!(widget.submits_on_enter());
    }

    #[test]
    fn test_textarea_rows_are_clamped() {
        let mut widget = FieldWidget::resolve(&text(TextInput::Textarea, false), None);
        assert_eq!(widget.rows(), 3);
        assert!(!widget.submits_on_enter());
        for _ in 0..7 {
            widget.handle(WidgetInput::Enter);
        }
        assert_eq!(widget.rows(), 5);
    }

    #[test]
    fn test_password_is_masked_until_revealed() {
        let mut widget =
            FieldWidget::resolve(&text(single_line("password"), false), Some(&json!("secret")));
        assert_eq!(widget.display(), "••••••");
        assert_eq!(widget.handle(WidgetInput::Reveal), None);
        assert_eq!(widget.display(), "secret");
        widget.handle(WidgetInput::Reveal);
        assert_eq!(widget.display(), "••••••");
    }

    #[test]
    fn test_url_hint() {
        let widget = FieldWidget::resolve(&text(single_line("text"), true), Some(&json!("nope")));
        assert_eq!(widget.hint(), Some("not a valid URL"));

        let widget = FieldWidget::resolve(
            &text(single_line("text"), true),
            Some(&json!("https://innei.ren")),
        );
        assert_eq!(widget.hint(), None);

        let widget = FieldWidget::resolve(&text(single_line("text"), false), Some(&json!("nope")));
        assert_eq!(widget.hint(), None);
    }

    #[test]
    fn test_tags_add_and_remove() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Tags), Some(&json!(["a"])));
        assert_eq!(type_str(&mut widget, "b"), None);
        assert_eq!(
            widget.handle(WidgetInput::Enter),
            Some(FieldValue::Tags(vec!["a".into(), "b".into()]))
        );
        // duplicates and blanks are ignored
        type_str(&mut widget, "a");
        assert_eq!(widget.handle(WidgetInput::Enter), None);
        assert_eq!(widget.handle(WidgetInput::Enter), None);

        assert_eq!(
            widget.handle(WidgetInput::Backspace),
            Some(FieldValue::Tags(vec!["a".into()]))
        );
    }

    #[test]
    fn test_tags_backspace_edits_draft_first() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Tags), Some(&json!(["a"])));
        type_str(&mut widget, "xy");
        assert_eq!(widget.handle(WidgetInput::Backspace), None);
        let FieldWidget::Tags(tags) = &widget else {
            panic!("expected tags");
        };
        assert_eq!(tags.draft(), "x");
        assert_eq!(tags.tags(), ["a".to_string()]);
    }

    #[test]
    fn test_tags_remove_selected() {
        let mut widget =
            FieldWidget::resolve(&field(FieldKind::Tags), Some(&json!(["a", "b", "c"])));
        // Up selects the last tag, then walks back
        assert_eq!(widget.handle(WidgetInput::Up), None);
        assert_eq!(widget.handle(WidgetInput::Up), None);
        assert_eq!(
            widget.handle(WidgetInput::Backspace),
            Some(FieldValue::Tags(vec!["a".into(), "c".into()]))
        );
        let FieldWidget::Tags(tags) = &widget else {
            panic!("expected tags");
        };
        assert_eq!(tags.selected(), Some(0));

        // Down past the end returns to the draft
        widget.handle(WidgetInput::Down);
        widget.handle(WidgetInput::Down);
        let FieldWidget::Tags(tags) = &widget else {
            panic!("expected tags");
        };
        assert_eq!(tags.selected(), None);
    }

    #[test]
    fn test_toggle() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Toggle), None);
        assert_eq!(widget.display(), "off");
        assert_eq!(widget.handle(WidgetInput::Enter), Some(FieldValue::Bool(true)));
        assert_eq!(widget.handle(WidgetInput::Char('y')), None);
        assert_eq!(widget.handle(WidgetInput::Char('n')), Some(FieldValue::Bool(false)));
    }

    #[test]
    fn test_stepper() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Integer), None);
        assert_eq!(widget.display(), "");
        assert_eq!(widget.handle(WidgetInput::Up), Some(FieldValue::Number(1)));
        assert_eq!(type_str(&mut widget, "2"), Some(FieldValue::Number(12)));
        assert_eq!(widget.handle(WidgetInput::Down), Some(FieldValue::Number(11)));
        assert_eq!(widget.handle(WidgetInput::Backspace), Some(FieldValue::Number(1)));
        assert_eq!(widget.handle(WidgetInput::Char('x')), None);
    }

    #[test]
    fn test_stepper_negative_entry() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Integer), None);
        assert_eq!(widget.handle(WidgetInput::Char('-')), None);
        assert_eq!(widget.display(), "-");
        assert_eq!(widget.handle(WidgetInput::Char('5')), Some(FieldValue::Number(-5)));
        assert_eq!(widget.handle(WidgetInput::Char('2')), Some(FieldValue::Number(-52)));
    }

    #[test]
    fn test_stepper_sign_keys_flip_existing_value() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Integer), Some(&json!(7)));
        assert_eq!(widget.handle(WidgetInput::Char('-')), Some(FieldValue::Number(-7)));
        assert_eq!(widget.handle(WidgetInput::Char('-')), Some(FieldValue::Number(7)));
        assert_eq!(widget.handle(WidgetInput::Char('+')), None);

        // a held sign on zero can be dropped again
        let mut widget = FieldWidget::resolve(&field(FieldKind::Integer), Some(&json!(0)));
        widget.handle(WidgetInput::Char('-'));
        widget.handle(WidgetInput::Char('+'));
        assert_eq!(widget.handle(WidgetInput::Char('3')), Some(FieldValue::Number(3)));
    }

    #[test]
    fn test_stepper_overflow_is_ignored() {
        let mut widget = FieldWidget::resolve(&field(FieldKind::Integer), Some(&json!(i64::MAX)));
        assert_eq!(widget.handle(WidgetInput::Char('1')), None);
        assert_eq!(widget.handle(WidgetInput::Up), None);
    }
}
