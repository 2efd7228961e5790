//! Field description markup
//!
//! Descriptions are written in Markdown and may come from untrusted schema
//! sources. They are turned into styled lines for the terminal:
//! - raw HTML is kept as literal text and never interpreted
//! - ANSI escape sequences and other control characters are removed
//! - input that yields nothing renderable falls back to its literal text

use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

/// ANSI escape sequences: CSI, OSC and simple two-byte escapes
static ANSI_ESCAPE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        \x1b\[[0-9;?]*[A-Za-z]                # CSI sequences
        | \x1b\][^\x07\x1b]*(?:\x07|\x1b\\)   # OSC sequences
        | \x1b[A-Za-z]                        # Simple escapes
        ",
    )
    .expect("ANSI regex pattern is valid")
});

/// Visual style of a span of description text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanStyle {
    Plain,
    Strong,
    Emphasis,
    Code,
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupSpan {
    pub text: String,
    pub style: SpanStyle,
}

impl MarkupSpan {
    fn new(text: impl Into<String>, style: SpanStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One rendered line of a description
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MarkupLine {
    pub spans: Vec<MarkupSpan>,
}

impl MarkupLine {
    /// Concatenated text of the line, without styling
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    fn is_blank(&self) -> bool {
        self.spans.iter().all(|s| s.text.trim().is_empty())
    }
}

/// Remove ANSI escapes and control characters; tabs become spaces
pub fn sanitize_text(text: &str) -> String {
    let stripped = ANSI_ESCAPE_PATTERN.replace_all(text, "");
    stripped
        .chars()
        .filter_map(|c| match c {
            '\t' => Some(' '),
            '\n' => Some('\n'),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Render a Markdown description into sanitized, styled lines
pub fn render_description(source: &str) -> Vec<MarkupLine> {
    let clean = sanitize_text(source);
    let mut renderer = Renderer::default();
    for event in Parser::new(&clean) {
        renderer.event(event);
    }
    let lines = renderer.finish();

    if lines.is_empty() && !source.trim().is_empty() {
        return literal_lines(source);
    }
    lines
}

/// Literal fallback: one plain line per source line
pub fn literal_lines(source: &str) -> Vec<MarkupLine> {
    sanitize_text(source)
        .lines()
        .map(|line| MarkupLine {
            spans: vec![MarkupSpan::new(line, SpanStyle::Plain)],
        })
        .collect()
}

#[derive(Default)]
struct Renderer {
    lines: Vec<MarkupLine>,
    current: MarkupLine,
    styles: Vec<SpanStyle>,
    /// Next item number per open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
}

impl Renderer {
    fn style(&self) -> SpanStyle {
        self.styles.last().copied().unwrap_or(SpanStyle::Plain)
    }

    fn push_text(&mut self, text: &str, style: SpanStyle) {
        let clean = sanitize_text(text);
        let mut parts = clean.split('\n');
        if let Some(first) = parts.next() {
            if !first.is_empty() {
                self.current.spans.push(MarkupSpan::new(first, style));
            }
        }
        for part in parts {
            self.flush();
            if !part.is_empty() {
                self.current.spans.push(MarkupSpan::new(part, style));
            }
        }
    }

    fn flush(&mut self) {
        let line = std::mem::take(&mut self.current);
        if !line.is_blank() {
            self.lines.push(line);
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => match tag {
                Tag::Strong | Tag::Heading { .. } => self.styles.push(SpanStyle::Strong),
                Tag::Emphasis => self.styles.push(SpanStyle::Emphasis),
                Tag::Link { .. } => self.styles.push(SpanStyle::Link),
                Tag::CodeBlock(_) => {
                    self.flush();
                    self.styles.push(SpanStyle::Code);
                }
                Tag::List(start) => self.lists.push(start),
                Tag::Item => {
                    self.flush();
                    let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                    let marker = match self.lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{n}. ");
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    self.current
                        .spans
                        .push(MarkupSpan::new(format!("{indent}{marker}"), SpanStyle::Plain));
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Link => {
                    self.styles.pop();
                }
                TagEnd::Heading(_) | TagEnd::CodeBlock => {
                    self.styles.pop();
                    self.flush();
                }
                TagEnd::Paragraph | TagEnd::Item => self.flush(),
                TagEnd::List(_) => {
                    self.lists.pop();
                }
                _ => {}
            },
            Event::Text(text) => {
                let style = self.style();
                self.push_text(&text, style);
            }
            Event::Code(code) => self.push_text(&code, SpanStyle::Code),
            // Never interpreted: shown exactly as written
            Event::Html(html) | Event::InlineHtml(html) => {
                let style = self.style();
                self.push_text(&html, style);
            }
            Event::SoftBreak => {
                let style = self.style();
                self.push_text(" ", style);
            }
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.current
                    .spans
                    .push(MarkupSpan::new("───", SpanStyle::Plain));
                self.flush();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<MarkupLine> {
        self.flush();
        self.lines
    }
}
