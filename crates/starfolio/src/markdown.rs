//! Markdown to styled terminal text.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
};

/// Width of a horizontal rule.
const RULE_WIDTH: usize = 40;

/// Render a markdown body to styled lines. `accent` colors headings, list
/// markers, links and quote bars.
pub fn render(markdown: &str, accent: Color) -> Text<'static> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut renderer = Renderer::new(accent);
    for event in Parser::new_ext(markdown, options) {
        renderer.event(event);
    }
    renderer.finish()
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Vec<String>>,
    header_rows: usize,
    row: Vec<String>,
    cell: String,
}

#[derive(Debug)]
struct Renderer {
    accent: Color,
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    /// Inline styles, innermost last.
    styles: Vec<Style>,
    /// Open lists with the next number for ordered ones.
    lists: Vec<Option<u64>>,
    /// Marker for the first line of the current list item.
    marker: Option<String>,
    marker_width: usize,
    quote_depth: usize,
    code_block: bool,
    link: Option<String>,
    image_alt: Option<String>,
    table: Option<Table>,
}

impl Renderer {
    fn new(accent: Color) -> Self {
        Self {
            accent,
            lines: Vec::new(),
            spans: Vec::new(),
            styles: Vec::new(),
            lists: Vec::new(),
            marker: None,
            marker_width: 2,
            quote_depth: 0,
            code_block: false,
            link: None,
            image_alt: None,
            table: None,
        }
    }

    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let style = f(self.style());
        self.styles.push(style);
    }

    fn code_style() -> Style {
        Style::new().fg(Color::Yellow)
    }

    fn event(&mut self, event: Event) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push_str(&code);
                } else {
                    self.spans
                        .push(Span::styled(code.to_string(), Self::code_style()));
                }
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::styled(
                    "─".repeat(RULE_WIDTH),
                    Style::new().fg(Color::DarkGray),
                ));
                self.blank();
            }
            Event::TaskListMarker(checked) => {
                let mark = if checked { "[x] " } else { "[ ] " };
                self.spans.push(Span::styled(mark, Style::new().fg(self.accent)));
            }
            Event::FootnoteReference(name) => {
                self.spans.push(Span::styled(
                    format!("[^{name}]"),
                    Style::new().fg(Color::DarkGray),
                ));
            }
            // Raw HTML is not rendered
            Event::Html(_) => {}
        }
    }

    fn start(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {}
            Tag::Heading(level, _, _) => {
                self.flush();
                let accent = self.accent;
                self.push_style(|s| match level {
                    HeadingLevel::H1 => s
                        .fg(accent)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
                    HeadingLevel::H2 => s.fg(accent).add_modifier(Modifier::BOLD),
                    _ => s.add_modifier(Modifier::BOLD),
                });
            }
            Tag::BlockQuote => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(|s| s.add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.flush();
                self.code_block = true;
                match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => {
                        self.lines.push(Line::styled(
                            format!("  {lang}"),
                            Style::new().fg(Color::DarkGray),
                        ));
                    }
                    _ => {}
                }
            }
            Tag::List(start) => {
                self.flush();
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.marker_width = marker.chars().count();
                self.marker = Some(marker);
            }
            Tag::FootnoteDefinition(name) => {
                self.flush();
                self.spans.push(Span::styled(
                    format!("[^{name}]: "),
                    Style::new().fg(Color::DarkGray),
                ));
            }
            Tag::Table(_) => {
                self.flush();
                self.table = Some(Table::default());
            }
            Tag::TableHead | Tag::TableRow | Tag::TableCell => {}
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link(_, dest, _) => {
                let accent = self.accent;
                self.push_style(|s| s.fg(accent).add_modifier(Modifier::UNDERLINED));
                self.link = Some(dest.to_string());
            }
            Tag::Image(_, _, _) => self.image_alt = Some(String::new()),
        }
    }

    fn end(&mut self, tag: Tag) {
        match tag {
            Tag::Paragraph => {
                self.flush();
                self.blank();
            }
            Tag::Heading(..) => {
                self.styles.pop();
                self.flush();
                self.blank();
            }
            Tag::BlockQuote => {
                self.styles.pop();
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.blank();
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.code_block = false;
                self.blank();
            }
            Tag::List(_) => {
                self.flush();
                self.lists.pop();
                if self.lists.is_empty() {
                    self.blank();
                }
            }
            Tag::Item | Tag::FootnoteDefinition(_) => self.flush(),
            Tag::Table(_) => {
                if let Some(table) = self.table.take() {
                    self.table_lines(table);
                }
                self.blank();
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                    table.header_rows = table.rows.len();
                }
            }
            Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            Tag::Emphasis | Tag::Strong | Tag::Strikethrough => {
                self.styles.pop();
            }
            Tag::Link(..) => {
                self.styles.pop();
                let dest = self.link.take().unwrap_or_default();
                if !dest.is_empty() && !dest.starts_with('#') {
                    self.spans.push(Span::styled(
                        format!(" ({dest})"),
                        Style::new().fg(Color::DarkGray),
                    ));
                }
            }
            Tag::Image(..) => {
                let alt = self.image_alt.take().unwrap_or_default();
                let label = if alt.is_empty() {
                    "[image]".to_string()
                } else {
                    format!("[image: {alt}]")
                };
                self.spans.push(Span::styled(
                    label,
                    Style::new()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ));
            }
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(alt) = self.image_alt.as_mut() {
            alt.push_str(text);
        } else if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
        } else if self.code_block {
            for line in text.lines() {
                self.spans
                    .push(Span::styled(format!("  {line}"), Self::code_style()));
                self.flush();
            }
        } else {
            let style = self.style();
            self.spans.push(Span::styled(text.to_string(), style));
        }
    }

    /// Quote bars and list indentation for the next line.
    fn prefix(&mut self) -> Vec<Span<'static>> {
        let mut spans = Vec::new();
        if self.quote_depth > 0 {
            spans.push(Span::styled(
                "│ ".repeat(self.quote_depth),
                Style::new().fg(self.accent),
            ));
        }
        if let Some(depth) = self.lists.len().checked_sub(1) {
            let indent = "  ".repeat(depth);
            match self.marker.take() {
                Some(marker) => spans.push(Span::styled(
                    format!("{indent}{marker}"),
                    Style::new().fg(self.accent),
                )),
                None => spans.push(Span::raw(format!(
                    "{indent}{}",
                    " ".repeat(self.marker_width)
                ))),
            }
        }
        spans
    }

    fn flush(&mut self) {
        if self.spans.is_empty() && self.marker.is_none() {
            return;
        }
        let mut spans = self.prefix();
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    /// Separate blocks with a single empty line.
    fn blank(&mut self) {
        if self.lines.last().is_some_and(|line| line.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn table_lines(&mut self, table: Table) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0; columns];
        for row in &table.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        let border = Style::new().fg(Color::DarkGray);
        for (index, row) in table.rows.iter().enumerate() {
            let header = index < table.header_rows;
            let style = if header {
                Style::new().fg(self.accent).add_modifier(Modifier::BOLD)
            } else {
                Style::new()
            };

            let mut spans = Vec::new();
            for (i, width) in widths.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::styled(" │ ", border));
                }
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                spans.push(Span::styled(format!("{cell:<width$}"), style));
            }
            self.lines.push(Line::from(spans));

            if header && index + 1 == table.header_rows {
                let rule: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
                self.lines.push(Line::styled(rule.join("─┼─"), border));
            }
        }
    }

    fn finish(mut self) -> Text<'static> {
        self.flush();
        while self.lines.last().is_some_and(|line| line.width() == 0) {
            self.lines.pop();
        }
        Text::from(self.lines)
    }
}
