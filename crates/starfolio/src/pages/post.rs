//! A single post, rendered from markdown.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use starfolio_posts::{DocumentStore, LookupError, Post, PostCollection};
use tracing::info;

use crate::markdown;
use crate::pages::card_date;

const ARTICLE_WIDTH: u16 = 80;

/// Hint shown under a lookup error.
pub const BACK_HINT: &str = "Press Esc to go back to posts";

/// Post view state.
#[derive(Debug)]
pub struct PostPage {
    slug: String,
    post: Result<Post, LookupError>,
    /// Header and body, styled for `accent`.
    text: Text<'static>,
    accent: Color,
    /// Rows the text takes at the last rendered width.
    rows: usize,
    scroll: u16,
}

impl PostPage {
    pub fn load<S: DocumentStore>(collection: &PostCollection<S>, slug: &str, accent: Color) -> Self {
        let mut page = Self {
            slug: slug.to_string(),
            post: Err(LookupError::NotFound {
                slug: slug.to_string(),
            }),
            text: Text::default(),
            accent,
            rows: 0,
            scroll: 0,
        };
        page.reload(collection);
        page
    }

    /// Look the post up again, keeping the scroll position when it still fits.
    pub fn reload<S: DocumentStore>(&mut self, collection: &PostCollection<S>) {
        self.post = collection.get_post(&self.slug);
        match &self.post {
            Ok(post) => info!(slug = %self.slug, read_time = %post.read_time, "opened post"),
            Err(e) => info!(slug = %self.slug, error = %e, "post unavailable"),
        }
        self.restyle();
        self.scroll = self.scroll.min(self.max_scroll());
    }

    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[cfg(test)]
    pub fn post(&self) -> Result<&Post, &LookupError> {
        self.post.as_ref()
    }

    #[cfg(test)]
    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Re-style the text when the theme changes.
    pub fn set_accent(&mut self, accent: Color) {
        if accent != self.accent {
            self.accent = accent;
            self.restyle();
        }
    }

    pub fn scroll_down(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_add(rows).min(self.max_scroll());
    }

    pub fn scroll_up(&mut self, rows: u16) {
        self.scroll = self.scroll.saturating_sub(rows);
    }

    pub fn scroll_top(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> u16 {
        self.rows.saturating_sub(1).min(u16::MAX as usize) as u16
    }

    /// Until the next render the text is counted unwrapped.
    fn restyle(&mut self) {
        self.text = match &self.post {
            Ok(post) => article(post, self.accent),
            Err(_) => Text::default(),
        };
        self.rows = self.text.lines.len();
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = ARTICLE_WIDTH.min(area.width);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);

        match &self.post {
            Ok(_) => {
                let paragraph = Paragraph::new(self.text.clone()).wrap(Wrap { trim: false });
                self.rows = paragraph.line_count(column.width);
                self.scroll = self.scroll.min(self.max_scroll());
                frame.render_widget(paragraph.scroll((self.scroll, 0)), column);
            }
            Err(e) => {
                let [message] = Layout::vertical([Constraint::Length(3)])
                    .flex(Flex::Center)
                    .areas(column);
                let lines = vec![
                    Line::from(e.to_string().bold()),
                    Line::default(),
                    Line::from(BACK_HINT.dark_gray()),
                ];
                frame.render_widget(Paragraph::new(lines).centered(), message);
            }
        }
    }
}

/// Header block followed by the rendered body.
fn article(post: &Post, accent: Color) -> Text<'static> {
    let meta = &post.metadata;
    let mut lines = vec![
        Line::from(vec![
            card_date(meta.date).dark_gray(),
            Span::styled("  •  ", Style::new().fg(Color::DarkGray)),
            format!("{} read", post.read_time).dark_gray(),
        ]),
        Line::default(),
        Line::from(Span::styled(
            meta.title.clone(),
            Style::new().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(meta.summary.clone().italic()),
    ];

    if !meta.tools.is_empty() {
        let mut badges = Vec::new();
        for tool in &meta.tools {
            if !badges.is_empty() {
                badges.push(Span::raw(" "));
            }
            badges.push(Span::styled(
                format!(" {tool} "),
                Style::new().fg(Color::Black).bg(accent),
            ));
        }
        lines.push(Line::default());
        lines.push(Line::from(badges));
    }

    lines.push(Line::default());
    lines.push(Line::styled(
        "─".repeat(ARTICLE_WIDTH as usize),
        Style::new().fg(Color::DarkGray),
    ));
    lines.push(Line::default());

    lines.extend(markdown::render(&post.content, accent).lines);
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};
    use starfolio_posts::MemoryDocumentStore;

    use super::*;

    fn collection() -> PostCollection<MemoryDocumentStore> {
        let body: String = (1..=40).map(|i| format!("Paragraph {i}.\n\n")).collect();
        PostCollection::new(
            MemoryDocumentStore::new()
                .with(
                    "hello",
                    format!(
                        "---\ntitle: Hello\ndate: 2024-02-03\nsummary: A greeting\ntools: [Rust, Ratatui]\n---\n# Intro\n\n{body}"
                    ),
                )
                .with(
                    "wip",
                    "---\ntitle: Wip\ndate: 2024-02-03\nsummary: S\ndraft: true\n---\nsecret\n",
                ),
        )
    }

    fn screen(page: &mut PostPage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(frame, area)
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_header_and_badges() {
        let mut page = PostPage::load(&collection(), "hello", Color::Cyan);
        let screen = screen(&mut page);
        assert!(screen.contains("FEB 3, 2024"));
        assert!(screen.contains("1 minute read"));
        assert!(screen.contains("Hello"));
        assert!(screen.contains("A greeting"));
        assert!(screen.contains(" Rust "));
        assert!(screen.contains("Intro"));
    }

    #[test]
    fn test_draft_shows_not_available() {
        let mut page = PostPage::load(&collection(), "wip", Color::Cyan);
        assert!(matches!(page.post(), Err(LookupError::NotAvailable { .. })));
        let screen = screen(&mut page);
        assert!(screen.contains("This post is not available yet."));
        assert!(screen.contains(BACK_HINT));
        assert!(!screen.contains("secret"));
    }

    #[test]
    fn test_missing_post_shows_not_found() {
        let mut page = PostPage::load(&collection(), "nope", Color::Cyan);
        let screen = screen(&mut page);
        assert!(screen.contains("Post not found"));
        assert!(screen.contains(BACK_HINT));
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut page = PostPage::load(&collection(), "hello", Color::Cyan);
        page.scroll_up(3);
        assert_eq!(page.scroll(), 0);

        page.scroll_down(10);
        assert_eq!(page.scroll(), 10);
        assert!(!screen(&mut page).contains("FEB 3, 2024"));

        page.scroll_down(u16::MAX);
        assert_eq!(page.scroll() as usize, page.rows - 1);
        page.scroll_top();
        assert_eq!(page.scroll(), 0);
    }

    #[test]
    fn test_scroll_reaches_end_of_wrapped_text() {
        let long = "word ".repeat(300);
        let collection = PostCollection::new(MemoryDocumentStore::new().with(
            "long",
            format!("---\ntitle: Long\ndate: 2024-02-03\nsummary: S\n---\n{long}\n\nThe end.\n"),
        ));
        let mut page = PostPage::load(&collection, "long", Color::Cyan);
        screen(&mut page);
        assert!(page.rows > page.text.lines.len());

        page.scroll_down(u16::MAX);
        assert!(screen(&mut page).contains("The end."));
        assert_eq!(page.scroll() as usize, page.rows - 1);
    }

    #[test]
    fn test_theme_change_restyles_title() {
        let mut page = PostPage::load(&collection(), "hello", Color::Cyan);
        page.set_accent(Color::Red);
        assert_eq!(page.text.lines[2].spans[0].style.fg, Some(Color::Red));
    }
}
