//! The Blog index: one card per published post.

use chrono::NaiveDateTime;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Margin, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph},
};
use starfolio_posts::{DocumentStore, PostCollection, PostSummary};
use tracing::{error, info};

/// Shown when the store holds no published posts.
pub const EMPTY_MESSAGE: &str = "No posts yet. Check back soon!";

/// Shown when the posts directory could not be read.
pub const FAILED_MESSAGE: &str = "Failed to load posts";

/// Rows taken by one post card, borders included.
const CARD_HEIGHT: u16 = 5;
const INDEX_WIDTH: u16 = 80;

/// Date as shown on cards: `JAN 5, 2024`.
pub fn card_date(date: NaiveDateTime) -> String {
    date.format("%b %-d, %Y").to_string().to_uppercase()
}

/// Count line above the cards.
pub fn count_line(count: usize) -> String {
    match count {
        1 => "1 post so far".to_string(),
        n => format!("{n} posts so far"),
    }
}

/// Blog index state.
#[derive(Debug, Default)]
pub struct BlogPage {
    /// Published posts, or `None` if the last load failed.
    posts: Option<Vec<PostSummary>>,
    selected: usize,
}

impl BlogPage {
    /// Read the index from the collection.
    pub fn load<S: DocumentStore>(collection: &PostCollection<S>) -> Self {
        let mut page = Self::default();
        page.reload(collection);
        page
    }

    /// Re-read the index, keeping the selection on the same post if it
    /// still exists.
    pub fn reload<S: DocumentStore>(&mut self, collection: &PostCollection<S>) {
        let previous = self.selected_slug().map(str::to_string);
        match collection.list_posts() {
            Ok(posts) => {
                info!(count = posts.len(), "loaded post index");
                self.selected = previous
                    .and_then(|slug| posts.iter().position(|p| p.metadata.slug == slug))
                    .unwrap_or(0);
                self.posts = Some(posts);
            }
            Err(e) => {
                error!(error = %e, "failed to load posts");
                self.posts = None;
                self.selected = 0;
            }
        }
    }

    #[cfg(test)]
    pub fn posts(&self) -> Option<&[PostSummary]> {
        self.posts.as_deref()
    }

    #[cfg(test)]
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_slug(&self) -> Option<&str> {
        self.posts
            .as_ref()?
            .get(self.selected)
            .map(|post| post.metadata.slug.as_str())
    }

    pub fn select_next(&mut self) {
        let len = self.posts.as_ref().map_or(0, Vec::len);
        if self.selected + 1 < len {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, accent: Color) {
        let width = INDEX_WIDTH.min(area.width);
        let [column] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(area);
        let [header, _, list] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(column.inner(Margin::new(0, 1)));

        let Some(posts) = &self.posts else {
            frame.render_widget(
                Paragraph::new(FAILED_MESSAGE.red()).centered(),
                header,
            );
            return;
        };

        frame.render_widget(Line::from(count_line(posts.len()).dark_gray()), header);
        if posts.is_empty() {
            frame.render_widget(Paragraph::new(EMPTY_MESSAGE.dark_gray()).centered(), list);
            return;
        }

        // Scroll so the selected card stays visible
        let visible = (list.height / CARD_HEIGHT).max(1) as usize;
        let first = self.selected.saturating_sub(visible - 1);

        for (slot, (index, post)) in posts
            .iter()
            .enumerate()
            .skip(first)
            .take(visible)
            .enumerate()
        {
            let top = list.y + slot as u16 * CARD_HEIGHT;
            let area = Rect {
                y: top,
                height: CARD_HEIGHT.min(list.bottom().saturating_sub(top)),
                ..list
            };
            render_card(frame, area, post, index == self.selected, accent);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, post: &PostSummary, selected: bool, accent: Color) {
    let border = if selected {
        Style::new().fg(accent)
    } else {
        Style::new().fg(Color::DarkGray)
    };
    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(border)
        .padding(Padding::horizontal(1));

    let meta = &post.metadata;
    let lines = vec![
        Line::from(vec![
            card_date(meta.date).into(),
            Span::styled("  •  ", Style::new().fg(Color::DarkGray)),
            format!("{} read", post.read_time).into(),
        ]),
        Line::from(meta.title.clone().bold()),
        Line::from(meta.summary.clone().dark_gray()),
    ];

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use ratatui::{Terminal, backend::TestBackend};
    use starfolio_posts::{FsDocumentStore, MemoryDocumentStore};

    use super::*;

    fn doc(title: &str, date: &str) -> String {
        format!("---\ntitle: {title}\ndate: {date}\nsummary: About {title}\n---\nbody\n")
    }

    fn collection() -> PostCollection<MemoryDocumentStore> {
        PostCollection::new(
            MemoryDocumentStore::new()
                .with("a", doc("Alpha", "2024-01-01"))
                .with("b", doc("Beta", "2024-03-01"))
                .with("c", doc("Gamma", "2023-12-31")),
        )
    }

    fn screen(page: &BlogPage) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 24)).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(frame, area, Color::Cyan)
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
    fn test_card_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(card_date(date), "JAN 5, 2024");
    }

    #[test]
    fn test_count_line() {
        assert_eq!(count_line(0), "0 posts so far");
        assert_eq!(count_line(1), "1 post so far");
        assert_eq!(count_line(12), "12 posts so far");
    }

    #[test]
    fn test_selection_is_clamped() {
        let mut page = BlogPage::load(&collection());
        assert_eq!(page.selected_slug(), Some("b"));
        page.select_previous();
        assert_eq!(page.selected(), 0);
        page.select_next();
        page.select_next();
        page.select_next();
        assert_eq!(page.selected_slug(), Some("c"));
        page.select_first();
        assert_eq!(page.selected_slug(), Some("b"));
    }

    #[test]
    fn test_reload_keeps_selected_post() {
        let mut page = BlogPage::load(&collection());
        page.select_next();
        assert_eq!(page.selected_slug(), Some("a"));

        let newer = PostCollection::new(
            collection()
                .store()
                .clone()
                .with("d", doc("Delta", "2025-01-01")),
        );
        page.reload(&newer);
        assert_eq!(page.selected_slug(), Some("a"));
        assert_eq!(page.selected(), 2);
    }

    #[test]
    fn test_render_cards() {
        let page = BlogPage::load(&collection());
        let screen = screen(&page);
        assert!(screen.contains("3 posts so far"));
        assert!(screen.contains("MAR 1, 2024"));
        assert!(screen.contains("1 minute read"));
        assert!(screen.contains("Beta"));
    }

    #[test]
    fn test_unreadable_store_shows_failure() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("blog");
        std::fs::write(&root, "not a directory").unwrap();
        let collection = PostCollection::new(FsDocumentStore::new(&root));
        assert!(collection.list_posts().is_err());

        let page = BlogPage::load(&collection);
        assert!(page.posts().is_none());
        assert_eq!(page.selected_slug(), None);
        let screen = screen(&page);
        assert!(screen.contains(FAILED_MESSAGE));
        assert!(!screen.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn test_render_empty_index() {
        let page = BlogPage::load(&PostCollection::new(MemoryDocumentStore::new()));
        assert!(screen(&page).contains(EMPTY_MESSAGE));
    }
}
