//! The screens of the portfolio and the chrome shared between them.

mod about;
mod blog;
mod post;

pub use about::AboutPage;
pub use blog::{BlogPage, EMPTY_MESSAGE, card_date, count_line};
pub use post::PostPage;

use chrono::{DateTime, FixedOffset, Timelike};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use starfolio_core::TimeFormat;

/// Which screen is showing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Page {
    #[default]
    About,
    Blog,
    Post,
}

impl Page {
    /// Next top-level page for Tab. A post counts as part of the blog.
    pub fn next(self) -> Self {
        match self {
            Page::About => Page::Blog,
            Page::Blog | Page::Post => Page::About,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Page::About => "About",
            Page::Blog | Page::Post => "Blog",
        }
    }
}

/// Local hours during which the owner is assumed to be asleep.
const SLEEP_HOURS: std::ops::Range<u32> = 1..7;

/// What the navigation bar says about the owner's local time.
pub fn city_status(name: &str, local: &DateTime<FixedOffset>, format: TimeFormat) -> String {
    if SLEEP_HOURS.contains(&local.hour()) {
        format!("{name} is likely sleeping..")
    } else {
        format!("{} · {}", format.format(local), card_date(local.naive_local()))
    }
}

/// Top bar: page tabs, with the owner's local time on the left.
pub fn render_nav(frame: &mut Frame, area: Rect, current: Page, status: &str, accent: Color) {
    let mut tabs = Vec::new();
    for page in [Page::About, Page::Blog] {
        if !tabs.is_empty() {
            tabs.push(Span::raw("  "));
        }
        let label = format!(" {} ", page.title());
        if page.title() == current.title() {
            tabs.push(Span::styled(label, Style::new().fg(accent).bold().reversed()));
        } else {
            tabs.push(Span::styled(label, Style::new().bold()));
        }
    }
    frame.render_widget(
        Paragraph::new(Line::from(tabs)).alignment(Alignment::Center),
        area,
    );
    frame.render_widget(Paragraph::new(Line::from(status.to_string().dark_gray())), area);
}

/// Bottom line listing the keys that work on the current page.
pub fn render_help(frame: &mut Frame, area: Rect, page: Page, accent: Color) {
    let mut keys: Vec<(&str, &str)> = vec![("q", "quit"), ("tab", "switch page")];
    match page {
        Page::About => keys.extend([("?", "peek"), ("t", "12/24h"), ("s", "speed")]),
        Page::Blog => keys.extend([("j/k", "select"), ("enter", "read"), ("r", "reload")]),
        Page::Post => keys.extend([("j/k", "scroll"), ("esc", "back"), ("r", "reload")]),
    }
    keys.push(("c", "color"));

    let spans: Vec<Span> = keys
        .into_iter()
        .flat_map(|(key, action)| {
            [
                key.to_string().bold().fg(accent),
                format!(" {action}  ").dark_gray(),
            ]
        })
        .collect();
    frame.render_widget(Line::from(spans).centered(), area);
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn at(hour: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 5, hour, 7, 0)
            .unwrap()
    }

    #[test]
    fn test_tab_cycles_top_level_pages() {
        assert_eq!(Page::About.next(), Page::Blog);
        assert_eq!(Page::Blog.next(), Page::About);
        assert_eq!(Page::Post.next(), Page::About);
    }

    #[test]
    fn test_city_status() {
        assert_eq!(
            city_status("Ada", &at(14), TimeFormat::TwentyFourHour),
            "14:07 · MAR 5, 2024"
        );
        assert_eq!(
            city_status("Ada", &at(14), TimeFormat::TwelveHour),
            "2:07 PM · MAR 5, 2024"
        );
        assert_eq!(
            city_status("Ada", &at(3), TimeFormat::TwentyFourHour),
            "Ada is likely sleeping.."
        );
        assert_eq!(
            city_status("Ada", &at(7), TimeFormat::TwentyFourHour),
            "07:07 · MAR 5, 2024"
        );
    }
}
