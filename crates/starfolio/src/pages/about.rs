//! The About page: profile card over the starfield.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Offset, TimeDelta, Utc};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap},
};
use starfolio_config::Profile;
use starfolio_core::{Clock, SampledClock, TimeFormat};

/// Length of a Julian year in milliseconds.
const YEAR_MS: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Widest the profile card gets.
const CARD_WIDTH: u16 = 72;

/// Profile page state.
#[derive(Debug)]
pub struct AboutPage {
    /// City time, refreshed once a minute.
    city_clock: SampledClock,
    show_note: bool,
}

impl AboutPage {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            city_clock: SampledClock::new(clock, TimeDelta::minutes(1)),
            show_note: false,
        }
    }

    /// Refresh the city clock. Returns true if the shown time changed.
    pub fn tick(&mut self) -> bool {
        self.city_clock.tick()
    }

    pub fn toggle_note(&mut self) {
        self.show_note = !self.show_note;
    }

    #[cfg(test)]
    pub fn showing_note(&self) -> bool {
        self.show_note
    }

    /// Last sampled time in a city `offset_hours` from UTC.
    pub fn city_time(&self, offset_hours: i32) -> DateTime<FixedOffset> {
        let offset = offset_hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());
        self.city_clock.sample().with_timezone(&offset)
    }

    /// Age readout, read from the live clock rather than the sampled one.
    pub fn age(&self, born: DateTime<Utc>) -> String {
        format!("{:.10}", precise_age(born, self.city_clock.source().now()))
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        profile: &Profile,
        format: TimeFormat,
        accent: Color,
    ) {
        let mut lines = vec![
            Line::from(vec![
                "Hi, I'm ".into(),
                profile.name.clone().bold().fg(accent),
                ",".into(),
            ]),
            Line::from(profile.headline.clone()),
            Line::default(),
        ];
        for highlight in &profile.highlights {
            lines.push(Line::from(vec![
                Span::styled("  • ", Style::new().fg(accent)),
                highlight.clone().into(),
            ]));
        }
        if !profile.highlights.is_empty() {
            lines.push(Line::default());
        }
        lines.push(Line::from(profile.closing.clone().italic()));
        lines.push(Line::default());

        let city_time = self.city_time(profile.utc_offset_hours);
        lines.push(Line::from(vec![
            "It's ".dark_gray(),
            format.format(&city_time).bold(),
            format!(" in {} right now.", profile.city).dark_gray(),
        ]));
        if let Some(born) = profile.born {
            lines.push(Line::from(vec![
                "I am precisely ".dark_gray(),
                self.age(born).fg(accent),
                " years old.".dark_gray(),
            ]));
        }

        if self.show_note {
            lines.push(Line::default());
            lines.push(Line::from(profile.simulation_note.clone().fg(accent)));
        }

        let body_width = CARD_WIDTH.min(area.width.saturating_sub(4)).max(1);
        let height = wrapped_height(&lines, body_width.saturating_sub(4)) + 2;

        let [card] = Layout::horizontal([Constraint::Length(body_width)])
            .flex(Flex::Center)
            .areas(area);
        let [card] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(card);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(Color::DarkGray))
            .title_bottom(Line::from(profile.footer.clone().dark_gray()).centered());

        frame.render_widget(Clear, card);
        frame.render_widget(
            Paragraph::new(lines)
                .block(block.padding(Padding::horizontal(1)))
                .wrap(Wrap { trim: false }),
            card,
        );
    }
}

/// Years between `born` and `now`, as a fraction.
pub fn precise_age(born: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    (now - born).num_milliseconds() as f64 / YEAR_MS
}

/// Rows `lines` take once wrapped at `width` columns. Word wrapping can
/// need a row more than the character count suggests.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| match line.width().max(1).div_ceil(width) {
            1 => 1,
            rows => rows as u16 + 1,
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use ratatui::{Terminal, backend::TestBackend};
    use starfolio_core::ManualClock;

    use super::*;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_precise_age() {
        let born = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
        let now = born + TimeDelta::milliseconds(YEAR_MS as i64 * 3 / 2);
        assert!((precise_age(born, now) - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_city_time_follows_sample_interval() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut page = AboutPage::new(clock.clone());
        assert_eq!(page.city_time(2).to_rfc3339(), "2024-06-01T12:00:00+02:00");

        clock.advance(TimeDelta::seconds(30));
        assert!(!page.tick());
        assert_eq!(page.city_time(2).to_rfc3339(), "2024-06-01T12:00:00+02:00");

        clock.advance(TimeDelta::seconds(30));
        assert!(page.tick());
        assert_eq!(page.city_time(-5).to_rfc3339(), "2024-06-01T05:01:00-05:00");
    }

    #[test]
    fn test_out_of_range_offset_falls_back_to_utc() {
        let page = AboutPage::new(Arc::new(ManualClock::new(start())));
        for hours in [24, -30, 1_000_000, i32::MIN] {
            assert_eq!(page.city_time(hours).to_rfc3339(), "2024-06-01T10:00:00+00:00");
        }
    }

    #[test]
    fn test_age_reads_live_clock() {
        let clock = Arc::new(ManualClock::new(start()));
        let page = AboutPage::new(clock.clone());
        let born = start() - TimeDelta::milliseconds(YEAR_MS as i64 * 20);
        assert_eq!(page.age(born), "20.0000000000");

        clock.advance(TimeDelta::milliseconds(YEAR_MS as i64 / 2));
        assert_eq!(page.age(born), "20.5000000000");
    }

    #[test]
    fn test_render_shows_profile() {
        let clock = Arc::new(ManualClock::new(start()));
        let mut page = AboutPage::new(clock);
        let profile = Profile {
            name: "Ada".to_string(),
            simulation_note: "behind the curtain".to_string(),
            ..Profile::default()
        };

        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        page.toggle_note();
        terminal
            .draw(|frame| {
                let area = frame.area();
                page.render(
                    frame,
                    area,
                    &profile,
                    TimeFormat::TwentyFourHour,
                    Color::Cyan,
                )
            })
            .unwrap();

        let screen: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("Ada"));
        assert!(screen.contains("12:00"));
        assert!(screen.contains("behind the curtain"));
    }
}
