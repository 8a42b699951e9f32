//! Core types shared by the starfolio crates.

mod clock;

use chrono::{DateTime, TimeZone};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};

pub use clock::{Clock, ManualClock, SampledClock, SystemClock};

/// Time format for the city clock on the About page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl TimeFormat {
    /// Toggle between 12-hour and 24-hour format.
    pub fn toggle(&self) -> Self {
        match self {
            TimeFormat::TwentyFourHour => TimeFormat::TwelveHour,
            TimeFormat::TwelveHour => TimeFormat::TwentyFourHour,
        }
    }

    /// Format the wall-clock part of a timestamp.
    pub fn format<Tz: TimeZone>(self, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match self {
            TimeFormat::TwentyFourHour => at.format("%H:%M").to_string(),
            TimeFormat::TwelveHour => at.format("%-I:%M %p").to_string(),
        }
    }
}

/// Accent color theme for the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }
}

/// Speed of the warp starfield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationSpeed {
    Slow,
    #[default]
    Medium,
    Fast,
}

impl AnimationSpeed {
    /// Cycle to the next speed.
    pub fn next(&self) -> Self {
        match self {
            AnimationSpeed::Slow => AnimationSpeed::Medium,
            AnimationSpeed::Medium => AnimationSpeed::Fast,
            AnimationSpeed::Fast => AnimationSpeed::Slow,
        }
    }

    /// Base forward velocity of a star, in virtual pixels per frame.
    pub fn warp_speed(self) -> f32 {
        match self {
            AnimationSpeed::Slow => 12.0,
            AnimationSpeed::Medium => 20.0,
            AnimationSpeed::Fast => 32.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AnimationSpeed::Slow => "slow",
            AnimationSpeed::Medium => "medium",
            AnimationSpeed::Fast => "fast",
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, Utc};

    use super::*;

    #[test]
    fn test_color_theme_cycle_returns_to_start() {
        let mut theme = ColorTheme::Cyan;
        for _ in 0..7 {
            theme = theme.next();
        }
        assert_eq!(theme, ColorTheme::Cyan);
        assert_eq!(ColorTheme::Cyan.next(), ColorTheme::Green);
    }

    #[test]
    fn test_time_format_toggle() {
        assert_eq!(TimeFormat::TwentyFourHour.toggle(), TimeFormat::TwelveHour);
        assert_eq!(TimeFormat::TwelveHour.toggle(), TimeFormat::TwentyFourHour);
    }

    #[test]
    fn test_time_format_renders_offset_time() {
        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 13, 5, 0).unwrap();
        let milan = utc.with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(TimeFormat::TwentyFourHour.format(&milan), "15:05");
        assert_eq!(TimeFormat::TwelveHour.format(&milan), "3:05 PM");
    }

    #[test]
    fn test_medium_speed_matches_base_warp_speed() {
        assert_eq!(AnimationSpeed::default(), AnimationSpeed::Medium);
        assert_eq!(AnimationSpeed::Medium.warp_speed(), 20.0);
        assert!(AnimationSpeed::Slow.warp_speed() < AnimationSpeed::Fast.warp_speed());
    }
}
