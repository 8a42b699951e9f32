//! Color helpers for the starfield.

use ratatui::style::Color;
use starfolio_core::ColorTheme;

/// Share of the theme color mixed into a tinted star.
const TINT_MIX: f32 = 0.3;

/// Gray level of a streak drawn over a black surface.
pub fn star_level(brightness: u8, alpha: f32) -> u8 {
    (brightness as f32 * alpha.clamp(0.0, 1.0)).round() as u8
}

/// Terminal color for a gray level.
pub fn gray(level: u8) -> Color {
    Color::Rgb(level, level, level)
}

/// RGB value of a theme accent.
pub fn theme_rgb(theme: ColorTheme) -> (u8, u8, u8) {
    match theme {
        ColorTheme::Cyan => (0, 255, 255),
        ColorTheme::Green => (0, 255, 96),
        ColorTheme::White => (255, 255, 255),
        ColorTheme::Magenta => (255, 0, 255),
        ColorTheme::Yellow => (255, 224, 0),
        ColorTheme::Red => (255, 48, 48),
        ColorTheme::Blue => (64, 128, 255),
    }
}

/// Terminal color for a gray level, optionally shifted toward a tint.
pub fn star_color(level: u8, tint: Option<(u8, u8, u8)>) -> Color {
    let Some((r, g, b)) = tint else {
        return gray(level);
    };
    let scale = level as f32 / 255.0;
    let mix = |channel: u8| {
        let tinted = channel as f32 * scale;
        (level as f32 * (1.0 - TINT_MIX) + tinted * TINT_MIX).round() as u8
    };
    Color::Rgb(mix(r), mix(g), mix(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_level_blends_over_black() {
        assert_eq!(star_level(255, 1.0), 255);
        assert_eq!(star_level(200, 0.0), 0);
        assert_eq!(star_level(200, 0.5), 100);
        assert_eq!(star_level(200, 3.0), 200);
    }

    #[test]
    fn test_untinted_star_is_gray() {
        assert_eq!(star_color(120, None), Color::Rgb(120, 120, 120));
    }

    #[test]
    fn test_tint_keeps_black_and_white_fixed() {
        let white = theme_rgb(ColorTheme::White);
        assert_eq!(star_color(255, Some(white)), Color::Rgb(255, 255, 255));
        assert_eq!(star_color(0, Some(theme_rgb(ColorTheme::Red))), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn test_tint_shifts_toward_theme() {
        let Color::Rgb(r, g, b) = star_color(200, Some(theme_rgb(ColorTheme::Cyan))) else {
            panic!("expected rgb");
        };
        assert!(r < g);
        assert_eq!(g, b);
    }
}
