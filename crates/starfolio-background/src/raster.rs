//! Streak rasterization onto terminal cells.

use ratatui::{
    style::Style,
    text::{Line, Span},
};

use crate::chars::{FALLING, HEAD_CHARS, HORIZONTAL, RISING, VERTICAL};
use starfolio_core::ColorTheme;

use crate::color::{star_color, star_level, theme_rgb};
use crate::warp::{Streak, SurfaceSize};

/// Width of one terminal cell in virtual pixels.
pub const CELL_WIDTH: f32 = 8.0;
/// Height of one terminal cell in virtual pixels.
pub const CELL_HEIGHT: f32 = 16.0;

/// Gray levels below this are invisible against the black surface.
const MIN_LEVEL: u8 = 24;

/// Virtual surface covered by a grid of terminal cells.
pub fn surface_for_cells(cols: u16, rows: u16) -> SurfaceSize {
    SurfaceSize::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    level: u8,
}

/// A grid of cells that streaks are drawn into.
#[derive(Debug)]
pub struct Rasterizer {
    cols: u16,
    rows: u16,
    cells: Vec<Option<Cell>>,
    tint: Option<(u8, u8, u8)>,
}

impl Rasterizer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows,
            cells: vec![None; cols as usize * rows as usize],
            tint: None,
        }
    }

    /// Shift star colors toward a theme accent.
    pub fn with_tint(mut self, theme: ColorTheme) -> Self {
        self.tint = Some(theme_rgb(theme));
        self
    }

    /// Draw a streak from its tail to its head.
    pub fn draw(&mut self, streak: &Streak) {
        let level = star_level(streak.brightness, streak.alpha);
        if level < MIN_LEVEL {
            return;
        }

        let (x0, y0) = to_cell(streak.tail);
        let (x1, y1) = to_cell(streak.head);
        let body = body_glyph(
            streak.head.0 - streak.tail.0,
            streak.head.1 - streak.tail.1,
        );

        for (x, y) in line_cells(x0, y0, x1, y1) {
            let glyph = if (x, y) == (x1, y1) {
                head_glyph(streak.thickness)
            } else {
                body
            };
            self.plot(x, y, Cell { glyph, level });
        }
    }

    /// Glyph at a cell, if anything was drawn there.
    pub fn glyph_at(&self, x: u16, y: u16) -> Option<char> {
        self.index(x as i32, y as i32)
            .and_then(|i| self.cells[i])
            .map(|cell| cell.glyph)
    }

    /// Number of cells that were drawn.
    pub fn lit_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Convert the grid to styled lines, one per row.
    pub fn into_lines(self) -> Vec<Line<'static>> {
        let cols = self.cols as usize;
        let tint = self.tint;
        if cols == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(cols)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(cell) => Span::styled(
                            cell.glyph.to_string(),
                            Style::new().fg(star_color(cell.level, tint)),
                        ),
                        None => Span::raw(" "),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn plot(&mut self, x: i32, y: i32, cell: Cell) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        // Brighter star wins the cell
        match self.cells[i] {
            Some(existing) if existing.level >= cell.level => {}
            _ => self.cells[i] = Some(cell),
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
            return None;
        }
        Some(y as usize * self.cols as usize + x as usize)
    }
}

fn to_cell((x, y): (f32, f32)) -> (i32, i32) {
    ((x / CELL_WIDTH).floor() as i32, (y / CELL_HEIGHT).floor() as i32)
}

fn head_glyph(thickness: f32) -> char {
    if thickness < 0.6 {
        HEAD_CHARS[0]
    } else if thickness < 1.3 {
        HEAD_CHARS[1]
    } else {
        HEAD_CHARS[2]
    }
}

/// Body glyph for a streak moving by `(dx, dy)` virtual pixels.
fn body_glyph(dx: f32, dy: f32) -> char {
    let angle = dy.atan2(dx).abs();
    let flat = std::f32::consts::PI / 8.0;
    if angle < flat || angle > std::f32::consts::PI - flat {
        HORIZONTAL
    } else if (angle - std::f32::consts::FRAC_PI_2).abs() < flat {
        VERTICAL
    } else if dx * dy > 0.0 {
        FALLING
    } else {
        RISING
    }
}

/// Cells on the line from `(x0, y0)` to `(x1, y1)`, both ends included.
fn line_cells(x0: i32, y0: i32, x1: i32, y1: i32) -> Vec<(i32, i32)> {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };

    let mut cells = Vec::with_capacity((dx - dy) as usize + 1);
    let (mut x, mut y) = (x0, y0);
    let mut err = dx + dy;
    loop {
        cells.push((x, y));
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    fn streak(tail: (f32, f32), head: (f32, f32), alpha: f32) -> Streak {
        Streak {
            head,
            tail,
            alpha,
            brightness: 255,
            thickness: 2.0 * alpha,
        }
    }

    #[test]
    fn test_surface_for_cells() {
        assert_eq!(surface_for_cells(80, 24), SurfaceSize::new(640.0, 384.0));
    }

    #[test]
    fn test_line_cells_includes_both_ends() {
        assert_eq!(line_cells(0, 0, 3, 0), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line_cells(2, 2, 2, 2), vec![(2, 2)]);
        let diagonal = line_cells(0, 0, -2, 2);
        assert_eq!(diagonal.first(), Some(&(0, 0)));
        assert_eq!(diagonal.last(), Some(&(-2, 2)));
    }

    #[test]
    fn test_horizontal_streak_draws_body_and_head() {
        let mut raster = Rasterizer::new(10, 3);
        raster.draw(&streak((4.0, 20.0), (36.0, 20.0), 0.9));

        assert_eq!(raster.glyph_at(0, 1), Some(HORIZONTAL));
        assert_eq!(raster.glyph_at(3, 1), Some(HORIZONTAL));
        assert_eq!(raster.glyph_at(4, 1), Some('●'));
        assert_eq!(raster.glyph_at(5, 1), None);
        assert_eq!(raster.lit_cells(), 5);
    }

    #[test]
    fn test_faint_streak_is_skipped() {
        let mut raster = Rasterizer::new(10, 3);
        raster.draw(&streak((4.0, 20.0), (36.0, 20.0), 0.05));
        assert_eq!(raster.lit_cells(), 0);
    }

    #[test]
    fn test_body_glyph_directions() {
        assert_eq!(body_glyph(10.0, 0.0), HORIZONTAL);
        assert_eq!(body_glyph(-10.0, 1.0), HORIZONTAL);
        assert_eq!(body_glyph(0.0, -10.0), VERTICAL);
        assert_eq!(body_glyph(10.0, 10.0), FALLING);
        assert_eq!(body_glyph(-10.0, -10.0), FALLING);
        assert_eq!(body_glyph(10.0, -10.0), RISING);
    }

    #[test]
    fn test_brighter_streak_wins_shared_cell() {
        let mut raster = Rasterizer::new(4, 1);
        raster.draw(&streak((12.0, 4.0), (12.0, 4.0), 0.9));
        raster.draw(&streak((12.0, 4.0), (12.0, 4.0), 0.2));
        assert_eq!(raster.glyph_at(1, 0), Some('●'));
    }

    #[test]
    fn test_into_lines_has_one_line_per_row() {
        let mut raster = Rasterizer::new(6, 4);
        raster.draw(&streak((20.0, 40.0), (20.0, 40.0), 1.0));
        let lines = raster.into_lines();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|line| line.spans.len() == 6));
        assert_eq!(lines[2].spans[2].content, "●");
    }

    #[test]
    fn test_tinted_raster_colors_stars() {
        let mut raster = Rasterizer::new(2, 1).with_tint(ColorTheme::Blue);
        raster.draw(&streak((4.0, 4.0), (4.0, 4.0), 1.0));
        let lines = raster.into_lines();
        let fg = lines[0].spans[0].style.fg;
        assert!(matches!(fg, Some(ratatui::style::Color::Rgb(r, _, b)) if b > r));
    }
}
