//! Warp-drive starfield engine.
//!
//! A fixed pool of stars flies toward the viewer. Every frame each star moves
//! forward by its speed and is projected onto the surface; the segment between
//! its projection at the previous depth and at the current depth is the
//! streak that gets drawn.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::star::Star;

/// Number of stars in the default pool.
pub const STAR_COUNT: usize = 1000;

/// Base forward velocity in virtual pixels per frame.
pub const BASE_SPEED: f32 = 20.0;

/// Errors raised when starting the engine.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("drawing surface unavailable ({width}x{height})")]
    Unavailable { width: f32, height: f32 },
}

/// Dimensions of the drawing surface in virtual pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    fn is_drawable(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    fn contains(self, x: f32, y: f32) -> bool {
        x >= 0.0 && x < self.width && y >= 0.0 && y < self.height
    }
}

/// Engine parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WarpConfig {
    pub star_count: usize,
    pub base_speed: f32,
    /// Seed for the star generator; `None` draws one from the system time.
    pub seed: Option<u64>,
}

impl Default for WarpConfig {
    fn default() -> Self {
        Self {
            star_count: STAR_COUNT,
            base_speed: BASE_SPEED,
            seed: None,
        }
    }
}

/// A projected star, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    /// Projection at the current depth.
    pub head: (f32, f32),
    /// Projection at the previous depth.
    pub tail: (f32, f32),
    /// Opacity, 0.0 at the back of the field.
    pub alpha: f32,
    /// Gray level of the streak before opacity is applied.
    pub brightness: u8,
    /// Line thickness in virtual pixels.
    pub thickness: f32,
}

/// Project a star onto the surface.
///
/// Returns `None` when the current position falls outside the surface.
pub fn project(star: &Star, size: SurfaceSize) -> Option<Streak> {
    let (cx, cy) = size.center();
    let head = (
        cx + star.x / star.z * size.width,
        cy + star.y / star.z * size.height,
    );
    if !size.contains(head.0, head.1) {
        return None;
    }

    let pz = star.previous_z();
    let tail = (cx + star.x / pz * size.width, cy + star.y / pz * size.height);

    let closeness = star.closeness(size.width);
    Some(Streak {
        head,
        tail,
        alpha: closeness,
        brightness: (200.0 + closeness * 55.0).min(255.0) as u8,
        thickness: 2.0 * closeness,
    })
}

/// The star pool and its animation state.
#[derive(Debug)]
pub struct WarpDrive {
    stars: Vec<Star>,
    size: SurfaceSize,
    rng: StdRng,
    frames: u64,
}

impl WarpDrive {
    /// Start the engine on a surface.
    pub fn new(size: SurfaceSize, config: WarpConfig) -> Result<Self, SurfaceError> {
        if !size.is_drawable() {
            return Err(SurfaceError::Unavailable {
                width: size.width,
                height: size.height,
            });
        }

        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(time_seed));
        let stars = (0..config.star_count)
            .map(|_| Star::spawn(&mut rng, size, config.base_speed))
            .collect();

        Ok(Self {
            stars,
            size,
            rng,
            frames: 0,
        })
    }

    /// Advance every star by one frame.
    pub fn step(&mut self) {
        let size = self.size;
        for star in &mut self.stars {
            star.advance(&mut self.rng, size);
        }
        self.frames += 1;
    }

    /// Advance by `frames` frames.
    pub fn advance(&mut self, frames: u32) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Adopt new surface dimensions.
    ///
    /// Stars keep their virtual coordinates. Depths beyond the new width are
    /// pulled in so every star stays inside the field.
    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), SurfaceError> {
        if !size.is_drawable() {
            return Err(SurfaceError::Unavailable {
                width: size.width,
                height: size.height,
            });
        }
        self.size = size;
        for star in &mut self.stars {
            star.z = star.z.min(size.width);
        }
        Ok(())
    }

    /// Streaks for the current frame, culled to the surface.
    pub fn streaks(&self) -> impl Iterator<Item = Streak> + '_ {
        self.stars.iter().filter_map(|star| project(star, self.size))
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Frames simulated since start.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

fn time_seed() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
