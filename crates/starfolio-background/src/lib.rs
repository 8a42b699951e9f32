//! Warp-drive starfield background for starfolio.
//!
//! [`WarpDrive`] is the simulation: a fixed pool of stars flying toward the
//! viewer, projected every frame into streaks. [`BackgroundState`] owns the
//! engine for a view, paces it at 60 frames per second and draws it onto a
//! ratatui frame through the [`Rasterizer`].

mod chars;
mod color;
mod raster;
mod star;
mod state;
mod warp;

pub use raster::{CELL_HEIGHT, CELL_WIDTH, Rasterizer, surface_for_cells};
pub use star::Star;
pub use state::BackgroundState;
pub use warp::{
    BASE_SPEED, STAR_COUNT, Streak, SurfaceError, SurfaceSize, WarpConfig, WarpDrive, project,
};
