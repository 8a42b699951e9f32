//! Background animation state management.

use ratatui::{Frame, widgets::Paragraph};
use starfolio_core::{AnimationSpeed, ColorTheme};
use tracing::{debug, warn};

use crate::raster::{Rasterizer, surface_for_cells};
use crate::warp::{WarpConfig, WarpDrive};

/// Length of one animation frame at 60 Hz, in milliseconds.
const FRAME_MS: f32 = 1000.0 / 60.0;

/// Frames simulated at most per render, so a stalled terminal doesn't
/// make the field jump.
const MAX_CATCHUP_FRAMES: u32 = 4;

/// Warp starfield background.
///
/// The engine only exists while the background is active. Activation is
/// lazy: the engine starts on the first render, once the surface size is
/// known.
#[derive(Debug)]
pub struct BackgroundState {
    /// Running engine, if started.
    drive: Option<WarpDrive>,
    /// Parameters for the next start.
    config: WarpConfig,
    /// Whether the owning view wants the animation.
    active: bool,
    /// Accent mixed into star colors.
    tint: Option<ColorTheme>,
    /// Last known terminal width.
    last_width: u16,
    /// Last known terminal height.
    last_height: u16,
    /// Last update time in milliseconds.
    last_update_ms: u64,
    /// Milliseconds not yet turned into frames.
    pending_ms: f32,
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self::new(WarpConfig::default())
    }
}

impl BackgroundState {
    /// Create an inactive background.
    pub fn new(config: WarpConfig) -> Self {
        Self {
            drive: None,
            config,
            active: false,
            tint: None,
            last_width: 0,
            last_height: 0,
            last_update_ms: 0,
            pending_ms: 0.0,
        }
    }

    /// Request the animation; the engine starts on the next render.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Stop the animation and drop the star pool.
    pub fn deactivate(&mut self) {
        if self.drive.take().is_some() {
            debug!("starfield stopped");
        }
        self.active = false;
        self.pending_ms = 0.0;
    }

    /// Whether the engine is currently running.
    pub fn is_running(&self) -> bool {
        self.drive.is_some()
    }

    /// Change the star speed. A running field restarts on the next render.
    pub fn set_speed(&mut self, speed: AnimationSpeed) {
        self.config.base_speed = speed.warp_speed();
        self.drive = None;
    }

    /// Tint the stars with a theme accent, or draw them gray.
    pub fn set_tint(&mut self, tint: Option<ColorTheme>) {
        self.tint = tint;
    }

    pub fn drive(&self) -> Option<&WarpDrive> {
        self.drive.as_ref()
    }

    /// Render the background to the frame.
    pub fn render(&mut self, frame: &mut Frame, elapsed_ms: u64) {
        if !self.active {
            return;
        }

        let area = frame.area();
        let width = area.width;
        let height = area.height;

        if !self.ensure_started(width, height, elapsed_ms) {
            return;
        }

        // Calculate frames due since the last render
        let delta_ms = elapsed_ms.saturating_sub(self.last_update_ms);
        self.last_update_ms = elapsed_ms;
        let frames = self.frames_due(delta_ms);

        let Some(drive) = self.drive.as_mut() else {
            return;
        };
        drive.advance(frames);

        let mut raster = Rasterizer::new(width, height);
        if let Some(theme) = self.tint {
            raster = raster.with_tint(theme);
        }
        for streak in drive.streaks() {
            raster.draw(&streak);
        }

        frame.render_widget(Paragraph::new(raster.into_lines()), area);
    }

    /// Start the engine or follow a size change. Returns false if there is
    /// nothing to draw on.
    fn ensure_started(&mut self, width: u16, height: u16, elapsed_ms: u64) -> bool {
        let size = surface_for_cells(width, height);

        let Some(drive) = self.drive.as_mut() else {
            return match WarpDrive::new(size, self.config) {
                Ok(drive) => {
                    debug!(width, height, stars = self.config.star_count, "starfield started");
                    self.drive = Some(drive);
                    self.last_width = width;
                    self.last_height = height;
                    self.last_update_ms = elapsed_ms;
                    true
                }
                Err(e) => {
                    // No retry until the view activates the background again
                    warn!(error = %e, "starfield not started");
                    self.active = false;
                    false
                }
            };
        };

        if width != self.last_width || height != self.last_height {
            if let Err(e) = drive.resize(size) {
                debug!(error = %e, "skipping frame on empty surface");
                return false;
            }
            self.last_width = width;
            self.last_height = height;
        }
        true
    }

    fn frames_due(&mut self, delta_ms: u64) -> u32 {
        self.pending_ms += delta_ms as f32;
        let frames = (self.pending_ms / FRAME_MS).floor();
        self.pending_ms -= frames * FRAME_MS;
        if frames > MAX_CATCHUP_FRAMES as f32 {
            self.pending_ms = 0.0;
            return MAX_CATCHUP_FRAMES;
        }
        frames as u32
    }
}
