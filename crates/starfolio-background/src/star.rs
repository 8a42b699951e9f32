//! A single star of the warp field.

use rand::Rng;

use crate::warp::SurfaceSize;

/// One star in virtual 3D space.
///
/// `x` and `y` are offsets from the surface centre, `z` is the distance from
/// the viewer. `z` stays in `(0, width]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Forward velocity in virtual pixels per frame.
    pub speed: f32,
}

impl Star {
    /// Create a star somewhere in the field, at a random depth.
    pub fn spawn<R: Rng>(rng: &mut R, size: SurfaceSize, base_speed: f32) -> Self {
        let mut star = Self {
            x: 0.0,
            y: 0.0,
            z: random_depth(rng, size.width),
            // Slight variation so the field doesn't move as one sheet
            speed: base_speed * rng.gen_range(0.9..=1.1),
        };
        star.scatter(rng, size);
        star
    }

    /// Move the star one frame toward the viewer.
    ///
    /// Returns true when the star passed the viewer and was respawned at the
    /// back of the field.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, size: SurfaceSize) -> bool {
        self.z -= self.speed;
        if self.z <= 0.0 {
            self.z = size.width;
            self.scatter(rng, size);
            return true;
        }
        false
    }

    /// Depth of the star one frame ago.
    pub fn previous_z(&self) -> f32 {
        self.z + self.speed
    }

    /// 0.0 at the back of the field, approaching 1.0 at the viewer.
    pub fn closeness(&self, width: f32) -> f32 {
        (1.0 - self.z / width).clamp(0.0, 1.0)
    }

    fn scatter<R: Rng>(&mut self, rng: &mut R, size: SurfaceSize) {
        self.x = rng.gen_range(-size.width..=size.width);
        self.y = rng.gen_range(-size.height..=size.height);
    }
}

/// Uniform depth over `(0, width]`.
fn random_depth<R: Rng>(rng: &mut R, width: f32) -> f32 {
    let depth = width - rng.gen_range(0.0..width);
    // Rounding can land exactly on zero for tiny widths
    if depth > 0.0 { depth } else { width }
}
