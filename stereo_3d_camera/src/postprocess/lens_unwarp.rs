//! Lens unwarp inputs for side-by-side headsets.

use glam::Vec2;
use crate::camera::Eye;
use crate::display::DisplayParameters;
use crate::error::{Error, Result};

/// Inputs of the lens unwarp pass for one eye.
///
/// Each eye renders into its half of the canvas; texture coordinates are
/// normalized to that half.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LensUnwarpParams {
    pub eye: Eye,
    /// Lens center in normalized viewport coordinates
    pub center_coordinate: Vec2,
    /// Viewport size in mm
    pub viewport_size: Vec2,
    /// `[K1, K2]`
    pub distortion_coefficients: Vec2,
    /// Lens-screen distance in mm
    pub distance_lens_screen: f32,
}

impl LensUnwarpParams {
    /// # Errors
    ///
    /// `Error::InvalidParameter` for `Eye::Mono`: unwarp needs a per-eye viewport.
    pub fn for_eye(display: &DisplayParameters, eye: Eye) -> Result<Self> {
        let viewport_size = Vec2::new(display.canvas_width_mm() / 2.0, display.canvas_height_mm());

        // Lenses sit ipd/2 either side of the canvas center
        let nose_offset = (display.ipd / 2.0) / viewport_size.x;
        let center_x = match eye {
            Eye::Left => 1.0 - nose_offset,
            Eye::Right => nose_offset,
            Eye::Mono => {
                return Err(Error::InvalidParameter(
                    "lens unwarp needs a Left or Right eye".to_string(),
                ))
            }
        };

        Ok(Self {
            eye,
            center_coordinate: Vec2::new(center_x, 0.5),
            viewport_size,
            distortion_coefficients: Vec2::from(display.distortion_coefficients),
            distance_lens_screen: display.distance_lens_screen,
        })
    }

    /// Radial scale `1 + K1 r² + K2 r⁴`, with r the distance from the lens
    /// center in mm divided by the lens-screen distance.
    pub fn distortion_scale(&self, uv: Vec2) -> f32 {
        let r = ((uv - self.center_coordinate) * self.viewport_size).length() / self.distance_lens_screen;
        let r2 = r * r;
        1.0 + self.distortion_coefficients.x * r2 + self.distortion_coefficients.y * r2 * r2
    }

    /// Texture coordinate to sample for output coordinate `uv`, or `None`
    /// when it falls outside the rendered viewport.
    ///
    /// The offset from the lens center is scaled, not `uv` itself: shaders
    /// that compute `uv * scale` distort about the texture origin instead.
    pub fn distort(&self, uv: Vec2) -> Option<Vec2> {
        let sample = self.center_coordinate + (uv - self.center_coordinate) * self.distortion_scale(uv);
        let inside = (0.0..1.0).contains(&sample.x) && (0.0..1.0).contains(&sample.y);
        inside.then_some(sample)
    }
}

#[cfg(test)]
#[path = "lens_unwarp_tests.rs"]
mod tests;
