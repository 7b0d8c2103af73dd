//! Foveated blur inputs: eccentricity layers around the gaze point and the
//! Gaussian kernels of the blurred layers.

use glam::Vec2;
use crate::display::DisplayParameters;
use crate::error::{Error, Result};

/// Blur kernel radius of the middle layer, in pixels.
pub const MIDDLE_KERNEL_RADIUS: usize = 2;
/// Blur kernel radius of the outer layer, in pixels.
pub const OUTER_KERNEL_RADIUS: usize = 4;

const MIDDLE_KERNEL_SIZE: usize = 2 * MIDDLE_KERNEL_RADIUS + 1;
const OUTER_KERNEL_SIZE: usize = 2 * OUTER_KERNEL_RADIUS + 1;

/// Visual angle subtended by one pixel at the viewing distance, in degrees.
pub fn pixel_visual_angle(display: &DisplayParameters) -> f32 {
    (display.pixel_pitch / display.distance_screen_viewer).atan().to_degrees()
}

/// Normalized 1-D Gaussian kernel of `N` taps centered on `N / 2`.
///
/// The 2-D kernel is the outer product of this one with itself.
pub fn gaussian_kernel<const N: usize>(sigma: f32) -> [f32; N] {
    let radius = (N / 2) as f32;
    let mut kernel = [0.0; N];
    for (i, weight) in kernel.iter_mut().enumerate() {
        let x = i as f32 - radius;
        *weight = (-(x * x) / (2.0 * sigma * sigma)).exp();
    }
    let sum: f32 = kernel.iter().sum();
    for weight in &mut kernel {
        *weight /= sum;
    }
    kernel
}

/// Blur layer of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoveationLayer {
    /// Eccentricity up to e1: untouched
    Foveal,
    /// Between e1 and e2: middle kernel
    Middle,
    /// Beyond e2: outer kernel
    Outer,
}

/// Inputs of the foveated blur pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoveationParams {
    pub window_size: Vec2,
    pub gaze_position: Vec2,
    /// Eccentricity at the foveal/middle boundary, degrees
    pub e1: f32,
    /// Eccentricity at the middle/outer boundary, degrees
    pub e2: f32,
    /// Degrees per pixel
    pub pixel_visual_angle: f32,
    pub middle_kernel: [f32; MIDDLE_KERNEL_SIZE],
    pub outer_kernel: [f32; OUTER_KERNEL_SIZE],
}

impl FoveationParams {
    /// # Errors
    ///
    /// `Error::InvalidParameter` unless `0 <= e1 < e2`.
    pub fn new(display: &DisplayParameters, gaze_position: Vec2, e1: f32, e2: f32) -> Result<Self> {
        if !(e1 >= 0.0 && e1 < e2 && e2.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "eccentricity layers must satisfy 0 <= e1 < e2, got e1 = {}, e2 = {}",
                e1, e2
            )));
        }

        Ok(Self {
            window_size: Vec2::new(display.canvas_width as f32, display.canvas_height as f32),
            gaze_position,
            e1,
            e2,
            pixel_visual_angle: pixel_visual_angle(display),
            middle_kernel: gaussian_kernel(MIDDLE_KERNEL_RADIUS as f32 / 2.0),
            outer_kernel: gaussian_kernel(OUTER_KERNEL_RADIUS as f32 / 2.0),
        })
    }

    /// Angular distance of a window pixel from the gaze point, in degrees.
    pub fn eccentricity(&self, fragment: Vec2) -> f32 {
        fragment.distance(self.gaze_position) * self.pixel_visual_angle
    }

    pub fn layer(&self, fragment: Vec2) -> FoveationLayer {
        let e = self.eccentricity(fragment);
        if e > self.e2 {
            FoveationLayer::Outer
        } else if e > self.e1 {
            FoveationLayer::Middle
        } else {
            FoveationLayer::Foveal
        }
    }
}

#[cfg(test)]
#[path = "foveation_tests.rs"]
mod tests;
