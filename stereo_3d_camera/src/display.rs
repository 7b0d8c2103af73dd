//! Display optics, fixed for the lifetime of a `TransformEngine`.
//!
//! All physical quantities are in millimeters.

use crate::error::{Error, Result};

/// Physical description of the display and the viewer's eyes.
///
/// Owned by the host; the engine copies it at construction and never
/// mutates it. Changing display geometry means building a new engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayParameters {
    /// Canvas width in pixels (both eyes for side-by-side lens stereo)
    pub canvas_width: u32,
    /// Canvas height in pixels
    pub canvas_height: u32,
    /// Size of one pixel in mm
    pub pixel_pitch: f32,
    /// Interpupillary distance in mm
    pub ipd: f32,
    /// Distance from the screen (or the lens virtual image) to the viewer in mm
    pub distance_screen_viewer: f32,
    /// Lens magnification (1.0 without optics)
    pub lens_magnification: f32,
    /// Distance between lens and screen in mm (lens unwarp)
    pub distance_lens_screen: f32,
    /// Radial distortion coefficients `[K1, K2]` (lens unwarp)
    pub distortion_coefficients: [f32; 2],
}

impl DisplayParameters {
    /// Canvas width in mm.
    pub fn canvas_width_mm(&self) -> f32 {
        self.canvas_width as f32 * self.pixel_pitch
    }

    /// Canvas height in mm.
    pub fn canvas_height_mm(&self) -> f32 {
        self.canvas_height as f32 * self.pixel_pitch
    }

    /// Check that every optical quantity is finite and positive.
    ///
    /// The transform math does not call this; hosts call it once when the
    /// session starts.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(Error::InvalidParameter(format!(
                "canvas must be non-empty, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }

        let positives = [
            ("pixel_pitch", self.pixel_pitch),
            ("distance_screen_viewer", self.distance_screen_viewer),
            ("lens_magnification", self.lens_magnification),
            ("distance_lens_screen", self.distance_lens_screen),
        ];
        for (name, value) in positives {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidParameter(format!(
                    "{} must be finite and positive, got {}",
                    name, value
                )));
            }
        }

        if !self.ipd.is_finite() || self.ipd < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "ipd must be finite and non-negative, got {}",
                self.ipd
            )));
        }

        if self.distortion_coefficients.iter().any(|k| !k.is_finite()) {
            return Err(Error::InvalidParameter(
                "distortion coefficients must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for DisplayParameters {
    /// 1920x1080 desktop monitor at 0.3 mm pitch viewed from 60 cm, no lens.
    fn default() -> Self {
        Self {
            canvas_width: 1920,
            canvas_height: 1080,
            pixel_pitch: 0.3,
            ipd: 64.0,
            distance_screen_viewer: 600.0,
            lens_magnification: 1.0,
            distance_lens_screen: 600.0,
            distortion_coefficients: [0.0, 0.0],
        }
    }
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
